//! Resource types and the resource envelope.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A category of clinical entity that is queried independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// A patient record.
    Patient,
    /// A care provider.
    Practitioner,
    /// An organization.
    Organization,
    /// An encounter between patient and provider.
    Encounter,
    /// A clinical observation.
    Observation,
    /// A condition or diagnosis.
    Condition,
    /// An immunization event.
    Immunization,
    /// A medication.
    Medication,
    /// A medication request.
    MedicationRequest,
    /// A diagnostic report.
    DiagnosticReport,
    /// A clinical procedure.
    Procedure,
    /// A questionnaire definition.
    Questionnaire,
    /// A filled-in questionnaire.
    QuestionnaireResponse,
    /// A bundle of resources.
    Bundle,
    /// An operation outcome payload.
    OperationOutcome,
    /// Any other resource type, validated on parse.
    #[serde(untagged)]
    Custom(String),
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Patient => write!(f, "Patient"),
            ResourceType::Practitioner => write!(f, "Practitioner"),
            ResourceType::Organization => write!(f, "Organization"),
            ResourceType::Encounter => write!(f, "Encounter"),
            ResourceType::Observation => write!(f, "Observation"),
            ResourceType::Condition => write!(f, "Condition"),
            ResourceType::Immunization => write!(f, "Immunization"),
            ResourceType::Medication => write!(f, "Medication"),
            ResourceType::MedicationRequest => write!(f, "MedicationRequest"),
            ResourceType::DiagnosticReport => write!(f, "DiagnosticReport"),
            ResourceType::Procedure => write!(f, "Procedure"),
            ResourceType::Questionnaire => write!(f, "Questionnaire"),
            ResourceType::QuestionnaireResponse => write!(f, "QuestionnaireResponse"),
            ResourceType::Bundle => write!(f, "Bundle"),
            ResourceType::OperationOutcome => write!(f, "OperationOutcome"),
            ResourceType::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for ResourceType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(ResourceType::Patient),
            "Practitioner" => Ok(ResourceType::Practitioner),
            "Organization" => Ok(ResourceType::Organization),
            "Encounter" => Ok(ResourceType::Encounter),
            "Observation" => Ok(ResourceType::Observation),
            "Condition" => Ok(ResourceType::Condition),
            "Immunization" => Ok(ResourceType::Immunization),
            "Medication" => Ok(ResourceType::Medication),
            "MedicationRequest" => Ok(ResourceType::MedicationRequest),
            "DiagnosticReport" => Ok(ResourceType::DiagnosticReport),
            "Procedure" => Ok(ResourceType::Procedure),
            "Questionnaire" => Ok(ResourceType::Questionnaire),
            "QuestionnaireResponse" => Ok(ResourceType::QuestionnaireResponse),
            "Bundle" => Ok(ResourceType::Bundle),
            "OperationOutcome" => Ok(ResourceType::OperationOutcome),
            name => {
                if is_valid_resource_type_name(name) {
                    Ok(ResourceType::Custom(name.to_string()))
                } else {
                    Err(ModelError::InvalidResourceType(name.to_string()))
                }
            }
        }
    }
}

/// Validates a FHIR resource type name: non-empty, ASCII alphabetic,
/// leading uppercase.
pub fn is_valid_resource_type_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .next()
            .map(|c| c.is_ascii_uppercase())
            .unwrap_or(false)
        && name.chars().all(|c| c.is_ascii_alphabetic())
}

/// Resource metadata. Only `lastUpdated` is inspected by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResourceMeta {
    /// Server-side last update timestamp (ISO-8601).
    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Server-side version identifier.
    #[serde(rename = "versionId", skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// A downloaded entity.
///
/// The envelope models only the fields the sync engine inspects
/// (`resourceType`, `id`, `meta.lastUpdated`); everything else the server
/// sent is preserved in the flattened `data` map so callers can persist
/// the resource losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// The resource type tag.
    #[serde(rename = "resourceType")]
    pub resource_type: ResourceType,
    /// The logical identifier, if assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResourceMeta>,
    /// All remaining fields, untouched.
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Resource {
    /// Creates a new resource with the given type and id.
    pub fn new(resource_type: ResourceType, id: impl Into<String>) -> Self {
        Self {
            resource_type,
            id: Some(id.into()),
            meta: None,
            data: Map::new(),
        }
    }

    /// Parses a resource from a JSON value.
    pub fn from_json(value: Value) -> crate::ModelResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the logical id, or the empty string if none is assigned.
    pub fn logical_id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Returns the server-side last update timestamp, if present.
    pub fn last_updated(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.last_updated.as_deref())
    }
}
