//! Structural classification of server responses.

use crate::bundle::{Bundle, BundleType};
use crate::error::{ModelError, ModelResult};
use crate::outcome::OperationOutcome;
use serde_json::Value;

/// The three response shapes a server may return for a download request.
///
/// Classification is structural, driven by the `resourceType` tag (and the
/// `type` field for bundles), never inferred from content. Downstream code
/// matches exhaustively; a shape outside these cases never constructs a
/// `ServerResponse` and surfaces as [`ModelError::UnrecognizedShape`]
/// instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerResponse {
    /// A paged result set: zero or more entities plus an optional `next` link.
    SearchSet(Bundle),
    /// Acknowledgement of writes already applied server-side; carries no new data.
    TransactionResponse(Bundle),
    /// An operational error payload in place of data.
    OperationOutcome(OperationOutcome),
}

impl ServerResponse {
    /// Classifies a JSON payload into one of the three known shapes.
    pub fn from_json(value: Value) -> ModelResult<Self> {
        let resource_type = value
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ModelError::UnrecognizedShape("payload has no resourceType tag".to_string())
            })?;

        match resource_type {
            "Bundle" => {
                let bundle_type = value.get("type").and_then(Value::as_str).unwrap_or("");
                match bundle_type {
                    "searchset" => Ok(ServerResponse::SearchSet(serde_json::from_value(value)?)),
                    "transaction-response" => {
                        Ok(ServerResponse::TransactionResponse(serde_json::from_value(
                            value,
                        )?))
                    }
                    other => Err(ModelError::UnrecognizedShape(format!(
                        "Bundle of type {other:?}"
                    ))),
                }
            }
            "OperationOutcome" => Ok(ServerResponse::OperationOutcome(serde_json::from_value(
                value,
            )?)),
            other => Err(ModelError::UnrecognizedShape(format!(
                "resource of type {other:?}"
            ))),
        }
    }

    /// Returns the bundle for the two bundle-shaped cases.
    pub fn as_bundle(&self) -> Option<&Bundle> {
        match self {
            ServerResponse::SearchSet(bundle) | ServerResponse::TransactionResponse(bundle) => {
                Some(bundle)
            }
            ServerResponse::OperationOutcome(_) => None,
        }
    }
}

impl From<OperationOutcome> for ServerResponse {
    fn from(outcome: OperationOutcome) -> Self {
        ServerResponse::OperationOutcome(outcome)
    }
}

impl From<Bundle> for ServerResponse {
    fn from(bundle: Bundle) -> Self {
        match bundle.bundle_type {
            BundleType::SearchSet => ServerResponse::SearchSet(bundle),
            BundleType::TransactionResponse => ServerResponse::TransactionResponse(bundle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_searchset() {
        let response = ServerResponse::from_json(json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "entry": [
                { "resource": { "resourceType": "Patient", "id": "p1" } }
            ]
        }))
        .unwrap();

        match response {
            ServerResponse::SearchSet(bundle) => assert_eq!(bundle.entry.len(), 1),
            other => panic!("expected searchset, got {other:?}"),
        }
    }

    #[test]
    fn classifies_transaction_response() {
        let response = ServerResponse::from_json(json!({
            "resourceType": "Bundle",
            "type": "transaction-response"
        }))
        .unwrap();

        assert!(matches!(response, ServerResponse::TransactionResponse(_)));
    }

    #[test]
    fn classifies_operation_outcome() {
        let response = ServerResponse::from_json(json!({
            "resourceType": "OperationOutcome",
            "issue": [{ "severity": "error", "diagnostics": "boom" }]
        }))
        .unwrap();

        match response {
            ServerResponse::OperationOutcome(outcome) => {
                assert_eq!(outcome.first_diagnostics(), Some("boom"));
            }
            other => panic!("expected outcome, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_bundle_type() {
        let err = ServerResponse::from_json(json!({
            "resourceType": "Bundle",
            "type": "batch-response"
        }))
        .unwrap_err();

        assert!(matches!(err, ModelError::UnrecognizedShape(_)));
    }

    #[test]
    fn rejects_bare_resource() {
        let err = ServerResponse::from_json(json!({
            "resourceType": "Patient",
            "id": "p1"
        }))
        .unwrap_err();

        assert!(matches!(err, ModelError::UnrecognizedShape(_)));
    }

    #[test]
    fn rejects_untagged_payload() {
        let err = ServerResponse::from_json(json!({ "hello": "world" })).unwrap_err();
        assert!(matches!(err, ModelError::UnrecognizedShape(_)));
    }
}
