//! Error types for the model crate.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while interpreting server payloads.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The payload matches none of the known response shapes.
    #[error("unrecognized response shape: {0}")]
    UnrecognizedShape(String),

    /// A resource type name is not a valid FHIR resource type.
    #[error("invalid resource type name: {0}")]
    InvalidResourceType(String),

    /// The payload is not valid JSON for the expected structure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
