//! Error types for the download engine.

use fhirsync_model::ModelError;
use thiserror::Error;

/// Result type for download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;

/// Errors that can occur during a download pass.
///
/// All three kinds are recovered at per-request granularity and surfaced
/// as `Failure` events on the progress stream; none of them halts the
/// pass. Retry policy belongs to the caller.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The server returned an operational outcome in place of data.
    #[error("server error: {0}")]
    Server(String),

    /// Network or transport failure surfaced by the collaborator.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the request can be retried by the caller.
        retryable: bool,
    },

    /// The response matched none of the known shapes.
    #[error("classification error: {0}")]
    Classification(String),
}

impl DownloadError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if the caller may retry the failed request.
    pub fn is_retryable(&self) -> bool {
        match self {
            DownloadError::Transport { retryable, .. } => *retryable,
            DownloadError::Server(_) => true,
            DownloadError::Classification(_) => false,
        }
    }
}

impl From<ModelError> for DownloadError {
    fn from(err: ModelError) -> Self {
        DownloadError::Classification(err.to_string())
    }
}
