//! Operational outcome payloads.

use serde::{Deserialize, Serialize};

/// One diagnostic issue attached to an operation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OperationOutcomeIssue {
    /// Issue severity, e.g. `"error"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Issue code, e.g. `"processing"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable diagnostic text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

/// An operational error payload returned in place of data.
///
/// Represents a request-level failure, not an empty result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OperationOutcome {
    /// The diagnostic issues, in server order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issue: Vec<OperationOutcomeIssue>,
}

impl OperationOutcome {
    /// Creates an outcome with a single issue carrying the given diagnostics.
    pub fn with_diagnostics(diagnostics: impl Into<String>) -> Self {
        Self {
            issue: vec![OperationOutcomeIssue {
                severity: Some("error".to_string()),
                code: None,
                diagnostics: Some(diagnostics.into()),
            }],
        }
    }

    /// Returns the diagnostics of the first issue, if present.
    pub fn first_diagnostics(&self) -> Option<&str> {
        self.issue.first().and_then(|issue| issue.diagnostics.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_diagnostics_present() {
        let outcome = OperationOutcome::with_diagnostics("Server couldn't fulfil the request.");
        assert_eq!(
            outcome.first_diagnostics(),
            Some("Server couldn't fulfil the request.")
        );
    }

    #[test]
    fn first_diagnostics_absent() {
        assert_eq!(OperationOutcome::default().first_diagnostics(), None);

        let outcome = OperationOutcome {
            issue: vec![OperationOutcomeIssue::default()],
        };
        assert_eq!(outcome.first_diagnostics(), None);
    }
}
