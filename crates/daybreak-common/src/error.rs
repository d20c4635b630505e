use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Notification severity understood by the operator channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(s)
    }
}

/// Invocation-level error taxonomy.
///
/// Per-item start failures are deliberately absent: the batch loop converts
/// them to `BatchOutcome` entries and keeps going, then raises one
/// `Partial` for the whole batch. Everything here is escalated.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The instance listing capability failed; nothing was attempted.
    #[error("instance listing failed: {0}")]
    Listing(#[source] anyhow::Error),

    /// Some instances started, some did not. A recovered error: work got
    /// done, but the invocation must still be recorded as failed.
    #[error("{} instance control failure(s): {}", failed.len(), failed.join(", "))]
    Partial { failed: Vec<String> },

    /// Diagnostic capture failed during escalation; supersedes the error
    /// that triggered it as the invocation's terminal error.
    #[error("log archival failed: {0}")]
    Archival(#[source] anyhow::Error),

    /// Anything else raised anywhere; handled identically at the boundary.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskError {
    /// Stable name for logging and notification text.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskError::Listing(_) => "listing",
            TaskError::Partial { .. } => "partial_failure",
            TaskError::Archival(_) => "archival",
            TaskError::Other(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_names_failed_ids() {
        let err = TaskError::Partial {
            failed: vec!["i-2".to_string(), "i-5".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 instance control failure(s)"));
        assert!(msg.contains("i-2"));
        assert!(msg.contains("i-5"));
        assert_eq!(err.kind(), "partial_failure");
    }

    #[test]
    fn severity_display_is_lowercase() {
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
