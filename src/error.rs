//! Error types.
//!
//! Only [`AssignError`] ever crosses the public API as an `Err`. Conditions
//! local to a single part are reported as
//! [`PartDiagnostic`](crate::engine::PartDiagnostic) values instead.

use thiserror::Error;

/// Fatal error for a generation call.
#[derive(Error, Debug)]
pub enum AssignError {
    /// The program or roster is malformed (empty program, duplicate
    /// ordinals, parts not a list, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A record failed to parse at the ingestion boundary.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// The generator configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Error while turning loosely typed records into model types.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Expected a JSON object.
    #[error("record {index}: expected an object")]
    NotAnObject { index: usize },

    /// A field is missing or has the wrong shape.
    #[error("record {index}: {reason}")]
    Malformed { index: usize, reason: String },

    /// A tri-state flag was left unknown and the policy rejects it.
    #[error("record {index}: flag `{field}` is unknown and must be resolved")]
    UnresolvedFlag { index: usize, field: &'static str },

    /// Raw text was not valid JSON.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl IngestError {
    /// Wraps this ingestion failure as the fatal `invalid_input` condition.
    pub fn into_invalid_input(self) -> AssignError {
        AssignError::InvalidInput(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = IngestError::UnresolvedFlag {
            index: 3,
            field: "publisher",
        };
        assert_eq!(
            err.to_string(),
            "record 3: flag `publisher` is unknown and must be resolved"
        );

        let err: AssignError = err.into();
        assert!(err.to_string().starts_with("ingest error: record 3"));
    }

    #[test]
    fn test_into_invalid_input() {
        let err = IngestError::NotAnObject { index: 0 }.into_invalid_input();
        assert!(matches!(err, AssignError::InvalidInput(_)));
    }
}
