//! Core identifier types and prompt validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Opaque handle returned by a successful prompt submission.
///
/// Both fields are assigned by the backend and never interpreted
/// client-side. Serde renames match the backend's JSON body so the
/// handle deserializes directly from the submission response, with no
/// transformation in between. `execution_arn` may be absent when the
/// pipeline rejected the submission before starting an execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHandle {
    /// Unique project identifier.
    #[serde(rename = "projectId")]
    pub project_id: String,

    /// Reference to the backend execution instance.
    #[serde(
        rename = "executionArn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub execution_arn: Option<String>,
}

/// Validate that a prompt is non-empty after trimming.
///
/// Callers must check this before submitting; a blank prompt never
/// reaches the wire.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        Err(CoreError::Validation(
            "Prompt must not be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}
