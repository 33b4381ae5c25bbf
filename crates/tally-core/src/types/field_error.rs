//! Field-level validation records.

use serde::{Deserialize, Serialize};

/// A single violation of a request field, rendered as `{path, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field as it appears in the request payload.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
