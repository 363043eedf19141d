// Error handling framework

use thiserror::Error;
use uuid::Uuid;

/// Structural validation failures that abort the pipeline before any
/// field-level checks run. These are surfaced as a single 404-equivalent
/// signal, never merged into the per-field error collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FatalValidationError {
    #[error("Content not found: {id}")]
    ContentNotFound { id: Uuid },

    #[error("Property with alias '{alias}' does not exist on the content item")]
    PropertyNotFound { alias: String },
}

/// Faults raised by the external publish operation during a scheduled run.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Publish service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Scheduled publish operation failed: {0}")]
    OperationFailed(String),
}

/// Serializable error body for transport layers surfacing an invalid
/// submission.
#[derive(Debug, serde::Serialize)]
pub struct ValidationErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ValidationErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<FatalValidationError> for ValidationErrorBody {
    fn from(err: FatalValidationError) -> Self {
        let code = match err {
            FatalValidationError::ContentNotFound { .. } => "CONTENT_NOT_FOUND",
            FatalValidationError::PropertyNotFound { .. } => "PROPERTY_NOT_FOUND",
        };
        ValidationErrorBody::new(code, err.to_string())
    }
}
