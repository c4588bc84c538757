//! Shared Error Types
//!
//! Errors that describe a bad payload independently of where it arrived:
//! a REST body with missing fields or a socket frame that does not decode.
//!
//! - `SerializationError` - JSON encode/decode failures
//! - `ValidationError` - a required field is missing or empty
//!
//! ```rust
//! use chatrelay::shared::error::SharedError;
//!
//! let error = SharedError::validation("roomId", "roomId is required");
//! assert_eq!(error.field(), Some("roomId"));
//! ```
use thiserror::Error;

/// Payload errors shared by the REST surface and the socket relay
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, if this is a validation failure
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::SerializationError { .. } => None,
        }
    }

    /// The message without the category prefix, suitable for a client
    pub fn detail(&self) -> &str {
        match self {
            Self::SerializationError { message } | Self::ValidationError { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Returns the trimmed value of a required text field.
///
/// Absent, empty and whitespace-only values all fail with a `ValidationError`
/// naming `field`.
pub fn require_text(
    field: &str,
    value: Option<String>,
    message: &str,
) -> Result<String, SharedError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(SharedError::validation(field, message)),
    }
}
