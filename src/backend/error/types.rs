//! Backend Error Types
//!
//! `BackendError` is what REST handlers return; it knows its HTTP status and
//! the message shown to the client. `RelayError` covers socket events that
//! get dropped, and never reaches the client.
//!
//! # Status Mapping
//!
//! - missing fields, duplicate users, bad reset tokens: 400
//! - bad credentials or tokens: 401
//! - acting on a chat you are not in: 403
//! - unknown user / chat: 404
//! - no database configured: 503
//! - database, hashing, mail and serialization failures: 500

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::mailer::MailError;
use crate::backend::auth::sessions::TokenError;
use crate::shared::SharedError;

/// Errors returned by REST handlers
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request-level failure with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },

    /// Internal state could not be used (missing database, worker panicked)
    #[error("State error: {message}")]
    StateError {
        status: StatusCode,
        message: String,
    },

    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    #[error("Password hashing error: {0}")]
    PasswordError(#[from] bcrypt::BcryptError),

    #[error("Mail error: {0}")]
    MailError(#[from] MailError),
}

impl BackendError {
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 500 for internal state problems
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// 503 returned by data endpoints when the server runs without Postgres
    pub fn database_unavailable() -> Self {
        Self::StateError {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "Database not configured".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } | Self::StateError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::TokenError(_) => StatusCode::UNAUTHORIZED,
            Self::SerializationError(_)
            | Self::DatabaseError(_)
            | Self::PasswordError(_)
            | Self::MailError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal failures collapse to a generic text.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } | Self::StateError { message, .. } => {
                message.clone()
            }
            Self::SharedError(err) => err.detail().to_string(),
            Self::TokenError(_) => "Unauthorized: Invalid token".to_string(),
            Self::MailError(_) => "Failed to send reset email. Please try again later.".to_string(),
            Self::SerializationError(_) | Self::DatabaseError(_) | Self::PasswordError(_) => {
                "Server error".to_string()
            }
        }
    }
}

/// Reasons an inbound socket event was dropped
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Undecodable frame, unknown event or missing field
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// `identify` named a different user than the socket's bearer token
    #[error("Identity mismatch: socket authenticated as {authenticated}, identify claimed {claimed}")]
    IdentityMismatch {
        authenticated: String,
        claimed: String,
    },

    /// Upgrade refused for lack of a valid token
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
}

impl From<SharedError> for RelayError {
    fn from(err: SharedError) -> Self {
        Self::MalformedEvent(err.detail().to_string())
    }
}
