/**
 * Backend Error Types
 *
 * `BackendError` is returned by every store operation and every handler.
 * Authentication and authorization failures are grouped in `AuthError` so
 * that the credential verifier can return them without knowing about the
 * rest of the taxonomy.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::db::DbError;
use crate::shared::SharedError;

/// Result alias used across the backend
pub type BackendResult<T> = Result<T, BackendError>;

/// Authentication and authorization failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No session token on the request
    #[error("Unauthorized")]
    MissingCredential,

    /// Token present but its signature or expiry check failed
    #[error("Unauthorized")]
    InvalidCredential,

    /// Sign-in with a password that does not match the stored hash
    #[error("Invalid password")]
    WrongPassword,

    /// Authenticated, but not allowed to perform the action
    #[error("{0}")]
    Forbidden(String),
}

impl AuthError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::InvalidCredential | Self::WrongPassword => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed or missing input
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Authentication or authorization failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The addressed record does not exist
    #[error("{resource} not found")]
    NotFound {
        /// Kind of record, e.g. "Post"
        resource: &'static str,
    },

    /// Username or email already taken
    #[error("{message}")]
    Conflict { message: String },

    /// Request rejected before reaching a handler (bad JSON, bad path)
    #[error("{message}")]
    HandlerError { status: StatusCode, message: String },

    /// Persistence failure
    #[error("Database error: {0}")]
    Database(DbError),

    /// Hashing, token signing or other server-side failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(SharedError::validation(field, message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Auth(AuthError::forbidden(message))
    }

    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth(err) => err.status_code(),
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::HandlerError { status, .. } => *status,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Server-side failures are not detailed.
    pub fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DbError> for BackendError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { .. } => Self::conflict(err.to_string()),
            other => Self::Database(other),
        }
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::internal(format!("password hashing failed: {err}"))
    }
}
