//! Shared Error Types
//!
//! Errors raised while validating user-supplied data. They carry the name of
//! the offending field so that both the HTTP layer and the stores can report
//! a precise message.
//!
//! # Usage
//!
//! ```rust
//! use blogline::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "Username must be 5-20 characters");
//! assert_eq!(error.field(), "username");
//! ```
use thiserror::Error;

/// Validation failures for incoming data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A field was missing or malformed
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
