//! Backend Error Module
//!
//! Error taxonomy of the API and its conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and AuthError definitions
//! └── conversion.rs - IntoResponse and extractor rejection conversions
//! ```
//!
//! # Status Codes
//!
//! | Error | Status |
//! |---|---|
//! | `Validation`, malformed request | 400 |
//! | `AuthError::MissingCredential` / `InvalidCredential` / `WrongPassword` | 401 |
//! | `AuthError::Forbidden` | 403 |
//! | `NotFound` | 404 |
//! | `Conflict` | 409 |
//! | `Database`, `Internal` | 500 |
//!
//! Every error is rendered as `{ "success": false, "statusCode", "message" }`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{AuthError, BackendError, BackendResult};
