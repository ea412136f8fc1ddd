//! Middleware Module
//!
//! Request-side plumbing shared by every handler.
//!
//! - **`auth`** - `AuthUser` extractor resolving the caller's identity
//! - **`extract`** - `ApiJson`, `ApiPath`, `ApiQuery` with JSON error rejections

pub mod auth;
pub mod extract;

pub use auth::AuthUser;
pub use extract::{ApiJson, ApiPath, ApiQuery};
