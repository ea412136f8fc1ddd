//! Backend Module
//!
//! All server-side code: the Axum application, the three stores and the
//! persistence capability behind them.
//!
//! # Architecture
//!
//! An inbound request carries an optional credential. The `AuthUser`
//! extractor resolves it into an `Identity` once; the handler passes that
//! identity to a store, which checks it against the stored record through
//! `auth::policy` and then reads or mutates through `db`.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - AppState, database selection, create_app
//! ├── routes/         - Route table and router assembly
//! ├── auth/           - Session tokens, passwords, policy, session handlers
//! ├── users/          - User store and handlers
//! ├── posts/          - Post store, slugs and handlers
//! ├── comments/       - Comment store and handlers
//! ├── db/             - Persistence traits, in-memory and PostgreSQL
//! ├── middleware/     - AuthUser and JSON-error extractors
//! └── error/          - Error types and responses
//! ```

/// Server initialization and state
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and authorization
pub mod auth;

/// User accounts
pub mod users;

/// Posts
pub mod posts;

/// Comments
pub mod comments;

/// Persistence
pub mod db;

/// Request extractors
pub mod middleware;

/// Backend-specific error types
pub mod error;

pub use error::{AuthError, BackendError, BackendResult};
