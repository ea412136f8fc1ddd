//! Authentication Module
//!
//! Credential verification, password hashing, the authorization policy and
//! the session endpoints.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── sessions.rs     - Identity, JWT issue/verify (SessionKeys)
//! ├── passwords.rs    - bcrypt hashing, generated passwords
//! ├── cookies.rs      - access_token cookie and bearer header handling
//! ├── policy.rs       - can_mutate / is_owner / require_admin
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - Registration
//!     ├── signin.rs   - Password and Google sign-in
//!     └── signout.rs  - Cookie removal
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup / Signin / Google**: credentials checked by the `UserStore`,
//!    token issued with `{sub, isAdmin}`, returned in the body and as the
//!    `access_token` cookie
//! 2. **Authenticated request**: `AuthUser` verifies the token once and hands
//!    the `Identity` to the handler, which passes it to the store
//! 3. **Signout**: the cookie is cleared
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs with a fixed lifetime and are never refreshed
//! - Authorization decisions use the stored owner of a record, never ids
//!   supplied in the request

/// Session token issue and verification
pub mod sessions;

/// Password hashing
pub mod passwords;

/// Session cookie handling
pub mod cookies;

/// Authorization policy
pub mod policy;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, SigninRequest, SignupRequest};
pub use handlers::{google, signin, signout, signup};
pub use sessions::{Identity, SessionKeys};
