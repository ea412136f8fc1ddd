//! Authentication Handlers
//!
//! HTTP handlers for the session endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── types.rs    - Request/response types
//! ├── signup.rs   - POST /api/auth/signup
//! ├── signin.rs   - POST /api/auth/signin, POST /api/auth/google
//! └── signout.rs  - POST /api/user/signout
//! ```

pub mod types;
pub mod signup;
pub mod signin;
pub mod signout;

pub use signup::signup;
pub use signin::{google, signin};
pub use signout::signout;
