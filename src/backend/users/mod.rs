//! Users Module
//!
//! # Module Structure
//!
//! ```text
//! users/
//! ├── mod.rs        - Module exports
//! ├── validation.rs - Username, email and password rules
//! ├── store.rs      - UserStore: account lifecycle
//! └── handlers.rs   - /api/user/* handlers
//! ```

pub mod handlers;
pub mod store;
pub mod validation;

pub use store::{AuthSession, GoogleProfile, ProfileUpdate, UserPage, UserStore};
