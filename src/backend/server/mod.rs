//! Server Module
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── state.rs  - AppState and FromRef implementations
//! ├── config.rs - Database selection (PostgreSQL or in-memory)
//! └── init.rs   - create_app()
//! ```

pub mod config;
pub mod init;
pub mod state;

pub use config::load_database;
pub use init::create_app;
pub use state::AppState;
