//! Blogline - Main Library
//!
//! Blogline is the REST API of a blogging platform: accounts with password
//! or Google sign-in, admin-authored posts with likes and dislikes, and
//! reader comments with likes. It serves a single-page web client.
//!
//! # Module Structure
//!
//! - **`shared`** - Types used across the backend
//!   - Records (`User`, `Post`, `Comment`) and their client projections
//!   - Reaction sets and their invariants
//!   - Validation errors and application configuration
//!
//! - **`backend`** - Axum HTTP server
//!   - Session tokens, password hashing, authorization policy
//!   - User, post and comment stores
//!   - Persistence (PostgreSQL or in-memory)
//!   - Routes, extractors and error responses
//!
//! # Usage
//!
//! ```rust,no_run
//! use blogline::backend::server::init::create_app;
//! use blogline::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! let app = create_app(config).await;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Types shared by every layer
pub mod shared;

/// Server-side code
pub mod backend;
