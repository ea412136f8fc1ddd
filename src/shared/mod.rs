//! Shared Module
//!
//! Types used by every layer of the backend: the stored records and their
//! client projections, the reaction bookkeeping, validation errors and the
//! application configuration. Nothing in here touches HTTP.

/// Record types and projections
pub mod models;

/// Like/dislike sets and their invariants
pub mod reactions;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use reactions::{CommentLikes, PostReactions, Reaction, ReactionOutcome, ReactionSet};
