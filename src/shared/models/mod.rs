//! Record types
//!
//! The three records of the platform and the projections handed to clients.
//! Field names follow the JSON wire format of the web client (camelCase,
//! record ids as `_id`).

pub mod comment;
pub mod listing;
pub mod post;
pub mod user;

pub use comment::{Comment, NewComment};
pub use listing::{Pagination, SortOrder};
pub use post::{NewPost, Post, PostChanges, PostFilter};
pub use user::{NewUser, PublicUser, User, UserChanges, UserSummary};
