//! Comments Module
//!
//! - **`store`** - CommentStore: create, list, like, edit, delete
//! - **`handlers`** - /api/comment/* handlers

pub mod handlers;
pub mod store;

pub use store::CommentStore;
