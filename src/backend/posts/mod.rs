//! Posts Module
//!
//! # Module Structure
//!
//! ```text
//! posts/
//! ├── mod.rs      - Module exports
//! ├── slug.rs     - Title to URL slug
//! ├── store.rs    - PostStore: CRUD, reactions, listing
//! └── handlers.rs - /api/post/* handlers
//! ```

pub mod handlers;
pub mod slug;
pub mod store;

pub use store::{PostDraft, PostPage, PostStore, PostUpdate, ReactionDetails};
