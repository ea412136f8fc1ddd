//! Persistence Module
//!
//! The stores never talk to a database directly; they go through the
//! [`Database`] capability, split per record kind:
//!
//! - **`UserRecords`** - accounts, with unique usernames and emails
//! - **`PostRecords`** - posts and their like/dislike sets
//! - **`CommentRecords`** - comments and their likes
//!
//! Two implementations exist:
//!
//! - **`memory`** - `RwLock`-guarded tables, used without `DATABASE_URL` and in tests
//! - **`postgres`** - sqlx connection pool with migrations
//!
//! # Atomicity
//!
//! Reaction toggles (`react_to_post`, `toggle_comment_like`) are read-modify-write
//! operations that implementations must run atomically: two concurrent toggles
//! by different users must both land. Uniqueness of usernames and emails is
//! enforced by the implementation and reported as [`DbError::UniqueViolation`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::models::{
    Comment, NewComment, NewPost, NewUser, Pagination, Post, PostChanges, PostFilter, SortOrder,
    User, UserChanges,
};
use crate::shared::reactions::Reaction;

/// In-memory implementation
pub mod memory;

/// PostgreSQL implementation
pub mod postgres;

pub use memory::MemoryDatabase;
pub use postgres::PgDatabase;

/// Persistence failures
#[derive(Debug, Error)]
pub enum DbError {
    /// A unique field (`username`, `email`) already holds this value
    #[error("{field} already exists")]
    UniqueViolation { field: &'static str },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type DbResult<T> = Result<T, DbError>;

/// User persistence
#[async_trait]
pub trait UserRecords: Send + Sync {
    /// Insert a user; fails with `UniqueViolation` on a taken username or email
    async fn insert_user(&self, user: NewUser) -> DbResult<User>;

    async fn find_user(&self, id: Uuid) -> DbResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> DbResult<Option<User>>;

    /// Users matching `ids`; unknown ids are skipped
    async fn find_users(&self, ids: &[Uuid]) -> DbResult<Vec<User>>;

    /// Apply `changes`; `None` when the user does not exist
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> DbResult<Option<User>>;

    /// Returns whether a user was deleted
    async fn delete_user(&self, id: Uuid) -> DbResult<bool>;

    async fn list_users(&self, page: Pagination, order: SortOrder) -> DbResult<Vec<User>>;

    /// Number of users, optionally only those created at or after `created_since`
    async fn count_users(&self, created_since: Option<DateTime<Utc>>) -> DbResult<i64>;
}

/// Post persistence
#[async_trait]
pub trait PostRecords: Send + Sync {
    async fn insert_post(&self, post: NewPost) -> DbResult<Post>;

    async fn find_post(&self, id: Uuid) -> DbResult<Option<Post>>;

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> DbResult<Option<Post>>;

    async fn delete_post(&self, id: Uuid) -> DbResult<bool>;

    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: Pagination,
        order: SortOrder,
    ) -> DbResult<Vec<Post>>;

    async fn count_posts(&self, created_since: Option<DateTime<Utc>>) -> DbResult<i64>;

    /// Atomically toggle `user_id`'s reaction; `None` when the post does not exist
    async fn react_to_post(
        &self,
        id: Uuid,
        user_id: Uuid,
        reaction: Reaction,
    ) -> DbResult<Option<Post>>;
}

/// Comment persistence
#[async_trait]
pub trait CommentRecords: Send + Sync {
    async fn insert_comment(&self, comment: NewComment) -> DbResult<Comment>;

    async fn find_comment(&self, id: Uuid) -> DbResult<Option<Comment>>;

    /// Comments of a post, newest first
    async fn comments_for_post(&self, post_id: Uuid) -> DbResult<Vec<Comment>>;

    async fn update_comment_content(&self, id: Uuid, content: String)
        -> DbResult<Option<Comment>>;

    async fn delete_comment(&self, id: Uuid) -> DbResult<bool>;

    /// Atomically toggle `user_id`'s like; `None` when the comment does not exist
    async fn toggle_comment_like(&self, id: Uuid, user_id: Uuid) -> DbResult<Option<Comment>>;
}

/// Full persistence capability handed to the stores
pub trait Database: UserRecords + PostRecords + CommentRecords {}

impl<T: UserRecords + PostRecords + CommentRecords> Database for T {}
