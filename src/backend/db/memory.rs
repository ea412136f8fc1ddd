/**
 * In-Memory Database
 *
 * All tables live behind a single `tokio::sync::RwLock`. Reads take the
 * shared lock, every mutation (including reaction toggles) runs entirely
 * under the write lock, which makes each read-modify-write atomic.
 *
 * Rows remember their insertion sequence so that listings ordered by
 * creation time stay deterministic when two records share a timestamp.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CommentRecords, DbError, DbResult, PostRecords, UserRecords};
use crate::shared::models::{
    Comment, NewComment, NewPost, NewUser, Pagination, Post, PostChanges, PostFilter, SortOrder,
    User, UserChanges,
};
use crate::shared::reactions::{CommentLikes, PostReactions, Reaction};

struct Row<T> {
    seq: u64,
    record: T,
}

#[derive(Default)]
struct Tables {
    next_seq: u64,
    users: HashMap<Uuid, Row<User>>,
    posts: HashMap<Uuid, Row<Post>>,
    comments: HashMap<Uuid, Row<Comment>>,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Field of `candidate` that collides with another user, if any.
    /// Username clashes win over email clashes.
    fn conflicting_field(&self, id: Uuid, username: &str, email: &str) -> Option<&'static str> {
        let clashes = |field: fn(&User) -> &str, value: &str| {
            self.users
                .values()
                .any(|row| row.record.id != id && field(&row.record) == value)
        };
        if clashes(|user| user.username.as_str(), username) {
            Some("username")
        } else if clashes(|user| user.email.as_str(), email) {
            Some("email")
        } else {
            None
        }
    }
}

/// Sort rows by creation time, ties broken by insertion order, then window
fn ordered_page<'a, T, F>(
    rows: impl Iterator<Item = &'a Row<T>>,
    created_at: F,
    page: Pagination,
    order: SortOrder,
) -> Vec<T>
where
    T: Clone + 'a,
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut rows: Vec<&Row<T>> = rows.collect();
    rows.sort_by_key(|row| (created_at(&row.record), row.seq));
    if order == SortOrder::Desc {
        rows.reverse();
    }
    rows.into_iter()
        .skip(page.start_index)
        .take(page.limit)
        .map(|row| row.record.clone())
        .collect()
}

/// Database kept entirely in process memory
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRecords for MemoryDatabase {
    async fn insert_user(&self, user: NewUser) -> DbResult<User> {
        let mut tables = self.tables.write().await;
        let id = Uuid::new_v4();
        if let Some(field) = tables.conflicting_field(id, &user.username, &user.email) {
            return Err(DbError::UniqueViolation { field });
        }

        let now = Utc::now();
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            profile_picture: user.profile_picture,
            is_admin: user.is_admin,
            created_at: now,
            updated_at: now,
        };
        let seq = tables.next_seq();
        tables.users.insert(id, Row { seq, record: user.clone() });
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> DbResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|row| row.record.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|row| row.record.email == email)
            .map(|row| row.record.clone()))
    }

    async fn find_users(&self, ids: &[Uuid]) -> DbResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id))
            .map(|row| row.record.clone())
            .collect())
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> DbResult<Option<User>> {
        let mut tables = self.tables.write().await;
        let Some(current) = tables.users.get(&id).map(|row| row.record.clone()) else {
            return Ok(None);
        };

        let username = changes.username.unwrap_or(current.username);
        let email = changes.email.unwrap_or(current.email);
        if let Some(field) = tables.conflicting_field(id, &username, &email) {
            return Err(DbError::UniqueViolation { field });
        }

        let Some(row) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        let user = &mut row.record;
        user.username = username;
        user.email = email;
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        if let Some(picture) = changes.profile_picture {
            user.profile_picture = picture;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> DbResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.remove(&id).is_some())
    }

    async fn list_users(&self, page: Pagination, order: SortOrder) -> DbResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(ordered_page(tables.users.values(), |u| u.created_at, page, order))
    }

    async fn count_users(&self, created_since: Option<DateTime<Utc>>) -> DbResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .users
            .values()
            .filter(|row| created_since.map_or(true, |since| row.record.created_at >= since))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl PostRecords for MemoryDatabase {
    async fn insert_post(&self, post: NewPost) -> DbResult<Post> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            category: post.category,
            image: post.image,
            slug: post.slug,
            reactions: PostReactions::default(),
            created_at: now,
            updated_at: now,
        };
        let seq = tables.next_seq();
        tables.posts.insert(post.id, Row { seq, record: post.clone() });
        Ok(post)
    }

    async fn find_post(&self, id: Uuid) -> DbResult<Option<Post>> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).map(|row| row.record.clone()))
    }

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> DbResult<Option<Post>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.posts.get_mut(&id) else {
            return Ok(None);
        };
        let post = &mut row.record;
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(category) = changes.category {
            post.category = category;
        }
        if let Some(image) = changes.image {
            post.image = image;
        }
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: Uuid) -> DbResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.posts.remove(&id).is_some())
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: Pagination,
        order: SortOrder,
    ) -> DbResult<Vec<Post>> {
        let tables = self.tables.read().await;
        let rows = tables.posts.values().filter(|row| filter.matches(&row.record));
        Ok(ordered_page(rows, |p| p.created_at, page, order))
    }

    async fn count_posts(&self, created_since: Option<DateTime<Utc>>) -> DbResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .posts
            .values()
            .filter(|row| created_since.map_or(true, |since| row.record.created_at >= since))
            .count();
        Ok(count as i64)
    }

    async fn react_to_post(
        &self,
        id: Uuid,
        user_id: Uuid,
        reaction: Reaction,
    ) -> DbResult<Option<Post>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.posts.get_mut(&id) else {
            return Ok(None);
        };
        let post = &mut row.record;
        post.reactions.apply(reaction, user_id);
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }
}

#[async_trait]
impl CommentRecords for MemoryDatabase {
    async fn insert_comment(&self, comment: NewComment) -> DbResult<Comment> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content,
            likes: CommentLikes::default(),
            created_at: now,
            updated_at: now,
        };
        let seq = tables.next_seq();
        tables
            .comments
            .insert(comment.id, Row { seq, record: comment.clone() });
        Ok(comment)
    }

    async fn find_comment(&self, id: Uuid) -> DbResult<Option<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables.comments.get(&id).map(|row| row.record.clone()))
    }

    async fn comments_for_post(&self, post_id: Uuid) -> DbResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        let rows = tables
            .comments
            .values()
            .filter(|row| row.record.post_id == post_id);
        let all = Pagination {
            start_index: 0,
            limit: usize::MAX,
        };
        Ok(ordered_page(rows, |c| c.created_at, all, SortOrder::Desc))
    }

    async fn update_comment_content(
        &self,
        id: Uuid,
        content: String,
    ) -> DbResult<Option<Comment>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.comments.get_mut(&id) else {
            return Ok(None);
        };
        row.record.content = content;
        row.record.updated_at = Utc::now();
        Ok(Some(row.record.clone()))
    }

    async fn delete_comment(&self, id: Uuid) -> DbResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.comments.remove(&id).is_some())
    }

    async fn toggle_comment_like(&self, id: Uuid, user_id: Uuid) -> DbResult<Option<Comment>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.comments.get_mut(&id) else {
            return Ok(None);
        };
        row.record.likes.toggle(user_id);
        row.record.updated_at = Utc::now();
        Ok(Some(row.record.clone()))
    }
}
