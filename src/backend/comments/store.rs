/**
 * Comment Store
 *
 * Any signed-in user may comment on a post and like comments. Editing is
 * reserved to the author; deletion to the author and admins. The author of
 * a new comment is always the caller.
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::backend::auth::policy::{can_mutate, is_owner};
use crate::backend::auth::sessions::Identity;
use crate::backend::db::Database;
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::models::{Comment, NewComment};

#[derive(Clone)]
pub struct CommentStore {
    db: Arc<dyn Database>,
    max_len: usize,
}

impl CommentStore {
    pub fn new(db: Arc<dyn Database>, max_len: usize) -> Self {
        Self { db, max_len }
    }

    pub async fn create(
        &self,
        identity: &Identity,
        post_id: Uuid,
        content: String,
    ) -> BackendResult<Comment> {
        self.validate_content(&content)?;

        if self.db.find_post(post_id).await?.is_none() {
            return Err(BackendError::not_found("Post"));
        }

        let comment = self
            .db
            .insert_comment(NewComment {
                post_id,
                user_id: identity.user_id,
                content,
            })
            .await?;

        tracing::info!("Comment {} added to post {}", comment.id, post_id);
        Ok(comment)
    }

    /// Comments of a post, newest first. Unknown posts have no comments.
    pub async fn list_for_post(&self, post_id: Uuid) -> BackendResult<Vec<Comment>> {
        Ok(self.db.comments_for_post(post_id).await?)
    }

    pub async fn toggle_like(&self, identity: &Identity, comment_id: Uuid) -> BackendResult<Comment> {
        self.db
            .toggle_comment_like(comment_id, identity.user_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Comment"))
    }

    pub async fn edit(
        &self,
        identity: &Identity,
        comment_id: Uuid,
        content: String,
    ) -> BackendResult<Comment> {
        let comment = self.get_comment(comment_id).await?;
        if !is_owner(identity, &comment) {
            tracing::warn!("User {} may not edit comment {}", identity.user_id, comment.id);
            return Err(BackendError::forbidden("You are not allowed to edit this comment"));
        }
        self.validate_content(&content)?;

        self.db
            .update_comment_content(comment.id, content)
            .await?
            .ok_or_else(|| BackendError::not_found("Comment"))
    }

    pub async fn delete(&self, identity: &Identity, comment_id: Uuid) -> BackendResult<()> {
        let comment = self.get_comment(comment_id).await?;
        if !can_mutate(identity, &comment) {
            tracing::warn!("User {} may not delete comment {}", identity.user_id, comment.id);
            return Err(BackendError::forbidden("You are not allowed to delete this comment"));
        }

        if !self.db.delete_comment(comment.id).await? {
            return Err(BackendError::not_found("Comment"));
        }
        tracing::info!("Comment deleted: {}", comment.id);
        Ok(())
    }

    fn validate_content(&self, content: &str) -> BackendResult<()> {
        if content.trim().is_empty() {
            return Err(BackendError::validation("content", "Comment cannot be empty"));
        }
        if content.chars().count() > self.max_len {
            return Err(BackendError::validation(
                "content",
                format!("Comment cannot be longer than {} characters", self.max_len),
            ));
        }
        Ok(())
    }

    async fn get_comment(&self, comment_id: Uuid) -> BackendResult<Comment> {
        self.db
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Comment"))
    }
}
