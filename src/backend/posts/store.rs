/**
 * Post Store
 *
 * Posts are written by admins and read by everyone. Update and delete are
 * open to the post's owner and to admins; the like/dislike toggles to any
 * signed-in user.
 *
 * Post update/delete routes carry a `userId` path segment. It must name the
 * caller; ownership itself is always taken from the stored post.
 */

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::policy::{can_mutate, require_admin};
use crate::backend::auth::sessions::Identity;
use crate::backend::db::Database;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::posts::slug::slugify;
use crate::backend::users::UserStore;
use crate::shared::models::post::{DEFAULT_CATEGORY, DEFAULT_POST_IMAGE};
use crate::shared::models::{
    NewPost, Pagination, Post, PostChanges, PostFilter, SortOrder, UserSummary,
};
use crate::shared::Reaction;

/// Body of a post creation request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub image: Option<String>,
}

/// Body of a post update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

/// One page of the post listing. Totals cover all posts, not the filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total_posts: i64,
    pub last_month_posts: i64,
}

/// Who liked and who disliked a post
#[derive(Debug, Clone, Serialize)]
pub struct ReactionDetails {
    pub likes: Vec<UserSummary>,
    pub dislikes: Vec<UserSummary>,
}

#[derive(Clone)]
pub struct PostStore {
    db: Arc<dyn Database>,
    users: UserStore,
}

impl PostStore {
    pub fn new(db: Arc<dyn Database>, users: UserStore) -> Self {
        Self { db, users }
    }

    pub async fn create(&self, identity: &Identity, draft: PostDraft) -> BackendResult<Post> {
        require_admin(identity, "You are not allowed to create a post")?;

        if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
            return Err(BackendError::validation("", "Please provide all required fields"));
        }

        let post = self
            .db
            .insert_post(NewPost {
                user_id: identity.user_id,
                slug: slugify(&draft.title),
                title: draft.title,
                content: draft.content,
                category: non_empty(draft.category)
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                image: non_empty(draft.image).unwrap_or_else(|| DEFAULT_POST_IMAGE.to_string()),
            })
            .await?;

        tracing::info!("Post created: {} ({})", post.slug, post.id);
        Ok(post)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        post_id: Uuid,
        path_user_id: Uuid,
        update: PostUpdate,
    ) -> BackendResult<Post> {
        let post = self
            .authorize(identity, post_id, path_user_id, "You are not allowed to update this post")
            .await?;

        if update.title.as_deref().is_some_and(|t| t.trim().is_empty())
            || update.content.as_deref().is_some_and(|c| c.trim().is_empty())
        {
            return Err(BackendError::validation("", "Title and content cannot be empty"));
        }

        let changes = PostChanges {
            title: update.title,
            content: update.content,
            category: non_empty(update.category),
            image: non_empty(update.image),
        };

        let updated = self
            .db
            .update_post(post.id, changes)
            .await?
            .ok_or_else(|| BackendError::not_found("Post"))?;

        tracing::info!("Post updated: {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(
        &self,
        identity: &Identity,
        post_id: Uuid,
        path_user_id: Uuid,
    ) -> BackendResult<()> {
        let post = self
            .authorize(identity, post_id, path_user_id, "You are not allowed to delete this post")
            .await?;

        if !self.db.delete_post(post.id).await? {
            return Err(BackendError::not_found("Post"));
        }
        tracing::info!("Post deleted: {}", post.id);
        Ok(())
    }

    pub async fn list(
        &self,
        filter: &PostFilter,
        page: Pagination,
        order: SortOrder,
    ) -> BackendResult<PostPage> {
        let posts = self.db.list_posts(filter, page, order).await?;
        let total_posts = self.db.count_posts(None).await?;
        let last_month_posts = self
            .db
            .count_posts(Some(Utc::now() - Duration::days(30)))
            .await?;

        Ok(PostPage {
            posts,
            total_posts,
            last_month_posts,
        })
    }

    pub async fn toggle_like(&self, identity: &Identity, post_id: Uuid) -> BackendResult<Post> {
        self.react(identity, post_id, Reaction::Like).await
    }

    pub async fn toggle_dislike(&self, identity: &Identity, post_id: Uuid) -> BackendResult<Post> {
        self.react(identity, post_id, Reaction::Dislike).await
    }

    pub async fn reaction_details(
        &self,
        identity: &Identity,
        post_id: Uuid,
    ) -> BackendResult<ReactionDetails> {
        require_admin(identity, "You are not allowed to see who reacted to this post")?;

        let post = self.get_post(post_id).await?;
        Ok(ReactionDetails {
            likes: self.users.reaction_summaries(post.reactions.likes()).await?,
            dislikes: self.users.reaction_summaries(post.reactions.dislikes()).await?,
        })
    }

    async fn react(
        &self,
        identity: &Identity,
        post_id: Uuid,
        reaction: Reaction,
    ) -> BackendResult<Post> {
        let post = self
            .db
            .react_to_post(post_id, identity.user_id, reaction)
            .await?
            .ok_or_else(|| BackendError::not_found("Post"))?;

        tracing::debug!("User {} toggled {:?} on post {}", identity.user_id, reaction, post.id);
        Ok(post)
    }

    /// Load a post the caller wants to change and check they may
    async fn authorize(
        &self,
        identity: &Identity,
        post_id: Uuid,
        path_user_id: Uuid,
        message: &str,
    ) -> BackendResult<Post> {
        if path_user_id != identity.user_id {
            tracing::warn!(
                "User {} addressed post {} as user {}",
                identity.user_id,
                post_id,
                path_user_id
            );
            return Err(BackendError::forbidden(message));
        }

        let post = self.get_post(post_id).await?;
        if !can_mutate(identity, &post) {
            tracing::warn!("User {} may not change post {}", identity.user_id, post.id);
            return Err(BackendError::forbidden(message));
        }
        Ok(post)
    }

    async fn get_post(&self, post_id: Uuid) -> BackendResult<Post> {
        self.db
            .find_post(post_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Post"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::SessionKeys;
    use crate::backend::db::MemoryDatabase;
    use crate::backend::error::AuthError;
    use crate::shared::AppConfig;
    use assert_matches::assert_matches;

    struct Fixture {
        posts: PostStore,
        users: UserStore,
        admin: Identity,
        reader: Identity,
    }

    async fn fixture() -> Fixture {
        let config = Arc::new(
            AppConfig::builder()
                .bcrypt_cost(4)
                .admin_email("admin@example.com")
                .build()
                .unwrap(),
        );
        let db: Arc<dyn Database> = Arc::new(MemoryDatabase::new());
        let users = UserStore::new(db.clone(), SessionKeys::from_config(&config), config);

        let admin = users
            .signup("the_admin", "admin@example.com", "secret123")
            .await
            .unwrap();
        let reader = users
            .signup("reader_one", "reader@example.com", "secret123")
            .await
            .unwrap();

        Fixture {
            posts: PostStore::new(db, users.clone()),
            users,
            admin: Identity::from(&admin.user),
            reader: Identity::from(&reader.user),
        }
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: "Some content".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let f = fixture().await;
        assert_matches!(
            f.posts.create(&f.reader, draft("Hello World")).await,
            Err(BackendError::Auth(AuthError::Forbidden(_)))
        );

        let post = f.posts.create(&f.admin, draft("Hello World")).await.unwrap();
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.user_id, f.admin.user_id);
        assert_eq!(post.category, DEFAULT_CATEGORY);
        assert_eq!(post.image, DEFAULT_POST_IMAGE);
    }

    #[tokio::test]
    async fn test_duplicate_titles_share_a_slug() {
        let f = fixture().await;
        let first = f.posts.create(&f.admin, draft("Hello World")).await.unwrap();
        let second = f.posts.create(&f.admin, draft("Hello World")).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.slug, second.slug);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_fields() {
        let f = fixture().await;
        let result = f.posts.create(&f.admin, draft("   ")).await;
        assert_matches!(result, Err(BackendError::Validation(_)));
    }

    #[tokio::test]
    async fn test_stranger_cannot_update() {
        let f = fixture().await;
        let post = f.posts.create(&f.admin, draft("Hello World")).await.unwrap();
        let update = PostUpdate {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };

        // Claiming to be the owner in the path does not help.
        let spoofed = f
            .posts
            .update(&f.reader, post.id, f.admin.user_id, update.clone())
            .await;
        assert_matches!(spoofed, Err(BackendError::Auth(AuthError::Forbidden(_))));

        let own_id = f
            .posts
            .update(&f.reader, post.id, f.reader.user_id, update)
            .await;
        assert_matches!(own_id, Err(BackendError::Auth(AuthError::Forbidden(_))));

        let page = f
            .posts
            .list(&PostFilter::default(), Pagination::default(), SortOrder::Desc)
            .await
            .unwrap();
        assert_eq!(page.posts[0], post);
    }

    #[tokio::test]
    async fn test_owner_updates_keep_slug() {
        let f = fixture().await;
        let post = f.posts.create(&f.admin, draft("Hello World")).await.unwrap();
        let update = PostUpdate {
            title: Some("Goodbye World".to_string()),
            category: Some("rust".to_string()),
            ..Default::default()
        };

        let updated = f
            .posts
            .update(&f.admin, post.id, f.admin.user_id, update)
            .await
            .unwrap();
        assert_eq!(updated.title, "Goodbye World");
        assert_eq!(updated.category, "rust");
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.slug, "hello-world");
    }

    #[tokio::test]
    async fn test_update_unknown_post() {
        let f = fixture().await;
        let result = f
            .posts
            .update(&f.admin, Uuid::new_v4(), f.admin.user_id, PostUpdate::default())
            .await;
        assert_matches!(result, Err(BackendError::NotFound { resource: "Post" }));
    }

    #[tokio::test]
    async fn test_delete() {
        let f = fixture().await;
        let post = f.posts.create(&f.admin, draft("Hello World")).await.unwrap();

        assert_matches!(
            f.posts.delete(&f.reader, post.id, f.reader.user_id).await,
            Err(BackendError::Auth(AuthError::Forbidden(_)))
        );
        f.posts.delete(&f.admin, post.id, f.admin.user_id).await.unwrap();
        assert_matches!(
            f.posts.delete(&f.admin, post.id, f.admin.user_id).await,
            Err(BackendError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_like_and_dislike_are_exclusive() {
        let f = fixture().await;
        let post = f.posts.create(&f.admin, draft("Hello World")).await.unwrap();

        let disliked = f.posts.toggle_dislike(&f.reader, post.id).await.unwrap();
        assert!(disliked.reactions.dislikes().contains(f.reader.user_id));

        let liked = f.posts.toggle_like(&f.reader, post.id).await.unwrap();
        assert!(liked.reactions.likes().contains(f.reader.user_id));
        assert!(!liked.reactions.dislikes().contains(f.reader.user_id));

        let unliked = f.posts.toggle_like(&f.reader, post.id).await.unwrap();
        assert!(unliked.reactions.likes().is_empty());
        assert!(unliked.reactions.dislikes().is_empty());
    }

    #[tokio::test]
    async fn test_react_to_unknown_post() {
        let f = fixture().await;
        assert_matches!(
            f.posts.toggle_like(&f.reader, Uuid::new_v4()).await,
            Err(BackendError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_reaction_details() {
        let f = fixture().await;
        let post = f.posts.create(&f.admin, draft("Hello World")).await.unwrap();
        f.posts.toggle_like(&f.reader, post.id).await.unwrap();
        f.posts.toggle_dislike(&f.admin, post.id).await.unwrap();

        assert_matches!(
            f.posts.reaction_details(&f.reader, post.id).await,
            Err(BackendError::Auth(AuthError::Forbidden(_)))
        );

        let details = f.posts.reaction_details(&f.admin, post.id).await.unwrap();
        assert_eq!(details.likes.len(), 1);
        assert_eq!(details.likes[0].username, "reader_one");
        assert_eq!(details.dislikes[0].email, "admin@example.com");

        // Deleted users drop out of the details.
        f.users.delete(&f.reader, f.reader.user_id).await.unwrap();
        let details = f.posts.reaction_details(&f.admin, post.id).await.unwrap();
        assert!(details.likes.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_and_totals() {
        let f = fixture().await;
        f.posts.create(&f.admin, draft("Hello there")).await.unwrap();
        f.posts.create(&f.admin, draft("Other topic")).await.unwrap();

        let filter = PostFilter {
            search_term: Some("HELLO".to_string()),
            ..Default::default()
        };
        let page = f
            .posts
            .list(&filter, Pagination::default(), SortOrder::Desc)
            .await
            .unwrap();
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].title, "Hello there");
        assert_eq!(page.total_posts, 2);
        assert_eq!(page.last_month_posts, 2);
    }
}
