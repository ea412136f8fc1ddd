/**
 * Post Records
 *
 * A post is owned by the admin who created it (`user_id`, never changed
 * afterwards) and carries the like/dislike sets of its readers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::reactions::PostReactions;

/// Category assigned when the author does not choose one
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Cover image assigned when the author does not provide one
pub const DEFAULT_POST_IMAGE: &str =
    "https://www.hostinger.com/tutorials/wp-content/uploads/sites/2/2021/09/how-to-write-a-blog-post.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Author of the post
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub image: String,
    /// URL identifier derived from the title at creation time
    pub slug: String,
    #[serde(flatten)]
    pub reactions: PostReactions,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub image: String,
    pub slug: String,
}

/// Editable post fields; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

/// Listing filters. Every populated field must match.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub user_id: Option<Uuid>,
    pub category: Option<String>,
    pub post_id: Option<Uuid>,
    pub slug: Option<String>,
    /// Case-insensitive substring of the title or the content
    pub search_term: Option<String>,
}

impl PostFilter {
    /// In-process evaluation of the filter against one post
    pub fn matches(&self, post: &Post) -> bool {
        if self.user_id.is_some_and(|id| id != post.user_id) {
            return false;
        }
        if self.post_id.is_some_and(|id| id != post.id) {
            return false;
        }
        if self.category.as_deref().is_some_and(|c| c != post.category) {
            return false;
        }
        if self.slug.as_deref().is_some_and(|s| s != post.slug) {
            return false;
        }
        match self.search_term.as_deref() {
            Some(term) if !term.is_empty() => {
                let needle = term.to_lowercase();
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}
