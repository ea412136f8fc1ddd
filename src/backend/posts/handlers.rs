/**
 * Post Handlers
 *
 * HTTP handlers for `/api/post/...`.
 *
 * - `POST   /post/create`                        - admin only, 201
 * - `GET    /post/getposts`                      - public listing with filters
 * - `PUT    /post/updatepost/{postId}/{userId}`  - owner or admin
 * - `DELETE /post/deletepost/{postId}/{userId}`  - owner or admin
 * - `PUT    /post/like/{postId}`                 - any signed-in user
 * - `PUT    /post/dislike/{postId}`              - any signed-in user
 * - `GET    /post/likes-dislikes/{postId}`       - admin only
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::middleware::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::backend::posts::store::{PostDraft, PostPage, PostStore, PostUpdate, ReactionDetails};
use crate::shared::models::{Pagination, Post, PostFilter, SortOrder};

/// Query string of `GET /post/getposts`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostListQuery {
    pub start_index: Option<usize>,
    pub limit: Option<usize>,
    pub order: SortOrder,
    pub user_id: Option<Uuid>,
    pub category: Option<String>,
    pub slug: Option<String>,
    pub post_id: Option<Uuid>,
    pub search_term: Option<String>,
}

impl PostListQuery {
    fn filter(&self) -> PostFilter {
        PostFilter {
            user_id: self.user_id,
            category: self.category.clone(),
            post_id: self.post_id,
            slug: self.slug.clone(),
            search_term: self.search_term.clone(),
        }
    }
}

pub async fn create_post(
    State(posts): State<PostStore>,
    AuthUser(identity): AuthUser,
    ApiJson(draft): ApiJson<PostDraft>,
) -> BackendResult<(StatusCode, Json<Post>)> {
    let post = posts.create(&identity, draft).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_posts(
    State(posts): State<PostStore>,
    ApiQuery(query): ApiQuery<PostListQuery>,
) -> BackendResult<Json<PostPage>> {
    let page = Pagination::new(query.start_index, query.limit);
    Ok(Json(posts.list(&query.filter(), page, query.order).await?))
}

pub async fn update_post(
    State(posts): State<PostStore>,
    AuthUser(identity): AuthUser,
    ApiPath((post_id, user_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(update): ApiJson<PostUpdate>,
) -> BackendResult<Json<Post>> {
    Ok(Json(posts.update(&identity, post_id, user_id, update).await?))
}

pub async fn delete_post(
    State(posts): State<PostStore>,
    AuthUser(identity): AuthUser,
    ApiPath((post_id, user_id)): ApiPath<(Uuid, Uuid)>,
) -> BackendResult<Json<&'static str>> {
    posts.delete(&identity, post_id, user_id).await?;
    Ok(Json("The post has been deleted"))
}

pub async fn like_post(
    State(posts): State<PostStore>,
    AuthUser(identity): AuthUser,
    ApiPath(post_id): ApiPath<Uuid>,
) -> BackendResult<Json<Post>> {
    Ok(Json(posts.toggle_like(&identity, post_id).await?))
}

pub async fn dislike_post(
    State(posts): State<PostStore>,
    AuthUser(identity): AuthUser,
    ApiPath(post_id): ApiPath<Uuid>,
) -> BackendResult<Json<Post>> {
    Ok(Json(posts.toggle_dislike(&identity, post_id).await?))
}

pub async fn reaction_details(
    State(posts): State<PostStore>,
    AuthUser(identity): AuthUser,
    ApiPath(post_id): ApiPath<Uuid>,
) -> BackendResult<Json<ReactionDetails>> {
    Ok(Json(posts.reaction_details(&identity, post_id).await?))
}
