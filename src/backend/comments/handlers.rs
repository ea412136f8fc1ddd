/**
 * Comment Handlers
 *
 * HTTP handlers for `/api/comment/...`.
 *
 * - `POST   /comment/create`                    - signed-in, 201
 * - `GET    /comment/getPostComments/{postId}`  - public
 * - `PUT    /comment/likeComment/{commentId}`   - signed-in
 * - `PUT    /comment/editComment/{commentId}`   - author only
 * - `DELETE /comment/deleteComment/{commentId}` - author or admin
 *
 * A `userId` in the create body is accepted for client compatibility and
 * ignored: the author is the caller.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::comments::store::CommentStore;
use crate::backend::error::BackendResult;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::shared::models::Comment;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: String,
    pub post_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditCommentRequest {
    pub content: String,
}

pub async fn create_comment(
    State(comments): State<CommentStore>,
    AuthUser(identity): AuthUser,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> BackendResult<(StatusCode, Json<Comment>)> {
    let comment = comments
        .create(&identity, request.post_id, request.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get_post_comments(
    State(comments): State<CommentStore>,
    ApiPath(post_id): ApiPath<Uuid>,
) -> BackendResult<Json<Vec<Comment>>> {
    Ok(Json(comments.list_for_post(post_id).await?))
}

pub async fn like_comment(
    State(comments): State<CommentStore>,
    AuthUser(identity): AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
) -> BackendResult<Json<Comment>> {
    Ok(Json(comments.toggle_like(&identity, comment_id).await?))
}

pub async fn edit_comment(
    State(comments): State<CommentStore>,
    AuthUser(identity): AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<EditCommentRequest>,
) -> BackendResult<Json<Comment>> {
    Ok(Json(
        comments.edit(&identity, comment_id, request.content).await?,
    ))
}

pub async fn delete_comment(
    State(comments): State<CommentStore>,
    AuthUser(identity): AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
) -> BackendResult<Json<&'static str>> {
    comments.delete(&identity, comment_id).await?;
    Ok(Json("Comment has been deleted"))
}
