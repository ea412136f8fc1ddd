/**
 * API Routes
 *
 * Every endpoint of the REST API, relative to the `/api` prefix added by
 * `create_router`.
 *
 * ## Auth
 * - `POST /auth/signup`, `POST /auth/signin`, `POST /auth/google`
 *
 * ## Users
 * - `PUT /user/update/{userId}`, `DELETE /user/delete/{userId}`
 * - `POST /user/signout`, `GET /user/getusers` (admin), `GET /user/{userId}`
 *
 * ## Posts
 * - `POST /post/create` (admin), `GET /post/getposts`
 * - `PUT /post/updatepost/{postId}/{userId}`, `DELETE /post/deletepost/{postId}/{userId}`
 * - `PUT /post/like/{postId}`, `PUT /post/dislike/{postId}`
 * - `GET /post/likes-dislikes/{postId}` (admin)
 *
 * ## Comments
 * - `POST /comment/create`, `GET /comment/getPostComments/{postId}`
 * - `PUT /comment/likeComment/{commentId}`, `PUT /comment/editComment/{commentId}`
 * - `DELETE /comment/deleteComment/{commentId}`
 *
 * ## Misc
 * - `GET /health`
 *
 * Authentication is enforced per handler through the `AuthUser` extractor.
 */

use axum::{
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};

use crate::backend::auth::{google, signin, signout, signup};
use crate::backend::comments::handlers as comments;
use crate::backend::error::BackendError;
use crate::backend::posts::handlers as posts;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers as users;

/// Routes served under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Authentication endpoints
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/google", post(google))
        // Users
        .route("/user/update/{userId}", put(users::update_user))
        .route("/user/delete/{userId}", delete(users::delete_user))
        .route("/user/signout", post(signout))
        .route("/user/getusers", get(users::get_users))
        .route("/user/{userId}", get(users::get_user))
        // Posts
        .route("/post/create", post(posts::create_post))
        .route("/post/getposts", get(posts::get_posts))
        .route("/post/updatepost/{postId}/{userId}", put(posts::update_post))
        .route("/post/deletepost/{postId}/{userId}", delete(posts::delete_post))
        .route("/post/like/{postId}", put(posts::like_post))
        .route("/post/dislike/{postId}", put(posts::dislike_post))
        .route("/post/likes-dislikes/{postId}", get(posts::reaction_details))
        // Comments
        .route("/comment/create", post(comments::create_comment))
        .route("/comment/getPostComments/{postId}", get(comments::get_post_comments))
        .route("/comment/likeComment/{commentId}", put(comments::like_comment))
        .route("/comment/editComment/{commentId}", put(comments::edit_comment))
        .route("/comment/deleteComment/{commentId}", delete(comments::delete_comment))
        .fallback(api_not_found)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn api_not_found() -> BackendError {
    BackendError::not_found("Route")
}
