/**
 * User Handlers
 *
 * HTTP handlers for `/api/user/...`.
 *
 * - `PUT    /user/update/{userId}`  - update own profile
 * - `DELETE /user/delete/{userId}`  - delete own account (or any, as admin)
 * - `GET    /user/getusers`         - admin listing
 * - `GET    /user/{userId}`         - public profile
 *
 * Sign-out lives with the other session handlers in `auth::handlers`.
 */

use axum::{extract::State, response::Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::middleware::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::backend::users::store::{ProfileUpdate, UserPage, UserStore};
use crate::shared::models::{Pagination, PublicUser, SortOrder};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserListQuery {
    pub start_index: Option<usize>,
    pub limit: Option<usize>,
    pub sort: SortOrder,
}

pub async fn update_user(
    State(users): State<UserStore>,
    AuthUser(identity): AuthUser,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> BackendResult<Json<PublicUser>> {
    let user = users.update(&identity, user_id, update).await?;
    Ok(Json(user.to_public()))
}

pub async fn delete_user(
    State(users): State<UserStore>,
    AuthUser(identity): AuthUser,
    ApiPath(user_id): ApiPath<Uuid>,
) -> BackendResult<Json<&'static str>> {
    users.delete(&identity, user_id).await?;
    Ok(Json("User has been deleted"))
}

pub async fn get_users(
    State(users): State<UserStore>,
    AuthUser(identity): AuthUser,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> BackendResult<Json<UserPage>> {
    let page = Pagination::new(query.start_index, query.limit);
    Ok(Json(users.list(&identity, page, query.sort).await?))
}

pub async fn get_user(
    State(users): State<UserStore>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> BackendResult<Json<PublicUser>> {
    Ok(Json(users.get_by_id(user_id).await?))
}
