/**
 * Signout Handler
 *
 * POST /api/user/signout clears the session cookie. Tokens are stateless,
 * so a bearer token held elsewhere stays valid until it expires.
 */

use axum::{
    http::header::SET_COOKIE,
    response::{IntoResponse, Json},
};

use crate::backend::auth::cookies::cleared_session_cookie;

pub async fn signout() -> impl IntoResponse {
    (
        [(SET_COOKIE, cleared_session_cookie())],
        Json("User has been signed out"),
    )
}
