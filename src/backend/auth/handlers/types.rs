/**
 * Authentication Handler Types
 *
 * Request bodies of the session endpoints and the response they share.
 * Missing fields deserialize as empty strings so that the store reports
 * them as validation errors rather than the request being rejected outright.
 */

use axum::{
    http::header::SET_COOKIE,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::backend::auth::cookies::session_cookie;
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::error::BackendResult;
use crate::backend::users::AuthSession;
use crate::shared::models::PublicUser;
use crate::shared::AppConfig;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct SignupRequest {
    /// 5-20 chars, letters, digits and underscores
    pub username: String,
    pub email: String,
    /// Hashed before storage
    pub password: String,
}

/// Sign in request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Auth response
///
/// Returned by sign-up and both sign-in flows, together with the session
/// cookie.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

impl AuthResponse {
    /// Response carrying the session both in the body and as a cookie
    pub fn with_cookie(
        session: AuthSession,
        keys: &SessionKeys,
        config: &AppConfig,
    ) -> BackendResult<Response> {
        let cookie = session_cookie(&session.token, keys.ttl(), config.secure_cookies)?;
        let body = AuthResponse {
            user: session.user.to_public(),
            token: session.token,
        };
        Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
    }
}
