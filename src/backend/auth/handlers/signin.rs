/**
 * Signin Handlers
 *
 * - `POST /api/auth/signin` - email and password
 * - `POST /api/auth/google` - Google profile, account created on first use
 *
 * A wrong password is a 401 and an unknown email a 404; neither response
 * says anything else about the account.
 */

use std::sync::Arc;

use axum::{extract::State, response::Response};

use crate::backend::auth::handlers::types::{AuthResponse, SigninRequest};
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::error::BackendResult;
use crate::backend::middleware::ApiJson;
use crate::backend::users::{GoogleProfile, UserStore};
use crate::shared::AppConfig;

pub async fn signin(
    State(users): State<UserStore>,
    State(keys): State<SessionKeys>,
    State(config): State<Arc<AppConfig>>,
    ApiJson(request): ApiJson<SigninRequest>,
) -> BackendResult<Response> {
    let session = users.signin(&request.email, &request.password).await?;
    AuthResponse::with_cookie(session, &keys, &config)
}

pub async fn google(
    State(users): State<UserStore>,
    State(keys): State<SessionKeys>,
    State(config): State<Arc<AppConfig>>,
    ApiJson(profile): ApiJson<GoogleProfile>,
) -> BackendResult<Response> {
    let session = users.google_auth(&profile).await?;
    AuthResponse::with_cookie(session, &keys, &config)
}
