/**
 * Signup Handler
 *
 * POST /api/auth/signup
 *
 * # Example Request
 *
 * ```http
 * POST /api/auth/signup HTTP/1.1
 * Content-Type: application/json
 *
 * { "username": "reader_one", "email": "reader@example.com", "password": "secret123" }
 * ```
 */

use std::sync::Arc;

use axum::{extract::State, response::Response};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::error::BackendResult;
use crate::backend::middleware::ApiJson;
use crate::backend::users::UserStore;
use crate::shared::AppConfig;

pub async fn signup(
    State(users): State<UserStore>,
    State(keys): State<SessionKeys>,
    State(config): State<Arc<AppConfig>>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> BackendResult<Response> {
    tracing::info!("Signup request for: {}", request.username);

    let session = users
        .signup(&request.username, &request.email, &request.password)
        .await?;

    AuthResponse::with_cookie(session, &keys, &config)
}
