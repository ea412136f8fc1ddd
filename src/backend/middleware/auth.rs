/**
 * Authentication Extractor
 *
 * Resolves the caller's identity once per request from the session token
 * (bearer header or `access_token` cookie). Handlers that require a signed-in
 * caller take `AuthUser` as an argument; the rejection is the structured 401
 * error body.
 */

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::backend::auth::cookies::session_token;
use crate::backend::auth::sessions::{Identity, SessionKeys};
use crate::backend::error::BackendError;

/// Identity of an authenticated caller
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    SessionKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let token = session_token(&parts.headers);
        let identity = keys.verify(token.as_deref()).map_err(|e| {
            tracing::warn!("Rejected credential for {}: {}", parts.uri.path(), e);
            e
        })?;
        Ok(AuthUser(identity))
    }
}
