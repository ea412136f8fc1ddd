/**
 * Session Tokens (Credential Verifier)
 *
 * Session tokens are HS256 JWTs carrying the caller's identity
 * (`sub` = user id, `isAdmin`). They are issued at sign-up/sign-in with a
 * fixed lifetime and never refreshed: once expired the user signs in again.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::{AuthError, BackendError, BackendResult};
use crate::shared::models::User;
use crate::shared::AppConfig;

/// Verified identity of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Identity {
    pub fn new(user_id: Uuid, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.is_admin)
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Admin flag at the time the token was issued
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Signing and verification keys plus token lifetime
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl())
    }

    /// Lifetime of issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a signed token for `identity`
    pub fn issue(&self, identity: &Identity) -> BackendResult<String> {
        let now = Utc::now();
        let expires = now.checked_add_signed(self.ttl).ok_or_else(|| {
            tracing::error!("Token lifetime {:?} overflows the clock", self.ttl);
            BackendError::internal("failed to create session token")
        })?;
        let claims = Claims {
            sub: identity.user_id.to_string(),
            is_admin: identity.is_admin,
            iat: now.timestamp().max(0) as u64,
            exp: expires.timestamp().max(0) as u64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            BackendError::internal("failed to create session token")
        })
    }

    /// Verify a token and extract the identity it carries
    ///
    /// `None` means the request carried no credential at all.
    pub fn verify(&self, token: Option<&str>) -> Result<Identity, AuthError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredential)?;

        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                tracing::warn!("Invalid token: {:?}", e);
                AuthError::InvalidCredential
            })?;

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|e| {
            tracing::warn!("Invalid user ID in token: {:?}", e);
            AuthError::InvalidCredential
        })?;

        Ok(Identity::new(user_id, data.claims.is_admin))
    }
}
