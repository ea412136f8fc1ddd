/**
 * User Store
 *
 * Account lifecycle on top of the `UserRecords` capability: sign-up,
 * sign-in (password or Google), profile updates, deletion and the admin
 * listing. Every operation that acts on behalf of someone takes the
 * caller's `Identity` explicitly.
 */

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::passwords::{generate_password, PasswordHasher};
use crate::backend::auth::policy::{can_mutate, is_owner, require_admin};
use crate::backend::auth::sessions::{Identity, SessionKeys};
use crate::backend::db::{Database, DbError};
use crate::backend::error::{AuthError, BackendError, BackendResult};
use crate::backend::users::validation::{validate_email, validate_password, validate_username};
use crate::shared::models::user::DEFAULT_PROFILE_PICTURE;
use crate::shared::models::{
    NewUser, Pagination, PublicUser, SortOrder, User, UserChanges, UserSummary,
};
use crate::shared::{AppConfig, ReactionSet};

const GOOGLE_USERNAME_STEM_LEN: usize = 16;
const GOOGLE_USERNAME_ATTEMPTS: usize = 3;

/// A signed-in user together with a fresh session token
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Profile returned by Google sign-in on the client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleProfile {
    pub email: String,
    pub name: String,
    pub google_photo_url: Option<String>,
}

/// Fields a user may change on their own account
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_picture: Option<String>,
}

/// One page of the admin user listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<PublicUser>,
    pub total_users: i64,
    pub last_month_users: i64,
}

#[derive(Clone)]
pub struct UserStore {
    db: Arc<dyn Database>,
    sessions: SessionKeys,
    passwords: PasswordHasher,
    config: Arc<AppConfig>,
}

impl UserStore {
    pub fn new(db: Arc<dyn Database>, sessions: SessionKeys, config: Arc<AppConfig>) -> Self {
        Self {
            db,
            sessions,
            passwords: PasswordHasher::new(config.bcrypt_cost),
            config,
        }
    }

    /// Register a new account and sign it in
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> BackendResult<AuthSession> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(BackendError::validation("", "All fields are required"));
        }
        validate_username(username)?;
        validate_email(email)?;
        validate_password(password)?;

        let user = self
            .db
            .insert_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: self.passwords.hash(password)?,
                profile_picture: DEFAULT_PROFILE_PICTURE.to_string(),
                is_admin: self.config.is_admin_email(email),
            })
            .await?;

        tracing::info!("User created: {} ({})", user.username, user.id);
        self.start_session(user)
    }

    pub async fn signin(&self, email: &str, password: &str) -> BackendResult<AuthSession> {
        if email.is_empty() || password.is_empty() {
            return Err(BackendError::validation("", "All fields are required"));
        }

        let user = self.db.find_user_by_email(email).await?.ok_or_else(|| {
            tracing::warn!("Sign-in for unknown email");
            BackendError::not_found("User")
        })?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::warn!("Invalid password for user: {}", user.id);
            return Err(AuthError::WrongPassword.into());
        }

        tracing::info!("User signed in: {}", user.id);
        self.start_session(user)
    }

    /// Sign in with a Google profile, creating the account on first use
    pub async fn google_auth(&self, profile: &GoogleProfile) -> BackendResult<AuthSession> {
        validate_email(&profile.email)?;

        if let Some(user) = self.db.find_user_by_email(&profile.email).await? {
            tracing::info!("Google sign-in for existing user: {}", user.id);
            return self.start_session(user);
        }

        let password_hash = self.passwords.hash(&generate_password())?;
        let profile_picture = profile
            .google_photo_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE_PICTURE.to_string());

        let mut attempt = 0;
        let user = loop {
            attempt += 1;
            let result = self
                .db
                .insert_user(NewUser {
                    username: google_username(&profile.name),
                    email: profile.email.clone(),
                    password_hash: password_hash.clone(),
                    profile_picture: profile_picture.clone(),
                    is_admin: self.config.is_admin_email(&profile.email),
                })
                .await;

            match result {
                Err(DbError::UniqueViolation { field: "username" })
                    if attempt < GOOGLE_USERNAME_ATTEMPTS =>
                {
                    tracing::debug!("Generated username taken, retrying");
                }
                other => break other?,
            }
        };

        tracing::info!("User created from Google profile: {} ({})", user.username, user.id);
        self.start_session(user)
    }

    /// Update the caller's own account
    pub async fn update(
        &self,
        identity: &Identity,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> BackendResult<User> {
        if !is_owner(identity, &user_id) {
            tracing::warn!("User {} tried to update user {}", identity.user_id, user_id);
            return Err(BackendError::forbidden("You are not allowed to update this user"));
        }
        let user = self.get_user(user_id).await?;

        let mut changes = UserChanges::default();
        if let Some(username) = update.username {
            validate_username(&username)?;
            changes.username = Some(username);
        }
        if let Some(email) = update.email {
            validate_email(&email)?;
            changes.email = Some(email);
        }
        if let Some(password) = update.password {
            validate_password(&password)?;
            changes.password_hash = Some(self.passwords.hash(&password)?);
        }
        changes.profile_picture = update.profile_picture.filter(|url| !url.is_empty());

        if changes.is_empty() {
            return Ok(user);
        }

        let updated = self
            .db
            .update_user(user_id, changes)
            .await?
            .ok_or_else(|| BackendError::not_found("User"))?;

        tracing::info!("User updated: {}", updated.id);
        Ok(updated)
    }

    /// Delete an account. Posts and comments by the user are kept.
    pub async fn delete(&self, identity: &Identity, user_id: Uuid) -> BackendResult<()> {
        if !can_mutate(identity, &user_id) {
            tracing::warn!("User {} tried to delete user {}", identity.user_id, user_id);
            return Err(BackendError::forbidden("You are not allowed to delete this user"));
        }

        if !self.db.delete_user(user_id).await? {
            return Err(BackendError::not_found("User"));
        }
        tracing::info!("User deleted: {}", user_id);
        Ok(())
    }

    pub async fn list(
        &self,
        identity: &Identity,
        page: Pagination,
        order: SortOrder,
    ) -> BackendResult<UserPage> {
        require_admin(identity, "You are not allowed to see all users")?;

        let users = self.db.list_users(page, order).await?;
        let total_users = self.db.count_users(None).await?;
        let last_month_users = self
            .db
            .count_users(Some(Utc::now() - Duration::days(30)))
            .await?;

        Ok(UserPage {
            users: users.iter().map(User::to_public).collect(),
            total_users,
            last_month_users,
        })
    }

    pub async fn get_by_id(&self, user_id: Uuid) -> BackendResult<PublicUser> {
        Ok(self.get_user(user_id).await?.to_public())
    }

    /// `{username, email}` of every user in `ids` that still exists
    pub async fn reaction_summaries(&self, ids: &ReactionSet) -> BackendResult<Vec<UserSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.db.find_users(&ids.to_vec()).await?;
        Ok(users.iter().map(User::to_summary).collect())
    }

    async fn get_user(&self, user_id: Uuid) -> BackendResult<User> {
        self.db
            .find_user(user_id)
            .await?
            .ok_or_else(|| BackendError::not_found("User"))
    }

    fn start_session(&self, user: User) -> BackendResult<AuthSession> {
        let token = self.sessions.issue(&Identity::from(&user))?;
        Ok(AuthSession { user, token })
    }
}

/// Username for a Google account: the display name reduced to `[a-z0-9_]`
/// followed by four random digits
pub fn google_username(name: &str) -> String {
    let mut stem: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(GOOGLE_USERNAME_STEM_LEN)
        .collect();
    if stem.is_empty() {
        stem.push_str("user");
    }
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{stem}{suffix:04}")
}
