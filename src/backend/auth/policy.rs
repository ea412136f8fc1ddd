//! Authorization Policy
//!
//! One place for every "who may touch this record" decision. The stores call
//! these functions with the identity resolved for the request and the record
//! as it is stored. Posts and comments are never judged by ids taken from the
//! URL; an account id is its own owner, so account routes can be checked
//! before the account is looked up.

use uuid::Uuid;

use crate::backend::auth::sessions::Identity;
use crate::backend::error::AuthError;
use crate::shared::models::{Comment, Post, User};

/// A record with an owning user
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// An account is owned by itself
impl Owned for User {
    fn owner_id(&self) -> Uuid {
        self.id
    }
}

/// An account id, as addressed by the user routes
impl Owned for Uuid {
    fn owner_id(&self) -> Uuid {
        *self
    }
}

pub fn is_owner<R: Owned + ?Sized>(identity: &Identity, resource: &R) -> bool {
    identity.user_id == resource.owner_id()
}

/// Owner or admin
pub fn can_mutate<R: Owned + ?Sized>(identity: &Identity, resource: &R) -> bool {
    identity.is_admin || is_owner(identity, resource)
}

pub fn require_admin(identity: &Identity, message: &str) -> Result<(), AuthError> {
    if identity.is_admin {
        Ok(())
    } else {
        Err(AuthError::forbidden(message))
    }
}
