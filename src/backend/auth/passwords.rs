/**
 * Password Hashing
 *
 * bcrypt hash/verify with a configurable work factor, plus the random
 * passwords given to accounts created through Google sign-in.
 */

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::backend::error::BackendResult;

const GENERATED_PASSWORD_LEN: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> BackendResult<String> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    pub fn verify(&self, password: &str, hash: &str) -> BackendResult<bool> {
        Ok(bcrypt::verify(password, hash)?)
    }
}

/// Random alphanumeric password for accounts that never chose one
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}
