/**
 * Account Field Validation
 *
 * Rules shared by sign-up and profile updates:
 *
 * - username: 5 to 20 characters, letters, digits and underscores only
 * - email: non-empty and containing `@`
 * - password: at least 6 characters with at least one letter and one digit
 */

use crate::shared::SharedError;

pub const USERNAME_MIN_LEN: usize = 5;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 6;

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), SharedError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(SharedError::validation(
            "username",
            "Username must be between 5 and 20 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(SharedError::validation(
            "username",
            "Username can only contain letters, numbers and underscores",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), SharedError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(SharedError::validation("email", "Invalid email address"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), SharedError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if password.chars().count() < PASSWORD_MIN_LEN || !has_letter || !has_digit {
        return Err(SharedError::validation(
            "password",
            "Password must be at least 6 characters and contain letters and numbers",
        ));
    }
    Ok(())
}
