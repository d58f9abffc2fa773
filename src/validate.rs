//! Credential forms and the pure validator.
//!
//! Validation runs before any gateway call and has no side effects: given the
//! same form it always returns the same result, and the first failing check
//! wins. Passwords are held as [`SecretString`] so they stay out of `Debug`
//! output and logs.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Sign-up credentials, created per keystroke and discarded on navigation.
#[derive(Clone, Debug, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Log-in credentials.
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Local validation failures; these never touch the gateway.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required fields")]
    MissingFields,
    #[error("password confirmation does not match")]
    PasswordMismatch,
    #[error("password shorter than {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
}

/// Checks run in order: completeness, confirmation, minimum length.
pub fn validate_signup(form: &SignupForm) -> Result<(), ValidationError> {
    let password = form.password.expose_secret();
    let confirm = form.confirm_password.expose_secret();

    if form.full_name.is_empty() || form.email.is_empty() || password.is_empty() || confirm.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(())
}

pub fn validate_login(form: &LoginForm) -> Result<(), ValidationError> {
    if form.email.is_empty() || form.password.expose_secret().is_empty() {
        return Err(ValidationError::MissingFields);
    }

    Ok(())
}
