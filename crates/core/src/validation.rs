//! Request input validation for login and registration.
//!
//! Field rules are declared with `validator` derives. Callers only ever see
//! the first violation (in field declaration order) as a single
//! human-readable [`CoreError::Validation`] message.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Inclusive username length bounds, in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Body of `POST /api/auth/login`.
///
/// `email` carries the login identifier, which may be either the account's
/// email address or its username.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl LoginInput {
    /// Check field rules, returning the first violation as a domain error.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| first_violation(&errors, &["email", "password"]))
    }
}

impl RegisterInput {
    /// Check field rules, returning the first violation as a domain error.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| first_violation(&errors, &["email", "username", "password"]))
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(violation("required", "Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(violation(
            "length",
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(violation("required", "Username is required"));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(violation(
            "alphanum",
            "Username must only contain alpha-numeric characters",
        ));
    }
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(violation(
            "length",
            "Username must be between 3 and 30 characters",
        ));
    }
    Ok(())
}

/// Pick the first violated field in `order` and turn its first error into
/// a [`CoreError::Validation`].
fn first_violation(errors: &ValidationErrors, order: &[&str]) -> CoreError {
    let fields = errors.field_errors();
    let message = order
        .iter()
        .find_map(|field| {
            fields
                .get(*field)
                .and_then(|errs| errs.first())
                .map(|err| match err.message.as_deref() {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
        })
        .unwrap_or_else(|| "Invalid input".to_string());
    CoreError::Validation(message)
}
