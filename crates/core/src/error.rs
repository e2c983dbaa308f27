use crate::types::DbId;

/// Message shared by every failed login so callers cannot tell an unknown
/// identifier apart from a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email/username or password";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("User with this email or username already exists")]
    UserExists,

    #[error("User not found: {id}")]
    UserNotFound { id: DbId },

    #[error("Too many login attempts, retry after {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}
