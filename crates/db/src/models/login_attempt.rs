//! Per-IP login attempt counter.

use portcullis_core::rate_limit::AttemptSnapshot;
use portcullis_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `login_attempts` table. At most one exists per IP.
#[derive(Debug, Clone, FromRow)]
pub struct LoginAttempt {
    pub id: DbId,
    pub ip_address: String,
    pub attempts: i32,
    pub last_attempt: Timestamp,
    pub window_start: Timestamp,
}

impl LoginAttempt {
    /// The fields the rate-limit decision looks at.
    pub fn snapshot(&self) -> AttemptSnapshot {
        AttemptSnapshot {
            attempts: self.attempts,
            last_attempt: self.last_attempt,
            window_start: self.window_start,
        }
    }
}
