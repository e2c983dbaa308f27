//! Repository for the `login_attempts` table (the rate limiter's attempt
//! tracker).

use portcullis_core::rate_limit::WindowMode;
use portcullis_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::login_attempt::LoginAttempt;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ip_address, attempts, last_attempt, window_start";

/// Provides the attempt counter operations.
pub struct LoginAttemptRepo;

/// Column that anchors a record's window for the given mode.
fn anchor_column(mode: WindowMode) -> &'static str {
    match mode {
        WindowMode::Rolling => "last_attempt",
        WindowMode::Fixed => "window_start",
    }
}

impl LoginAttemptRepo {
    /// Delete every record (for any IP) whose window anchor is older than
    /// `cutoff`. Returns the number of purged rows.
    pub async fn delete_stale(
        pool: &PgPool,
        cutoff: Timestamp,
        mode: WindowMode,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "DELETE FROM login_attempts WHERE {} < $1",
            anchor_column(mode)
        );
        let result = sqlx::query(&query).bind(cutoff).execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Find the record for an IP, if any.
    pub async fn find_by_ip(
        pool: &PgPool,
        ip_address: &str,
    ) -> Result<Option<LoginAttempt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM login_attempts WHERE ip_address = $1");
        sqlx::query_as::<_, LoginAttempt>(&query)
            .bind(ip_address)
            .fetch_optional(pool)
            .await
    }

    /// Count one attempt for `ip_address` in a single statement.
    ///
    /// Inserts a fresh record with a count of 1, restarts a record whose
    /// anchor is older than `cutoff`, or increments a live record that is
    /// still below `max_attempts`. In every accepted case `last_attempt`
    /// becomes `now`.
    ///
    /// Returns the new count, or `None` when the live record had already
    /// reached `max_attempts` (nothing is written in that case). Because the
    /// threshold check happens under the row lock, concurrent attempts from
    /// the same IP cannot both slip past it.
    pub async fn record_attempt(
        pool: &PgPool,
        ip_address: &str,
        now: Timestamp,
        cutoff: Timestamp,
        max_attempts: i32,
        mode: WindowMode,
    ) -> Result<Option<i32>, sqlx::Error> {
        let anchor = anchor_column(mode);
        let query = format!(
            "INSERT INTO login_attempts (ip_address, attempts, last_attempt, window_start)
             VALUES ($1, 1, $2, $2)
             ON CONFLICT (ip_address) DO UPDATE SET
                attempts = CASE WHEN login_attempts.{anchor} < $3
                                THEN 1 ELSE login_attempts.attempts + 1 END,
                window_start = CASE WHEN login_attempts.{anchor} < $3
                                    THEN EXCLUDED.window_start ELSE login_attempts.window_start END,
                last_attempt = EXCLUDED.last_attempt
             WHERE login_attempts.attempts < $4 OR login_attempts.{anchor} < $3
             RETURNING attempts"
        );
        let row: Option<(i32,)> = sqlx::query_as(&query)
            .bind(ip_address)
            .bind(now)
            .bind(cutoff)
            .bind(max_attempts)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(attempts,)| attempts))
    }
}
