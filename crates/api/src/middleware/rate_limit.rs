//! Per-IP login rate limiting backed by the `login_attempts` table.
//!
//! Every login request passes through [`LoginRateLimit`] before its body is
//! even parsed, so malformed and failed attempts count the same as
//! successful ones.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use chrono::Utc;
use portcullis_core::error::CoreError;
use portcullis_core::rate_limit::{retry_after_secs, RateLimitConfig, RateLimitDecision};
use portcullis_core::types::Timestamp;
use portcullis_db::repositories::LoginAttemptRepo;
use portcullis_db::DbPool;

use crate::error::AppError;
use crate::state::AppState;

/// Bucket used when no client address can be determined.
const UNKNOWN_CLIENT: &str = "unknown";

/// Why a login attempt was not counted.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("too many login attempts, retry after {retry_after_secs}s")]
    Exceeded { retry_after_secs: i64 },

    #[error("attempt tracker unavailable: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Proof that the current login attempt was admitted by the rate limiter.
#[derive(Debug, Clone)]
pub struct LoginRateLimit {
    /// Client address the attempt was counted against.
    pub ip: String,
    /// Attempts recorded in the current window, including this one.
    /// `None` when the tracker failed and the limiter let the attempt through.
    pub attempts: Option<i32>,
}

impl FromRequestParts<AppState> for LoginRateLimit {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ip = client_ip(parts, state.config.trust_proxy_headers);
        let config = &state.config.rate_limit;

        match check_login_attempt(&state.pool, config, &ip, Utc::now()).await {
            Ok(attempts) => Ok(LoginRateLimit {
                ip,
                attempts: Some(attempts),
            }),
            Err(RateLimitError::Exceeded { retry_after_secs }) => {
                tracing::warn!(%ip, retry_after_secs, "Login rate limit exceeded");
                Err(AppError::Core(CoreError::RateLimitExceeded { retry_after_secs }))
            }
            Err(RateLimitError::Storage(err)) if config.fail_open => {
                tracing::warn!(%ip, error = %err, "Rate limit check failed, allowing attempt");
                Ok(LoginRateLimit { ip, attempts: None })
            }
            Err(RateLimitError::Storage(err)) => Err(AppError::Database(err)),
        }
    }
}

/// Count one login attempt from `ip` at `now`.
///
/// 1. Purge every record whose window has lapsed (all IPs, not just this one).
/// 2. Look up this IP's record and decide.
/// 3. On admission, insert or increment the record in one guarded statement.
///
/// Returns the attempt count after this attempt. Rejections leave the table
/// unchanged.
pub async fn check_login_attempt(
    pool: &DbPool,
    config: &RateLimitConfig,
    ip: &str,
    now: Timestamp,
) -> Result<i32, RateLimitError> {
    let cutoff = config.cleanup_cutoff(now);

    let purged = LoginAttemptRepo::delete_stale(pool, cutoff, config.mode).await?;
    if purged > 0 {
        tracing::debug!(purged, "Purged stale login attempt records");
    }

    let existing = LoginAttemptRepo::find_by_ip(pool, ip).await?;
    let snapshot = existing.as_ref().map(|row| row.snapshot());

    if let RateLimitDecision::Reject { retry_after_secs } = config.evaluate(snapshot.as_ref(), now)
    {
        return Err(RateLimitError::Exceeded { retry_after_secs });
    }

    let recorded = LoginAttemptRepo::record_attempt(
        pool,
        ip,
        now,
        cutoff,
        config.max_attempts,
        config.mode,
    )
    .await?;

    match recorded {
        Some(attempts) => Ok(attempts),
        None => {
            // A concurrent attempt from the same IP filled the budget between
            // our read and write.
            let anchor = LoginAttemptRepo::find_by_ip(pool, ip)
                .await?
                .map(|row| config.anchor(&row.snapshot()))
                .unwrap_or(now);
            Err(RateLimitError::Exceeded {
                retry_after_secs: retry_after_secs(anchor, config.window, now),
            })
        }
    }
}

/// Resolve the client address used as the rate-limit key.
///
/// With `trust_proxy_headers`, the first `X-Forwarded-For` entry wins;
/// otherwise the TCP peer address is used.
pub fn client_ip(parts: &Parts, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
