//! Login rate-limit policy and decision logic.
//!
//! The limiter counts login attempts per source IP inside a time window.
//! This module only decides; the attempt table itself is read and written
//! by the `db` crate and driven from the API's login extractor.
//!
//! Two window semantics are supported (see [`WindowMode`]). In both, a
//! rejected attempt never mutates the stored record.

use std::str::FromStr;

use chrono::Duration;

use crate::types::Timestamp;

/// Default number of attempts accepted per window.
pub const DEFAULT_MAX_ATTEMPTS: i32 = 5;

/// Default window length in seconds.
pub const DEFAULT_WINDOW_SECS: i64 = 60;

/// Which timestamp anchors an IP's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// The window restarts at every accepted attempt (`last_attempt`).
    /// A client that keeps retrying keeps its counter alive until it goes
    /// quiet for a full window.
    #[default]
    Rolling,
    /// The window opens at the first attempt (`window_start`) and is never
    /// extended; the counter resets one window later regardless of traffic.
    Fixed,
}

impl WindowMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WindowMode::Rolling => "rolling",
            WindowMode::Fixed => "fixed",
        }
    }
}

impl FromStr for WindowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rolling" => Ok(WindowMode::Rolling),
            "fixed" => Ok(WindowMode::Fixed),
            other => Err(format!(
                "unknown rate limit window mode '{other}' (expected 'rolling' or 'fixed')"
            )),
        }
    }
}

/// Login rate-limit settings.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Attempts accepted per window before rejecting.
    pub max_attempts: i32,
    /// Window length.
    pub window: Duration,
    /// Window anchoring semantics.
    pub mode: WindowMode,
    /// When `true`, storage failures during the check let the attempt
    /// through instead of failing the request.
    pub fail_open: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            window: Duration::seconds(DEFAULT_WINDOW_SECS),
            mode: WindowMode::Rolling,
            fail_open: true,
        }
    }
}

/// The stored state for one IP, as far as the decision is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptSnapshot {
    pub attempts: i32,
    pub last_attempt: Timestamp,
    pub window_start: Timestamp,
}

/// Outcome of checking one login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// No live record exists; insert one with a count of 1.
    Start,
    /// A live record exists below the threshold; increment it.
    Increment { attempts: i32 },
    /// The threshold is reached; reject without touching the record.
    Reject { retry_after_secs: i64 },
}

impl RateLimitConfig {
    /// Reject settings under which the limiter could never trip: a zero
    /// budget, or a window that has always elapsed.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts < 1 {
            return Err(format!(
                "max attempts must be positive, got {}",
                self.max_attempts
            ));
        }
        if self.window <= Duration::zero() {
            return Err(format!(
                "window must be positive, got {}s",
                self.window.num_seconds()
            ));
        }
        Ok(())
    }

    /// The timestamp that anchors `snapshot`'s window under this config.
    pub fn anchor(&self, snapshot: &AttemptSnapshot) -> Timestamp {
        match self.mode {
            WindowMode::Rolling => snapshot.last_attempt,
            WindowMode::Fixed => snapshot.window_start,
        }
    }

    /// Records whose anchor is strictly older than this are stale and may be
    /// purged by the lazy global cleanup.
    pub fn cleanup_cutoff(&self, now: Timestamp) -> Timestamp {
        now - self.window
    }

    /// Whether `snapshot` has outlived its window at `now`.
    pub fn is_expired(&self, snapshot: &AttemptSnapshot, now: Timestamp) -> bool {
        self.anchor(snapshot) < self.cleanup_cutoff(now)
    }

    /// Decide what to do with an attempt given the IP's current record.
    pub fn evaluate(
        &self,
        existing: Option<&AttemptSnapshot>,
        now: Timestamp,
    ) -> RateLimitDecision {
        match existing {
            None => RateLimitDecision::Start,
            Some(snapshot) if self.is_expired(snapshot, now) => RateLimitDecision::Start,
            Some(snapshot) if snapshot.attempts >= self.max_attempts => {
                RateLimitDecision::Reject {
                    retry_after_secs: retry_after_secs(self.anchor(snapshot), self.window, now),
                }
            }
            Some(snapshot) => RateLimitDecision::Increment {
                attempts: snapshot.attempts + 1,
            },
        }
    }
}

/// Whole seconds until `anchor + window`, rounded up and never below 1.
pub fn retry_after_secs(anchor: Timestamp, window: Duration, now: Timestamp) -> i64 {
    let remaining_ms = (anchor + window - now).num_milliseconds();
    let secs = remaining_ms.div_euclid(1000) + i64::from(remaining_ms.rem_euclid(1000) != 0);
    secs.max(1)
}
