use std::fmt::Display;
use std::str::FromStr;

use portcullis_core::rate_limit::{
    RateLimitConfig, WindowMode, DEFAULT_MAX_ATTEMPTS, DEFAULT_WINDOW_SECS,
};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on pooled database connections (default: `10`).
    pub database_max_connections: u32,
    /// JWT session token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Add the `Secure` attribute to the session cookie (set when served over TLS).
    pub cookie_secure: bool,
    /// Take the client IP from `X-Forwarded-For` when running behind a proxy.
    pub trust_proxy_headers: bool,
    /// Login rate limiting policy.
    pub rate_limit: RateLimitConfig,
    /// Create the demo account at startup if it does not exist.
    pub seed_demo_user: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `HOST`                           | `0.0.0.0`               |
    /// | `PORT`                           | `5000`                  |
    /// | `CORS_ORIGINS`                   | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                    |
    /// | `DATABASE_MAX_CONNECTIONS`       | `10`                    |
    /// | `COOKIE_SECURE`                  | `false`                 |
    /// | `TRUST_PROXY_HEADERS`            | `false`                 |
    /// | `LOGIN_RATE_LIMIT_MAX_ATTEMPTS`  | `5`                     |
    /// | `LOGIN_RATE_LIMIT_WINDOW_SECS`   | `60`                    |
    /// | `LOGIN_RATE_LIMIT_MODE`          | `rolling`               |
    /// | `LOGIN_RATE_LIMIT_FAIL_OPEN`     | `true`                  |
    /// | `SEED_DEMO_USER`                 | `true`                  |
    ///
    /// See [`JwtConfig::from_env`] for the token settings.
    ///
    /// # Panics
    ///
    /// Panics if any variable is set to an unparseable value; misconfiguration
    /// should stop the server at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 5000);

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);
        let database_max_connections: u32 = env_or("DATABASE_MAX_CONNECTIONS", 10);

        let rate_limit = RateLimitConfig {
            max_attempts: env_or("LOGIN_RATE_LIMIT_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            window: chrono::Duration::seconds(env_or(
                "LOGIN_RATE_LIMIT_WINDOW_SECS",
                DEFAULT_WINDOW_SECS,
            )),
            mode: env_or("LOGIN_RATE_LIMIT_MODE", WindowMode::Rolling),
            fail_open: env_flag("LOGIN_RATE_LIMIT_FAIL_OPEN", true),
        };
        if let Err(e) = rate_limit.validate() {
            panic!("Invalid LOGIN_RATE_LIMIT_* settings: {e}");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_max_connections,
            jwt: JwtConfig::from_env(),
            cookie_secure: env_flag("COOKIE_SECURE", false),
            trust_proxy_headers: env_flag("TRUST_PROXY_HEADERS", false),
            rate_limit,
            seed_demo_user: env_flag("SEED_DEMO_USER", true),
        }
    }
}

/// Read and parse `key`, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// Read a boolean flag, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set to something other than a recognised flag value.
fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw)
            .unwrap_or_else(|| panic!("{key} must be a boolean flag, got '{raw}'")),
        Err(_) => default,
    }
}

/// Parse `1/true/yes/on` and `0/false/no/off` (case-insensitive).
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn env_or_falls_back_when_unset() {
        let value: u16 = env_or("PORTCULLIS_TEST_UNSET_VARIABLE", 4242);
        assert_eq!(value, 4242);
    }
}
