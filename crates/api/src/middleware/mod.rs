//! Request extractors that gate handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from the session cookie.
//! - [`rate_limit::LoginRateLimit`] -- Counts a login attempt for the client IP
//!   and rejects it once the window's budget is spent.

pub mod auth;
pub mod rate_limit;
