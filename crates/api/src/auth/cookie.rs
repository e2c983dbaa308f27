//! Session cookie helpers.
//!
//! The session token travels in an HttpOnly, `SameSite=Lax` cookie named
//! [`SESSION_COOKIE_NAME`]. `Secure` is added when the server is configured
//! for TLS.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

pub const SESSION_COOKIE_NAME: &str = "token";

/// Build the `Set-Cookie` value that stores `token` for `max_age_secs`.
pub fn build_session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE_NAME}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_secs}{secure_attr}"
    )
}

/// Build the `Set-Cookie` value that tells the client to drop the session cookie.
pub fn build_cleared_session_cookie(secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE_NAME}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0{secure_attr}")
}

/// Find the value of cookie `name` across all `Cookie` headers.
///
/// Empty values are treated as absent, so a cleared cookie never yields a token.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
