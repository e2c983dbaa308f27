//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Session token generation and validation.
//! - [`cookie`] -- `Set-Cookie` builders and `Cookie` header parsing for the session token.

pub mod cookie;
pub mod jwt;
pub mod password;
