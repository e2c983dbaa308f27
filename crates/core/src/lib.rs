//! Pure domain logic for the Portcullis authentication service.
//!
//! Nothing in this crate touches the network or the database; the `db` and
//! `api` crates build on these types.

pub mod dashboard;
pub mod error;
pub mod rate_limit;
pub mod types;
pub mod validation;
