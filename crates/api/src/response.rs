//! Shared response body types for API handlers.

use serde::Serialize;

/// Plain `{ "message": ... }` acknowledgement.
///
/// ```ignore
/// Ok(Json(MessageResponse::new("Logout successful")))
/// ```
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
