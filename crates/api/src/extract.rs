//! Request body extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body whose rejections (wrong content type, syntax errors,
/// mistyped fields) surface as a 400 `VALIDATION_ERROR` through [`AppError`]
/// instead of axum's plain-text 415/422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
