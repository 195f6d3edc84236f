//! Shared response envelope types for API handlers.
//!
//! All successful API responses use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization. Failures
//! use the `{ statusCode, message, error }` envelope built in
//! [`crate::error`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Wrapper JSON extractor whose rejection goes through [`crate::error::AppError`],
/// so malformed bodies produce the uniform failure envelope instead of
/// axum's plain-text rejection.
#[derive(Debug, axum::extract::FromRequest)]
#[from_request(via(axum::Json), rejection(crate::error::AppError))]
pub struct AppJson<T>(pub T);
