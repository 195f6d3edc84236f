use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use atrium_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the uniform failure envelope
/// `{ statusCode, message, error }`, where `message` is the first violation
/// and `error` is the error-kind name. Every error surfaced through the
/// HTTP boundary goes through this mapping.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `atrium_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed or unparseable JSON bodies surface through the envelope too.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Declarative DTO validation (validator derive) maps to a 400 carrying the
/// first violated field, consistent with the fail-fast core validators.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let code = errs
                    .first()
                    .map(|e| e.code.as_ref().to_string())
                    .unwrap_or_else(|| "invalid".to_string());
                format!("Field '{field}' failed validation: {code}")
            })
            .unwrap_or_else(|| "Validation failed".to_string());
        AppError::BadRequest(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(err) => {
                    (StatusCode::BAD_REQUEST, err.kind(), err.to_string())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Collaborator { service, message } => {
                    // A dependency outage, not a caller mistake. Logged at
                    // elevated severity, surfaced verbatim.
                    tracing::error!(service, error = %message, "Collaborator failure");
                    (
                        StatusCode::BAD_GATEWAY,
                        "COLLABORATOR_FAILURE",
                        format!("{service} failure: {message}"),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        };

        envelope(status, kind, message)
    }
}

/// Build the uniform `{ statusCode, message, error }` failure envelope.
pub fn envelope(status: StatusCode, kind: &str, message: String) -> Response {
    let body = json!({
        "statusCode": status.as_u16(),
        "message": message,
        "error": kind,
    });
    (status, axum::Json(body)).into_response()
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into a status, kind, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal_error()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}

/// Router fallback so unknown routes answer with the envelope.
pub async fn fallback_not_found() -> Response {
    envelope(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        "Route not found".to_string(),
    )
}

/// Panic responder for `CatchPanicLayer`: uncaught faults map to the
/// generic internal kind without leaking internals.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(error = %detail, "Handler panicked");

    envelope(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
