//! Domain-level error type shared across crates.

use crate::types::DbId;
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A downstream collaborator (database, email provider, AI service)
    /// failed. Request-scoped, never fatal to the process.
    #[error("{service} failure: {message}")]
    Collaborator {
        service: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
