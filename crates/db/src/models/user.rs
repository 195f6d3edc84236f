//! User row model and login DTO.

use atrium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// `password_hash` is never serialized; login responses use
/// [`UserProfile`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub tenant_id: DbId,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// Public view of a user returned by the auth endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role.clone(),
        }
    }
}

/// DTO for `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
