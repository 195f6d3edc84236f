//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

const USER_COLUMNS: &str = "\
    id, tenant_id, email, password_hash, display_name, role, created_at";

/// Lookup operations for authentication.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by email. Emails are globally unique.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
