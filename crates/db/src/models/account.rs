//! Account row model.

use atrium_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `accounts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    pub tenant_id: DbId,
    pub name: String,
    pub domain: Option<String>,
    pub industry: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
