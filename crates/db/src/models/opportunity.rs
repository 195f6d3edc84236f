//! Opportunity row model.

use atrium_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `opportunities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Opportunity {
    pub id: DbId,
    pub tenant_id: DbId,
    pub account_id: DbId,
    pub contact_id: Option<DbId>,
    pub name: String,
    pub stage: String,
    pub amount: Option<f64>,
    pub close_date: Option<chrono::NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
