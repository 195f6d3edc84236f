//! Activity timeline models and DTOs.

use atrium_core::types::{DbId, EntityType, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activities` table. `payload` holds only fields approved
/// by the payload validator.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub tenant_id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub activity_type: String,
    pub payload: serde_json::Value,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for `POST /api/v1/activities`. The `payload` stays untyped here; the
/// core validator is the boundary between this raw value and stored data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub entity_type: EntityType,
    pub entity_id: DbId,
    /// Activity type tag (`note`, `call`, ...). Validated against the
    /// closed set by the handler.
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Query parameters for `GET /api/v1/activities`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListParams {
    pub entity_type: EntityType,
    pub entity_id: DbId,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
