//! Repository for the `activities` table.

use atrium_core::types::{DbId, EntityType};
use sqlx::PgPool;

use crate::models::activity::Activity;

/// Column list for `activities` queries.
const ACTIVITY_COLUMNS: &str = "\
    id, tenant_id, entity_type, entity_id, activity_type, \
    payload, created_by, created_at";

/// Default page size for the entity timeline.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for the entity timeline.
const MAX_LIMIT: i64 = 200;

/// Provides insert and timeline queries for activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity. `payload` must already have passed the
    /// payload validator; this layer stores it verbatim.
    pub async fn insert(
        pool: &PgPool,
        tenant_id: DbId,
        entity_type: EntityType,
        entity_id: DbId,
        activity_type: &str,
        payload: &serde_json::Value,
        created_by: Option<DbId>,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities \
                 (tenant_id, entity_type, entity_id, activity_type, payload, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ACTIVITY_COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(tenant_id)
            .bind(entity_type.as_str())
            .bind(entity_id)
            .bind(activity_type)
            .bind(payload)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Newest-first timeline for one entity, with capped pagination.
    pub async fn list_for_entity(
        pool: &PgPool,
        tenant_id: DbId,
        entity_type: EntityType,
        entity_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities \
             WHERE tenant_id = $1 AND entity_type = $2 AND entity_id = $3 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(tenant_id)
            .bind(entity_type.as_str())
            .bind(entity_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Whether the target entity exists within the tenant. Used before
    /// attaching activities so typos surface as 404 instead of orphan rows.
    pub async fn entity_exists(
        pool: &PgPool,
        tenant_id: DbId,
        entity_type: EntityType,
        entity_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let table = match entity_type {
            EntityType::Account => "accounts",
            EntityType::Contact => "contacts",
            EntityType::Lead => "leads",
            EntityType::Opportunity => "opportunities",
        };
        let query = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE tenant_id = $1 AND id = $2)");
        sqlx::query_scalar::<_, bool>(&query)
            .bind(tenant_id)
            .bind(entity_id)
            .fetch_one(pool)
            .await
    }
}
