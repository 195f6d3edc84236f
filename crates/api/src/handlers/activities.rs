//! Handlers for the activity timeline.
//!
//! `POST /activities` is the boundary between untrusted JSON and stored
//! data: the caller-declared `type` tag selects a payload schema in
//! `atrium_core::activity`, and only validator-approved fields reach the
//! database.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use atrium_core::activity::{validate_payload, ActivityType};
use atrium_core::error::CoreError;
use atrium_core::validation::ValidationError;
use atrium_db::models::activity::{ActivityListParams, CreateActivityRequest};
use atrium_db::repositories::ActivityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{AppJson, DataResponse};
use crate::state::AppState;

/// POST /api/v1/activities
///
/// Validate and log an activity against a CRM entity.
pub async fn create_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateActivityRequest>,
) -> AppResult<impl IntoResponse> {
    let activity_type = ActivityType::from_tag(&input.activity_type).ok_or_else(|| {
        CoreError::Validation(ValidationError::UnknownActivityType {
            tag: input.activity_type.clone(),
        })
    })?;

    if !activity_type.is_user_loggable() {
        return Err(AppError::BadRequest(format!(
            "Activity type '{activity_type}' is system-generated and cannot be logged"
        )));
    }

    let payload =
        validate_payload(activity_type.as_tag(), &input.payload).map_err(CoreError::Validation)?;

    let exists = ActivityRepo::entity_exists(
        &state.pool,
        auth.tenant_id,
        input.entity_type,
        input.entity_id,
    )
    .await?;
    if !exists {
        return Err(AppError::Core(CoreError::NotFound {
            entity: input.entity_type.as_str(),
            id: input.entity_id,
        }));
    }

    let activity = ActivityRepo::insert(
        &state.pool,
        auth.tenant_id,
        input.entity_type,
        input.entity_id,
        activity_type.as_tag(),
        &serde_json::Value::Object(payload),
        Some(auth.user_id),
    )
    .await?;

    tracing::info!(
        activity_id = activity.id,
        activity_type = %activity_type,
        entity_type = %input.entity_type,
        entity_id = input.entity_id,
        user_id = auth.user_id,
        "Activity logged",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: activity })))
}

/// GET /api/v1/activities
///
/// Newest-first activity timeline for one entity.
pub async fn list_activities(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ActivityListParams>,
) -> AppResult<impl IntoResponse> {
    let activities = ActivityRepo::list_for_entity(
        &state.pool,
        auth.tenant_id,
        params.entity_type,
        params.entity_id,
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: activities }))
}
