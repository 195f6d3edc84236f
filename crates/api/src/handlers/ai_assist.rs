//! Handlers for the AI-assist endpoints.
//!
//! Each handler validates its request DTO (fail-fast), forwards it to the
//! AI-generation collaborator, and returns the generation. Upstream errors
//! propagate as collaborator failures; nothing here retries.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Map, Value};

use atrium_ai::AiError;
use atrium_core::ai_assist::{
    ConvertActionRequest, DraftEmailRequest, GenerateSummaryRequest, NextActionsRequest,
};
use atrium_core::error::CoreError;
use atrium_db::repositories::ActivityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{AppJson, DataResponse};
use crate::state::AppState;

fn ai_failure(err: AiError) -> AppError {
    AppError::Core(CoreError::Collaborator {
        service: "ai",
        message: err.to_string(),
    })
}

/// POST /api/v1/ai/draft-email
pub async fn draft_email(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<DraftEmailRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate().map_err(CoreError::Validation)?;

    let generation = state.ai.draft_email(&req).await.map_err(ai_failure)?;

    Ok(Json(DataResponse { data: generation }))
}

/// POST /api/v1/ai/next-actions
pub async fn next_actions(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<NextActionsRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate().map_err(CoreError::Validation)?;

    // Send the effective count so the provider never has to guess the
    // default.
    let req = req.with_defaults();
    let generation = state.ai.next_actions(&req).await.map_err(ai_failure)?;

    Ok(Json(DataResponse { data: generation }))
}

/// POST /api/v1/ai/next-actions/convert
///
/// Bounds checking of `actionIndex` against the generated list is the AI
/// collaborator's responsibility, not this handler's.
pub async fn convert_action(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<ConvertActionRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate().map_err(CoreError::Validation)?;

    let generation = state.ai.convert_action(&req).await.map_err(ai_failure)?;

    Ok(Json(DataResponse { data: generation }))
}

/// POST /api/v1/ai/summary
///
/// Generates a summary and persists it as an `ai_summary` activity on the
/// target entity.
pub async fn generate_summary(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<GenerateSummaryRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate().map_err(CoreError::Validation)?;

    let entity_id: i64 = req
        .entity_id
        .parse()
        .map_err(|_| AppError::BadRequest("entityId must be a numeric id".into()))?;

    let exists =
        ActivityRepo::entity_exists(&state.pool, auth.tenant_id, req.entity_type, entity_id)
            .await?;
    if !exists {
        return Err(AppError::Core(CoreError::NotFound {
            entity: req.entity_type.as_str(),
            id: entity_id,
        }));
    }

    // Send the effective lookback window so the provider never has to
    // guess the default.
    let req = req.with_defaults();
    let generation = state.ai.summarize(&req).await.map_err(ai_failure)?;

    let activity = ActivityRepo::insert(
        &state.pool,
        auth.tenant_id,
        req.entity_type,
        entity_id,
        "ai_summary",
        &summary_payload(&generation.text, generation.sources.as_ref()),
        Some(auth.user_id),
    )
    .await?;

    Ok(Json(DataResponse {
        data: json!({ "generation": generation, "activity": activity }),
    }))
}

/// Build an `ai_summary` payload. Fields match the payload schema; sources
/// are only included when the provider returned a JSON object.
fn summary_payload(text: &str, sources: Option<&Value>) -> Value {
    let mut payload = Map::new();
    payload.insert("text".into(), Value::String(text.to_string()));
    if let Some(sources @ Value::Object(_)) = sources {
        payload.insert("sources".into(), sources.clone());
    }
    Value::Object(payload)
}
