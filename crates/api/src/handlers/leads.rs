//! Handlers for lead conversion.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use atrium_core::error::CoreError;
use atrium_core::types::DbId;
use atrium_db::models::lead::ConvertLeadRequest;
use atrium_db::repositories::LeadRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{AppJson, DataResponse};
use crate::state::AppState;

/// POST /api/v1/leads/{id}/convert
///
/// Convert a lead into an account + contact (+ optional opportunity) in one
/// transaction. Converting an already-converted lead is a conflict.
pub async fn convert_lead(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    AppJson(input): AppJson<ConvertLeadRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let lead = LeadRepo::find_by_id(&state.pool, auth.tenant_id, lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "lead",
            id: lead_id,
        }))?;

    if lead.is_converted() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Lead {lead_id} has already been converted"
        ))));
    }

    let conversion = LeadRepo::convert(
        &state.pool,
        auth.tenant_id,
        lead_id,
        &input,
        Some(auth.user_id),
    )
    .await?
    // The lead passed the checks above, so a miss here means a concurrent
    // request converted it first.
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Lead {lead_id} has already been converted"
        )))
    })?;

    tracing::info!(
        lead_id,
        account_id = conversion.account.id,
        user_id = auth.user_id,
        "Lead converted",
    );

    Ok(Json(DataResponse { data: conversion }))
}
