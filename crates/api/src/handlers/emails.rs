//! Handler for sending transactional email.
//!
//! Delivery goes through the mail collaborator exactly once; a failure is
//! surfaced as a collaborator error for this request, never swallowed and
//! never retried. Successful sends are logged as an outbound `email`
//! activity on the target entity.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use atrium_core::error::CoreError;
use atrium_core::types::{DbId, EntityType};
use atrium_db::repositories::ActivityRepo;
use atrium_mail::OutboundEmail;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{AppJson, DataResponse};
use crate::state::AppState;

/// DTO for `POST /api/v1/emails`. Unlike the AI drafter's permissive
/// `recipientEmail`, the actual send target must be a well-formed address.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub entity_type: EntityType,
    pub entity_id: DbId,
    #[validate(email)]
    pub to: String,
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
    pub html_body: String,
    pub text_body: Option<String>,
}

/// POST /api/v1/emails
///
/// Send an email about a CRM entity and log it on the entity's timeline.
pub async fn send_email(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SendEmailRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

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

    let email = OutboundEmail {
        to: input.to.clone(),
        subject: input.subject.clone(),
        text_body: input
            .text_body
            .clone()
            .unwrap_or_else(|| input.html_body.clone()),
        html_body: input.html_body.clone(),
    };

    state
        .mailer
        .send(&email)
        .await
        .map_err(|e| CoreError::Collaborator {
            service: "email",
            message: e.to_string(),
        })?;

    // Fields match the email payload schema.
    let payload = json!({
        "subject": input.subject,
        "body": email.text_body,
        "direction": "outbound",
    });
    let activity = ActivityRepo::insert(
        &state.pool,
        auth.tenant_id,
        input.entity_type,
        input.entity_id,
        "email",
        &payload,
        Some(auth.user_id),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: activity })))
}
