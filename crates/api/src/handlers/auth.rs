//! Authentication handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use atrium_core::error::CoreError;
use atrium_db::models::user::{LoginRequest, UserProfile};
use atrium_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::response::{AppJson, DataResponse};
use crate::state::AppState;

/// Successful login payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserProfile,
}

fn invalid_credentials() -> AppError {
    // Same message whether the email or the password was wrong.
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let verified = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(invalid_credentials());
    }

    let access_token = generate_access_token(user.id, user.tenant_id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, tenant_id = user.tenant_id, "User logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            user: UserProfile::from(&user),
        },
    }))
}
