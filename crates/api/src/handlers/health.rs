//! Liveness endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// GET /health
///
/// Liveness plus a database ping. Always answers 200; a failing database
/// shows up as `"db_healthy": false` so probes can distinguish the two.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = atrium_db::health_check(&state.pool).await.is_ok();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
