//! Activity timeline routes.
//!
//! ```text
//! POST /        -> create_activity
//! GET  /        -> list_activities
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::activities;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(activities::list_activities).post(activities::create_activity),
    )
}
