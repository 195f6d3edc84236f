//! Route tree construction.

pub mod activities;
pub mod ai_assist;
pub mod auth;
pub mod emails;
pub mod health;
pub mod leads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
///
/// /activities                      log activity (POST), entity timeline (GET)
///
/// /leads/{id}/convert              convert lead (POST)
///
/// /emails                          send transactional email (POST)
///
/// /ai/draft-email                  draft an email (POST)
/// /ai/next-actions                 suggest next actions (POST)
/// /ai/next-actions/convert         convert a suggested action (POST)
/// /ai/summary                      summarize recent activity (POST)
/// ```
///
/// Everything except `/auth/login` requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/activities", activities::router())
        .nest("/leads", leads::router())
        .nest("/emails", emails::router())
        .nest("/ai", ai_assist::router())
}
