//! Transactional email routes.
//!
//! ```text
//! POST /   -> send_email
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::emails;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(emails::send_email))
}
