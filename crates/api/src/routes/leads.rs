//! Lead routes.
//!
//! ```text
//! POST /{id}/convert   -> convert_lead
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/convert", post(leads::convert_lead))
}
