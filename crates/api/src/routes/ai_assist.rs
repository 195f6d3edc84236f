//! AI-assist routes.
//!
//! ```text
//! POST /draft-email           -> draft_email
//! POST /next-actions          -> next_actions
//! POST /next-actions/convert  -> convert_action
//! POST /summary               -> generate_summary
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::ai_assist;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/draft-email", post(ai_assist::draft_email))
        .route("/next-actions", post(ai_assist::next_actions))
        .route("/next-actions/convert", post(ai_assist::convert_action))
        .route("/summary", post(ai_assist::generate_summary))
}
