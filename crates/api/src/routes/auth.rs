//! Authentication routes.
//!
//! ```text
//! POST /login   -> login
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(auth::login))
}
