use std::sync::Arc;

use atrium_ai::AiClient;
use atrium_mail::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atrium_db::DbPool,
    /// Server configuration (JWT settings, timeouts).
    pub config: Arc<ServerConfig>,
    /// Transactional email sender.
    pub mailer: Arc<Mailer>,
    /// AI-generation collaborator client.
    pub ai: Arc<AiClient>,
}
