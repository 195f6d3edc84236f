//! Shared test harness for HTTP-level integration tests.
//!
//! Builds the same router and middleware stack the binary runs, and
//! provides request helpers that drive it through `tower::ServiceExt`
//! without a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use atrium_api::auth::jwt::{generate_access_token, JwtConfig};
use atrium_api::auth::password::hash_password;
use atrium_api::config::ServerConfig;
use atrium_api::{error, routes, state::AppState};
use atrium_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The mailer and AI client point at
/// unroutable local endpoints; tests that hit them assert the collaborator
/// failure path.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let mail_config = atrium_mail::MailConfig {
        smtp_host: "127.0.0.1".to_string(),
        smtp_port: 1,
        from_address: "noreply@test.local".to_string(),
        smtp_user: None,
        smtp_password: None,
    };
    let mailer = atrium_mail::Mailer::new(mail_config).unwrap();

    let ai = atrium_ai::AiClient::new(atrium_ai::AiConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_key: String::new(),
    });

    let state = AppState {
        pool,
        config: Arc::new(config),
        mailer: Arc::new(mailer),
        ai: Arc::new(ai),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .fallback(error::fallback_not_found)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// A seeded tenant with one member user and a ready-to-use Bearer token.
pub struct TestTenant {
    pub tenant_id: DbId,
    pub user_id: DbId,
    pub token: String,
}

/// Insert a tenant plus one user and mint an access token for them.
///
/// The user's email is derived from the tenant name so multiple tenants can
/// be seeded in one test without tripping the global email uniqueness
/// constraint.
pub async fn seed_tenant(pool: &PgPool, name: &str) -> TestTenant {
    let tenant_id: DbId =
        sqlx::query_scalar("INSERT INTO tenants (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap();

    let email = format!("user@{name}.test");
    let password_hash = hash_password("correct horse battery staple").unwrap();
    let user_id: DbId = sqlx::query_scalar(
        "INSERT INTO users (tenant_id, email, password_hash, display_name, role)
         VALUES ($1, $2, $3, $4, 'member') RETURNING id",
    )
    .bind(tenant_id)
    .bind(&email)
    .bind(&password_hash)
    .bind("Test User")
    .fetch_one(pool)
    .await
    .unwrap();

    let token = generate_access_token(user_id, tenant_id, "member", &test_config().jwt).unwrap();

    TestTenant {
        tenant_id,
        user_id,
        token,
    }
}

/// Insert an account for the given tenant, returning its id.
pub async fn seed_account(pool: &PgPool, tenant_id: DbId, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO accounts (tenant_id, name) VALUES ($1, $2) RETURNING id")
        .bind(tenant_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Insert an unconverted lead for the given tenant, returning its id.
pub async fn seed_lead(pool: &PgPool, tenant_id: DbId, first_name: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO leads (tenant_id, first_name, last_name, email, company)
         VALUES ($1, $2, 'Lead', $3, 'Leadco') RETURNING id",
    )
    .bind(tenant_id)
    .bind(first_name)
    .bind(format!("{first_name}@leadco.test"))
    .fetch_one(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON POST request without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON POST request with a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body to completion and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
