//! Integration tests for the failure envelope and collaborator error paths.
//!
//! Every error surfaced over HTTP must carry the same
//! `{ statusCode, message, error }` shape, whatever layer produced it.

mod common;

use axum::http::StatusCode;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::body::Body;
use common::{body_json, post_json_auth};
use sqlx::PgPool;
use tower::ServiceExt;

/// Assert the three envelope fields are present and consistent.
fn assert_envelope(json: &serde_json::Value, status: StatusCode, kind: &str) {
    assert_eq!(json["statusCode"], status.as_u16());
    assert_eq!(json["error"], kind);
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "message must be a non-empty string, got: {json}"
    );
}

// ---------------------------------------------------------------------------
// Body parsing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_json_body_returns_400_envelope(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;

    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/activities")
        .header(CONTENT_TYPE, "application/json")
        .header("authorization", format!("Bearer {}", tenant.token))
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_envelope(&json, StatusCode::BAD_REQUEST, "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_enum_value_in_dto_returns_400(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;

    // "sarcastic" is outside the closed tone set; rejected at deserialization.
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/ai/draft-email",
        &tenant.token,
        serde_json::json!({
            "entityType": "lead",
            "entityId": "1",
            "tone": "sarcastic"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_envelope(&json, StatusCode::BAD_REQUEST, "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// AI-assist validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn next_actions_count_out_of_range_returns_value_out_of_range(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/ai/next-actions",
        &tenant.token,
        serde_json::json!({
            "entityType": "account",
            "entityId": "1",
            "count": 11
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_envelope(&json, StatusCode::BAD_REQUEST, "VALUE_OUT_OF_RANGE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn draft_email_with_blank_entity_id_returns_missing_field(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/ai/draft-email",
        &tenant.token,
        serde_json::json!({
            "entityType": "contact",
            "entityId": "  "
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_envelope(&json, StatusCode::BAD_REQUEST, "MISSING_FIELD");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn summary_against_missing_entity_returns_404_before_calling_provider(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/ai/summary",
        &tenant.token,
        serde_json::json!({
            "entityType": "account",
            "entityId": "999999"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_envelope(&json, StatusCode::NOT_FOUND, "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Collaborator failures
// ---------------------------------------------------------------------------

// The test AI client points at an unroutable endpoint, so a request that
// passes validation surfaces the provider outage as a 502.
#[sqlx::test(migrations = "../db/migrations")]
async fn unreachable_ai_provider_returns_502(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/ai/draft-email",
        &tenant.token,
        serde_json::json!({
            "entityType": "lead",
            "entityId": "1",
            "intent": "follow_up"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_envelope(&json, StatusCode::BAD_GATEWAY, "COLLABORATOR_FAILURE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unreachable_smtp_relay_returns_502(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;
    let account_id = common::seed_account(&pool, tenant.tenant_id, "Initech").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/emails",
        &tenant.token,
        serde_json::json!({
            "entityType": "account",
            "entityId": account_id,
            "to": "buyer@initech.test",
            "subject": "Proposal",
            "htmlBody": "<p>Attached.</p>"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_envelope(&json, StatusCode::BAD_GATEWAY, "COLLABORATOR_FAILURE");

    // A failed delivery must not leave an email activity behind.
    let count: i64 =
        sqlx::query_scalar("SELECT count(*) FROM activities WHERE activity_type = 'email'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

// ---------------------------------------------------------------------------
// Email endpoint validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn email_with_invalid_recipient_address_returns_400(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;
    let account_id = common::seed_account(&pool, tenant.tenant_id, "Initech").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/emails",
        &tenant.token,
        serde_json::json!({
            "entityType": "account",
            "entityId": account_id,
            "to": "not-an-address",
            "subject": "Hello",
            "htmlBody": "<p>hi</p>"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_envelope(&json, StatusCode::BAD_REQUEST, "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn email_against_missing_entity_returns_404(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/emails",
        &tenant.token,
        serde_json::json!({
            "entityType": "contact",
            "entityId": 999999,
            "to": "someone@example.test",
            "subject": "Hello",
            "htmlBody": "<p>hi</p>"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
