//! HTTP-level integration tests for lead conversion.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn convert_lead_creates_account_contact_and_opportunity(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;
    let lead_id = common::seed_lead(&pool, tenant.tenant_id, "Jordan").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/leads/{lead_id}/convert"),
        &tenant.token,
        serde_json::json!({
            "accountName": "Jordan Industries",
            "opportunityName": "Initial deal",
            "amount": 12_500.0
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["data"]["lead"]["status"], "converted");
    assert_eq!(json["data"]["account"]["name"], "Jordan Industries");
    assert_eq!(json["data"]["contact"]["first_name"], "Jordan");
    assert_eq!(json["data"]["opportunity"]["name"], "Initial deal");
    assert_eq!(json["data"]["opportunity"]["amount"], 12_500.0);

    // The conversion is recorded on the lead's timeline as a stage change.
    let app = common::build_test_app(pool);
    let timeline = body_json(
        get_auth(
            app,
            &format!("/api/v1/activities?entityType=lead&entityId={lead_id}"),
            &tenant.token,
        )
        .await,
    )
    .await;
    let items = timeline["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["activity_type"], "stage_change");
    assert_eq!(items[0]["payload"]["toStage"], "converted");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn convert_lead_without_opportunity_name_skips_opportunity(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;
    let lead_id = common::seed_lead(&pool, tenant.tenant_id, "Sam").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/leads/{lead_id}/convert"),
        &tenant.token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    // Account name falls back to the lead's company.
    assert_eq!(json["data"]["account"]["name"], "Leadco");
    assert!(json["data"]["opportunity"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn converting_a_missing_lead_returns_404(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/leads/999999/convert",
        &tenant.token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn converting_twice_returns_409(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;
    let lead_id = common::seed_lead(&pool, tenant.tenant_id, "Alex").await;

    let app = common::build_test_app(pool.clone());
    let first = post_json_auth(
        app,
        &format!("/api/v1/leads/{lead_id}/convert"),
        &tenant.token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let second = post_json_auth(
        app,
        &format!("/api/v1/leads/{lead_id}/convert"),
        &tenant.token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["error"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn negative_amount_fails_validation(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "acme").await;
    let lead_id = common::seed_lead(&pool, tenant.tenant_id, "Kim").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/leads/{lead_id}/convert"),
        &tenant.token,
        serde_json::json!({
            "opportunityName": "Bad deal",
            "amount": -5.0
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cannot_convert_another_tenants_lead(pool: PgPool) {
    let acme = common::seed_tenant(&pool, "acme").await;
    let globex = common::seed_tenant(&pool, "globex").await;
    let lead_id = common::seed_lead(&pool, acme.tenant_id, "Robin").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/leads/{lead_id}/convert"),
        &globex.token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
