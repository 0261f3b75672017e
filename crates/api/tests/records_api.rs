//! HTTP-level integration tests for the record CRUD endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the
//! router without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_record_normalizes_and_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/records",
        serde_json::json!({"code": "abc-1", "personName": "jane"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["code"], "ABC-1");
    assert_eq!(json["data"]["personName"], "JANE");
    assert_eq!(json["data"]["status"], "ONLINE");
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_record_accepts_lowercase_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/records",
        serde_json::json!({
            "code": "abc-2",
            "personName": "joe",
            "link": "https://example.com/x",
            "status": "downloaded"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "DOWNLOADED");
    assert_eq!(json["data"]["link"], "https://example.com/x");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_duplicate_code_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/records",
        serde_json::json!({"code": "abc-1", "personName": "jane"}),
    )
    .await;

    // Same code, different case.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/records",
        serde_json::json!({"code": "ABC-1", "personName": "joe"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Code already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_blank_required_field_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/records",
        serde_json::json!({"code": "  ", "personName": "jane"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "code is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_invalid_status_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/records",
        serde_json::json!({"code": "abc-1", "personName": "jane", "status": "ARCHIVED"}),
    )
    .await;

    // Rejected at deserialization, before any handler logic runs.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_record_by_code_any_case(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/records",
        serde_json::json!({"code": "abc-1", "personName": "jane"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/records/abc-1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["code"], "ABC-1");
    assert_eq!(json["data"]["personName"], "JANE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_nonexistent_record_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/records/NOPE-1").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_record_overwrites_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/records",
            serde_json::json!({"code": "abc-1", "personName": "jane"}),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/records/abc-1",
        serde_json::json!({
            "personName": "janet",
            "link": "https://example.com",
            "description": "seen twice",
            "status": "WATCHED"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["personName"], "JANET");
    assert_eq!(json["data"]["status"], "WATCHED");
    assert_eq!(json["data"]["code"], "ABC-1");
    assert_ne!(json["data"]["updatedAt"], created["data"]["updatedAt"]);
    assert_eq!(json["data"]["createdAt"], created["data"]["createdAt"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_nonexistent_record_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/records/NOPE-1",
        serde_json::json!({"personName": "jane", "status": "ONLINE"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_record_returns_204_then_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/records",
        serde_json::json!({"code": "abc-1", "personName": "jane"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/v1/records/ABC-1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/records/ABC-1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_nonexistent_record_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/records/NOPE-1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
