//! HTTP-level integration tests for the search endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use sqlx::PgPool;

async fn seed(pool: &PgPool, entries: &[(&str, &str)]) {
    for (code, name) in entries {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/records",
            serde_json::json!({"code": code, "personName": name}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_by_name_returns_sorted_matches(pool: PgPool) {
    seed(
        &pool,
        &[
            ("B-2", "Ann"),
            ("A-9", "Ann"),
            ("C-1", "Anna"),
            ("D-1", "Bob"),
        ],
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/search/name/ann").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let codes: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();

    // Sorted by name then code; "Bob" does not match.
    assert_eq!(codes, vec!["A-9", "B-2", "C-1"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_by_name_caps_at_ten_results(pool: PgPool) {
    for i in 0..12 {
        let app = common::build_test_app(pool.clone());
        post_json(
            app,
            "/api/v1/records",
            serde_json::json!({"code": format!("X-{i:02}"), "personName": "Jane"}),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/search/name/jane").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_by_code_returns_sorted_matches(pool: PgPool) {
    seed(
        &pool,
        &[("ABC-2", "Jane"), ("ABC-1", "Joe"), ("XYZ-1", "Ann")],
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/search/code/abc").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let codes: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();

    assert_eq!(codes, vec!["ABC-1", "ABC-2"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_with_no_matches_returns_empty_list(pool: PgPool) {
    seed(&pool, &[("A-1", "Jane")]).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/search/name/zzz").await).await;
    assert_eq!(json["data"], serde_json::json!([]));
}
