//! HTTP-level tests for the `/api/apis` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::SqlitePool;

fn internal_source(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "source_type": "internal",
        "query": "SELECT 1 AS one",
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_internal_source_returns_201(pool: SqlitePool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/apis",
        internal_source("Sales totals"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Sales totals");
    assert_eq!(json["data"]["source_type"], "internal");
    assert_eq!(json["data"]["method"], "GET");
    assert!(json["data"]["id"].is_number());
    assert!(json["data"]["created_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_external_source_normalizes_method(pool: SqlitePool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/apis",
        json!({
            "name": "Weather",
            "source_type": "external",
            "endpoint": " https://example.com/weather ",
            "method": "post",
            "headers": { "X-Token": "abc" },
            "body": { "city": "Oslo" },
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["method"], "POST");
    assert_eq!(json["data"]["endpoint"], "https://example.com/weather");
    assert_eq!(json["data"]["headers"]["X-Token"], "abc");
    assert_eq!(json["data"]["body"]["city"], "Oslo");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn internal_source_without_query_is_rejected(pool: SqlitePool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/apis",
        json!({ "name": "Broken", "source_type": "internal" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn external_source_needs_http_url(pool: SqlitePool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/apis",
        json!({ "name": "Ftp", "source_type": "external", "endpoint": "ftp://example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn illegal_header_name_is_rejected_on_save(pool: SqlitePool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/apis",
        json!({
            "name": "Spaced",
            "source_type": "external",
            "endpoint": "https://example.com/data",
            "headers": { "bad header": "v" },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let id = common::create_source(
        &pool,
        json!({
            "name": "Fine",
            "source_type": "external",
            "endpoint": "https://example.com/data",
            "headers": { "X-Token": "abc" },
        }),
    )
    .await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/apis/{id}"),
        json!({ "headers": { "X-Token": "two\nlines" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_source_type_is_rejected(pool: SqlitePool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/apis",
        json!({ "name": "Grpc", "source_type": "grpc" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_json_body_returns_400(pool: SqlitePool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/apis",
        json!({ "source_type": "internal" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_name_returns_409(pool: SqlitePool) {
    common::create_source(&pool, internal_source("Dup")).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/apis",
        internal_source("Dup"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_and_get_by_id(pool: SqlitePool) {
    let b = common::create_source(&pool, internal_source("Beta")).await;
    common::create_source(&pool, internal_source("Alpha")).await;

    let response = get(common::build_test_app(pool.clone()), "/api/apis").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);

    let response = get(common::build_test_app(pool), &format!("/api/apis/{b}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Beta");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_nonexistent_source_returns_404(pool: SqlitePool) {
    let response = get(common::build_test_app(pool), "/api/apis/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "DataSource with id 999999 not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_merges_fields(pool: SqlitePool) {
    let id = common::create_source(
        &pool,
        json!({
            "name": "Orders",
            "description": "All orders",
            "source_type": "internal",
            "query": "SELECT 1",
        }),
    )
    .await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/apis/{id}"),
        json!({ "query": "SELECT 2 AS two", "description": null }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Orders");
    assert_eq!(json["data"]["query"], "SELECT 2 AS two");
    assert!(json["data"]["description"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn switching_to_external_requires_endpoint(pool: SqlitePool) {
    let id = common::create_source(&pool, internal_source("Switch")).await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/apis/{id}"),
        json!({ "source_type": "external" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_nonexistent_source_returns_404(pool: SqlitePool) {
    let response = put_json(
        common::build_test_app(pool),
        "/api/apis/424242",
        json!({ "name": "Nope" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_source_unbinds_widgets(pool: SqlitePool) {
    let api_id = common::create_source(&pool, internal_source("Doomed")).await;
    let widget_id = common::create_widget(
        &pool,
        json!({ "title": "Count", "widget_type": "value", "api_id": api_id }),
    )
    .await;

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/apis/{api_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool.clone()), &format!("/api/apis/{api_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(common::build_test_app(pool.clone()), &format!("/api/widgets/{widget_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["api_id"].is_null());

    let response = delete(common::build_test_app(pool), &format!("/api/apis/{api_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
