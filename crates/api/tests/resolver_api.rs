//! End-to-end tests for widget and data source data resolution.
//!
//! External sources are pointed at a throwaway axum server bound to an
//! ephemeral local port.

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get as get_route, post as post_route};
use axum::{Json, Router};
use common::{body_json, get, put_json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// Start an upstream server and return its base URL.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route(
            "/stats",
            get_route(|| async {
                Json(json!({
                    "data": { "revenue": [10, 20, 30], "currency": "EUR" },
                    "meta": { "page": 1 },
                }))
            }),
        )
        .route(
            "/echo",
            post_route(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let token = headers
                    .get("x-token")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "token": token, "received": body }))
            }),
        )
        .route("/text", get_route(|| async { "plain words" }))
        .route(
            "/slow",
            get_route(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({ "late": true }))
            }),
        )
        .route(
            "/broken",
            get_route(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn external_source(pool: &SqlitePool, name: &str, endpoint: String) -> i64 {
    common::create_source(
        pool,
        json!({ "name": name, "source_type": "external", "endpoint": endpoint }),
    )
    .await
}

async fn widget_for(pool: &SqlitePool, api_id: i64, data_path: Option<&str>) -> i64 {
    common::create_widget(
        pool,
        json!({
            "title": "Widget",
            "widget_type": "table",
            "api_id": api_id,
            "data_path": data_path,
        }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Internal sources
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn internal_source_returns_rows(pool: SqlitePool) {
    let api_id = common::create_source(
        &pool,
        json!({
            "name": "Regions",
            "source_type": "internal",
            "query": "SELECT 'north' AS region, 120 AS total UNION ALL SELECT 'south', 80.5",
        }),
    )
    .await;

    let response = get(common::build_test_app(pool), &format!("/api/apis/{api_id}/data")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        json!([
            { "region": "north", "total": 120 },
            { "region": "south", "total": 80.5 },
        ])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn internal_source_can_read_dashboard_tables(pool: SqlitePool) {
    dashboard_db::seed_menu_items(&pool).await.unwrap();
    let api_id = common::create_source(
        &pool,
        json!({
            "name": "Menu size",
            "source_type": "internal",
            "query": "SELECT COUNT(*) AS entries FROM menu_items",
        }),
    )
    .await;
    let widget_id = common::create_widget(
        &pool,
        json!({
            "title": "Menu entries",
            "widget_type": "value",
            "api_id": api_id,
            "data_path": "0.entries",
        }),
    )
    .await;

    let response = get(common::build_test_app(pool), &format!("/api/widgets/{widget_id}/data")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"],
        json!(dashboard_core::menu::DEFAULT_MENU.len())
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failing_query_returns_query_failed(pool: SqlitePool) {
    let api_id = common::create_source(
        &pool,
        json!({
            "name": "Typo",
            "source_type": "internal",
            "query": "SELECT * FROM no_such_table",
        }),
    )
    .await;
    let widget_id = widget_for(&pool, api_id, None).await;

    let response = get(common::build_test_app(pool), &format!("/api/widgets/{widget_id}/data")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "QUERY_FAILED");
}

// ---------------------------------------------------------------------------
// External sources
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn external_widget_applies_data_path(pool: SqlitePool) {
    let base = spawn_upstream().await;
    let api_id = external_source(&pool, "Stats", format!("{base}/stats")).await;

    let full = widget_for(&pool, api_id, None).await;
    let nested = widget_for(&pool, api_id, Some("data.revenue")).await;
    let indexed = widget_for(&pool, api_id, Some("data.revenue.2")).await;

    let response = get(common::build_test_app(pool.clone()), &format!("/api/widgets/{full}/data")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["meta"]["page"], 1);

    let response = get(common::build_test_app(pool.clone()), &format!("/api/widgets/{nested}/data")).await;
    assert_eq!(body_json(response).await["data"], json!([10, 20, 30]));

    let response = get(common::build_test_app(pool), &format!("/api/widgets/{indexed}/data")).await;
    assert_eq!(body_json(response).await["data"], json!(30));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_data_path_returns_422(pool: SqlitePool) {
    let base = spawn_upstream().await;
    let api_id = external_source(&pool, "Stats", format!("{base}/stats")).await;
    let widget_id = widget_for(&pool, api_id, Some("data.profit")).await;

    let response = get(common::build_test_app(pool), &format!("/api/widgets/{widget_id}/data")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "PATH_NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn external_post_sends_headers_and_body(pool: SqlitePool) {
    let base = spawn_upstream().await;
    let api_id = common::create_source(
        &pool,
        json!({
            "name": "Echo",
            "source_type": "external",
            "endpoint": format!("{base}/echo"),
            "method": "POST",
            "headers": { "X-Token": "s3cret" },
            "body": { "range": "7d" },
        }),
    )
    .await;

    let response = get(common::build_test_app(pool), &format!("/api/apis/{api_id}/data")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["token"], "s3cret");
    assert_eq!(json["data"]["received"], json!({ "range": "7d" }));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_json_upstream_body_becomes_string(pool: SqlitePool) {
    let base = spawn_upstream().await;
    let api_id = external_source(&pool, "Text", format!("{base}/text")).await;

    let response = get(common::build_test_app(pool), &format!("/api/apis/{api_id}/data")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], "plain words");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upstream_error_returns_502(pool: SqlitePool) {
    let base = spawn_upstream().await;
    let api_id = external_source(&pool, "Broken", format!("{base}/broken")).await;
    let widget_id = widget_for(&pool, api_id, None).await;

    let response = get(common::build_test_app(pool), &format!("/api/widgets/{widget_id}/data")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "External data source returned HTTP 500");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unreachable_upstream_returns_sanitized_502(pool: SqlitePool) {
    // Nothing listens on port 1.
    let api_id = external_source(&pool, "Nowhere", "http://127.0.0.1:1/x".to_string()).await;
    let widget_id = widget_for(&pool, api_id, None).await;

    let response = get(common::build_test_app(pool), &format!("/api/widgets/{widget_id}/data")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "External data source request failed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn slow_upstream_times_out_with_502(pool: SqlitePool) {
    let base = spawn_upstream().await;
    let api_id = external_source(&pool, "Slow", format!("{base}/slow")).await;

    let mut config = common::test_config();
    config.fetch_timeout_secs = 1;
    let app = common::build_app_with_config(pool, config);

    let response = get(app, &format!("/api/apis/{api_id}/data")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "External data source request failed");
}

// ---------------------------------------------------------------------------
// Widget binding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unbound_widget_returns_400(pool: SqlitePool) {
    let widget_id = common::create_widget(
        &pool,
        json!({ "title": "Loose", "widget_type": "value" }),
    )
    .await;

    let response = get(common::build_test_app(pool), &format!("/api/widgets/{widget_id}/data")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rebinding_widget_changes_its_data(pool: SqlitePool) {
    let one = common::create_source(
        &pool,
        json!({ "name": "One", "source_type": "internal", "query": "SELECT 1 AS n" }),
    )
    .await;
    let two = common::create_source(
        &pool,
        json!({ "name": "Two", "source_type": "internal", "query": "SELECT 2 AS n" }),
    )
    .await;
    let widget_id = widget_for(&pool, one, Some("0.n")).await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/widgets/{widget_id}"),
        json!({ "api_id": two }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), &format!("/api/widgets/{widget_id}/data")).await;
    assert_eq!(body_json(response).await["data"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn data_for_missing_widget_returns_404(pool: SqlitePool) {
    let response = get(common::build_test_app(pool), "/api/widgets/404/data").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
