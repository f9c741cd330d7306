#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use dashboard_api::config::ServerConfig;
use dashboard_api::resolver::ExternalFetcher;
use dashboard_api::router::build_app_router;
use dashboard_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and short timeouts so a hung upstream fails the test quickly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        fetch_timeout_secs: 5,
        static_dir: None,
    }
}

/// Build the full application router, with the production middleware
/// stack, on top of the given database pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_app_with_config(pool, test_config())
}

pub fn build_app_with_config(pool: SqlitePool, config: ServerConfig) -> Router {
    let fetcher = ExternalFetcher::new(Duration::from_secs(config.fetch_timeout_secs))
        .expect("HTTP client");

    let state = AppState {
        pool,
        fetcher: Arc::new(fetcher),
    };

    build_app_router(state, &config)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn patch_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a data source and return its id.
pub async fn create_source(pool: &SqlitePool, body: Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/apis", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a widget and return its id.
pub async fn create_widget(pool: &SqlitePool, body: Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/widgets", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
