use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dashboard_core::error::CoreError;
use serde_json::json;

use crate::resolver::{FetchError, ResolveError};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `dashboard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resolving widget or data source data failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// No API route matches the request path.
    #[error("No API route for {0}")]
    RouteNotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Resolve(err) => classify_resolve_error(err),

            // --- HTTP-specific errors ---
            AppError::RouteNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::PathNotFound { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "PATH_NOT_FOUND",
            err.to_string(),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Foreign key and check constraint violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Duplicate value violates a unique constraint".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Referenced record does not exist".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value violates a constraint: {}", db_err.message()),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

fn classify_resolve_error(err: &ResolveError) -> (StatusCode, &'static str, String) {
    match err {
        ResolveError::Core(core) => classify_core_error(core),
        ResolveError::Unbound(_) | ResolveError::MissingQuery(_) | ResolveError::MissingEndpoint(_) => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string())
        }
        // The stored query is user-authored, so its failure is reported back.
        ResolveError::Query(_) => (StatusCode::BAD_REQUEST, "QUERY_FAILED", err.to_string()),
        ResolveError::Database(db_err) => classify_sqlx_error(db_err),
        ResolveError::External(fetch) => {
            tracing::warn!(error = %fetch, "External data source failed");
            let message = match fetch {
                FetchError::HttpStatus { .. } => fetch.to_string(),
                FetchError::Request(_) => "External data source request failed".to_string(),
            };
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message)
        }
    }
}
