use std::sync::Arc;

use crate::resolver::ExternalFetcher;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: dashboard_db::DbPool,
    /// HTTP client used for external data sources.
    pub fetcher: Arc<ExternalFetcher>,
}
