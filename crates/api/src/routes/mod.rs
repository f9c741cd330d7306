pub mod data_sources;
pub mod health;
pub mod menu;
pub mod widgets;

use axum::extract::OriginalUri;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /menu                          side menu entries
///
/// /apis                          list, create
/// /apis/{id}                     get, update, delete
/// /apis/{id}/data                resolve the data source
///
/// /widgets                       list (?include_inactive), create
/// /widgets/layout                batch placement update (PUT)
/// /widgets/{id}                  get, update, delete
/// /widgets/{id}/data             resolve the widget's data
/// /widgets/{id}/toggle           flip or set is_active (PATCH)
/// /widgets/{id}/position         move or resize (PUT)
/// ```
///
/// Unmatched paths under `/api` get a JSON 404 rather than falling through
/// to the front-end.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/menu", menu::router())
        .nest("/apis", data_sources::router())
        .nest("/widgets", widgets::router())
        .fallback(unknown_api_route)
}

async fn unknown_api_route(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}
