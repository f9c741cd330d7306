//! Route definitions for data sources, exposed as `/apis`.

use axum::routing::get;
use axum::Router;

use crate::handlers::data_sources;
use crate::state::AppState;

/// Data source routes mounted at `/apis`.
///
/// ```text
/// GET    /           -> list
/// POST   /           -> create
/// GET    /{id}       -> get_by_id
/// PUT    /{id}       -> update
/// DELETE /{id}       -> delete
/// GET    /{id}/data  -> data
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(data_sources::list).post(data_sources::create))
        .route(
            "/{id}",
            get(data_sources::get_by_id)
                .put(data_sources::update)
                .delete(data_sources::delete),
        )
        .route("/{id}/data", get(data_sources::data))
}
