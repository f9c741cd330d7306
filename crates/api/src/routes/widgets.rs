//! Route definitions for dashboard widgets.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::widgets;
use crate::state::AppState;

/// Widget routes mounted at `/widgets`.
///
/// ```text
/// GET    /                -> list (?include_inactive=true)
/// POST   /                -> create
/// PUT    /layout          -> update_layout
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/data       -> data
/// PATCH  /{id}/toggle     -> toggle
/// PUT    /{id}/position   -> update_position
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(widgets::list).post(widgets::create))
        .route("/layout", put(widgets::update_layout))
        .route(
            "/{id}",
            get(widgets::get_by_id)
                .put(widgets::update)
                .delete(widgets::delete),
        )
        .route("/{id}/data", get(widgets::data))
        .route("/{id}/toggle", patch(widgets::toggle))
        .route("/{id}/position", put(widgets::update_position))
}
