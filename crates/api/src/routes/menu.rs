use axum::routing::get;
use axum::Router;

use crate::handlers::menu;
use crate::state::AppState;

/// Menu routes mounted at `/menu`.
///
/// ```text
/// GET    /      -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(menu::list))
}
