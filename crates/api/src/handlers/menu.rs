//! Handlers for the side menu.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use dashboard_db::repositories::MenuItemRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/menu
///
/// List the navigation entries shown in the side menu.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = MenuItemRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}
