//! Handlers for the `/widgets` resource.
//!
//! Covers configuration CRUD, activation toggling, grid placement (single
//! and batch), and resolving the data a widget renders.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use dashboard_core::error::CoreError;
use dashboard_core::grid::GridPosition;
use dashboard_core::types::DbId;
use dashboard_db::models::widget::{CreateWidget, LayoutItem, ToggleWidget, UpdateWidget, Widget};
use dashboard_db::repositories::WidgetRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::IncludeInactiveParams;
use crate::resolver::DataResolver;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Widget",
        id,
    })
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// GET /api/widgets
///
/// List widgets in grid order. Inactive widgets are hidden unless
/// `include_inactive=true`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let widgets = WidgetRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: widgets }))
}

/// POST /api/widgets
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateWidget>,
) -> AppResult<impl IntoResponse> {
    let fields = input.fields().validated()?;
    let position = input.position();
    position.validate()?;

    let widget = WidgetRepo::create(&state.pool, &fields, &position).await?;

    tracing::info!(
        widget_id = widget.id,
        widget_type = %widget.widget_type,
        api_id = ?widget.api_id,
        "Widget created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: widget })))
}

/// GET /api/widgets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let widget = find_or_404(&state, id).await?;
    Ok(Json(DataResponse { data: widget }))
}

/// PUT /api/widgets/{id}
///
/// Partially update a widget's configuration. The merged result is
/// validated as a whole, so switching `widget_type` away from `chart`
/// also clears the chart type.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateWidget>,
) -> AppResult<impl IntoResponse> {
    let existing = find_or_404(&state, id).await?;
    let fields = existing.merge(&input).validated()?;

    let widget = WidgetRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(widget_id = id, "Widget updated");

    Ok(Json(DataResponse { data: widget }))
}

/// DELETE /api/widgets/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !WidgetRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(widget_id = id, "Widget deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/widgets/{id}/toggle
///
/// Flip `is_active`, or set it when the body carries `{"is_active": bool}`.
/// The body may be omitted entirely.
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    input: Option<AppJson<ToggleWidget>>,
) -> AppResult<impl IntoResponse> {
    let input = input.map(|AppJson(toggle)| toggle).unwrap_or_default();

    let widget = WidgetRepo::set_active(&state.pool, id, input.is_active)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        widget_id = id,
        is_active = widget.is_active,
        "Widget activation changed",
    );

    Ok(Json(DataResponse { data: widget }))
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// PUT /api/widgets/{id}/position
///
/// Move and resize one widget on the 12-column grid.
pub async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(position): AppJson<GridPosition>,
) -> AppResult<impl IntoResponse> {
    position.validate()?;

    let widget = WidgetRepo::update_position(&state.pool, id, &position)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: widget }))
}

/// PUT /api/widgets/layout
///
/// Save the placement of several widgets at once, as produced by a drag
/// on the dashboard grid. Either every item is applied or none is.
pub async fn update_layout(
    State(state): State<AppState>,
    AppJson(items): AppJson<Vec<LayoutItem>>,
) -> AppResult<impl IntoResponse> {
    for item in &items {
        item.position.validate().map_err(|e| match e {
            CoreError::Validation(msg) => {
                CoreError::Validation(format!("Widget {}: {msg}", item.id))
            }
            other => other,
        })?;
    }

    let widgets = WidgetRepo::update_layout(&state.pool, &items)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::Core(CoreError::Validation(
                "Layout references a widget that does not exist".to_string(),
            )),
            other => AppError::Database(other),
        })?;

    tracing::info!(count = widgets.len(), "Widget layout saved");

    Ok(Json(DataResponse { data: widgets }))
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

/// GET /api/widgets/{id}/data
///
/// Resolve the widget's data source and apply its data path.
pub async fn data(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let widget = find_or_404(&state, id).await?;
    let data = DataResolver::new(&state.pool, &state.fetcher)
        .resolve_widget(&widget)
        .await?;

    Ok(Json(DataResponse { data }))
}

async fn find_or_404(state: &AppState, id: DbId) -> AppResult<Widget> {
    WidgetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}
