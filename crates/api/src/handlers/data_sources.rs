//! Handlers for the `/apis` resource (data sources).
//!
//! Data sources are either internal SQL queries or external HTTP
//! endpoints. Definitions are validated as a whole on create and after
//! merging each update over the stored row.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use dashboard_core::error::CoreError;
use dashboard_core::types::DbId;
use dashboard_db::models::data_source::{CreateDataSource, DataSource, UpdateDataSource};
use dashboard_db::repositories::DataSourceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::resolver::DataResolver;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/apis
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sources = DataSourceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: sources }))
}

/// POST /api/apis
///
/// Create a data source. Internal sources need a query; external sources
/// need an http(s) endpoint.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateDataSource>,
) -> AppResult<impl IntoResponse> {
    let fields = input.fields().validated()?;
    let source = DataSourceRepo::create(&state.pool, &fields).await?;

    tracing::info!(
        api_id = source.id,
        name = %source.name,
        source_type = %source.source_type,
        "Data source created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: source })))
}

/// GET /api/apis/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let source = find_or_404(&state, id).await?;
    Ok(Json(DataResponse { data: source }))
}

/// PUT /api/apis/{id}
///
/// Partially update a data source. Nullable fields accept `null` to clear.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateDataSource>,
) -> AppResult<impl IntoResponse> {
    let existing = find_or_404(&state, id).await?;
    let fields = existing.merge(&input).validated()?;

    let source = DataSourceRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DataSource",
            id,
        }))?;

    tracing::info!(api_id = id, "Data source updated");

    Ok(Json(DataResponse { data: source }))
}

/// DELETE /api/apis/{id}
///
/// Delete a data source. Widgets bound to it stay, unbound.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = DataSourceRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "DataSource",
            id,
        }));
    }

    tracing::info!(api_id = id, "Data source deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/apis/{id}/data
///
/// Resolve a data source directly, without a widget's data path. Used by
/// the settings page to preview what a source returns.
pub async fn data(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let source = find_or_404(&state, id).await?;
    let data = DataResolver::new(&state.pool, &state.fetcher)
        .resolve_source(&source)
        .await?;

    Ok(Json(DataResponse { data }))
}

async fn find_or_404(state: &AppState, id: DbId) -> AppResult<DataSource> {
    DataSourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DataSource",
            id,
        }))
}
