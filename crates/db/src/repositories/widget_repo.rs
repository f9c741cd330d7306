//! Repository for the `widgets` table.

use dashboard_core::grid::GridPosition;
use dashboard_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::widget::{LayoutItem, Widget, WidgetFields};
use crate::NOW_SQL;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, widget_type, chart_type, api_id, data_path, refresh_interval, \
                       position_x, position_y, width, height, is_active, created_at, updated_at";

/// Provides CRUD, activation and placement operations for widgets.
pub struct WidgetRepo;

impl WidgetRepo {
    /// Insert a new widget at `position`, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &WidgetFields,
        position: &GridPosition,
    ) -> Result<Widget, sqlx::Error> {
        let query = format!(
            "INSERT INTO widgets
                (title, widget_type, chart_type, api_id, data_path, refresh_interval,
                 position_x, position_y, width, height, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(&input.title)
            .bind(&input.widget_type)
            .bind(&input.chart_type)
            .bind(input.api_id)
            .bind(&input.data_path)
            .bind(input.refresh_interval)
            .bind(position.position_x)
            .bind(position.position_y)
            .bind(position.width)
            .bind(position.height)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a widget by its ID, active or not.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM widgets WHERE id = $1");
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List widgets in grid reading order (top to bottom, left to right),
    /// optionally including deactivated ones.
    pub async fn list(pool: &SqlitePool, include_inactive: bool) -> Result<Vec<Widget>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM widgets ORDER BY position_y, position_x, id")
        } else {
            format!(
                "SELECT {COLUMNS} FROM widgets WHERE is_active = 1 \
                 ORDER BY position_y, position_x, id"
            )
        };
        sqlx::query_as::<_, Widget>(&query).fetch_all(pool).await
    }

    /// Overwrite every configuration column of a widget. Placement is untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &WidgetFields,
    ) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!(
            "UPDATE widgets SET
                title = $2,
                widget_type = $3,
                chart_type = $4,
                api_id = $5,
                data_path = $6,
                refresh_interval = $7,
                is_active = $8,
                updated_at = {NOW_SQL}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.widget_type)
            .bind(&input.chart_type)
            .bind(input.api_id)
            .bind(&input.data_path)
            .bind(input.refresh_interval)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Set `is_active` to `value`, or flip it when `value` is `None`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_active(
        pool: &SqlitePool,
        id: DbId,
        value: Option<bool>,
    ) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!(
            "UPDATE widgets SET
                is_active = COALESCE($2, NOT is_active),
                updated_at = {NOW_SQL}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .bind(value)
            .fetch_optional(pool)
            .await
    }

    /// Move and/or resize a single widget.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_position(
        pool: &SqlitePool,
        id: DbId,
        position: &GridPosition,
    ) -> Result<Option<Widget>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        write_position(&mut *conn, id, position).await
    }

    /// Apply a whole grid layout in one transaction.
    ///
    /// Fails with [`sqlx::Error::RowNotFound`] (and writes nothing) if any
    /// item refers to a widget that does not exist.
    pub async fn update_layout(
        pool: &SqlitePool,
        items: &[LayoutItem],
    ) -> Result<Vec<Widget>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut updated = Vec::with_capacity(items.len());

        for item in items {
            let widget = write_position(&mut *tx, item.id, &item.position)
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;
            updated.push(widget);
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Permanently delete a widget. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM widgets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Shared by the single-widget and batch placement updates.
async fn write_position(
    conn: &mut SqliteConnection,
    id: DbId,
    position: &GridPosition,
) -> Result<Option<Widget>, sqlx::Error> {
    let query = format!(
        "UPDATE widgets SET
            position_x = $2,
            position_y = $3,
            width = $4,
            height = $5,
            updated_at = {NOW_SQL}
         WHERE id = $1
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, Widget>(&query)
        .bind(id)
        .bind(position.position_x)
        .bind(position.position_y)
        .bind(position.width)
        .bind(position.height)
        .fetch_optional(&mut *conn)
        .await
}
