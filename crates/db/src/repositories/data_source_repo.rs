//! Repository for the `data_sources` table.

use dashboard_core::types::DbId;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::models::data_source::{DataSource, DataSourceFields};
use crate::NOW_SQL;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, source_type, endpoint, method, query, \
                       headers, body, created_at, updated_at";

/// Provides CRUD operations for data sources.
pub struct DataSourceRepo;

impl DataSourceRepo {
    /// Insert a new data source, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &DataSourceFields,
    ) -> Result<DataSource, sqlx::Error> {
        let query = format!(
            "INSERT INTO data_sources
                (name, description, source_type, endpoint, method, query, headers, body)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DataSource>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.source_type)
            .bind(&input.endpoint)
            .bind(&input.method)
            .bind(&input.query)
            .bind(input.headers.as_ref().map(Value::to_string))
            .bind(input.body.as_ref().map(Value::to_string))
            .fetch_one(pool)
            .await
    }

    /// Find a data source by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<DataSource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM data_sources WHERE id = $1");
        sqlx::query_as::<_, DataSource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all data sources ordered by name.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<DataSource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM data_sources ORDER BY name, id");
        sqlx::query_as::<_, DataSource>(&query).fetch_all(pool).await
    }

    /// Overwrite every editable column of a data source.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &DataSourceFields,
    ) -> Result<Option<DataSource>, sqlx::Error> {
        let query = format!(
            "UPDATE data_sources SET
                name = $2,
                description = $3,
                source_type = $4,
                endpoint = $5,
                method = $6,
                query = $7,
                headers = $8,
                body = $9,
                updated_at = {NOW_SQL}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DataSource>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.source_type)
            .bind(&input.endpoint)
            .bind(&input.method)
            .bind(&input.query)
            .bind(input.headers.as_ref().map(Value::to_string))
            .bind(input.body.as_ref().map(Value::to_string))
            .fetch_optional(pool)
            .await
    }

    /// Delete a data source. Widgets bound to it are detached by the
    /// foreign key's `ON DELETE SET NULL`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM data_sources WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
