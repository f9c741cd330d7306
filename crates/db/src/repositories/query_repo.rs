//! Execution of stored SQL from internal data sources.
//!
//! Rows come back with whatever shape the query produced, so they are
//! converted column by column into JSON objects keyed by column name.
//! SQLite storage classes map as follows:
//!
//! | Storage | JSON                  |
//! |---------|-----------------------|
//! | NULL    | `null`                |
//! | INTEGER | number                |
//! | REAL    | number (`null` if NaN)|
//! | TEXT    | string                |
//! | BLOB    | array of byte numbers |

use serde_json::{Map, Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};

/// Runs raw SQL and returns its rows as JSON.
pub struct QueryRepo;

impl QueryRepo {
    /// Execute `sql` verbatim and return every resulting row.
    pub async fn fetch_json_rows(pool: &SqlitePool, sql: &str) -> Result<Vec<Value>, sqlx::Error> {
        let rows = sqlx::query(sql).fetch_all(pool).await?;
        tracing::debug!(rows = rows.len(), "Internal query executed");
        rows.iter().map(row_to_json).collect()
    }
}

fn row_to_json(row: &SqliteRow) -> Result<Value, sqlx::Error> {
    let mut object = Map::with_capacity(row.len());

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            let storage = raw.type_info().name().to_string();
            match storage.as_str() {
                "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
                "REAL" => Number::from_f64(row.try_get_unchecked::<f64, _>(index)?)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                "BLOB" => Value::from(row.try_get_unchecked::<Vec<u8>, _>(index)?),
                _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
            }
        };

        object.insert(column.name().to_string(), value);
    }

    Ok(Value::Object(object))
}
