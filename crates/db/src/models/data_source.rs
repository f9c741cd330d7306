//! Data source ("API") models and DTOs.

use dashboard_core::data_source::{self, HttpMethod, SourceDefinition, DEFAULT_METHOD};
use dashboard_core::error::CoreError;
use dashboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

use super::{nullable, patch};

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `data_sources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DataSource {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub source_type: String,
    pub endpoint: Option<String>,
    pub method: String,
    pub query: Option<String>,
    pub headers: Option<Json<Value>>,
    pub body: Option<Json<Value>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a data source.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDataSource {
    pub name: String,
    pub description: Option<String>,
    pub source_type: String,
    pub endpoint: Option<String>,
    pub method: Option<String>,
    pub query: Option<String>,
    pub headers: Option<Value>,
    pub body: Option<Value>,
}

/// DTO for partially updating a data source.
///
/// Nullable columns accept an explicit `null` to clear the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDataSource {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub source_type: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub endpoint: Option<Option<String>>,
    pub method: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub query: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub headers: Option<Option<Value>>,
    #[serde(default, deserialize_with = "nullable")]
    pub body: Option<Option<Value>>,
}

// ---------------------------------------------------------------------------
// Resolved fields
// ---------------------------------------------------------------------------

/// Every editable column of a data source, after defaults and patches have
/// been applied. This is what the repository writes.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceFields {
    pub name: String,
    pub description: Option<String>,
    pub source_type: String,
    pub endpoint: Option<String>,
    pub method: String,
    pub query: Option<String>,
    pub headers: Option<Value>,
    pub body: Option<Value>,
}

impl DataSourceFields {
    /// Validate the definition and normalize it for storage.
    ///
    /// Names and endpoints are trimmed and the method is upper-cased.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        self.name = self.name.trim().to_string();
        self.endpoint = self
            .endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        self.method = HttpMethod::from_str(&self.method)?.as_str().to_string();

        data_source::validate_definition(&SourceDefinition {
            name: &self.name,
            source_type: &self.source_type,
            endpoint: self.endpoint.as_deref(),
            method: &self.method,
            query: self.query.as_deref(),
            headers: self.headers.as_ref(),
        })?;

        Ok(self)
    }
}

impl CreateDataSource {
    pub fn fields(&self) -> DataSourceFields {
        DataSourceFields {
            name: self.name.clone(),
            description: self.description.clone(),
            source_type: self.source_type.clone(),
            endpoint: self.endpoint.clone(),
            method: self
                .method
                .clone()
                .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            query: self.query.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

impl DataSource {
    /// Apply a partial update over this row.
    pub fn merge(&self, update: &UpdateDataSource) -> DataSourceFields {
        DataSourceFields {
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            description: patch(&self.description, &update.description),
            source_type: update
                .source_type
                .clone()
                .unwrap_or_else(|| self.source_type.clone()),
            endpoint: patch(&self.endpoint, &update.endpoint),
            method: update.method.clone().unwrap_or_else(|| self.method.clone()),
            query: patch(&self.query, &update.query),
            headers: patch(&self.headers.clone().map(|j| j.0), &update.headers),
            body: patch(&self.body.clone().map(|j| j.0), &update.body),
        }
    }
}
