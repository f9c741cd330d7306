//! Widget and data source data resolution.
//!
//! A data source is resolved by running its stored query (internal) or
//! calling its endpoint (external). A widget is resolved by resolving its
//! bound data source and then projecting its data path out of the result.

pub mod external;

pub use external::{ExternalFetcher, ExternalRequest, FetchError};

use dashboard_core::data_path;
use dashboard_core::data_source::{header_pairs, HttpMethod, SourceType};
use dashboard_core::error::CoreError;
use dashboard_core::types::DbId;
use dashboard_db::models::data_source::DataSource;
use dashboard_db::models::widget::Widget;
use dashboard_db::repositories::{DataSourceRepo, QueryRepo};
use dashboard_db::DbPool;
use serde_json::Value;

/// Errors raised while resolving data.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Invalid stored definition or an unresolvable data path.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Widget {0} is not bound to a data source")]
    Unbound(DbId),

    #[error("Data source {0} has no query")]
    MissingQuery(DbId),

    #[error("Data source {0} has no endpoint")]
    MissingEndpoint(DbId),

    /// The stored SQL of an internal data source failed.
    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error(transparent)]
    External(#[from] FetchError),

    /// Loading the widget's data source failed.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

/// Resolves data for widgets and data sources.
pub struct DataResolver<'a> {
    pool: &'a DbPool,
    fetcher: &'a ExternalFetcher,
}

impl<'a> DataResolver<'a> {
    pub fn new(pool: &'a DbPool, fetcher: &'a ExternalFetcher) -> Self {
        Self { pool, fetcher }
    }

    /// Produce the full payload of a data source.
    pub async fn resolve_source(&self, source: &DataSource) -> Result<Value, ResolveError> {
        match SourceType::from_str(&source.source_type)? {
            SourceType::Internal => {
                let query = source
                    .query
                    .as_deref()
                    .filter(|q| !q.trim().is_empty())
                    .ok_or(ResolveError::MissingQuery(source.id))?;

                let rows = QueryRepo::fetch_json_rows(self.pool, query)
                    .await
                    .map_err(ResolveError::Query)?;
                Ok(Value::Array(rows))
            }
            SourceType::External => {
                let endpoint = source
                    .endpoint
                    .as_deref()
                    .filter(|e| !e.trim().is_empty())
                    .ok_or(ResolveError::MissingEndpoint(source.id))?;

                let headers = match &source.headers {
                    Some(h) => header_pairs(&h.0)?,
                    None => Vec::new(),
                };

                let request = ExternalRequest {
                    endpoint,
                    method: HttpMethod::from_str(&source.method)?,
                    headers,
                    body: source.body.as_ref().map(|b| &b.0),
                };
                Ok(self.fetcher.fetch(&request).await?)
            }
        }
    }

    /// Produce the data a widget renders: its source's payload narrowed by
    /// the widget's data path.
    pub async fn resolve_widget(&self, widget: &Widget) -> Result<Value, ResolveError> {
        let api_id = widget.api_id.ok_or(ResolveError::Unbound(widget.id))?;

        // The foreign key detaches widgets on delete, so a missing row here
        // only happens if the source vanished between the two reads.
        let source = DataSourceRepo::find_by_id(self.pool, api_id)
            .await
            .map_err(ResolveError::Database)?
            .ok_or(CoreError::NotFound {
                entity: "DataSource",
                id: api_id,
            })?;

        let payload = self.resolve_source(&source).await?;
        let data = data_path::project(payload, widget.data_path.as_deref())?;

        tracing::debug!(
            widget_id = widget.id,
            api_id,
            source_type = %source.source_type,
            "Widget data resolved",
        );
        Ok(data)
    }
}
