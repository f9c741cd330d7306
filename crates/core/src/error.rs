use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A data path segment could not be resolved against a JSON value.
    #[error("Path not found: '{segment}' in '{path}'")]
    PathNotFound { path: String, segment: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
