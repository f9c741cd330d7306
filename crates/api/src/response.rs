//! Success envelope shared by every `/api` handler.
//!
//! The dashboard front-end reads `response.data` for menu entries, data
//! sources, widgets and resolved widget data alike.

use serde::Serialize;

/// `{ "data": T }`. Errors use the `{ "error", "code" }` shape from
/// [`crate::error::AppError`] instead.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
