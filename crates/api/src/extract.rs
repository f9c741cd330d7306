//! Request extractors whose rejections use the JSON error envelope.

use axum::extract::{FromRequest, OptionalFromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] that reports malformed bodies
/// as `400 { "error": ..., "code": "BAD_REQUEST" }`.
///
/// `Option<AppJson<T>>` accepts a request without a `Content-Type` header
/// as `None`, for endpoints whose body is optional.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T, S> OptionalFromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let json = <axum::Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(json.map(|axum::Json(value)| AppJson(value)))
    }
}
