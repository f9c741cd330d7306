//! HTTP client for external data sources.
//!
//! Wraps a shared [`reqwest::Client`] so every external data source reuses
//! the same connection pool.

use std::time::Duration;

use dashboard_core::data_source::HttpMethod;
use serde_json::Value;

/// Errors from calling an external endpoint.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("External data source returned HTTP {status}")]
    HttpStatus { status: u16 },
}

/// A fully-resolved outgoing request.
#[derive(Debug, Clone)]
pub struct ExternalRequest<'a> {
    pub endpoint: &'a str,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<&'a Value>,
}

/// Issues requests on behalf of external data sources.
pub struct ExternalFetcher {
    client: reqwest::Client,
}

impl ExternalFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    ///
    /// A zero duration disables the client-side timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Send the request and decode the response body.
    ///
    /// JSON bodies are returned parsed. Anything else comes back as a JSON
    /// string, and an empty body as `null`. The body is only attached for
    /// methods other than GET.
    pub async fn fetch(&self, request: &ExternalRequest<'_>) -> Result<Value, FetchError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.endpoint);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body.filter(|_| request.method.sends_body()) {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(
            endpoint = request.endpoint,
            method = request.method.as_str(),
            bytes = bytes.len(),
            "External data source responded",
        );
        Ok(decode_body(&bytes))
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
