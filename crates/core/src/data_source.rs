//! Data source ("API") kinds, HTTP methods and definition rules.
//!
//! A data source is either an `internal` SQL query run against the
//! dashboard's own store or an `external` HTTP endpoint.

use http::header::{HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a data source name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Method used when a data source does not specify one.
pub const DEFAULT_METHOD: &str = "GET";

// ---------------------------------------------------------------------------
// Source type
// ---------------------------------------------------------------------------

/// Where a data source gets its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Internal,
    External,
}

const VALID_SOURCE_TYPES: &[&str] = &["internal", "external"];

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "internal" => Ok(Self::Internal),
            "external" => Ok(Self::External),
            _ => Err(CoreError::Validation(format!(
                "Invalid source type '{s}'. Must be one of: {}",
                VALID_SOURCE_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP method
// ---------------------------------------------------------------------------

/// HTTP methods an external data source may be called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

const VALID_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Parse a method name. Matching is case-insensitive.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(CoreError::Validation(format!(
                "Invalid HTTP method '{s}'. Must be one of: {}",
                VALID_METHODS.join(", ")
            ))),
        }
    }

    /// GET requests are sent without a body even when one is configured.
    pub fn sends_body(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

// ---------------------------------------------------------------------------
// Definition validation
// ---------------------------------------------------------------------------

/// The fields of a data source that participate in validation, after any
/// update has been merged over the stored row.
#[derive(Debug, Clone, Copy)]
pub struct SourceDefinition<'a> {
    pub name: &'a str,
    pub source_type: &'a str,
    pub endpoint: Option<&'a str>,
    pub method: &'a str,
    pub query: Option<&'a str>,
    pub headers: Option<&'a Value>,
}

/// Validate a complete data source definition.
///
/// - `internal` sources need a non-blank query.
/// - `external` sources need an absolute `http`/`https` endpoint.
/// - headers, when present, must be a JSON object of scalar values.
pub fn validate_definition(def: &SourceDefinition<'_>) -> Result<SourceType, CoreError> {
    validate_name(def.name)?;
    let source_type = SourceType::from_str(def.source_type)?;
    HttpMethod::from_str(def.method)?;

    match source_type {
        SourceType::Internal => {
            if def.query.map_or(true, |q| q.trim().is_empty()) {
                return Err(CoreError::Validation(
                    "internal data sources require a query".to_string(),
                ));
            }
        }
        SourceType::External => {
            let endpoint = def.endpoint.map(str::trim).unwrap_or_default();
            validate_endpoint(endpoint)?;
        }
    }

    if let Some(headers) = def.headers {
        header_pairs(headers)?;
    }

    Ok(source_type)
}

/// Validate that a data source name is non-blank and not too long.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("name must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an external endpoint URL.
pub fn validate_endpoint(endpoint: &str) -> Result<(), CoreError> {
    if endpoint.is_empty() {
        return Err(CoreError::Validation(
            "external data sources require an endpoint".to_string(),
        ));
    }
    let parsed = url::Url::parse(endpoint).map_err(|e| {
        CoreError::Validation(format!("endpoint '{endpoint}' is not a valid URL: {e}"))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CoreError::Validation(format!(
            "endpoint scheme '{other}' is not supported; use http or https"
        ))),
    }
}

/// Flatten a headers object into name/value pairs.
///
/// String values are used as-is; numbers and booleans are rendered with
/// their JSON text. Nested objects, arrays and nulls are rejected, as are
/// names and values that are not legal in an HTTP header.
pub fn header_pairs(headers: &Value) -> Result<Vec<(String, String)>, CoreError> {
    let map = headers
        .as_object()
        .ok_or_else(|| CoreError::Validation("headers must be a JSON object".to_string()))?;

    map.iter()
        .map(|(name, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(CoreError::Validation(format!(
                        "header '{name}' must be a string, number or boolean"
                    )))
                }
            };
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                CoreError::Validation(format!("'{name}' is not a valid HTTP header name"))
            })?;
            HeaderValue::from_str(&rendered).map_err(|_| {
                CoreError::Validation(format!("header '{name}' has an invalid value"))
            })?;
            Ok((name.clone(), rendered))
        })
        .collect()
}
