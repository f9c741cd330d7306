//! Dot-separated field paths into resolved JSON data.
//!
//! A widget may carry a path such as `results.0.total` that narrows the
//! payload returned by its data source down to the part it renders.
//! Object segments are looked up by key; array segments must be a
//! decimal index.

use serde_json::Value;

use crate::error::CoreError;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Returns `true` if the path is absent or blank, meaning "the whole value".
pub fn is_empty_path(path: Option<&str>) -> bool {
    path.map_or(true, |p| p.trim().is_empty())
}

/// Walk `value` along `path` and return the value found at the end.
///
/// A blank path returns `value` unchanged. Fails with
/// [`CoreError::PathNotFound`] naming the first segment that could not be
/// resolved.
pub fn extract<'a>(value: &'a Value, path: &str) -> Result<&'a Value, CoreError> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(value);
    }

    let mut current = value;
    for segment in path.split(PATH_SEPARATOR) {
        current = step(current, segment).ok_or_else(|| CoreError::PathNotFound {
            path: path.to_string(),
            segment: segment.to_string(),
        })?;
    }
    Ok(current)
}

/// Owned variant of [`extract`] that accepts an optional path.
pub fn project(value: Value, path: Option<&str>) -> Result<Value, CoreError> {
    match path {
        Some(p) if !is_empty_path(Some(p)) => extract(&value, p).cloned(),
        _ => Ok(value),
    }
}

/// Validate the syntax of a stored path. Empty segments (`a..b`, `.a`,
/// `a.`) can never resolve and are rejected up front.
pub fn validate_path(path: &str) -> Result<(), CoreError> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(());
    }
    if path.split(PATH_SEPARATOR).any(|s| s.trim().is_empty()) {
        return Err(CoreError::Validation(format!(
            "data_path '{path}' contains an empty segment"
        )));
    }
    Ok(())
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    if segment.is_empty() {
        return None;
    }
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}
