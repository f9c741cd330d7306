//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod data_source;
pub mod menu_item;
pub mod widget;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Use together with `#[serde(default)]`: an absent field stays `None`,
/// `null` becomes `Some(None)` (clear the column), and a value becomes
/// `Some(Some(v))`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Apply a nullable patch field over a stored value.
pub(crate) fn patch<T: Clone>(stored: &Option<T>, update: &Option<Option<T>>) -> Option<T> {
    match update {
        Some(value) => value.clone(),
        None => stored.clone(),
    }
}
