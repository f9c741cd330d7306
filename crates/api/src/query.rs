//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for list endpoints that support an `include_inactive` flag.
///
/// The dashboard lists active widgets only; the settings page passes
/// `include_inactive=true` to see deactivated ones too.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
