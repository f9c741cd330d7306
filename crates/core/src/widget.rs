//! Widget display kinds and configuration rules.
//!
//! Invariant: a widget carries a chart type if and only if its display
//! kind is `chart`. The same rule is a `CHECK` constraint on the
//! `widgets` table.

use crate::error::CoreError;

/// Maximum length of a widget title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Refresh interval meaning "never refresh automatically".
pub const NO_REFRESH: i64 = 0;

// ---------------------------------------------------------------------------
// Display kinds
// ---------------------------------------------------------------------------

/// How a widget renders its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    Chart,
    Table,
    Value,
}

const VALID_WIDGET_TYPES: &[&str] = &["chart", "table", "value"];

impl WidgetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Table => "table",
            Self::Value => "value",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "chart" => Ok(Self::Chart),
            "table" => Ok(Self::Table),
            "value" => Ok(Self::Value),
            _ => Err(CoreError::Validation(format!(
                "Invalid widget type '{s}'. Must be one of: {}",
                VALID_WIDGET_TYPES.join(", ")
            ))),
        }
    }
}

/// Chart flavours available to `chart` widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Doughnut,
}

const VALID_CHART_TYPES: &[&str] = &["bar", "line", "pie", "doughnut"];

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "bar" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            "pie" => Ok(Self::Pie),
            "doughnut" => Ok(Self::Doughnut),
            _ => Err(CoreError::Validation(format!(
                "Invalid chart type '{s}'. Must be one of: {}",
                VALID_CHART_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the display kind / chart kind pairing.
pub fn validate_kind(widget_type: &str, chart_type: Option<&str>) -> Result<WidgetType, CoreError> {
    let kind = WidgetType::from_str(widget_type)?;
    match (kind, chart_type) {
        (WidgetType::Chart, Some(c)) => {
            ChartType::from_str(c)?;
        }
        (WidgetType::Chart, None) => {
            return Err(CoreError::Validation(
                "chart widgets require a chart_type".to_string(),
            ));
        }
        (_, Some(_)) => {
            return Err(CoreError::Validation(format!(
                "chart_type is only allowed on chart widgets, not '{widget_type}'"
            )));
        }
        (_, None) => {}
    }
    Ok(kind)
}

/// Work out the chart type a widget ends up with after an update.
///
/// Switching away from `chart` drops the stored chart type unless the
/// caller explicitly sent one (which is then rejected by
/// [`validate_kind`]). Staying on or switching to `chart` keeps the stored
/// chart type unless a new one is given.
pub fn merge_chart_type(
    final_widget_type: &str,
    requested: Option<&str>,
    stored: Option<&str>,
) -> Option<String> {
    if requested.is_some() {
        return requested.map(str::to_string);
    }
    if final_widget_type == WidgetType::Chart.as_str() {
        stored.map(str::to_string)
    } else {
        None
    }
}

/// Validate a widget title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a refresh interval in seconds. Zero disables refreshing.
pub fn validate_refresh_interval(secs: i64) -> Result<(), CoreError> {
    if secs < NO_REFRESH {
        return Err(CoreError::Validation(format!(
            "refresh_interval must be non-negative, got {secs}"
        )));
    }
    Ok(())
}
