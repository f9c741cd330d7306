//! Widget models and DTOs.

use dashboard_core::data_path;
use dashboard_core::error::CoreError;
use dashboard_core::grid::{GridPosition, DEFAULT_POSITION};
use dashboard_core::types::{DbId, Timestamp};
use dashboard_core::widget::{self, NO_REFRESH};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{nullable, patch};

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `widgets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Widget {
    pub id: DbId,
    pub title: String,
    pub widget_type: String,
    pub chart_type: Option<String>,
    pub api_id: Option<DbId>,
    pub data_path: Option<String>,
    pub refresh_interval: i64,
    pub position_x: i64,
    pub position_y: i64,
    pub width: i64,
    pub height: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Widget {
    pub fn position(&self) -> GridPosition {
        GridPosition {
            position_x: self.position_x,
            position_y: self.position_y,
            width: self.width,
            height: self.height,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a widget. Placement defaults to the top-left 2x2 cell.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWidget {
    pub title: String,
    pub widget_type: String,
    pub chart_type: Option<String>,
    pub api_id: Option<DbId>,
    pub data_path: Option<String>,
    pub refresh_interval: Option<i64>,
    pub position_x: Option<i64>,
    pub position_y: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub is_active: Option<bool>,
}

/// DTO for partially updating a widget's configuration.
///
/// Placement is changed through the position and layout endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWidget {
    pub title: Option<String>,
    pub widget_type: Option<String>,
    pub chart_type: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub api_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub data_path: Option<Option<String>>,
    pub refresh_interval: Option<i64>,
    pub is_active: Option<bool>,
}

/// DTO for `PATCH /widgets/{id}/toggle`. Without a value the flag flips.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToggleWidget {
    pub is_active: Option<bool>,
}

/// One entry of a batch layout update.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LayoutItem {
    pub id: DbId,
    #[serde(flatten)]
    pub position: GridPosition,
}

// ---------------------------------------------------------------------------
// Resolved fields
// ---------------------------------------------------------------------------

/// Every configuration column of a widget after defaults and patches have
/// been applied. This is what the repository writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetFields {
    pub title: String,
    pub widget_type: String,
    pub chart_type: Option<String>,
    pub api_id: Option<DbId>,
    pub data_path: Option<String>,
    pub refresh_interval: i64,
    pub is_active: bool,
}

impl WidgetFields {
    /// Validate the configuration and normalize it for storage.
    ///
    /// Blank data paths are stored as `NULL`.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        self.title = self.title.trim().to_string();
        self.data_path = self
            .data_path
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        widget::validate_title(&self.title)?;
        widget::validate_kind(&self.widget_type, self.chart_type.as_deref())?;
        widget::validate_refresh_interval(self.refresh_interval)?;
        if let Some(path) = &self.data_path {
            data_path::validate_path(path)?;
        }
        Ok(self)
    }
}

impl CreateWidget {
    pub fn fields(&self) -> WidgetFields {
        WidgetFields {
            title: self.title.clone(),
            widget_type: self.widget_type.clone(),
            chart_type: self.chart_type.clone(),
            api_id: self.api_id,
            data_path: self.data_path.clone(),
            refresh_interval: self.refresh_interval.unwrap_or(NO_REFRESH),
            is_active: self.is_active.unwrap_or(true),
        }
    }

    pub fn position(&self) -> GridPosition {
        GridPosition {
            position_x: self.position_x.unwrap_or(DEFAULT_POSITION.position_x),
            position_y: self.position_y.unwrap_or(DEFAULT_POSITION.position_y),
            width: self.width.unwrap_or(DEFAULT_POSITION.width),
            height: self.height.unwrap_or(DEFAULT_POSITION.height),
        }
    }
}

impl Widget {
    /// Apply a partial update over this row.
    ///
    /// The chart type follows [`widget::merge_chart_type`]: leaving the
    /// `chart` kind drops it, staying a chart keeps it.
    pub fn merge(&self, update: &UpdateWidget) -> WidgetFields {
        let widget_type = update
            .widget_type
            .clone()
            .unwrap_or_else(|| self.widget_type.clone());
        let chart_type = widget::merge_chart_type(
            &widget_type,
            update.chart_type.as_deref(),
            self.chart_type.as_deref(),
        );

        WidgetFields {
            title: update.title.clone().unwrap_or_else(|| self.title.clone()),
            widget_type,
            chart_type,
            api_id: patch(&self.api_id, &update.api_id),
            data_path: patch(&self.data_path, &update.data_path),
            refresh_interval: update.refresh_interval.unwrap_or(self.refresh_interval),
            is_active: update.is_active.unwrap_or(self.is_active),
        }
    }
}
