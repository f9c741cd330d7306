//! Dashboard grid geometry.
//!
//! Widgets are placed on a 12-column grid with unbounded rows. Positions
//! and sizes are in grid units.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of columns on the dashboard grid.
pub const GRID_COLUMNS: i64 = 12;

/// Default placement for newly created widgets.
pub const DEFAULT_POSITION: GridPosition = GridPosition {
    position_x: 0,
    position_y: 0,
    width: 2,
    height: 2,
};

/// A widget's placement on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub position_x: i64,
    pub position_y: i64,
    pub width: i64,
    pub height: i64,
}

impl GridPosition {
    /// Check the placement fits the grid.
    ///
    /// Coordinates are non-negative, sizes are at least one unit, and the
    /// widget does not overflow the right edge.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.position_x < 0 || self.position_y < 0 {
            return Err(CoreError::Validation(format!(
                "position must be non-negative, got ({}, {})",
                self.position_x, self.position_y
            )));
        }
        if self.width < 1 || self.width > GRID_COLUMNS {
            return Err(CoreError::Validation(format!(
                "width must be between 1 and {GRID_COLUMNS}, got {}",
                self.width
            )));
        }
        if self.height < 1 {
            return Err(CoreError::Validation(format!(
                "height must be at least 1, got {}",
                self.height
            )));
        }
        // width is already within 1..=GRID_COLUMNS, so this cannot overflow.
        if self.position_x > GRID_COLUMNS - self.width {
            return Err(CoreError::Validation(format!(
                "widget overflows the grid: x {} + width {} exceeds {GRID_COLUMNS} columns",
                self.position_x, self.width
            )));
        }
        Ok(())
    }
}

impl Default for GridPosition {
    fn default() -> Self {
        DEFAULT_POSITION
    }
}
