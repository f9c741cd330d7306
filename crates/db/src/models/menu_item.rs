//! Side menu entries.

use dashboard_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `menu_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MenuItem {
    pub id: DbId,
    pub title: String,
    pub icon: Option<String>,
    pub path: String,
}
