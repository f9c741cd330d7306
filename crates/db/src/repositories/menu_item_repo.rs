//! Repository for the `menu_items` table.

use dashboard_core::menu::MenuSeed;
use sqlx::SqlitePool;

use crate::models::menu_item::MenuItem;

const COLUMNS: &str = "id, title, icon, path";

/// Provides read access to the side menu and first-start seeding.
pub struct MenuItemRepo;

impl MenuItemRepo {
    /// List all menu items in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menu_items ORDER BY id");
        sqlx::query_as::<_, MenuItem>(&query).fetch_all(pool).await
    }

    /// Insert `seeds` in one transaction if the table is empty.
    ///
    /// Returns the number of rows inserted.
    pub async fn seed_if_empty(pool: &SqlitePool, seeds: &[MenuSeed]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(0);
        }

        let mut inserted = 0;
        for seed in seeds {
            let result = sqlx::query("INSERT INTO menu_items (title, icon, path) VALUES ($1, $2, $3)")
                .bind(seed.title)
                .bind(seed.icon)
                .bind(seed.path)
                .execute(&mut *tx)
                .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
