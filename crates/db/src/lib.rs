//! SQLite storage for menu items, data sources and widgets.

pub mod models;
pub mod repositories;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub type DbPool = sqlx::SqlitePool;

/// SQL expression producing the current UTC time as RFC 3339 text.
pub(crate) const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Create a connection pool from a database URL.
///
/// The database file is created if it does not exist, and foreign key
/// enforcement is switched on for every connection.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Insert the default side menu if the `menu_items` table is empty.
///
/// Returns the number of rows inserted (zero when a menu already exists).
pub async fn seed_menu_items(pool: &DbPool) -> Result<u64, sqlx::Error> {
    let inserted = repositories::MenuItemRepo::seed_if_empty(
        pool,
        dashboard_core::menu::DEFAULT_MENU,
    )
    .await?;
    if inserted > 0 {
        tracing::info!(inserted, "Seeded default menu items");
    }
    Ok(inserted)
}
