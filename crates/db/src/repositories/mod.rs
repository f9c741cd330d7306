//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument.

pub mod data_source_repo;
pub mod menu_item_repo;
pub mod query_repo;
pub mod widget_repo;

pub use data_source_repo::DataSourceRepo;
pub use menu_item_repo::MenuItemRepo;
pub use query_repo::QueryRepo;
pub use widget_repo::WidgetRepo;
