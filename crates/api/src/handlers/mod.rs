//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers validate input through `dashboard_core`, delegate persistence
//! to the repositories in `dashboard_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod data_sources;
pub mod menu;
pub mod widgets;
