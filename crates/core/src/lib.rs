//! Domain types and pure logic shared by the storage and HTTP layers.
//!
//! Nothing in this crate touches the database or the network: it holds
//! the vocabulary (source kinds, widget kinds, grid geometry) and the
//! validation rules both layers enforce.

pub mod data_path;
pub mod data_source;
pub mod error;
pub mod grid;
pub mod menu;
pub mod types;
pub mod widget;
