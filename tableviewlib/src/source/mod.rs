//! Source loading: get rows and table configuration off disk.
//!
//! The view engine takes rows already in memory. This module covers the
//! step before that for file-based callers:
//!
//! - **Loader**: parse a JSON row dump (bare array or REST envelope)
//! - **Config**: column descriptors, searchable fields, page sizes, initial sort
//!
//! ## Example
//!
//! ```rust,ignore
//! use tableviewlib::source::{load_rows, TableConfig};
//!
//! let rows = load_rows("events.json")?;
//! let view = TableConfig::load("events.table.json")?.build(rows)?;
//! ```

pub mod config;
pub mod loader;

pub use config::{SortConfig, TableConfig};
pub use loader::{load_rows, parse_rows};
