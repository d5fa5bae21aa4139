//! # tableviewlib
//!
//! Sort, search, filter and paginate in-memory row collections for admin
//! tables (books, events, registrations, user profiles).
//!
//! ## Overview
//!
//! A table view is a pure function of a small amount of state. Given the
//! source rows, the controller derives what to show:
//!
//! 1. **Filter**: free-text query (OR across searchable fields) AND exact-match filters
//! 2. **Sort**: one column, stable, missing values grouped at one end
//! 3. **Page**: a slice of the result, with out-of-range pages clamped
//!
//! Everything is recomputed from the full source collection on each state
//! change. Rows are never copied or reordered in place.
//!
//! ## Features
//!
//! - **Typed or dynamic rows**: implement [`Record`] for your own struct, or
//!   use [`Row`] for JSON-shaped data
//! - **Stable sorting**: ties keep input order in both directions
//! - **Formatting**: per-column [`ValueFormat`] for the table and CSV export
//! - **Pure Rust data types**: the engine performs no I/O
//!
//! ## Example
//!
//! ```rust
//! use tableviewlib::{ColumnDescriptor, Row, TableViewController};
//!
//! let rows = vec![
//!     Row::new().with("id", 1).with("name", "B"),
//!     Row::new().with("id", 2).with("name", "A"),
//!     Row::new().with("id", 3).with("name", "A"),
//! ];
//! let mut view = TableViewController::new(vec![
//!     ColumnDescriptor::new("id".to_string(), "ID"),
//!     ColumnDescriptor::new("name".to_string(), "Name"),
//! ])
//! .with_rows(rows);
//!
//! view.set_sort("name".to_string());
//! let keys: Vec<String> = view.visible_keys().iter().map(|k| k.to_string()).collect();
//! assert_eq!(keys, ["2", "3", "1"]);
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;
pub mod view;

pub use data::{ColumnDescriptor, Record, Row, RowKey, Value, ValueFormat};
pub use error::TableViewError;
pub use output::{to_csv_string, write_csv, RenderedTable, TableRow};
pub use query::{NullPlacement, PageSizes, PageState, SortDirection, SortState};
pub use source::{load_rows, parse_rows, SortConfig, TableConfig};
pub use view::{LoadState, TableViewController, ViewSnapshot};

/// Result type for tableviewlib operations
pub type Result<T> = std::result::Result<T, TableViewError>;
