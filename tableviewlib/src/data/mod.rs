//! Data model: what a table is made of.
//!
//! - **Value**: a single cell, JSON types plus dates
//! - **Row** / **Record**: one record of the displayed dataset
//! - **ColumnDescriptor**: static per-column configuration
//!
//! Nothing here knows about sorting, filtering or pages. That happens in
//! the `query` stage.

pub mod column;
pub mod row;
pub mod value;

pub use column::{ColumnDescriptor, ValueFormat};
pub use row::{Record, Row, RowKey};
pub use value::{parse_date, Value};
