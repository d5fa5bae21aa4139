//! Output formatting: present the view as text.
//!
//! - **RenderedTable**: the visible page as header labels, cell strings and
//!   a footer, ready for a terminal or a template
//! - **CSV export**: the whole filtered, sorted set with quoted fields
//!
//! Both read from the controller and never change it.

pub mod csv;
pub mod table;

pub use self::csv::{to_csv_string, write_csv};
pub use self::table::{RenderedTable, TableRow};
