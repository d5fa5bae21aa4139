//! The table view controller: query, sort and page state for one table,
//! and the rows those produce.

pub mod controller;

pub use controller::{FilterEntry, LoadState, TableViewController, ViewSnapshot};
