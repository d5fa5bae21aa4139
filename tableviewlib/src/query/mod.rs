//! Query processing: filter, sort and paginate rows.
//!
//! This module holds the pieces the view controller composes:
//!
//! - **Options**: sort state, null placement, page sizes
//! - **Filter**: free-text query and exact-match filters
//! - **Comparator**: stable single-column ordering
//! - **Paginate**: page counting, clamping and slicing
//!
//! Every piece is a pure function of its inputs. Rows are addressed by
//! index and never copied or mutated.
//!
//! ## Example
//!
//! ```rust
//! use tableviewlib::query::{sort_indices, slice_page, NullPlacement, RowFilter, SortState, TextQuery};
//! use tableviewlib::Row;
//!
//! let rows = vec![
//!     Row::new().with("name", "Carla"),
//!     Row::new().with("name", "Bob"),
//!     Row::new().with("name", "Alice"),
//! ];
//!
//! let mut filter = RowFilter::new(vec!["name".to_string()]);
//! filter.query = TextQuery::new("a");
//! let mut indices = filter.apply(&rows);
//! sort_indices(&rows, &mut indices, &SortState::by("name".to_string()), NullPlacement::First);
//!
//! assert_eq!(slice_page(&indices, 0, 10), &[2, 0]);
//! ```

pub mod comparator;
pub mod filter;
pub mod options;
pub mod paginate;

pub use comparator::{compare_values, sort_indices, RowComparator};
pub use filter::{ExactFilters, RowFilter, TextQuery};
pub use options::{NullPlacement, PageSizes, PageState, SortDirection, SortState};
pub use paginate::{clamp_page, page_bounds, page_count, slice_page};
