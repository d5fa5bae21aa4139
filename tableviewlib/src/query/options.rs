//! Query state types: sort order, null placement and page sizes.
//!
//! These are plain values owned by the view controller. They carry no
//! behavior beyond small constructors and parsing.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending (A-Z, smallest first)
    #[default]
    Ascending,
    /// Descending (Z-A, largest first)
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Which column the table is sorted by, and how.
///
/// `order_by: None` keeps the source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<F> {
    /// Field to order by
    pub order_by: Option<F>,
    /// Sort direction
    pub direction: SortDirection,
}

impl<F> Default for SortState<F> {
    fn default() -> Self {
        Self {
            order_by: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl<F> SortState<F> {
    /// Keep the source order.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by `field`, ascending.
    pub fn by(field: F) -> Self {
        Self {
            order_by: Some(field),
            direction: SortDirection::Ascending,
        }
    }

    /// Set sort direction to ascending
    pub fn ascending(mut self) -> Self {
        self.direction = SortDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Descending;
        self
    }

    pub fn is_sorted(&self) -> bool {
        self.order_by.is_some()
    }
}

/// Where rows with a missing or null sort value go.
///
/// The placement holds in both directions: flipping to descending does not
/// move missing values to the other end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullPlacement {
    #[default]
    First,
    Last,
}

impl FromStr for NullPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(NullPlacement::First),
            "last" => Ok(NullPlacement::Last),
            _ => Err(format!("Unknown null placement: {}", s)),
        }
    }
}

/// The fixed set of page sizes a table offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct PageSizes(Vec<usize>);

/// Page size used when the set offers it.
const PREFERRED_PAGE_SIZE: usize = 10;

impl Default for PageSizes {
    fn default() -> Self {
        Self(vec![5, 10, 25, 50])
    }
}

impl PageSizes {
    /// Build a set from arbitrary options.
    ///
    /// Zeros are dropped and the rest sorted and deduplicated. An empty
    /// result falls back to the default set.
    pub fn new(sizes: impl IntoIterator<Item = usize>) -> Self {
        let mut sizes: Vec<usize> = sizes.into_iter().filter(|s| *s > 0).collect();
        sizes.sort_unstable();
        sizes.dedup();
        if sizes.is_empty() {
            Self::default()
        } else {
            Self(sizes)
        }
    }

    /// Allowed sizes, ascending.
    pub fn options(&self) -> &[usize] {
        &self.0
    }

    pub fn contains(&self, size: usize) -> bool {
        self.0.binary_search(&size).is_ok()
    }

    /// Initial page size: 10 when offered, otherwise the smallest option.
    pub fn initial(&self) -> usize {
        if self.contains(PREFERRED_PAGE_SIZE) {
            PREFERRED_PAGE_SIZE
        } else {
            self.0[0]
        }
    }

    /// Nearest allowed size to `requested`. Ties go to the smaller option.
    pub fn clamp(&self, requested: usize) -> usize {
        let mut best = self.0[0];
        for &size in &self.0 {
            if size.abs_diff(requested) < best.abs_diff(requested) {
                best = size;
            }
        }
        best
    }
}

impl From<Vec<usize>> for PageSizes {
    fn from(sizes: Vec<usize>) -> Self {
        Self::new(sizes)
    }
}

impl From<PageSizes> for Vec<usize> {
    fn from(sizes: PageSizes) -> Self {
        sizes.0
    }
}

/// Pagination as seen by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    /// Zero-based page index, always within range
    pub index: usize,
    /// Rows per page
    pub size: usize,
    /// Number of pages (at least 1)
    pub page_count: usize,
    /// Rows across all pages after filtering
    pub row_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_toggle() {
        assert_eq!(
            SortDirection::Ascending.toggled(),
            SortDirection::Descending
        );
        assert_eq!(
            SortDirection::Descending.toggled(),
            SortDirection::Ascending
        );
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!(
            SortDirection::from_str("desc").unwrap(),
            SortDirection::Descending
        );
        assert_eq!(
            SortDirection::from_str("ASC").unwrap(),
            SortDirection::Ascending
        );
        assert!(SortDirection::from_str("sideways").is_err());
    }

    #[test]
    fn test_sort_state_default_is_unsorted() {
        let state: SortState<String> = SortState::default();
        assert!(!state.is_sorted());
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_state_builder() {
        let state = SortState::by("title").descending();
        assert_eq!(state.order_by, Some("title"));
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn test_page_sizes_default() {
        let sizes = PageSizes::default();
        assert_eq!(sizes.options(), &[5, 10, 25, 50]);
        assert_eq!(sizes.initial(), 10);
    }

    #[test]
    fn test_page_sizes_clamp() {
        let sizes = PageSizes::default();
        assert_eq!(sizes.clamp(10), 10);
        assert_eq!(sizes.clamp(0), 5);
        assert_eq!(sizes.clamp(12), 10);
        assert_eq!(sizes.clamp(20), 25);
        assert_eq!(sizes.clamp(1000), 50);
        assert_eq!(sizes.clamp(15), 10);
    }

    #[test]
    fn test_page_sizes_clamp_tie_goes_smaller() {
        let sizes = PageSizes::new([10, 20]);
        assert_eq!(sizes.clamp(15), 10);
    }

    #[test]
    fn test_page_sizes_new_normalizes() {
        let sizes = PageSizes::new([50, 0, 5, 50, 20]);
        assert_eq!(sizes.options(), &[5, 20, 50]);
        assert_eq!(sizes.initial(), 5);

        assert_eq!(PageSizes::new([0]), PageSizes::default());
    }

    #[test]
    fn test_page_sizes_deserialize() {
        let sizes: PageSizes = serde_json::from_str("[25, 100]").unwrap();
        assert_eq!(sizes.options(), &[25, 100]);
    }

    #[test]
    fn test_null_placement_from_str() {
        assert_eq!(NullPlacement::from_str("last").unwrap(), NullPlacement::Last);
        assert!(NullPlacement::from_str("middle").is_err());
    }
}
