//! Pagination slicer.
//!
//! Page indices are zero-based. Out-of-range indices never produce an empty
//! slice: past-the-end clamps to the last page and negative clamps to 0.

use std::ops::Range;

/// Number of pages needed for `total` rows. An empty set still has one page.
pub fn page_count(total: usize, size: usize) -> usize {
    let size = size.max(1);
    total.div_ceil(size).max(1)
}

/// Clamp a requested page index into `0..page_count(total, size)`.
pub fn clamp_page(index: i64, total: usize, size: usize) -> usize {
    let last = page_count(total, size) - 1;
    if index <= 0 {
        0
    } else {
        usize::try_from(index).map_or(last, |i| i.min(last))
    }
}

/// Row range shown on page `index`, after clamping.
pub fn page_bounds(index: usize, total: usize, size: usize) -> Range<usize> {
    let size = size.max(1);
    let index = clamp_page(i64::try_from(index).unwrap_or(i64::MAX), total, size);
    let start = (index * size).min(total);
    let end = (start + size).min(total);
    start..end
}

/// The slice of `items` on page `index`.
pub fn slice_page<T>(items: &[T], index: usize, size: usize) -> &[T] {
    &items[page_bounds(index, items.len(), size)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(12, 5), 3);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(-3, 12, 10), 0);
        assert_eq!(clamp_page(1, 12, 10), 1);
        assert_eq!(clamp_page(2, 12, 10), 1);
        assert_eq!(clamp_page(1, 5, 10), 0);
        assert_eq!(clamp_page(i64::MAX, 12, 10), 1);
    }

    #[test]
    fn test_slice_twelve_rows() {
        let rows: Vec<usize> = (0..12).collect();
        assert_eq!(slice_page(&rows, 0, 10), &rows[0..10]);
        assert_eq!(slice_page(&rows, 1, 10), &[10, 11]);
    }

    #[test]
    fn test_slice_past_end_clamps_to_last_page() {
        let rows: Vec<usize> = (0..5).collect();
        assert_eq!(slice_page(&rows, 3, 2), &[4]);
    }

    #[test]
    fn test_slice_empty() {
        let rows: Vec<usize> = Vec::new();
        assert!(slice_page(&rows, 0, 10).is_empty());
        assert!(slice_page(&rows, 4, 10).is_empty());
    }
}
