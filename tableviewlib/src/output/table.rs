//! Table-ready data for the current page.
//!
//! `RenderedTable` is a pure presentation structure: header labels, cell
//! strings and a footer, ready to be printed or serialized. All filtering,
//! sorting and paging has already happened in the controller.

use serde::{Deserialize, Serialize};

use crate::data::{Record, RowKey};
use crate::query::{PageState, SortDirection};
use crate::view::{LoadState, TableViewController};

/// One data row: its key and one display string per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub key: String,
    pub values: Vec<String>,
}

/// The visible page, formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTable {
    /// Column labels, the sorted one suffixed with ▲ or ▼
    pub headers: Vec<String>,
    /// Position of the sorted column in `headers`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorted_column: Option<usize>,
    /// Rows on the current page
    pub rows: Vec<TableRow>,
    /// e.g. "Page 2 of 3 (23 rows)"
    pub footer: String,
    /// Shown instead of rows: loading, error or nothing matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl RenderedTable {
    /// Format the controller's current page.
    pub fn from_view<R: Record>(view: &TableViewController<R>) -> Self {
        let columns = view.columns();

        let mut sorted_column = None;
        let headers = columns
            .iter()
            .enumerate()
            .map(|(i, col)| match view.sort_direction_of(&col.id) {
                Some(direction) => {
                    sorted_column = Some(i);
                    format!("{} {}", col.label, sort_marker(direction))
                }
                None => col.label.clone(),
            })
            .collect();

        let rows = view
            .visible_indices()
            .iter()
            .map(|&i| {
                let record = &view.source_rows()[i];
                TableRow {
                    key: RowKey::of(record, i).to_string(),
                    values: columns
                        .iter()
                        .map(|col| col.render(record.value(&col.id).as_ref()))
                        .collect(),
                }
            })
            .collect();

        RenderedTable {
            headers,
            sorted_column,
            rows,
            footer: build_footer_label(&view.page_state(), view.total_count()),
            empty_message: empty_message(view),
        }
    }
}

fn sort_marker(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    }
}

/// Footer text. Mentions the unfiltered total when filters hide rows.
fn build_footer_label(page: &PageState, total: usize) -> String {
    let mut label = format!(
        "Page {} of {} ({} rows",
        page.index + 1,
        page.page_count,
        page.row_count
    );
    if page.row_count != total {
        label.push_str(&format!(", filtered from {}", total));
    }
    label.push(')');
    label
}

fn empty_message<R: Record>(view: &TableViewController<R>) -> Option<String> {
    match view.load_state() {
        LoadState::Loading => Some("Loading…".to_string()),
        LoadState::Failed(message) => Some(format!("Error: {}", message)),
        LoadState::Ready if view.filtered_count() > 0 => None,
        LoadState::Ready if view.total_count() == 0 => Some("No rows".to_string()),
        LoadState::Ready => Some("No matching rows".to_string()),
    }
}
