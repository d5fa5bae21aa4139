//! Table view controller.
//!
//! Owns the state of one mounted table: the source rows, the query and
//! filters, the sort and the page. Every mutation re-derives the visible
//! rows from scratch:
//!
//! source rows → filter → sort (if any) → page slice
//!
//! The derivation is pure, so calling [`TableViewController::refresh`] on
//! unchanged state reproduces the same output. Nothing here does I/O or
//! returns an error; bad requests (unknown sort column, out-of-range page,
//! odd page size) are clamped or ignored and logged.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::data::{ColumnDescriptor, Record, RowKey, Value};
use crate::query::{
    clamp_page, page_bounds, page_count, sort_indices, NullPlacement, PageSizes, PageState,
    RowFilter, SortDirection, SortState, TextQuery,
};

/// Loading/error flag supplied by whoever fetches the rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    /// Rows are present (possibly none)
    #[default]
    Ready,
    /// A fetch is in flight
    Loading,
    /// The last fetch failed
    Failed(String),
}

/// One active exact-match filter, as reported in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterEntry<F> {
    pub field: F,
    pub value: Value,
}

/// Serializable picture of the controller's state and current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot<F> {
    pub load_state: LoadState,
    pub query: String,
    pub filters: Vec<FilterEntry<F>>,
    pub sort: SortState<F>,
    pub page: PageState,
    /// Rows before filtering
    pub total_count: usize,
    /// Keys of the rows on the current page, in display order
    pub visible: Vec<RowKey>,
}

/// Presentation state for one table.
#[derive(Debug, Clone)]
pub struct TableViewController<R: Record> {
    rows: Arc<Vec<R>>,
    columns: Vec<ColumnDescriptor<R::Field>>,
    filter: RowFilter<R::Field>,
    sort: SortState<R::Field>,
    nulls: NullPlacement,
    page_sizes: PageSizes,
    page_index: usize,
    page_size: usize,
    load_state: LoadState,
    /// Source indices of the filtered, sorted rows
    order: Vec<usize>,
}

impl<R: Record> TableViewController<R> {
    /// Create an empty table with the given columns.
    ///
    /// Every column is searchable until [`searchable`](Self::searchable)
    /// narrows it down.
    pub fn new(columns: Vec<ColumnDescriptor<R::Field>>) -> Self {
        let searchable = columns.iter().map(|c| c.id.clone()).collect();
        let page_sizes = PageSizes::default();
        Self {
            rows: Arc::new(Vec::new()),
            columns,
            filter: RowFilter::new(searchable),
            sort: SortState::unsorted(),
            nulls: NullPlacement::default(),
            page_index: 0,
            page_size: page_sizes.initial(),
            page_sizes,
            load_state: LoadState::Ready,
            order: Vec::new(),
        }
    }

    /// Builder: fields the free-text query looks at.
    pub fn searchable(mut self, fields: Vec<R::Field>) -> Self {
        self.filter.searchable = fields;
        self.recompute();
        self
    }

    /// Builder: offered page sizes. Resets the page size to the set's initial one.
    pub fn page_sizes(mut self, sizes: PageSizes) -> Self {
        self.page_size = sizes.initial();
        self.page_sizes = sizes;
        self.page_index = 0;
        self.recompute();
        self
    }

    /// Builder: where missing sort values go.
    pub fn nulls(mut self, nulls: NullPlacement) -> Self {
        self.nulls = nulls;
        self.recompute();
        self
    }

    /// Builder: initial rows.
    pub fn with_rows(mut self, rows: impl Into<Arc<Vec<R>>>) -> Self {
        self.set_rows(rows);
        self
    }

    // ------------------------------------------------------------------
    // Input from the data-fetching side
    // ------------------------------------------------------------------

    /// Replace the source rows and mark the table ready.
    ///
    /// Query, filters, sort and page survive; the page is clamped if the
    /// new set is shorter.
    pub fn set_rows(&mut self, rows: impl Into<Arc<Vec<R>>>) {
        self.rows = rows.into();
        self.load_state = LoadState::Ready;
        trace!(rows = self.rows.len(), "rows replaced");
        self.recompute();
    }

    /// Mark a fetch as in flight. Current rows stay until replaced.
    pub fn set_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Record a failed fetch.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.load_state = LoadState::Failed(message.into());
    }

    // ------------------------------------------------------------------
    // Input from the rendering side
    // ------------------------------------------------------------------

    /// Set the free-text query. A changed query goes back to page 0.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let query = TextQuery::new(text);
        if query == self.filter.query {
            return;
        }
        trace!(query = query.as_str(), "query changed");
        self.filter.query = query;
        self.page_index = 0;
        self.recompute();
    }

    /// Require `field` to equal `value`. Goes back to page 0.
    pub fn set_filter(&mut self, field: R::Field, value: impl Into<Value>) {
        let value = value.into();
        trace!(?field, %value, "filter set");
        self.filter.exact.set(field, value);
        self.page_index = 0;
        self.recompute();
    }

    /// Drop the filter on `field`. Goes back to page 0 if one was active.
    pub fn clear_filter(&mut self, field: &R::Field) {
        if self.filter.exact.remove(field) {
            trace!(?field, "filter cleared");
            self.page_index = 0;
            self.recompute();
        }
    }

    /// Column header click.
    ///
    /// The sorted column flips direction; any other column becomes the sort
    /// column, ascending. Unknown and unsortable columns are ignored.
    pub fn set_sort(&mut self, field: R::Field) {
        if !self.is_sortable(&field) {
            warn!(?field, "ignoring sort on unknown or unsortable column");
            return;
        }
        self.sort = if self.sort.order_by.as_ref() == Some(&field) {
            SortState {
                order_by: Some(field),
                direction: self.sort.direction.toggled(),
            }
        } else {
            SortState::by(field)
        };
        trace!(sort = ?self.sort, "sort changed");
        self.page_index = 0;
        self.recompute();
    }

    /// Apply an explicit sort, e.g. restored from a URL or CLI flags.
    pub fn set_sort_state(&mut self, state: SortState<R::Field>) {
        if let Some(field) = &state.order_by {
            if !self.is_sortable(field) {
                warn!(?field, "ignoring sort on unknown or unsortable column");
                return;
            }
        }
        self.sort = state;
        trace!(sort = ?self.sort, "sort state applied");
        self.page_index = 0;
        self.recompute();
    }

    /// Go to page `index`. Negative clamps to 0, past-the-end to the last page.
    pub fn set_page(&mut self, index: i64) {
        let clamped = clamp_page(index, self.order.len(), self.page_size);
        if i64::try_from(clamped).ok() != Some(index) {
            debug!(requested = index, page = clamped, "page index clamped");
        }
        self.page_index = clamped;
    }

    /// Change rows per page. Sizes outside the offered set snap to the
    /// nearest option. Always goes back to page 0.
    pub fn set_page_size(&mut self, size: usize) {
        let clamped = self.page_sizes.clamp(size);
        if clamped != size {
            warn!(requested = size, size = clamped, "page size not offered, using nearest");
        }
        self.page_size = clamped;
        self.page_index = 0;
    }

    /// Re-derive the visible rows from unchanged state.
    pub fn refresh(&mut self) {
        self.recompute();
    }

    fn recompute(&mut self) {
        let mut order = self.filter.apply(self.rows.as_slice());
        sort_indices(self.rows.as_slice(), &mut order, &self.sort, self.nulls);
        self.order = order;
        self.page_index = clamp_page(
            i64::try_from(self.page_index).unwrap_or(i64::MAX),
            self.order.len(),
            self.page_size,
        );
        debug!(
            total = self.rows.len(),
            matching = self.order.len(),
            page = self.page_index,
            "table view recomputed"
        );
    }

    fn is_sortable(&self, field: &R::Field) -> bool {
        self.column(field).is_some_and(|c| c.sortable)
    }

    // ------------------------------------------------------------------
    // Derived output
    // ------------------------------------------------------------------

    /// Rows on the current page, in display order.
    pub fn visible_rows(&self) -> Vec<&R> {
        self.visible_indices()
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// Source indices of the rows on the current page.
    pub fn visible_indices(&self) -> &[usize] {
        &self.order[page_bounds(self.page_index, self.order.len(), self.page_size)]
    }

    /// Keys of the rows on the current page.
    pub fn visible_keys(&self) -> Vec<RowKey> {
        self.visible_indices()
            .iter()
            .map(|&i| RowKey::of(&self.rows[i], i))
            .collect()
    }

    /// All rows passing the filters, sorted, across every page.
    pub fn filtered_rows(&self) -> Vec<&R> {
        self.order.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Rows before filtering.
    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows after filtering, across all pages.
    pub fn filtered_count(&self) -> usize {
        self.order.len()
    }

    pub fn sort_state(&self) -> &SortState<R::Field> {
        &self.sort
    }

    /// Direction of `field` when it is the sorted column.
    pub fn sort_direction_of(&self, field: &R::Field) -> Option<SortDirection> {
        (self.sort.order_by.as_ref() == Some(field)).then_some(self.sort.direction)
    }

    pub fn page_state(&self) -> PageState {
        PageState {
            index: self.page_index,
            size: self.page_size,
            page_count: page_count(self.order.len(), self.page_size),
            row_count: self.order.len(),
        }
    }

    pub fn query(&self) -> &str {
        self.filter.query.as_str()
    }

    /// Active exact-match filters.
    pub fn filters(&self) -> impl Iterator<Item = (&R::Field, &Value)> {
        self.filter.exact.iter()
    }

    pub fn columns(&self) -> &[ColumnDescriptor<R::Field>] {
        &self.columns
    }

    pub fn column(&self, field: &R::Field) -> Option<&ColumnDescriptor<R::Field>> {
        self.columns.iter().find(|c| &c.id == field)
    }

    pub fn page_size_options(&self) -> &[usize] {
        self.page_sizes.options()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// The source rows, as supplied.
    pub fn source_rows(&self) -> &Arc<Vec<R>> {
        &self.rows
    }

    /// Serializable view of state and current page.
    pub fn snapshot(&self) -> ViewSnapshot<R::Field> {
        ViewSnapshot {
            load_state: self.load_state.clone(),
            query: self.query().to_string(),
            filters: self
                .filters()
                .map(|(field, value)| FilterEntry {
                    field: field.clone(),
                    value: value.clone(),
                })
                .collect(),
            sort: self.sort.clone(),
            page: self.page_state(),
            total_count: self.total_count(),
            visible: self.visible_keys(),
        }
    }
}
