//! Terminal rendering of a `RenderedTable`.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ColumnConstraint, ContentArrangement, Table, Width};
use console::Style;
use tableviewlib::RenderedTable;

/// Widest a column gets before its cells wrap.
const MAX_CELL_WIDTH: u16 = 40;

/// Build the comfy-table grid for the visible page.
///
/// `width` is the terminal width, when known. Without it the grid is as
/// wide as its content.
fn build_grid(table: &RenderedTable, width: Option<u16>) -> Table {
    let mut grid = Table::new();
    grid.load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            table
                .headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    if let Some(width) = width {
        grid.set_width(width);
    }
    for row in &table.rows {
        grid.add_row(row.values.iter());
    }
    for column in grid.column_iter_mut() {
        column.set_constraint(ColumnConstraint::UpperBoundary(Width::Fixed(MAX_CELL_WIDTH)));
    }
    grid
}

/// Render the table, then the empty-state message and the footer.
///
/// Styling only shows up when the terminal supports it.
pub fn render_table(table: &RenderedTable, width: Option<u16>) -> String {
    let footer_style = Style::new().dim();

    let mut out = build_grid(table, width).to_string();
    out.push('\n');
    if let Some(message) = &table.empty_message {
        out.push_str(message);
        out.push('\n');
    }
    out.push_str(&footer_style.apply_to(&table.footer).to_string());
    out.push('\n');
    out
}
