//! Generic data table.
//!
//! [`DataTable`] owns the transient state of one table screen (page,
//! selection, drag, search) over rows of any [`TableRecord`]. Column layout
//! changes are returned to the caller so the owner can persist them.

pub mod column;
pub mod csv;
pub mod format;
pub mod pager;
pub mod reorder;
pub mod search;
pub mod selection;

pub use column::{merge_columns, Align, ColumnDescriptor};
pub use format::{CellValue, RenderedCell, Tone, DEFAULT_TEXT_BUDGET};
pub use pager::Pager;
pub use reorder::ReorderController;
pub use search::SearchFilter;
pub use selection::Selection;

use tracing::{debug, trace};

/// A record that can be shown in a [`DataTable`].
pub trait TableRecord: Clone {
    /// Table name, used for layout storage and export file names.
    const TABLE: &'static str;

    /// Stable unique id.
    fn id(&self) -> &str;

    /// The default column layout, covering every known field key.
    fn default_columns() -> Vec<ColumnDescriptor>;

    /// The value for a column key, or `None` for keys the record does not know.
    fn cell(&self, key: &str) -> Option<CellValue>;

    /// Fixed CSV header.
    fn csv_header() -> &'static [&'static str];

    /// CSV fields, in header order.
    fn csv_record(&self) -> Vec<String>;

    /// Fields the search filter looks at.
    fn search_text(&self) -> Vec<&str>;

    /// Whether users may hide and reorder columns.
    fn configurable() -> bool {
        true
    }
}

/// One formatted cell together with its column.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCell<'a> {
    /// The column the cell belongs to.
    pub column: &'a ColumnDescriptor,
    /// The formatted content.
    pub cell: RenderedCell,
}

/// Direction for keyboard column moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// State of one table view.
#[derive(Debug, Clone)]
pub struct DataTable<R: TableRecord> {
    rows: Vec<R>,
    /// Indices into `rows` that pass the search filter.
    filtered: Vec<usize>,
    columns: Vec<ColumnDescriptor>,
    reorder: ReorderController,
    pager: Pager,
    selection: Selection,
    search: SearchFilter,
    text_budget: usize,
    /// Focused row within the current page.
    cursor: usize,
    /// Focused column among visible columns.
    column_cursor: usize,
    loaded: bool,
}

impl<R: TableRecord> Default for DataTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TableRecord> DataTable<R> {
    /// Create an empty table with the record type's default columns.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            filtered: Vec::new(),
            columns: R::default_columns(),
            reorder: ReorderController::new(),
            pager: Pager::new(),
            selection: Selection::new(),
            search: SearchFilter::new(),
            text_budget: DEFAULT_TEXT_BUDGET,
            cursor: 0,
            column_cursor: 0,
            loaded: false,
        }
    }

    /// Set the free-text character budget.
    pub fn with_text_budget(mut self, budget: usize) -> Self {
        self.text_budget = budget;
        self
    }

    // ------------------------------------------------------------------
    // Rows
    // ------------------------------------------------------------------

    /// Replace the loaded rows.
    ///
    /// Selection is cleared and the pager returns to page 1.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        debug!(table = R::TABLE, count = rows.len(), "Loaded rows");
        self.rows = rows;
        self.selection.clear();
        self.pager.reset();
        self.cursor = 0;
        self.loaded = true;
        self.refilter();
    }

    /// Swap in an updated copy of a loaded row, matched by id.
    ///
    /// Selection is kept. Page and cursor are kept unless the update moves
    /// the row in or out of the search results, which returns to page 1.
    /// Returns `false` for unknown ids.
    pub fn replace_row(&mut self, row: R) -> bool {
        let Some(slot) = self.rows.iter_mut().find(|r| r.id() == row.id()) else {
            return false;
        };
        *slot = row;

        let before = std::mem::take(&mut self.filtered);
        self.refilter();
        if self.filtered != before {
            trace!(table = R::TABLE, "Filtered rows changed, back to page 1");
            self.pager.reset();
            self.cursor = 0;
        }
        true
    }

    /// Whether rows have been loaded at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All loaded rows.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of loaded rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows passing the search filter, in load order.
    pub fn filtered_rows(&self) -> Vec<&R> {
        self.filtered.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Number of rows passing the search filter.
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&R> {
        self.pager
            .slice(&self.filtered)
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    fn refilter(&mut self) {
        self.filtered = self.search.apply(&self.rows);
        self.pager.clamp(self.filtered.len());
        self.clamp_cursor();
    }

    // ------------------------------------------------------------------
    // Columns
    // ------------------------------------------------------------------

    /// The full column list in display order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// The visible columns in display order.
    pub fn visible_columns(&self) -> Vec<&ColumnDescriptor> {
        column::visible_columns(&self.columns).collect()
    }

    /// Merge an owner-supplied layout onto the defaults.
    pub fn apply_layout(&mut self, layout: &[ColumnDescriptor]) {
        self.columns = merge_columns(&R::default_columns(), layout);
        self.reorder.cancel();
        self.clamp_column_cursor();
    }

    /// Flip a column's visibility, returning the new layout to persist.
    pub fn toggle_visibility(&mut self, key: &str) -> Option<Vec<ColumnDescriptor>> {
        if !R::configurable() {
            return None;
        }
        let layout = column::toggle_visibility(&mut self.columns, key)?;
        trace!(table = R::TABLE, key, "Toggled column visibility");
        self.clamp_column_cursor();
        Some(layout)
    }

    /// Start dragging the visible column at `visible_index`.
    pub fn drag_start(&mut self, visible_index: usize) {
        if R::configurable() {
            self.reorder.drag_start(&self.columns, visible_index);
        }
    }

    /// Hover the drag over the column at `full_index`.
    pub fn drag_over(&mut self, full_index: usize) {
        self.reorder.drag_over(full_index);
    }

    /// Drop the dragged column, returning the new layout to persist.
    pub fn drag_end(&mut self) -> Option<Vec<ColumnDescriptor>> {
        let layout = self.reorder.drag_end(&mut self.columns)?;
        trace!(table = R::TABLE, "Reordered columns");
        Some(layout)
    }

    /// Drag state, for highlighting.
    pub fn reorder(&self) -> &ReorderController {
        &self.reorder
    }

    /// Move the focused column one place among visible columns.
    ///
    /// Runs the full drag protocol against the neighbouring visible column.
    pub fn move_focused_column(&mut self, direction: Direction) -> Option<Vec<ColumnDescriptor>> {
        let visible = self.visible_columns().len();
        let target_visible = match direction {
            Direction::Left => self.column_cursor.checked_sub(1)?,
            Direction::Right if self.column_cursor + 1 < visible => self.column_cursor + 1,
            Direction::Right => return None,
        };
        let target_full = column::full_index_of_visible(&self.columns, target_visible)?;

        self.drag_start(self.column_cursor);
        self.drag_over(target_full);
        let layout = self.drag_end()?;
        self.column_cursor = target_visible;
        Some(layout)
    }

    /// Focused column among visible columns.
    pub fn column_cursor(&self) -> usize {
        self.column_cursor
    }

    /// Focus the previous visible column.
    pub fn column_left(&mut self) {
        self.column_cursor = self.column_cursor.saturating_sub(1);
    }

    /// Focus the next visible column.
    pub fn column_right(&mut self) {
        let visible = self.visible_columns().len();
        if self.column_cursor + 1 < visible {
            self.column_cursor += 1;
        }
    }

    fn clamp_column_cursor(&mut self) {
        let visible = self.visible_columns().len();
        self.column_cursor = self.column_cursor.min(visible.saturating_sub(1));
    }

    // ------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------

    /// Pager state.
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Current 1-based page.
    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    /// Number of pages for the filtered rows.
    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.filtered.len())
    }

    /// React to a viewport resize.
    pub fn set_viewport_width(&mut self, width_px: u32) {
        if self.pager.set_viewport_width(width_px) {
            debug!(
                table = R::TABLE,
                per_page = self.pager.items_per_page(),
                "Page size changed"
            );
            self.cursor = 0;
        }
    }

    /// Go to the next page.
    pub fn next_page(&mut self) -> bool {
        let moved = self.pager.next_page(self.filtered.len());
        if moved {
            self.cursor = 0;
        }
        moved
    }

    /// Go to the previous page.
    pub fn prev_page(&mut self) -> bool {
        let moved = self.pager.prev_page();
        if moved {
            self.cursor = 0;
        }
        moved
    }

    /// Jump to a page.
    pub fn go_to_page(&mut self, page: usize) {
        self.pager.go_to(page, self.filtered.len());
        self.cursor = 0;
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// The search filter.
    pub fn search(&self) -> &SearchFilter {
        &self.search
    }

    /// Replace the search query. A changed query returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        if self.search.set_query(query) {
            self.pager.reset();
            self.cursor = 0;
            self.refilter();
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// The selection set.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Check or uncheck a row by id. Unknown ids are ignored.
    pub fn toggle_row(&mut self, id: &str) {
        if self.rows.iter().any(|r| r.id() == id) {
            self.selection.toggle_row(id);
        }
    }

    /// Check every loaded row (on every page), or clear.
    pub fn toggle_all(&mut self, checked: bool) {
        self.selection
            .toggle_all(checked, self.rows.iter().map(|r| r.id()));
    }

    /// Whether every loaded row is checked.
    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(self.rows.len())
    }

    /// Checked rows in load order.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.rows
            .iter()
            .filter(|r| self.selection.contains(r.id()))
            .collect()
    }

    /// Check or uncheck the focused row.
    pub fn toggle_focused_row(&mut self) {
        if let Some(id) = self.focused_row().map(|r| r.id().to_string()) {
            self.selection.toggle_row(&id);
        }
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    /// Focused row index within the page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The focused row.
    pub fn focused_row(&self) -> Option<&R> {
        self.page_rows().get(self.cursor).copied()
    }

    /// Focus a row of the current page. Out-of-range indices are ignored.
    pub fn focus_row(&mut self, index: usize) -> bool {
        if index < self.page_rows().len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// Move focus down, wrapping onto the next page.
    pub fn move_down(&mut self) {
        let on_page = self.page_rows().len();
        if self.cursor + 1 < on_page {
            self.cursor += 1;
        } else if self.next_page() {
            self.cursor = 0;
        }
    }

    /// Move focus up, wrapping onto the previous page.
    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if self.prev_page() {
            self.cursor = self.page_rows().len().saturating_sub(1);
        }
    }

    fn clamp_cursor(&mut self) {
        let on_page = self.page_rows().len();
        self.cursor = self.cursor.min(on_page.saturating_sub(1));
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Format a row's cells for the visible columns.
    ///
    /// Keys the record does not recognise yield an empty cell.
    pub fn render_row<'a>(&'a self, row: &R) -> Vec<DisplayCell<'a>> {
        column::visible_columns(&self.columns)
            .map(|column| DisplayCell {
                column,
                cell: row
                    .cell(&column.key)
                    .map(|value| format::render_cell(&value, self.text_budget))
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Full text of the focused row's truncated cells, as `label: text` pairs.
    pub fn focused_full_text(&self) -> Vec<(String, String)> {
        let Some(row) = self.focused_row() else {
            return Vec::new();
        };
        self.render_row(row)
            .into_iter()
            .filter_map(|dc| dc.cell.full_text.map(|full| (dc.column.label.clone(), full)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{properties, property};
    use crate::domain::{Inquiry, Property};

    fn table(n: usize) -> DataTable<Property> {
        let mut table = DataTable::new();
        table.set_rows(properties(n));
        table
    }

    #[test]
    fn test_new_uses_default_columns() {
        let table: DataTable<Property> = DataTable::new();
        assert_eq!(table.columns(), Property::default_columns().as_slice());
        assert!(!table.is_loaded());
    }

    #[test]
    fn test_page_rows_follow_pager() {
        let mut table = table(25);
        assert_eq!(table.total_pages(), 3);
        assert_eq!(table.page_rows().len(), 10);
        table.go_to_page(3);
        let ids: Vec<&str> = table.page_rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["p-21", "p-22", "p-23", "p-24", "p-25"]);
    }

    #[test]
    fn test_select_all_crosses_pages() {
        let mut table = table(25);
        table.toggle_all(true);
        assert_eq!(table.selection().len(), 25);
        assert!(table.all_selected());

        table.toggle_row("p-3");
        assert_eq!(table.selection().len(), 24);
        assert!(!table.all_selected());
    }

    #[test]
    fn test_reload_clears_selection_and_page() {
        let mut table = table(25);
        table.toggle_all(true);
        table.go_to_page(2);
        table.set_rows(properties(5));
        assert!(table.selection().is_empty());
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn test_replace_row_keeps_page_and_selection() {
        let mut table = table(25);
        table.toggle_row("p-12");
        table.go_to_page(2);
        let mut updated = table.rows()[11].clone();
        updated.price = 1;
        assert!(table.replace_row(updated));
        assert_eq!(table.current_page(), 2);
        assert!(table.selection().contains("p-12"));
        assert_eq!(table.rows()[11].price, 1);
        assert!(!table.replace_row(property("p-99", "Missing")));
    }

    #[test]
    fn test_replace_row_leaving_search_resets_page() {
        let mut table = table(25);
        table.set_query("property");
        table.go_to_page(2);
        let mut updated = table.rows()[11].clone();
        updated.title = "Renamed".to_string();
        assert!(table.replace_row(updated));
        assert_eq!(table.filtered_count(), 24);
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.cursor(), 0);
    }

    #[test]
    fn test_toggle_unknown_row_is_ignored() {
        let mut table = table(3);
        table.toggle_row("nope");
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_query_resets_page_and_filters() {
        let mut rows = properties(25);
        rows[22].title = "Lakeside Villa".to_string();
        let mut table = DataTable::new();
        table.set_rows(rows);
        table.go_to_page(3);

        table.set_query("lakeside");
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.filtered_count(), 1);
        assert_eq!(table.page_rows()[0].id(), "p-23");
        assert_eq!(table.total_pages(), 1);
    }

    #[test]
    fn test_resize_resets_page() {
        let mut table = table(60);
        table.go_to_page(4);
        table.set_viewport_width(1600);
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.page_rows().len(), 20);
    }

    #[test]
    fn test_render_row_skips_hidden_columns() {
        let mut table = table(1);
        let first_key = table.columns()[0].key.clone();
        let before = table.render_row(&table.rows()[0]).len();
        table.toggle_visibility(&first_key).unwrap();
        let after = table.render_row(&table.rows()[0]).len();
        assert_eq!(after, before - 1);
    }

    #[test]
    fn test_unknown_layout_key_renders_empty_cell() {
        let mut table = table(1);
        table.apply_layout(&[ColumnDescriptor::new("legacy", "Legacy")]);
        let cells = table.render_row(&table.rows()[0]);
        assert_eq!(cells[0].column.key, "legacy");
        assert_eq!(cells[0].cell, RenderedCell::default());
    }

    #[test]
    fn test_move_focused_column_right_and_back() {
        let mut table = table(1);
        let original = table.columns().to_vec();
        table.column_right();
        let moved = table.move_focused_column(Direction::Right).unwrap();
        assert_eq!(moved[2].key, original[1].key);
        assert_eq!(table.column_cursor(), 2);

        table.move_focused_column(Direction::Left).unwrap();
        assert_eq!(table.columns(), original.as_slice());
    }

    #[test]
    fn test_move_focused_column_at_edge_is_noop() {
        let mut table = table(1);
        assert!(table.move_focused_column(Direction::Left).is_none());
    }

    #[test]
    fn test_cursor_wraps_across_pages() {
        let mut table = table(12);
        for _ in 0..10 {
            table.move_down();
        }
        assert_eq!(table.current_page(), 2);
        assert_eq!(table.cursor(), 0);
        table.move_up();
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.cursor(), 9);
    }

    #[test]
    fn test_toggle_focused_row() {
        let mut table = table(3);
        table.move_down();
        table.toggle_focused_row();
        assert!(table.selection().contains("p-2"));
    }

    #[test]
    fn test_selected_rows_keep_load_order() {
        let mut table = table(5);
        table.toggle_row("p-4");
        table.toggle_row("p-2");
        let ids: Vec<&str> = table.selected_rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["p-2", "p-4"]);
    }

    #[test]
    fn test_focused_full_text_lists_truncated_cells() {
        let mut row = property("p-1", &"Very long title ".repeat(5));
        row.address = "1 Short St".to_string();
        let mut table = DataTable::new().with_text_budget(10);
        table.set_rows(vec![row]);
        let full = table.focused_full_text();
        assert!(full.iter().any(|(label, text)| label == "Title" && text.starts_with("Very long")));
    }

    #[test]
    fn test_inquiry_columns_are_fixed() {
        let mut table: DataTable<Inquiry> = DataTable::new();
        let key = table.columns()[0].key.clone();
        assert!(table.toggle_visibility(&key).is_none());
        table.drag_start(0);
        assert!(!table.reorder().is_dragging());
    }
}
