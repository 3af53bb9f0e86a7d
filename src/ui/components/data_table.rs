//! Table widget for a [`DataTable`].
//!
//! Draws the checkbox column, the visible columns in display order, the
//! current page of rows and a pager line. Column positions are returned as a
//! [`TableGeometry`] so mouse clicks and drags can be mapped back to columns
//! and rows.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
    Frame,
};

use super::search_bar::highlight_text;
use crate::table::{Align, DataTable, TableRecord};
use crate::ui::theme::theme;

const CHECKBOX_WIDTH: u16 = 3;
const COLUMN_SPACING: u16 = 1;
const HIGHLIGHT_SYMBOL: &str = "▌ ";
const MIN_COLUMN_WIDTH: u16 = 3;
const MAX_COLUMN_WIDTH: u16 = 48;

/// Screen positions from the last draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableGeometry {
    /// Row of the header line.
    pub header_y: u16,
    /// Row of the first body line.
    pub body_y: u16,
    /// Number of body lines on screen.
    pub body_height: u16,
    /// `[start, end)` of the checkbox column.
    pub checkbox: (u16, u16),
    /// `[start, end)` of each visible column.
    pub columns: Vec<(u16, u16)>,
    /// First page row drawn (the table scrolls when the page is taller than the screen).
    pub offset: usize,
}

/// What lies under a mouse position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    HeaderCheckbox,
    Header(usize),
    RowCheckbox(usize),
    Row(usize),
}

impl TableGeometry {
    fn column_at(&self, x: u16) -> Option<usize> {
        self.columns.iter().position(|&(start, end)| x >= start && x < end)
    }

    fn in_checkbox(&self, x: u16) -> bool {
        x >= self.checkbox.0 && x < self.checkbox.1
    }

    /// The visible column index under `x`, on any line.
    pub fn visible_column_at(&self, x: u16) -> Option<usize> {
        self.column_at(x)
    }

    /// Map a screen position to a header cell or a page row.
    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        if y == self.header_y {
            if self.in_checkbox(x) {
                return Some(Hit::HeaderCheckbox);
            }
            return self.column_at(x).map(Hit::Header);
        }
        if y >= self.body_y && y < self.body_y + self.body_height {
            let row = self.offset + usize::from(y - self.body_y);
            if self.in_checkbox(x) {
                return Some(Hit::RowCheckbox(row));
            }
            return Some(Hit::Row(row));
        }
        None
    }
}

fn column_widths<R: TableRecord>(table: &DataTable<R>, page: &[&R]) -> Vec<u16> {
    let rendered: Vec<_> = page.iter().map(|row| table.render_row(row)).collect();
    table
        .visible_columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let content = rendered
                .iter()
                .filter_map(|cells| cells.get(i))
                .map(|dc| dc.cell.text.chars().count())
                .max()
                .unwrap_or(0);
            let label = column.label.chars().count() + 1;
            (content.max(label) as u16).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn aligned(line: Line<'static>, align: Align) -> Line<'static> {
    match align {
        Align::Left => line,
        Align::Center => line.centered(),
    }
}

/// Draw `table` into `area` and return where things ended up.
pub fn render_data_table<R: TableRecord>(
    frame: &mut Frame,
    area: Rect,
    table: &DataTable<R>,
    title: &str,
) -> TableGeometry {
    let t = theme();
    let [table_area, pager_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let block = Block::default()
        .title(format!(
            " {} ({}/{}) ",
            title,
            table.filtered_count(),
            table.row_count()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));
    let inner = block.inner(table_area);

    if !table.is_loaded() {
        frame.render_widget(
            Paragraph::new(Span::styled("Loading…", Style::default().fg(t.muted))).block(block),
            table_area,
        );
        return TableGeometry::default();
    }

    let page = table.page_rows();
    let widths = column_widths(table, &page);
    let query = table.search().query();

    // Header
    let selected = table.selection().len();
    let header_mark = if table.all_selected() {
        "[x]"
    } else if selected > 0 {
        "[-]"
    } else {
        "[ ]"
    };
    let drag = table.reorder().drag_index();
    let hover = table.reorder().hover_index();
    let mut header_cells = vec![Cell::from(header_mark).style(Style::default().fg(t.accent))];
    let mut full_index = 0;
    for (visible_index, column) in table.visible_columns().into_iter().enumerate() {
        while table.columns()[full_index].key != column.key {
            full_index += 1;
        }
        let mut style = Style::default().fg(t.header).add_modifier(Modifier::BOLD);
        if visible_index == table.column_cursor() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if drag == Some(full_index) {
            style = style.bg(t.drag_bg);
        } else if hover == Some(full_index) {
            style = style.bg(t.selection_bg).add_modifier(Modifier::REVERSED);
        }
        header_cells.push(Cell::from(aligned(
            Line::from(column.label.clone()),
            column.align,
        ))
        .style(style));
        full_index += 1;
    }
    let header = Row::new(header_cells);

    // Body
    let rows: Vec<Row> = page
        .iter()
        .map(|row| {
            let checked = table.selection().contains(row.id());
            let mut cells = vec![Cell::from(checkbox(checked)).style(Style::default().fg(t.accent))];
            for dc in table.render_row(row) {
                let mut style = t.tone(dc.cell.tone);
                if dc.cell.is_truncated() {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                let line = highlight_text(&dc.cell.text, query, style);
                cells.push(Cell::from(aligned(line, dc.column.align)));
            }
            let row_style = if checked {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(cells).style(row_style)
        })
        .collect();

    let mut constraints = vec![Constraint::Length(CHECKBOX_WIDTH)];
    constraints.extend(widths.iter().map(|&w| Constraint::Length(w)));

    let widget = Table::new(rows, constraints)
        .header(header)
        .block(block)
        .flex(Flex::Start)
        .column_spacing(COLUMN_SPACING)
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_style(Style::default().bg(t.selection_bg));

    let mut state = TableState::default();
    if !page.is_empty() {
        state.select(Some(table.cursor()));
    }
    frame.render_stateful_widget(widget, table_area, &mut state);

    if page.is_empty() {
        let message = if query.is_empty() {
            "No rows".to_string()
        } else {
            format!("No rows match '{}'", query)
        };
        let empty_area = Rect::new(inner.x + 2, inner.y + 1, inner.width.saturating_sub(2), 1);
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(t.muted))),
            empty_area,
        );
    }

    render_pager_line(frame, pager_area, table);

    // Geometry
    let mut x = inner.x + HIGHLIGHT_SYMBOL.chars().count() as u16;
    let checkbox_span = (x, x + CHECKBOX_WIDTH);
    x += CHECKBOX_WIDTH + COLUMN_SPACING;
    let mut columns = Vec::with_capacity(widths.len());
    for width in widths {
        columns.push((x, x.saturating_add(width)));
        x = x.saturating_add(width + COLUMN_SPACING);
    }

    TableGeometry {
        header_y: inner.y,
        body_y: inner.y + 1,
        body_height: inner.height.saturating_sub(1),
        checkbox: checkbox_span,
        columns,
        offset: state.offset(),
    }
}

fn render_pager_line<R: TableRecord>(frame: &mut Frame, area: Rect, table: &DataTable<R>) {
    let t = theme();
    let current = table.current_page();
    let total = table.total_pages();

    let mut spans = vec![Span::styled(
        format!("Page {} of {}  ", current, total),
        Style::default().fg(t.fg),
    )];
    for page in table.pager().page_numbers(table.filtered_count()) {
        let style = if page == current {
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(t.muted)
        };
        spans.push(Span::styled(format!(" {} ", page), style));
    }
    spans.push(Span::styled(
        format!(
            "  · {} per page · {} selected",
            table.pager().items_per_page(),
            table.selection().len()
        ),
        Style::default().fg(t.muted),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::properties;
    use crate::domain::Property;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(table: &DataTable<Property>) -> (TableGeometry, String) {
        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        let mut geometry = TableGeometry::default();
        terminal
            .draw(|frame| {
                geometry = render_data_table(frame, frame.area(), table, "Properties");
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        (geometry, text)
    }

    #[test]
    fn test_loading_state() {
        let table: DataTable<Property> = DataTable::new();
        let (geometry, text) = draw(&table);
        assert!(text.contains("Loading"));
        assert!(geometry.columns.is_empty());
    }

    #[test]
    fn test_renders_page_and_pager() {
        let mut table = DataTable::new();
        table.set_rows(properties(25));
        let (geometry, text) = draw(&table);
        assert!(text.contains("Property 1"));
        assert!(!text.contains("Property 11"));
        assert!(text.contains("Page 1 of 3"));
        assert_eq!(geometry.columns.len(), table.visible_columns().len());
    }

    #[test]
    fn test_geometry_hits() {
        let mut table = DataTable::new();
        table.set_rows(properties(3));
        let (geometry, _) = draw(&table);

        let (start, _) = geometry.columns[1];
        assert_eq!(geometry.hit(start, geometry.header_y), Some(Hit::Header(1)));
        assert_eq!(
            geometry.hit(geometry.checkbox.0, geometry.header_y),
            Some(Hit::HeaderCheckbox)
        );
        assert_eq!(
            geometry.hit(geometry.checkbox.0, geometry.body_y + 2),
            Some(Hit::RowCheckbox(2))
        );
        assert_eq!(geometry.hit(start, geometry.body_y), Some(Hit::Row(0)));
        assert_eq!(geometry.hit(start, 0), None);
    }

    #[test]
    fn test_empty_search_message() {
        let mut table = DataTable::new();
        table.set_rows(properties(3));
        table.set_query("zzz");
        let (_, text) = draw(&table);
        assert!(text.contains("No rows match 'zzz'"));
    }
}
