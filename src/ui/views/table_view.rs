//! One table screen.
//!
//! [`TableView`] wraps a [`DataTable`] with its input modes (normal, search,
//! column picker, row details) and turns keys and mouse gestures into table
//! operations. Anything that must leave the screen, like persisting a layout
//! or exporting rows, is returned as a [`TableAction`] for the app to carry out.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tracing::trace;

use crate::table::{column, ColumnDescriptor, DataTable, Direction, TableRecord};
use crate::ui::components::{
    centered_rect, render_data_table, render_search_bar, ColumnPicker, ColumnPickerAction, Hit,
    InputOutcome, TableGeometry, TextInput,
};
use crate::ui::theme::theme;

/// Requests a table screen makes of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// The column layout changed and should be saved.
    LayoutChanged(Vec<ColumnDescriptor>),
    /// The layout went back to defaults; forget the saved one.
    ResetLayout,
    /// Export the checked rows (or every row when none are checked).
    Export,
    /// Load the rows again.
    Reload,
    /// Advance the status of the record with this id.
    CycleStatus(String),
    /// Ask for a CSV file to import.
    Import,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Search,
    Columns,
    Details,
}

/// State and input handling for one table screen.
pub struct TableView<R: TableRecord> {
    title: &'static str,
    table: DataTable<R>,
    mode: Mode,
    search: TextInput,
    picker: ColumnPicker,
    geometry: TableGeometry,
}

impl<R: TableRecord> TableView<R> {
    pub fn new(title: &'static str, text_budget: usize) -> Self {
        Self {
            title,
            table: DataTable::new().with_text_budget(text_budget),
            mode: Mode::Normal,
            search: TextInput::new(),
            picker: ColumnPicker::new(),
            geometry: TableGeometry::default(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn table(&self) -> &DataTable<R> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<R> {
        &mut self.table
    }

    /// Whether keys are going to a text field or popup rather than the table.
    pub fn is_capturing_input(&self) -> bool {
        self.mode != Mode::Normal
    }

    /// Rows an export should contain: the checked ones, or all when none are.
    pub fn export_rows(&self) -> Vec<&R> {
        let selected = self.table.selected_rows();
        if selected.is_empty() {
            self.table.rows().iter().collect()
        } else {
            selected
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TableAction> {
        match self.mode {
            Mode::Search => {
                match self.search.handle_input(key) {
                    InputOutcome::Changed => self.table.set_query(self.search.value()),
                    InputOutcome::Submit => self.mode = Mode::Normal,
                    InputOutcome::Cancel => {
                        self.search.clear();
                        self.table.set_query("");
                        self.mode = Mode::Normal;
                    }
                    InputOutcome::Unchanged => {}
                }
                None
            }
            Mode::Columns => match self.picker.handle_input(key, self.table.columns())? {
                ColumnPickerAction::Toggle(key) => {
                    self.table.toggle_visibility(&key).map(TableAction::LayoutChanged)
                }
                ColumnPickerAction::Reset => {
                    self.table.apply_layout(&[]);
                    Some(TableAction::ResetLayout)
                }
                ColumnPickerAction::Close => {
                    self.mode = Mode::Normal;
                    None
                }
            },
            Mode::Details => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.mode = Mode::Normal;
                }
                None
            }
            Mode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<TableAction> {
        let table = &mut self.table;
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => table.move_down(),
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => table.move_up(),
            (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::PageDown, _) => {
                table.next_page();
            }
            (KeyCode::Char('p'), KeyModifiers::NONE) | (KeyCode::PageUp, _) => {
                table.prev_page();
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => table.go_to_page(1),
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                let last = table.total_pages();
                table.go_to_page(last);
            }
            (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => table.column_left(),
            (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => table.column_right(),
            (KeyCode::Char('<'), _) => {
                return table
                    .move_focused_column(Direction::Left)
                    .map(TableAction::LayoutChanged)
            }
            (KeyCode::Char('>'), _) => {
                return table
                    .move_focused_column(Direction::Right)
                    .map(TableAction::LayoutChanged)
            }
            (KeyCode::Char(' '), _) => table.toggle_focused_row(),
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                let checked = !table.all_selected();
                table.toggle_all(checked);
            }
            (KeyCode::Char('/'), _) => {
                self.search = TextInput::with_value(table.search().query());
                self.mode = Mode::Search;
            }
            (KeyCode::Char('c'), KeyModifiers::NONE) if R::configurable() => {
                self.mode = Mode::Columns;
            }
            (KeyCode::Enter, _) if table.focused_row().is_some() => self.mode = Mode::Details,
            (KeyCode::Esc, _) if !table.search().is_empty() => {
                self.search.clear();
                table.set_query("");
            }
            (KeyCode::Char('e'), KeyModifiers::NONE) => return Some(TableAction::Export),
            (KeyCode::Char('r'), KeyModifiers::NONE) => return Some(TableAction::Reload),
            (KeyCode::Char('i'), KeyModifiers::NONE) => return Some(TableAction::Import),
            (KeyCode::Char('s'), KeyModifiers::NONE) => {
                return table
                    .focused_row()
                    .map(|row| TableAction::CycleStatus(row.id().to_string()))
            }
            _ => {}
        }
        None
    }

    /// Clicks toggle checkboxes and focus rows; dragging a header reorders columns.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<TableAction> {
        if self.mode != Mode::Normal {
            return None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.geometry.hit(mouse.column, mouse.row)? {
                    Hit::HeaderCheckbox => {
                        let checked = !self.table.all_selected();
                        self.table.toggle_all(checked);
                    }
                    Hit::Header(visible_index) => {
                        trace!(visible_index, "Header pressed");
                        self.table.drag_start(visible_index);
                    }
                    Hit::RowCheckbox(index) => {
                        let id = self.table.page_rows().get(index).map(|r| r.id().to_string());
                        if let Some(id) = id {
                            self.table.focus_row(index);
                            self.table.toggle_row(&id);
                        }
                    }
                    Hit::Row(index) => {
                        self.table.focus_row(index);
                    }
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) if self.table.reorder().is_dragging() => {
                let visible_index = self.geometry.visible_column_at(mouse.column)?;
                let full_index = column::full_index_of_visible(self.table.columns(), visible_index)?;
                self.table.drag_over(full_index);
                None
            }
            MouseEventKind::Up(MouseButton::Left) if self.table.reorder().is_dragging() => {
                self.table.drag_end().map(TableAction::LayoutChanged)
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [search_area, table_area, tooltip_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .areas(area);

        render_search_bar(
            frame,
            search_area,
            &self.search,
            self.mode == Mode::Search,
            self.table.filtered_count(),
            self.table.row_count(),
        );
        self.geometry = render_data_table(frame, table_area, &self.table, self.title);
        self.render_tooltip(frame, tooltip_area);

        match self.mode {
            Mode::Columns => self.picker.render(frame, area, self.table.columns()),
            Mode::Details => self.render_details(frame, area),
            Mode::Normal | Mode::Search => {}
        }
    }

    /// Full text of the focused row's truncated cells.
    fn render_tooltip(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let mut spans = Vec::new();
        for (label, full) in self.table.focused_full_text() {
            if !spans.is_empty() {
                spans.push(Span::styled(" │ ", Style::default().fg(t.border)));
            }
            spans.push(Span::styled(format!("{}: ", label), Style::default().fg(t.muted)));
            spans.push(Span::styled(full, Style::default().fg(t.fg)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_details(&self, frame: &mut Frame, area: Rect) {
        let Some(row) = self.table.focused_row() else {
            return;
        };
        let t = theme();

        let lines: Vec<Line> = self
            .table
            .render_row(row)
            .into_iter()
            .map(|dc| {
                let text = dc.cell.full_text.clone().unwrap_or(dc.cell.text);
                Line::from(vec![
                    Span::styled(
                        format!("{:>14}: ", dc.column.label),
                        Style::default().fg(t.header).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(text, t.tone(dc.cell.tone)),
                ])
            })
            .collect();

        let height = (lines.len() as u16).saturating_add(2);
        let rect = centered_rect(area.width.saturating_sub(10).min(90), height, area);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .title(format!(" {} ", row.id()))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(t.accent)),
                )
                .wrap(Wrap { trim: false }),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::properties;
    use crate::domain::{Inquiry, Property};
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view(n: usize) -> TableView<Property> {
        let mut view = TableView::new("Properties", 30);
        view.table_mut().set_rows(properties(n));
        view
    }

    fn draw(view: &mut TableView<Property>) {
        let mut terminal = Terminal::new(TestBackend::new(160, 24)).unwrap();
        terminal.draw(|frame| view.render(frame, frame.area())).unwrap();
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_search_mode_filters_and_escape_clears() {
        let mut view = view(25);
        view.handle_key(key(KeyCode::Char('/')));
        assert!(view.is_capturing_input());
        for c in "property 2".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        // "Property 2" and "Property 20".."Property 25"
        assert_eq!(view.table().filtered_count(), 7);

        view.handle_key(key(KeyCode::Enter));
        assert!(!view.is_capturing_input());
        assert_eq!(view.table().filtered_count(), 7);

        view.handle_key(key(KeyCode::Esc));
        assert_eq!(view.table().filtered_count(), 25);
    }

    #[test]
    fn test_column_picker_toggle_returns_layout() {
        let mut view = view(3);
        view.handle_key(key(KeyCode::Char('c')));
        assert!(view.is_capturing_input());
        let action = view.handle_key(key(KeyCode::Char(' ')));
        match action {
            Some(TableAction::LayoutChanged(layout)) => assert!(!layout[0].visible),
            other => panic!("unexpected action: {:?}", other),
        }
        view.handle_key(key(KeyCode::Esc));
        assert!(!view.is_capturing_input());
    }

    #[test]
    fn test_column_picker_reset() {
        let mut view = view(3);
        view.handle_key(key(KeyCode::Char('c')));
        view.handle_key(key(KeyCode::Char(' ')));
        let action = view.handle_key(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT));
        assert_eq!(action, Some(TableAction::ResetLayout));
        assert_eq!(view.table().columns(), Property::default_columns().as_slice());
    }

    #[test]
    fn test_inquiry_view_has_no_column_picker() {
        let mut view: TableView<Inquiry> = TableView::new("Inquiries", 30);
        view.handle_key(key(KeyCode::Char('c')));
        assert!(!view.is_capturing_input());
    }

    #[test]
    fn test_keyboard_column_move() {
        let mut view = view(1);
        let first = view.table().columns()[0].key.clone();
        let action = view.handle_key(key(KeyCode::Char('>')));
        match action {
            Some(TableAction::LayoutChanged(layout)) => assert_eq!(layout[1].key, first),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_select_all_and_export_rows() {
        let mut view = view(12);
        assert_eq!(view.export_rows().len(), 12);
        view.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(view.export_rows().len(), 1);
        view.handle_key(key(KeyCode::Char('a')));
        assert_eq!(view.table().selection().len(), 12);
        view.handle_key(key(KeyCode::Char('a')));
        assert!(view.table().selection().is_empty());
    }

    #[test]
    fn test_cycle_status_targets_focused_row() {
        let mut view = view(3);
        view.handle_key(key(KeyCode::Char('j')));
        assert_eq!(
            view.handle_key(key(KeyCode::Char('s'))),
            Some(TableAction::CycleStatus("p-2".to_string()))
        );
    }

    #[test]
    fn test_details_popup_opens_and_closes() {
        let mut view = view(2);
        view.handle_key(key(KeyCode::Enter));
        assert!(view.is_capturing_input());
        draw(&mut view);
        view.handle_key(key(KeyCode::Esc));
        assert!(!view.is_capturing_input());
    }

    #[test]
    fn test_mouse_drag_reorders_columns() {
        let mut view = view(3);
        draw(&mut view);
        let geometry = view.geometry.clone();
        let first = view.table().columns()[0].key.clone();
        let (start0, _) = geometry.columns[0];
        let (start2, _) = geometry.columns[2];

        view.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), start0, geometry.header_y));
        assert!(view.table().reorder().is_dragging());
        view.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), start2, geometry.header_y));
        let action = view.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), start2, geometry.header_y));

        match action {
            Some(TableAction::LayoutChanged(layout)) => assert_eq!(layout[2].key, first),
            other => panic!("unexpected action: {:?}", other),
        }
        assert!(!view.table().reorder().is_dragging());
    }

    #[test]
    fn test_mouse_checkboxes() {
        let mut view = view(5);
        draw(&mut view);
        let geometry = view.geometry.clone();

        view.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            geometry.checkbox.0,
            geometry.body_y + 1,
        ));
        assert!(view.table().selection().contains("p-2"));

        view.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            geometry.checkbox.0,
            geometry.header_y,
        ));
        assert!(view.table().all_selected());
    }
}
