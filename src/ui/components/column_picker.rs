//! Column visibility picker.
//!
//! A checkbox list over every column of a table, in display order. The picker
//! holds only its cursor; the columns themselves stay in the table.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use super::modal::centered_rect;
use crate::table::ColumnDescriptor;
use crate::ui::theme::theme;

/// Outcome of a key press in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPickerAction {
    /// Flip visibility of the column with this key.
    Toggle(String),
    /// Put every column back to its default.
    Reset,
    Close,
}

/// Cursor state of the picker.
#[derive(Debug, Default)]
pub struct ColumnPicker {
    cursor: usize,
    list_state: ListState,
}

impl ColumnPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        columns: &[ColumnDescriptor],
    ) -> Option<ColumnPickerAction> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('c') => {
                Some(ColumnPickerAction::Close)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < columns.len() {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => columns
                .get(self.cursor)
                .map(|c| ColumnPickerAction::Toggle(c.key.clone())),
            KeyCode::Char('R') => Some(ColumnPickerAction::Reset),
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, columns: &[ColumnDescriptor]) {
        let t = theme();
        let height = (columns.len() as u16).saturating_add(4);
        let rect = centered_rect(40, height, area);
        frame.render_widget(Clear, rect);

        let items: Vec<ListItem> = columns
            .iter()
            .map(|column| {
                let (mark, style) = if column.visible {
                    ("[x] ", Style::default().fg(t.fg))
                } else {
                    ("[ ] ", Style::default().fg(t.muted))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, Style::default().fg(t.accent)),
                    Span::styled(column.label.as_str(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Columns (space: toggle, R: reset) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.accent)),
            )
            .highlight_style(
                Style::default()
                    .bg(t.selection_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        self.cursor = self.cursor.min(columns.len().saturating_sub(1));
        self.list_state.select(Some(self.cursor));
        frame.render_stateful_widget(list, rect, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("title", "Title"),
            ColumnDescriptor::new("price", "Price").hidden(),
        ]
    }

    #[test]
    fn test_toggle_focused_column() {
        let mut picker = ColumnPicker::new();
        let cols = columns();
        picker.handle_input(key(KeyCode::Char('j')), &cols);
        assert_eq!(
            picker.handle_input(key(KeyCode::Char(' ')), &cols),
            Some(ColumnPickerAction::Toggle("price".to_string()))
        );
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut picker = ColumnPicker::new();
        let cols = columns();
        for _ in 0..5 {
            picker.handle_input(key(KeyCode::Down), &cols);
        }
        assert_eq!(picker.cursor(), 1);
        for _ in 0..5 {
            picker.handle_input(key(KeyCode::Up), &cols);
        }
        assert_eq!(picker.cursor(), 0);
    }

    #[test]
    fn test_close_and_reset() {
        let mut picker = ColumnPicker::new();
        assert_eq!(
            picker.handle_input(key(KeyCode::Esc), &columns()),
            Some(ColumnPickerAction::Close)
        );
        assert_eq!(
            picker.handle_input(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT), &columns()),
            Some(ColumnPickerAction::Reset)
        );
    }
}
