//! Single-line text input.
//!
//! Used by the search bar and the import path prompt. The cursor counts
//! characters, not bytes, so non-ASCII input edits correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// What a key press did to a [`TextInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The value changed.
    Changed,
    /// Only the cursor moved, or the key was ignored.
    Unchanged,
    /// Enter was pressed.
    Submit,
    /// Escape was pressed.
    Cancel,
}

/// A text input buffer with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Apply a key press.
    pub fn handle_input(&mut self, key: KeyEvent) -> InputOutcome {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => InputOutcome::Submit,
            (KeyCode::Esc, _) => InputOutcome::Cancel,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return InputOutcome::Unchanged;
                }
                self.clear();
                InputOutcome::Changed
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                InputOutcome::Changed
            }
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                InputOutcome::Changed
            }
            (KeyCode::Delete, _) if self.cursor < self.len() => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                InputOutcome::Changed
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                InputOutcome::Unchanged
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len());
                InputOutcome::Unchanged
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                InputOutcome::Unchanged
            }
            (KeyCode::End, _) => {
                self.cursor = self.len();
                InputOutcome::Unchanged
            }
            _ => InputOutcome::Unchanged,
        }
    }

    /// Draw `prompt` followed by the value, placing the terminal cursor.
    pub fn render(&self, frame: &mut Frame, area: Rect, prompt: &str, focused: bool) {
        let t = theme();
        let style = if focused {
            Style::default().fg(t.warning)
        } else {
            Style::default().fg(t.muted)
        };
        let line = Line::from(vec![
            Span::styled(prompt.to_string(), style),
            Span::styled(self.value.clone(), Style::default().fg(t.fg)),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        if focused {
            let x = area.x + (prompt.chars().count() + self.cursor) as u16;
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        }
    }
}
