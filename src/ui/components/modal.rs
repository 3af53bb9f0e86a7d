//! Modal dialogs.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::AppError;
use crate::ui::theme::theme;

/// A rectangle of at most `width` x `height` centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Dialog for errors the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    title: String,
    message: String,
    suggestion: Option<String>,
}

impl ErrorDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Build a dialog from an application error.
    pub fn from_error(error: &AppError) -> Self {
        Self {
            title: "Error".to_string(),
            message: error.user_message(),
            suggestion: error.suggested_action().map(str::to_string),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` when the key dismisses the dialog.
    pub fn handle_input(&self, key: KeyEvent) -> bool {
        matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char(' ')
        )
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let height = if self.suggestion.is_some() { 9 } else { 7 };
        let rect = centered_rect(60, height, area);
        frame.render_widget(Clear, rect);

        let mut lines = vec![Line::from(Span::styled(
            self.message.as_str(),
            Style::default().fg(t.fg),
        ))];
        if let Some(suggestion) = &self.suggestion {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                suggestion.as_str(),
                Style::default().fg(t.muted),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(t.muted).add_modifier(Modifier::ITALIC),
        )));

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.error));

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            rect,
        );
    }
}
