//! Help panel listing keyboard and mouse shortcuts.
//!
//! Opened with '?' and closed with '?', 'q' or Escape. Scrolls with j/k when
//! the terminal is too short.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// (section, [(keys, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Screens",
        &[
            ("Tab / S-Tab", "Next / previous table"),
            ("1-4", "Properties, realtors, inquiries, templates"),
            ("?", "Toggle this help"),
            ("q / Ctrl-c", "Quit"),
        ],
    ),
    (
        "Rows",
        &[
            ("j / k", "Move down / up (wraps across pages)"),
            ("n / p", "Next / previous page"),
            ("g / G", "First / last page"),
            ("Space", "Check the focused row"),
            ("a", "Check or clear every row"),
            ("Enter", "Show the full row"),
            ("s", "Advance the row's status"),
        ],
    ),
    (
        "Columns",
        &[
            ("h / l", "Focus previous / next column"),
            ("< / >", "Move the focused column"),
            ("c", "Show or hide columns"),
            ("drag header", "Move a column with the mouse"),
        ],
    ),
    (
        "Data",
        &[
            ("/", "Search; Esc clears"),
            ("e", "Export checked rows (or all) to CSV"),
            ("i", "Import a CSV file"),
            ("r", "Reload the table"),
        ],
    ),
];

/// Actions returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    Close,
}

/// The help panel.
#[derive(Debug, Default)]
pub struct HelpView {
    scroll: usize,
    visible_height: usize,
}

impl HelpView {
    pub fn new() -> Self {
        Self::default()
    }

    fn total_lines() -> usize {
        // Header and blank line per section, plus a trailing blank.
        SECTIONS.iter().map(|(_, keys)| keys.len() + 3).sum()
    }

    fn max_scroll(&self) -> usize {
        Self::total_lines().saturating_sub(self.visible_height)
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<HelpAction> {
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => Some(HelpAction::Close),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, log_dir: Option<&str>) {
        let t = theme();
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Help - Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.visible_height = usize::from(inner.height);

        let mut lines: Vec<Line> = Vec::new();
        for (section, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", section),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for (keys, description) in bindings.iter() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>14}", keys),
                        Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(*description, Style::default().fg(t.fg)),
                ]));
            }
            lines.push(Line::from(""));
        }
        if let Some(dir) = log_dir {
            lines.push(Line::from(Span::styled(
                format!("Logs: {}", dir),
                Style::default().fg(t.muted),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines).scroll((self.scroll as u16, 0)),
            inner,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_close_keys() {
        let mut help = HelpView::new();
        assert_eq!(help.handle_input(key(KeyCode::Esc)), Some(HelpAction::Close));
        assert_eq!(help.handle_input(key(KeyCode::Char('?'))), Some(HelpAction::Close));
        assert_eq!(help.handle_input(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut help = HelpView::new();
        help.visible_height = 5;
        for _ in 0..100 {
            help.handle_input(key(KeyCode::Char('j')));
        }
        assert_eq!(help.scroll, HelpView::total_lines() - 5);
        help.handle_input(key(KeyCode::Char('k')));
        assert_eq!(help.scroll, HelpView::total_lines() - 6);
    }
}
