//! Search bar and match highlighting.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::input::TextInput;
use crate::ui::theme::theme;

/// Split `text` into spans, styling case-insensitive matches of `query`.
pub fn highlight_text(text: &str, query: &str, base: Style) -> Line<'static> {
    if query.is_empty() {
        return Line::from(Span::styled(text.to_string(), base));
    }

    let needle = query.to_lowercase();
    let needle_len = query.chars().count();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let highlight = base
        .bg(theme().warning)
        .fg(ratatui::style::Color::Black)
        .add_modifier(Modifier::BOLD);

    let byte_at = |i: usize| chars.get(i).map(|&(b, _)| b).unwrap_or(text.len());

    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i + needle_len <= chars.len() {
        let candidate = &text[byte_at(i)..byte_at(i + needle_len)];
        if candidate.to_lowercase() == needle {
            if plain_start < i {
                spans.push(Span::styled(
                    text[byte_at(plain_start)..byte_at(i)].to_string(),
                    base,
                ));
            }
            spans.push(Span::styled(candidate.to_string(), highlight));
            i += needle_len;
            plain_start = i;
        } else {
            i += 1;
        }
    }
    if plain_start < chars.len() {
        spans.push(Span::styled(text[byte_at(plain_start)..].to_string(), base));
    }

    Line::from(spans)
}

/// Draw the search line: the prompt while typing, a summary otherwise.
pub fn render_search_bar(
    frame: &mut Frame,
    area: Rect,
    input: &TextInput,
    active: bool,
    matched: usize,
    total: usize,
) {
    if active {
        input.render(frame, area, "/", true);
        return;
    }
    if input.value().is_empty() {
        return;
    }

    let t = theme();
    let line = Line::from(vec![
        Span::styled(format!("/{}", input.value()), Style::default().fg(t.muted)),
        Span::styled(
            format!("  [{} of {} rows]", matched, total),
            Style::default().fg(t.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_matches() {
        let line = highlight_text("Lakeside lake house", "LAKE", Style::default());
        assert_eq!(texts(&line), vec!["Lake", "side ", "lake", " house"]);
    }

    #[test]
    fn test_highlight_without_match() {
        let line = highlight_text("Cottage", "villa", Style::default());
        assert_eq!(texts(&line), vec!["Cottage"]);
    }

    #[test]
    fn test_highlight_multibyte() {
        let line = highlight_text("Café Crème", "crè", Style::default());
        assert_eq!(texts(&line), vec!["Café ", "Crè", "me"]);
    }
}
