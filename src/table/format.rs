//! Cell formatting.
//!
//! Records hand the renderer a [`CellValue`] per column key and the
//! formatters here turn it into display text. Formatting never fails: input
//! that cannot be parsed is shown unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Default character budget for free-text cells.
pub const DEFAULT_TEXT_BUDGET: usize = 30;

/// Ellipsis appended to truncated text.
pub const ELLIPSIS: &str = "…";

/// Output format for dates.
const DATE_FORMAT: &str = "%Y/%m/%d";

/// Semantic colour of a cell, mapped to a concrete colour by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    /// Plain text.
    #[default]
    Normal,
    /// Positive state (active, published).
    Success,
    /// Pending or in-flight state.
    Warning,
    /// Terminal or negative state.
    Danger,
    /// De-emphasised text.
    Muted,
    /// Counter badges.
    Badge,
}

/// Raw value of one cell before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free text, truncated to the text budget.
    Text(String),
    /// Short text that is never truncated (ids, phone numbers).
    Plain(String),
    /// A date or timestamp string.
    Date(String),
    /// A status label with its tone.
    Status { label: String, tone: Tone },
    /// A counter shown as a badge.
    Count(u64),
    /// A whole-dollar amount.
    Money(u64),
    /// A decimal number.
    Number(f64),
}

/// A formatted cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedCell {
    /// Text to display.
    pub text: String,
    /// Full text when `text` was truncated.
    pub full_text: Option<String>,
    /// Colour hint.
    pub tone: Tone,
}

impl RenderedCell {
    fn plain(text: String) -> Self {
        Self {
            text,
            full_text: None,
            tone: Tone::Normal,
        }
    }

    /// Whether the display text is shortened.
    pub fn is_truncated(&self) -> bool {
        self.full_text.is_some()
    }
}

/// Format a date string as `YYYY/MM/DD`, returning the input unchanged if it
/// is not a recognised date.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.date_naive().format(DATE_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return dt.date().format(DATE_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return dt.date().format(DATE_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format(DATE_FORMAT).to_string();
    }
    raw.to_string()
}

/// Shorten `text` to `budget` characters plus an ellipsis.
///
/// Returns the display text and, when shortened, the full text.
pub fn truncate(text: &str, budget: usize) -> (String, Option<String>) {
    if text.chars().count() <= budget {
        return (text.to_string(), None);
    }
    let mut short: String = text.chars().take(budget).collect();
    short.push_str(ELLIPSIS);
    (short, Some(text.to_string()))
}

/// Format a whole-dollar amount with thousands separators.
pub fn format_money(amount: u64) -> String {
    format!("${}", group_thousands(amount))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a decimal, dropping a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Turn a cell value into display text.
pub fn render_cell(value: &CellValue, text_budget: usize) -> RenderedCell {
    match value {
        CellValue::Text(text) => {
            let (text, full_text) = truncate(text, text_budget);
            RenderedCell {
                text,
                full_text,
                tone: Tone::Normal,
            }
        }
        CellValue::Plain(text) => RenderedCell::plain(text.clone()),
        CellValue::Date(raw) => RenderedCell::plain(format_date(raw)),
        CellValue::Status { label, tone } => RenderedCell {
            text: label.clone(),
            full_text: None,
            tone: *tone,
        },
        CellValue::Count(count) => RenderedCell {
            text: format!(" {} ", count),
            full_text: None,
            tone: Tone::Badge,
        },
        CellValue::Money(amount) => RenderedCell::plain(format_money(*amount)),
        CellValue::Number(value) => RenderedCell::plain(format_number(*value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_falls_back_to_raw() {
        assert_eq!(format_date("not-a-date"), "not-a-date");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("2024-13-45"), "2024-13-45");
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-03-05"), "2024/03/05");
        assert_eq!(format_date("2024-03-05T10:30:00"), "2024/03/05");
        assert_eq!(format_date("2024-03-05T10:30:00Z"), "2024/03/05");
        assert_eq!(format_date("2024-03-05T10:30:00+09:00"), "2024/03/05");
        assert_eq!(format_date("2024-03-05 10:30:00"), "2024/03/05");
    }

    #[test]
    fn test_truncate_within_budget() {
        assert_eq!(truncate("Short", 10), ("Short".to_string(), None));
        assert_eq!(truncate("exactly10!", 10), ("exactly10!".to_string(), None));
    }

    #[test]
    fn test_truncate_adds_ellipsis_and_keeps_full_text() {
        let (short, full) = truncate("A charming seaside cottage", 9);
        assert_eq!(short, "A charmin…");
        assert_eq!(full.as_deref(), Some("A charming seaside cottage"));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let (short, full) = truncate("日本語のテキスト", 3);
        assert_eq!(short, "日本語…");
        assert!(full.is_some());
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(999), "$999");
        assert_eq!(format_money(1000), "$1,000");
        assert_eq!(format_money(1_250_000), "$1,250,000");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[test]
    fn test_render_status_keeps_tone() {
        let cell = render_cell(
            &CellValue::Status {
                label: "Sold".to_string(),
                tone: Tone::Danger,
            },
            DEFAULT_TEXT_BUDGET,
        );
        assert_eq!(cell.text, "Sold");
        assert_eq!(cell.tone, Tone::Danger);
    }

    #[test]
    fn test_render_count_is_badge() {
        let cell = render_cell(&CellValue::Count(12), DEFAULT_TEXT_BUDGET);
        assert_eq!(cell.text.trim(), "12");
        assert_eq!(cell.tone, Tone::Badge);
    }

    #[test]
    fn test_render_bad_date_shows_raw() {
        let cell = render_cell(&CellValue::Date("someday".to_string()), DEFAULT_TEXT_BUDGET);
        assert_eq!(cell.text, "someday");
    }

    #[test]
    fn test_render_text_truncation_flag() {
        let cell = render_cell(&CellValue::Text("x".repeat(40)), 30);
        assert!(cell.is_truncated());
        assert_eq!(cell.text.chars().count(), 31);
    }
}
