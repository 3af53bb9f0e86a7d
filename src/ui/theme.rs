//! Colors and styles.
//!
//! The active theme is chosen once at startup with [`init_theme`] and read
//! everywhere through [`theme`].

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

use crate::table::Tone;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub header: Color,
    pub selection_bg: Color,
    pub drag_bg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub badge: Color,
}

impl Theme {
    /// Theme for dark terminals.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::Gray,
            header: Color::LightCyan,
            selection_bg: Color::Rgb(40, 48, 64),
            drag_bg: Color::Rgb(70, 60, 20),
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            badge: Color::Magenta,
        }
    }

    /// Theme for light terminals.
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            border: Color::DarkGray,
            header: Color::Blue,
            selection_bg: Color::Rgb(220, 228, 244),
            drag_bg: Color::Rgb(250, 236, 180),
            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(176, 120, 0),
            error: Color::Rgb(180, 0, 0),
            badge: Color::Rgb(128, 0, 128),
        }
    }

    /// Look up a theme by name. Unknown names fall back to dark.
    pub fn named(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Text style for a cell tone.
    pub fn tone(&self, tone: Tone) -> Style {
        match tone {
            Tone::Normal => Style::default().fg(self.fg),
            Tone::Muted => Style::default().fg(self.muted),
            Tone::Success => Style::default().fg(self.success),
            Tone::Warning => Style::default().fg(self.warning),
            Tone::Danger => Style::default().fg(self.error),
            Tone::Badge => Style::default().fg(self.badge).add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Set the theme for this process. Later calls are ignored.
pub fn init_theme(name: &str) {
    if THEME.set(Theme::named(name)).is_err() {
        tracing::debug!(name, "Theme already initialised");
    }
}

/// The active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_falls_back_to_dark() {
        assert_eq!(Theme::named("solarized"), Theme::dark());
        assert_eq!(Theme::named("light"), Theme::light());
    }

    #[test]
    fn test_tone_colors() {
        let t = Theme::dark();
        assert_eq!(t.tone(Tone::Success).fg, Some(Color::Green));
        assert_eq!(t.tone(Tone::Danger).fg, Some(Color::Red));
        assert!(t.tone(Tone::Badge).add_modifier.contains(Modifier::BOLD));
    }
}
