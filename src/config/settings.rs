//! Application settings configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::table::DEFAULT_TEXT_BUDGET;

/// Screens the TUI can open on.
pub const SCREENS: [&str; 4] = ["properties", "realtors", "inquiries", "mail_templates"];

/// Shortest text budget that still leaves room for content before the ellipsis.
pub const MIN_TEXT_BUDGET: usize = 4;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where local rows and layouts live. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    /// Where CSV exports are written. Defaults to the downloads dir.
    pub export_dir: Option<PathBuf>,
    /// The UI theme to use.
    pub theme: String,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// Characters shown in a text cell before it is truncated.
    pub text_budget: usize,
    /// Pixels assumed per terminal column when picking page size.
    pub cell_width_px: u32,
    /// Delay before a CSV import reports back, in milliseconds.
    pub import_delay_ms: u64,
    /// Screen shown on startup.
    pub default_screen: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_dir: None,
            theme: "dark".to_string(),
            vim_mode: true,
            text_budget: DEFAULT_TEXT_BUDGET,
            cell_width_px: 8,
            import_delay_ms: 1500,
            default_screen: "properties".to_string(),
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.text_budget < MIN_TEXT_BUDGET {
            return Err(ConfigError::ValidationError(format!(
                "text_budget must be at least {}, got {}",
                MIN_TEXT_BUDGET, self.text_budget
            )));
        }

        if self.cell_width_px == 0 {
            return Err(ConfigError::ValidationError(
                "cell_width_px cannot be zero".to_string(),
            ));
        }

        if !SCREENS.contains(&self.default_screen.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown default_screen '{}', expected one of: {}",
                self.default_screen,
                SCREENS.join(", ")
            )));
        }

        Ok(())
    }

    /// Viewport width in pixels for a terminal `columns` wide. Saturates at
    /// `u32::MAX`.
    pub fn viewport_px(&self, columns: u16) -> u32 {
        u32::from(columns).saturating_mul(self.cell_width_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_small_text_budget_rejected() {
        let settings = Settings {
            text_budget: 3,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("text_budget"));
    }

    #[test]
    fn test_zero_cell_width_rejected() {
        let settings = Settings {
            cell_width_px: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_screen_rejected() {
        let settings = Settings {
            default_screen: "dashboard".to_string(),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("dashboard"));
    }

    #[test]
    fn test_viewport_px() {
        let settings = Settings::default();
        assert_eq!(settings.viewport_px(200), 1600);
        assert_eq!(settings.viewport_px(0), 0);
    }

    #[test]
    fn test_viewport_px_saturates() {
        let settings = Settings {
            cell_width_px: u32::MAX,
            ..Settings::default()
        };
        assert_eq!(settings.viewport_px(u16::MAX), u32::MAX);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str("text_budget = 12").unwrap();
        assert_eq!(settings.text_budget, 12);
        assert_eq!(settings.cell_width_px, 8);
        assert_eq!(settings.default_screen, "properties");
    }
}
