//! Application error type.
//!
//! [`AppError`] gathers the module errors and knows how to phrase them for the
//! status bar and error dialog.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Row or layout storage errors.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// IO errors (exports, terminal, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// A message for the UI, without technical detail.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Store(e) => match e {
                StoreError::Io { path, .. } => {
                    format!("Could not access {}. Check file permissions.", path.display())
                }
                StoreError::Json { context, .. } => {
                    format!("Stored data in {} is damaged.", context)
                }
                StoreError::ReadOnly(what) => format!("{} cannot be changed.", what),
                StoreError::NotFound(id) => format!("'{}' was not found.", id),
                StoreError::NoDirectory(kind) => {
                    format!("Could not find the {} directory.", kind)
                }
                StoreError::Poisoned(what) => {
                    format!("The {} is unavailable. Please restart.", what)
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Whether the error needs an acknowledged dialog rather than a toast.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::Store(StoreError::Json { .. })
                | AppError::Store(StoreError::NoDirectory(_))
                | AppError::Terminal(_)
        )
    }

    /// Whether the user can retry or carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::Store(StoreError::Io { .. })
                | AppError::Store(StoreError::NotFound(_))
        )
    }

    /// A next step for the user, when there is an obvious one.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or delete config.toml and restart.")
            }
            AppError::Store(StoreError::Json { .. }) => {
                Some("Run 'realtydesk reset <table>' to restore the demo data.")
            }
            AppError::Store(StoreError::NotFound(_)) => Some("Press 'r' to reload the table."),
            AppError::Io(_) | AppError::Store(StoreError::Io { .. }) => {
                Some("Check the directory exists and is writable.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn json_error() -> StoreError {
        let source = serde_json::from_str::<Vec<u8>>("[").unwrap_err();
        StoreError::json("properties.json", source)
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_store_error() {
        let app_err: AppError = StoreError::NotFound("p-1".to_string()).into();
        assert!(matches!(app_err, AppError::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Store(StoreError::NotFound("p-123".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("p-123"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_io_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::Store(StoreError::io(Path::new("/data/realtors.json"), source));
        assert!(err.user_message().contains("/data/realtors.json"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError("bad budget".to_string()));
        assert!(err.user_message().contains("bad budget"));
    }

    #[test]
    fn test_is_critical() {
        assert!(AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(AppError::Store(json_error()).is_critical());
        assert!(!AppError::Store(StoreError::NotFound("x".to_string())).is_critical());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(AppError::Store(StoreError::NotFound("x".to_string())).is_recoverable());
        assert!(!AppError::Store(json_error()).is_recoverable());
    }

    #[test]
    fn test_suggested_action_for_damaged_data() {
        let action = AppError::Store(json_error()).suggested_action().unwrap();
        assert!(action.contains("reset"));
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert_eq!(err.user_message(), "something went wrong");
    }
}
