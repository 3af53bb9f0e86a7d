//! Row persistence.
//!
//! Screens never touch files directly. They go through the [`Repository`]
//! interface, so the JSON fixtures, the local data directory and test
//! doubles are interchangeable:
//! - [`FixtureRepository`] serves the bundled demo data (read-only)
//! - [`JsonFileRepository`] reads and writes one JSON file
//! - [`LocalStore`] layers a JSON file over the fixtures, so the demo data is
//!   used until the first save and `clear` reverts to it
//! - [`MemoryRepository`] keeps rows in memory

mod file;
mod fixtures;
mod layout;
mod memory;
mod source;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{Inquiry, MailTemplate, Property, Realtor};

pub use file::{JsonFileRepository, LocalStore};
pub use fixtures::{Fixture, FixtureRepository};
pub use layout::LayoutStore;
pub use memory::MemoryRepository;
pub use source::get_rows;

/// Errors from a repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system failure.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored data could not be parsed or written as JSON.
    #[error("Invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The repository does not accept writes.
    #[error("{0} is read-only")]
    ReadOnly(String),

    /// No record with the given id.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A platform directory could not be determined.
    #[error("Could not determine the {0} directory")]
    NoDirectory(&'static str),

    /// An in-memory store's lock was poisoned by a panicking writer.
    #[error("{0} is unavailable after a failed write")]
    Poisoned(&'static str),
}

impl StoreError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wrap a JSON error with a description of what was being processed.
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::Json {
            context: context.into(),
            source,
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Load/save/clear access to one table's rows.
pub trait Repository<T>: Send + Sync {
    /// Read every row.
    fn load(&self) -> Result<Vec<T>>;

    /// Replace every row.
    fn save(&self, rows: &[T]) -> Result<()>;

    /// Drop stored rows.
    fn clear(&self) -> Result<()>;
}

/// One repository per table plus the column layouts.
#[derive(Clone)]
pub struct Stores {
    pub properties: Arc<dyn Repository<Property>>,
    pub realtors: Arc<dyn Repository<Realtor>>,
    pub inquiries: Arc<dyn Repository<Inquiry>>,
    pub mail_templates: Arc<dyn Repository<MailTemplate>>,
    pub layouts: LayoutStore,
}

impl Stores {
    /// Local JSON files under `data_dir`, seeded from the fixtures.
    pub fn local(data_dir: &Path) -> Self {
        Self {
            properties: Arc::new(LocalStore::<Property>::new(data_dir)),
            realtors: Arc::new(LocalStore::<Realtor>::new(data_dir)),
            inquiries: Arc::new(LocalStore::<Inquiry>::new(data_dir)),
            mail_templates: Arc::new(LocalStore::<MailTemplate>::new(data_dir)),
            layouts: LayoutStore::new(data_dir),
        }
    }
}

/// Default directory for local data (`<data_local_dir>/realtydesk/data`).
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().ok_or(StoreError::NoDirectory("local data"))?;
    Ok(base.join("realtydesk").join("data"))
}

/// Default directory for CSV exports.
///
/// The user's download directory when there is one, otherwise `exports`
/// inside the data directory.
pub fn default_export_dir(data_dir: &Path) -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| data_dir.join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir_structure() {
        if let Ok(dir) = default_data_dir() {
            assert!(dir.ends_with("realtydesk/data"));
        }
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::ReadOnly("fixtures/properties".to_string());
        assert_eq!(err.to_string(), "fixtures/properties is read-only");

        let err = StoreError::NotFound("p-9".to_string());
        assert_eq!(err.to_string(), "Record not found: p-9");
    }

    #[test]
    fn test_local_stores_share_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::local(dir.path());
        assert!(!stores.properties.load().unwrap().is_empty());
        assert!(!stores.mail_templates.load().unwrap().is_empty());

        let mut realtors = stores.realtors.load().unwrap();
        realtors.truncate(1);
        stores.realtors.save(&realtors).unwrap();

        let reopened = Stores::local(dir.path());
        assert_eq!(reopened.realtors.load().unwrap().len(), 1);
        assert!(stores.layouts.load("properties").is_none());
    }
}
