//! Persisted column layouts.
//!
//! One JSON file per table under `<data_dir>/layouts/`. Only the serialisable
//! descriptor fields (key, label, align, visible) are stored.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{JsonFileRepository, Repository, Result};
use crate::table::ColumnDescriptor;

/// Column layouts for every table.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    dir: PathBuf,
}

impl LayoutStore {
    /// Layouts under `<data_dir>/layouts`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("layouts"),
        }
    }

    fn repo(&self, table: &str) -> JsonFileRepository<ColumnDescriptor> {
        JsonFileRepository::new(self.dir.join(format!("{}.json", table)))
    }

    /// The stored layout for `table`, if any.
    ///
    /// A missing, empty or unreadable layout yields `None` so the table
    /// keeps its defaults.
    pub fn load(&self, table: &str) -> Option<Vec<ColumnDescriptor>> {
        match self.repo(table).load() {
            Ok(columns) if columns.is_empty() => None,
            Ok(columns) => {
                debug!(table, count = columns.len(), "Loaded column layout");
                Some(columns)
            }
            Err(e) => {
                warn!(table, error = %e, "Ignoring unreadable column layout");
                None
            }
        }
    }

    /// Store the layout for `table`.
    pub fn save(&self, table: &str, columns: &[ColumnDescriptor]) -> Result<()> {
        self.repo(table).save(columns)
    }

    /// Forget the layout for `table`.
    pub fn clear(&self, table: &str) -> Result<()> {
        self.repo(table).clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Align;
    use tempfile::tempdir;

    #[test]
    fn test_missing_layout_is_none() {
        let dir = tempdir().unwrap();
        assert!(LayoutStore::new(dir.path()).load("properties").is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempdir().unwrap();
        let store = LayoutStore::new(dir.path());
        let layout = vec![
            ColumnDescriptor::new("price", "Price").align(Align::Center),
            ColumnDescriptor::new("title", "Title").hidden(),
        ];
        store.save("properties", &layout).unwrap();
        assert_eq!(store.load("properties"), Some(layout));
        assert!(store.load("realtors").is_none());

        store.clear("properties").unwrap();
        assert!(store.load("properties").is_none());
    }

    #[test]
    fn test_corrupt_layout_is_ignored() {
        let dir = tempdir().unwrap();
        let store = LayoutStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join("layouts")).unwrap();
        std::fs::write(dir.path().join("layouts").join("properties.json"), "nope").unwrap();
        assert!(store.load("properties").is_none());
    }
}
