//! JSON file storage in the local data directory.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, trace};

use super::fixtures::{Fixture, FixtureRepository};
use super::{Repository, Result, StoreError};

/// Rows stored as a JSON array in a single file.
///
/// A missing file loads as an empty list.
#[derive(Debug)]
pub struct JsonFileRepository<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileRepository<T> {
    /// Create a repository backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl<T> Repository<T> for JsonFileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Vec<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "No stored rows");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        serde_json::from_str(&content)
            .map_err(|e| StoreError::json(self.path.display().to_string(), e))
    }

    fn save(&self, rows: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let content = serde_json::to_string_pretty(rows)
            .map_err(|e| StoreError::json(self.path.display().to_string(), e))?;
        fs::write(&self.path, content).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), count = rows.len(), "Saved rows");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared stored rows");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

/// Local rows layered over the bundled fixture.
///
/// Until something is saved, loads return the fixture. `clear` deletes the
/// local file, which brings the fixture back.
#[derive(Debug)]
pub struct LocalStore<T> {
    file: JsonFileRepository<T>,
    seed: FixtureRepository<T>,
}

impl<T: Fixture> LocalStore<T> {
    /// Store for `T` under `data_dir` (`<data_dir>/<table>.json`).
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonFileRepository::new(data_dir.join(format!("{}.json", T::TABLE))),
            seed: FixtureRepository::new(),
        }
    }

    /// The local file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Whether rows have been saved locally.
    pub fn has_local_data(&self) -> bool {
        self.file.exists()
    }
}

impl<T> Repository<T> for LocalStore<T>
where
    T: Fixture + Serialize,
{
    fn load(&self) -> Result<Vec<T>> {
        if self.file.exists() {
            self.file.load()
        } else {
            self.seed.load()
        }
    }

    fn save(&self, rows: &[T]) -> Result<()> {
        self.file.save(rows)
    }

    fn clear(&self) -> Result<()> {
        self.file.clear()
    }
}
