//! In-memory repository.

use std::sync::{Mutex, MutexGuard};

use super::{Repository, Result, StoreError};

/// Rows held in memory. Used by tests and as a scratch store.
#[derive(Debug, Default)]
pub struct MemoryRepository<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> MemoryRepository<T> {
    /// Create a repository holding `rows`.
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }
}

impl<T> MemoryRepository<T> {
    fn rows(&self) -> Result<MutexGuard<'_, Vec<T>>> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Poisoned("in-memory store"))
    }
}

impl<T: Clone + Send> Repository<T> for MemoryRepository<T> {
    fn load(&self) -> Result<Vec<T>> {
        Ok(self.rows()?.clone())
    }

    fn save(&self, rows: &[T]) -> Result<()> {
        *self.rows()? = rows.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.rows()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip_and_clear() {
        let repo = MemoryRepository::new(vec![1, 2]);
        assert_eq!(repo.load().unwrap(), vec![1, 2]);
        repo.save(&[3]).unwrap();
        assert_eq!(repo.load().unwrap(), vec![3]);
        repo.clear().unwrap();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_poisoned_lock_reports_errors() {
        let repo = std::sync::Arc::new(MemoryRepository::new(vec![1]));
        let writer = repo.clone();
        let _ = std::thread::spawn(move || {
            let _guard = writer.rows.lock().unwrap();
            panic!("writer failed");
        })
        .join();

        assert!(matches!(repo.save(&[2]), Err(StoreError::Poisoned(_))));
        assert!(matches!(repo.clear(), Err(StoreError::Poisoned(_))));
        assert!(repo.load().is_err());
    }
}
