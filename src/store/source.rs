//! Row source for screens.

use std::sync::Arc;

use tracing::{debug, warn};

use super::Repository;

/// Load every row from `repo` off the UI thread.
///
/// Failures are logged and turn into an empty list; they never reach the
/// caller as errors.
pub async fn get_rows<T>(repo: Arc<dyn Repository<T>>) -> Vec<T>
where
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(move || repo.load()).await {
        Ok(Ok(rows)) => {
            debug!(count = rows.len(), "Rows loaded");
            rows
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Failed to load rows");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "Row loading task failed");
            Vec::new()
        }
    }
}
