//! Background work for the TUI.
//!
//! Loads, updates and imports run on tokio tasks so the event loop keeps
//! drawing. Each task reports back with a [`DataMessage`] on an unbounded
//! channel; the main loop drains it with `try_recv()` between frames.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::actions::{self, ActionResponse};
use crate::domain::{Inquiry, MailTemplate, Property, Realtor, Validate};
use crate::store::{get_rows, Repository};
use crate::table::TableRecord;

/// Results sent from background tasks to the main loop.
#[derive(Debug)]
pub enum DataMessage {
    PropertiesLoaded(Vec<Property>),
    RealtorsLoaded(Vec<Realtor>),
    InquiriesLoaded(Vec<Inquiry>),
    MailTemplatesLoaded(Vec<MailTemplate>),

    PropertyUpdated(ActionResponse<Property>),
    RealtorUpdated(ActionResponse<Realtor>),
    InquiryUpdated(ActionResponse<Inquiry>),
    MailTemplateUpdated(ActionResponse<MailTemplate>),

    /// A CSV import finished.
    ImportFinished {
        table: &'static str,
        response: ActionResponse<usize>,
    },
}

/// Records that can travel in a [`DataMessage`].
pub trait Routed: TableRecord + Serialize + DeserializeOwned + Validate + Send + 'static {
    /// Wrap freshly loaded rows.
    fn loaded(rows: Vec<Self>) -> DataMessage;

    /// Wrap the outcome of an update.
    fn updated(response: ActionResponse<Self>) -> DataMessage;
}

macro_rules! routed {
    ($ty:ty, $loaded:ident, $updated:ident) => {
        impl Routed for $ty {
            fn loaded(rows: Vec<Self>) -> DataMessage {
                DataMessage::$loaded(rows)
            }

            fn updated(response: ActionResponse<Self>) -> DataMessage {
                DataMessage::$updated(response)
            }
        }
    };
}

routed!(Property, PropertiesLoaded, PropertyUpdated);
routed!(Realtor, RealtorsLoaded, RealtorUpdated);
routed!(Inquiry, InquiriesLoaded, InquiryUpdated);
routed!(MailTemplate, MailTemplatesLoaded, MailTemplateUpdated);

/// Spawns background tasks that report through a channel.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<DataMessage>,
}

impl TaskSpawner {
    /// Create a spawner sending on `tx`.
    pub fn new(tx: mpsc::UnboundedSender<DataMessage>) -> Self {
        Self { tx }
    }

    fn send(tx: &mpsc::UnboundedSender<DataMessage>, message: DataMessage) {
        if tx.send(message).is_err() {
            warn!("Main loop is gone, dropping task result");
        }
    }

    /// Load every row of a table.
    pub fn spawn_load<T: Routed>(&self, repo: Arc<dyn Repository<T>>) {
        let tx = self.tx.clone();
        debug!(table = T::TABLE, "Spawning load");
        tokio::spawn(async move {
            let rows = get_rows(repo).await;
            Self::send(&tx, T::loaded(rows));
        });
    }

    /// Apply a partial update to one record.
    pub fn spawn_update<T: Routed>(
        &self,
        repo: Arc<dyn Repository<T>>,
        id: String,
        patch: Map<String, Value>,
    ) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let response = tokio::task::spawn_blocking(move || {
                actions::update_entity(repo.as_ref(), &id, patch)
            })
            .await
            .unwrap_or_else(|e| ActionResponse::failed(format!("Update task failed: {}", e)));
            Self::send(&tx, T::updated(response));
        });
    }

    /// Run the simulated CSV import for a table.
    pub fn spawn_import<T: TableRecord + 'static>(&self, path: PathBuf, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let response = actions::import_csv::<T>(&path, delay).await;
            Self::send(
                &tx,
                DataMessage::ImportFinished {
                    table: T::TABLE,
                    response,
                },
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::properties;
    use crate::domain::PropertyStatus;
    use crate::store::MemoryRepository;
    use serde_json::json;

    fn spawner() -> (TaskSpawner, mpsc::UnboundedReceiver<DataMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TaskSpawner::new(tx), rx)
    }

    #[tokio::test]
    async fn test_spawn_load_reports_rows() {
        let (spawner, mut rx) = spawner();
        let repo: Arc<dyn Repository<Property>> = Arc::new(MemoryRepository::new(properties(7)));
        spawner.spawn_load(repo);

        match rx.recv().await {
            Some(DataMessage::PropertiesLoaded(rows)) => assert_eq!(rows.len(), 7),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_spawn_update_reports_response() {
        let (spawner, mut rx) = spawner();
        let repo: Arc<dyn Repository<Property>> = Arc::new(MemoryRepository::new(properties(2)));
        let patch = json!({"status": "Pending"}).as_object().cloned().unwrap();
        spawner.spawn_update(repo.clone(), "p-1".to_string(), patch);

        match rx.recv().await {
            Some(DataMessage::PropertyUpdated(response)) => {
                assert!(response.success);
                assert_eq!(response.data.unwrap().status, PropertyStatus::Pending);
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert_eq!(repo.load().unwrap()[0].status, PropertyStatus::Pending);
    }

    #[tokio::test]
    async fn test_spawn_import_reports_failure_for_missing_file() {
        let (spawner, mut rx) = spawner();
        spawner.spawn_import::<Realtor>(PathBuf::from("/nonexistent/realtors.csv"), Duration::ZERO);

        match rx.recv().await {
            Some(DataMessage::ImportFinished { table, response }) => {
                assert_eq!(table, "realtors");
                assert!(!response.success);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_closed_channel_is_not_fatal() {
        let (spawner, rx) = spawner();
        drop(rx);
        let repo: Arc<dyn Repository<Inquiry>> = Arc::new(MemoryRepository::new(Vec::new()));
        let rows = tokio_test::block_on(get_rows(repo));
        TaskSpawner::send(&spawner.tx, Inquiry::loaded(rows));
    }
}
