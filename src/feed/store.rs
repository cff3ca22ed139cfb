use std::sync::Arc;

use tokio::sync::RwLock;

use super::oem::Dataset;

/// Holds the current dataset snapshot.
///
/// Readers get an `Arc` and work on it after the lock is released; a delete
/// or reload swaps the pointer and never touches a snapshot in use.
#[derive(Clone, Default)]
pub struct DatasetStore {
    current: Arc<RwLock<Option<Arc<Dataset>>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Option<Arc<Dataset>> {
        self.current.read().await.clone()
    }

    pub async fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);
        *self.current.write().await = Some(dataset.clone());
        dataset
    }

    /// Drops the snapshot; returns whether there was one.
    pub async fn clear(&self) -> bool {
        self.current.write().await.take().is_some()
    }
}
