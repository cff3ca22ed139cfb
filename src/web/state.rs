use std::sync::Arc;

use crate::feed::{Dataset, DatasetStore, FeedLoader};
use crate::location::{Clock, LocationService};

use super::api::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AppState {
    pub store: DatasetStore,
    pub loader: Arc<FeedLoader>,
    pub locator: Arc<LocationService>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Current snapshot, or `NoData` after a delete.
    pub async fn dataset(&self) -> ApiResult<Arc<Dataset>> {
        self.store.snapshot().await.ok_or(ApiError::NoData)
    }
}
