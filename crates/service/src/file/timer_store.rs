use std::{path::PathBuf, sync::Arc};

use configs::ResetStrategy;

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;
use crate::timers::store::TimerStore;

/// File-backed timer store.
/// Keeps a map of `label -> timestamp_ms` persisted as a JSON object.
pub struct FileTimerStore {
    store: Arc<JsonMapStore<String, i64>>,
    reset_strategy: ResetStrategy,
}

impl FileTimerStore {
    /// Load the store from `path`, creating the file if missing. A corrupt file
    /// loads as empty.
    pub async fn open<P: Into<PathBuf>>(path: P, reset_strategy: ResetStrategy) -> Arc<Self> {
        let store = JsonMapStore::<String, i64>::open(path).await;
        Arc::new(Self { store, reset_strategy })
    }

    pub fn path(&self) -> &std::path::Path {
        self.store.path()
    }

    pub fn reset_strategy(&self) -> ResetStrategy {
        self.reset_strategy
    }
}

#[async_trait::async_trait]
impl TimerStore for FileTimerStore {
    async fn get(&self, label: &str) -> Option<i64> {
        self.store.get(&label.to_string()).await
    }

    async fn record(&self, label: String, timestamp: i64) -> Result<(), ServiceError> {
        self.store.insert(label, timestamp).await
    }

    async fn reset(&self) -> Result<(), ServiceError> {
        self.store.clear(self.reset_strategy).await
    }

    async fn len(&self) -> usize {
        self.store.len().await
    }
}
