use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::datasets::Dataset;

/// Trait abstraction for dataset storage, keyed by filename.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Store a dataset under its filename, replacing any previous one. Returns the replaced dataset.
    async fn put(&self, dataset: Dataset) -> Option<Arc<Dataset>>;
    async fn get(&self, filename: &str) -> Option<Arc<Dataset>>;
    /// Stored filenames in first-insertion order.
    async fn list_names(&self) -> Vec<String>;
}

/// Process-lifetime in-memory store.
///
/// Raw bytes and parsed table sit in one [`Dataset`] value under one key, so a
/// filename is never present in one representation without the other.
#[derive(Default)]
pub struct MemoryDatasetStore {
    inner: RwLock<IndexMap<String, Arc<Dataset>>>,
}

impl MemoryDatasetStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl DatasetStore for MemoryDatasetStore {
    async fn put(&self, dataset: Dataset) -> Option<Arc<Dataset>> {
        let mut map = self.inner.write().await;
        // IndexMap::insert keeps the original slot for an existing key
        map.insert(dataset.filename().to_string(), Arc::new(dataset))
    }

    async fn get(&self, filename: &str) -> Option<Arc<Dataset>> {
        let map = self.inner.read().await;
        map.get(filename).cloned()
    }

    async fn list_names(&self) -> Vec<String> {
        let map = self.inner.read().await;
        map.keys().cloned().collect()
    }
}
