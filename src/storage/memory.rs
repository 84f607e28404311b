use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::BlobStore;
use crate::errors::StorageResult;

/// In-process blob store; contents are lost on shutdown
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with initial blobs
    pub fn with_blobs<I, K>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (K, Bytes)>,
        K: Into<String>,
    {
        let blobs = blobs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            blobs: Arc::new(RwLock::new(blobs)),
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.blobs.read().await.contains_key(key)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Bytes>> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
        self.blobs.write().await.insert(key.to_string(), data);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
