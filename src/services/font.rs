//! Shared font asset
//!
//! The card typeface lives in the blob store next to the rendered images.
//! It is fetched on first use and kept for the lifetime of the owning
//! [`FontAsset`]; concurrent first callers share a single fetch.

use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::storage::BlobStore;

/// Lazily loaded font bytes
pub struct FontAsset {
    key: String,
    store: Option<Arc<dyn BlobStore>>,
    data: OnceCell<Bytes>,
}

impl FontAsset {
    /// Font fetched from `store` under `key` on first use
    pub fn from_store(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            store: Some(store),
            data: OnceCell::new(),
        }
    }

    /// Font that is already in memory
    pub fn preloaded(key: impl Into<String>, data: Bytes) -> Self {
        Self {
            key: key.into(),
            store: None,
            data: OnceCell::new_with(Some(data)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data.initialized()
    }

    /// Font bytes, fetching them if this is the first call
    ///
    /// A failed fetch leaves the asset unloaded so a later call can retry.
    pub async fn get(&self) -> AppResult<Bytes> {
        let data = self
            .data
            .get_or_try_init(|| self.fetch())
            .await?;
        Ok(data.clone())
    }

    async fn fetch(&self) -> AppResult<Bytes> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| AppError::asset_unavailable(&self.key, "no backing store"))?;

        debug!("Fetching font asset {} from {}", self.key, store.backend_name());
        let data = store
            .get(&self.key)
            .await
            .map_err(|e| AppError::asset_unavailable(&self.key, e.to_string()))?
            .ok_or_else(|| AppError::asset_unavailable(&self.key, "not found in storage"))?;

        if data.is_empty() {
            return Err(AppError::asset_unavailable(&self.key, "font file is empty"));
        }

        info!("Loaded font asset {} ({} bytes)", self.key, data.len());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageResult;
    use crate::storage::MemoryBlobStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store that counts reads and delays them so callers overlap
    struct CountingStore {
        inner: MemoryBlobStore,
        gets: AtomicUsize,
    }

    #[async_trait]
    impl BlobStore for CountingStore {
        async fn get(&self, key: &str) -> StorageResult<Option<Bytes>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
            self.inner.put(key, data).await
        }

        fn backend_name(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let store = Arc::new(CountingStore {
            inner: MemoryBlobStore::with_blobs([("font.otf", Bytes::from_static(b"font"))]),
            gets: AtomicUsize::new(0),
        });
        let font = Arc::new(FontAsset::from_store(store.clone(), "font.otf"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let font = font.clone();
                tokio::spawn(async move { font.get().await.unwrap() })
            })
            .collect();
        for handle in handles {
            assert_eq!(&handle.await.unwrap()[..], b"font");
        }

        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
        assert!(font.is_loaded());
    }

    #[tokio::test]
    async fn test_missing_font_is_unavailable_and_retryable() {
        let store = MemoryBlobStore::new();
        let font = FontAsset::from_store(Arc::new(store.clone()), "font.otf");

        let err = font.get().await.unwrap_err();
        assert!(matches!(err, AppError::AssetUnavailable { .. }));
        assert!(!font.is_loaded());

        store
            .put("font.otf", Bytes::from_static(b"late"))
            .await
            .unwrap();
        assert_eq!(&font.get().await.unwrap()[..], b"late");
    }

    #[tokio::test]
    async fn test_preloaded_font_skips_storage() {
        let font = FontAsset::preloaded("font.otf", Bytes::from_static(b"inline"));
        assert!(font.is_loaded());
        assert_eq!(&font.get().await.unwrap()[..], b"inline");
    }
}
