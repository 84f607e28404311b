//! Read-through card image cache
//!
//! Cards are rendered at most once per identifier under normal operation
//! and then served straight from the blob store. Two concurrent first
//! requests for the same identifier may both render and both store; the
//! renderer is deterministic so the last write is as good as the first.

use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::errors::{AppResult, RenderError};
use crate::layout::{CanvasSpec, compose};
use crate::render::Renderer;
use crate::services::font::FontAsset;
use crate::storage::BlobStore;

/// Counters for cache behaviour since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub store_failures: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    store_failures: AtomicU64,
}

/// Cache-first card image service
pub struct ImageCache {
    store: Arc<dyn BlobStore>,
    renderer: Arc<dyn Renderer>,
    font: Arc<FontAsset>,
    canvas: CanvasSpec,
    caption: String,
    key_prefix: String,
    counters: Counters,
}

impl ImageCache {
    pub fn new(
        store: Arc<dyn BlobStore>,
        renderer: Arc<dyn Renderer>,
        font: Arc<FontAsset>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            store,
            renderer,
            font,
            canvas: CanvasSpec::default(),
            caption: caption.into(),
            key_prefix: crate::config::defaults::DEFAULT_IMAGE_KEY_PREFIX.to_string(),
            counters: Counters::default(),
        }
    }

    /// Namespace rendered cards under a different key prefix
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Storage key of the card for `identifier`
    pub fn cache_key(&self, identifier: &str) -> String {
        format!("{}{}.png", self.key_prefix, identifier)
    }

    pub fn stats(&self) -> ImageCacheStats {
        ImageCacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            store_failures: self.counters.store_failures.load(Ordering::Relaxed),
        }
    }

    /// Card image for `identifier`, rendering and storing it on a miss
    ///
    /// The font is only loaded when a render is needed. A failed lookup
    /// counts as a miss. A failed store is logged and the freshly rendered
    /// image is still returned.
    pub async fn get_or_render(&self, identifier: &str) -> AppResult<Bytes> {
        let key = self.cache_key(identifier);

        match self.store.get(&key).await {
            Ok(Some(cached)) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Card cache hit for {}", key);
                return Ok(cached);
            }
            Ok(None) => debug!("Card cache miss for {}", key),
            Err(e) => warn!("Card cache lookup failed for {}, rendering: {}", key, e),
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);

        let font = self.font.get().await?;
        let image = self.render_with_font(identifier, font).await?;

        match self.store.put(&key, image.clone()).await {
            Ok(()) => info!("Stored card {} ({} bytes)", key, image.len()),
            Err(e) => {
                self.counters.store_failures.fetch_add(1, Ordering::Relaxed);
                warn!("Failed to store card {}: {}", key, e);
            }
        }

        Ok(image)
    }

    /// Render the card for `identifier` without touching the cache
    pub async fn render_uncached(&self, identifier: &str) -> AppResult<Bytes> {
        let font = self.font.get().await?;
        self.render_with_font(identifier, font).await
    }

    async fn render_with_font(&self, identifier: &str, font: Bytes) -> AppResult<Bytes> {
        let composition = compose(identifier, &self.caption, &self.canvas);
        let renderer = self.renderer.clone();

        let png = tokio::task::spawn_blocking(move || renderer.render(&composition, &font))
            .await
            .map_err(|e| RenderError::task(e.to_string()))??;

        Ok(Bytes::from(png))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, RenderResult, StorageError, StorageResult};
    use crate::layout::LayoutComposition;
    use crate::storage::MemoryBlobStore;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Renderer that encodes its input so tests can see what it was asked for
    #[derive(Default)]
    struct RecordingRenderer {
        calls: AtomicUsize,
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, composition: &LayoutComposition, font: &[u8]) -> RenderResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!(
                "{}|{}|{}|{}",
                composition.identifier.text,
                composition.identifier.scale_x,
                composition.caption.text,
                font.len()
            )
            .into_bytes())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _: &LayoutComposition, _: &[u8]) -> RenderResult<Vec<u8>> {
            Err(RenderError::encode("boom"))
        }
    }

    /// Store whose reads and/or writes always fail
    struct BrokenStore {
        inner: MemoryBlobStore,
        fail_get: bool,
        fail_put: bool,
    }

    #[async_trait]
    impl BlobStore for BrokenStore {
        async fn get(&self, key: &str) -> StorageResult<Option<Bytes>> {
            if self.fail_get {
                return Err(StorageError::unavailable("read refused"));
            }
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
            if self.fail_put {
                return Err(StorageError::unavailable("write refused"));
            }
            self.inner.put(key, data).await
        }

        fn backend_name(&self) -> &'static str {
            "broken"
        }
    }

    fn font() -> Arc<FontAsset> {
        Arc::new(FontAsset::preloaded("font.otf", Bytes::from_static(b"fontdata")))
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_storage() {
        let store = MemoryBlobStore::new();
        let renderer = Arc::new(RecordingRenderer::default());
        let cache = ImageCache::new(Arc::new(store.clone()), renderer.clone(), font(), "ちんちん");

        let first = cache.get_or_render("bar").await.unwrap();
        assert!(store.contains_key("ogp/bar.png").await);
        let second = cache.get_or_render("bar").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(&first[..], "bar|2.6666666666666665|ちんちん|8".as_bytes());
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.stats(),
            ImageCacheStats {
                hits: 1,
                misses: 1,
                store_failures: 0
            }
        );
    }

    #[tokio::test]
    async fn test_cached_bytes_are_returned_unchanged() {
        let store = MemoryBlobStore::with_blobs([("ogp/foo.png", Bytes::from_static(b"stale"))]);
        let renderer = Arc::new(RecordingRenderer::default());
        let cache = ImageCache::new(Arc::new(store), renderer.clone(), font(), "c");

        assert_eq!(&cache.get_or_render("foo").await.unwrap()[..], b"stale");
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_identifier_uses_bare_key() {
        let store = MemoryBlobStore::new();
        let cache = ImageCache::new(
            Arc::new(store.clone()),
            Arc::new(RecordingRenderer::default()),
            font(),
            "c",
        );

        let image = cache.get_or_render("").await.unwrap();
        assert_eq!(&image[..], b"|1|c|8");
        assert!(store.contains_key("ogp/.png").await);
    }

    #[tokio::test]
    async fn test_lookup_failure_falls_through_to_render() {
        let store = BrokenStore {
            inner: MemoryBlobStore::new(),
            fail_get: true,
            fail_put: false,
        };
        let renderer = Arc::new(RecordingRenderer::default());
        let cache = ImageCache::new(Arc::new(store), renderer.clone(), font(), "c");

        assert!(cache.get_or_render("foo").await.is_ok());
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_store_failure_still_returns_rendered_image() {
        let store = BrokenStore {
            inner: MemoryBlobStore::new(),
            fail_get: false,
            fail_put: true,
        };
        let renderer = Arc::new(RecordingRenderer::default());
        let cache = ImageCache::new(Arc::new(store), renderer.clone(), font(), "c");

        let image = cache.get_or_render("foo").await.unwrap();
        assert_eq!(&image[..], b"foo|2.6666666666666665|c|8");
        assert_eq!(cache.stats().store_failures, 1);

        // Nothing was persisted, so the next request renders again
        cache.get_or_render("foo").await.unwrap();
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_render_failure_stores_nothing() {
        let store = MemoryBlobStore::new();
        let cache = ImageCache::new(Arc::new(store.clone()), Arc::new(FailingRenderer), font(), "c");

        let err = cache.get_or_render("foo").await.unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_font_fails_misses_but_not_hits() {
        let store = MemoryBlobStore::with_blobs([("ogp/hit.png", Bytes::from_static(b"cached"))]);
        let font = Arc::new(FontAsset::from_store(Arc::new(store.clone()), "font.otf"));
        let cache = ImageCache::new(
            Arc::new(store),
            Arc::new(RecordingRenderer::default()),
            font,
            "c",
        );

        let err = cache.get_or_render("miss").await.unwrap_err();
        assert!(matches!(err, AppError::AssetUnavailable { .. }));
        assert_eq!(&cache.get_or_render("hit").await.unwrap()[..], b"cached");
    }

    #[tokio::test]
    async fn test_uncached_render_is_idempotent() {
        let store = MemoryBlobStore::new();
        let renderer = Arc::new(RecordingRenderer::default());
        let cache = ImageCache::new(Arc::new(store.clone()), renderer.clone(), font(), "c");

        let first = cache.render_uncached("baz").await.unwrap();
        let second = cache.render_uncached("baz").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_custom_key_prefix() {
        let cache = ImageCache::new(
            Arc::new(MemoryBlobStore::new()),
            Arc::new(RecordingRenderer::default()),
            font(),
            "c",
        )
        .with_key_prefix("cards/");
        assert_eq!(cache.cache_key("日本"), "cards/日本.png");
    }
}
