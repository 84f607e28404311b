//! Service wiring
//!
//! Builds the storage backend, font asset, renderer and image cache
//! described by a [`Config`] and bundles them into the web [`AppState`].

use anyhow::{Context, Result};
use bytes::Bytes;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, StorageBackend};
use crate::render::{Renderer, ResvgRenderer};
use crate::services::{FontAsset, ImageCache};
use crate::storage::{BlobStore, FsBlobStore, MemoryBlobStore};
use crate::web::AppState;

/// Create the blob store selected by the configuration
pub async fn build_store(config: &Config) -> Result<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.storage.backend {
        StorageBackend::Filesystem => {
            let store = FsBlobStore::new(&config.storage.path);
            store.ensure_storage_dir().await.with_context(|| {
                format!("Failed to create storage directory {:?}", config.storage.path)
            })?;
            Arc::new(store)
        }
        StorageBackend::Memory => Arc::new(MemoryBlobStore::new()),
    };

    info!(
        "Using {} storage (path: {:?})",
        store.backend_name(),
        config.storage.path
    );
    Ok(store)
}

/// Font asset per configuration: a local file loaded now, or a lazy store fetch
pub async fn build_font(config: &Config, store: Arc<dyn BlobStore>) -> Result<FontAsset> {
    match &config.storage.font_path {
        Some(path) => {
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read font file {:?}", path))?;
            info!("Loaded font from {:?} ({} bytes)", path, data.len());
            Ok(FontAsset::preloaded(
                config.storage.font_key.clone(),
                Bytes::from(data),
            ))
        }
        None => Ok(FontAsset::from_store(store, config.storage.font_key.clone())),
    }
}

/// Wire the image cache on top of an existing store
pub fn build_image_cache(
    config: &Config,
    store: Arc<dyn BlobStore>,
    font: FontAsset,
    renderer: Arc<dyn Renderer>,
) -> ImageCache {
    ImageCache::new(store, renderer, Arc::new(font), config.card.caption.clone())
        .with_key_prefix(config.storage.image_key_prefix.clone())
}

/// Build the complete application state
pub async fn build_state(config: Config) -> Result<AppState> {
    let store = build_store(&config).await?;
    let font = build_font(&config, store.clone()).await?;
    let renderer = Arc::new(ResvgRenderer::new(config.card.fallback_font_family.clone()));
    let image_cache = build_image_cache(&config, store, font, renderer);

    Ok(AppState::new(config, Arc::new(image_cache)))
}
