use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, warn};

use super::BlobStore;
use crate::errors::{StorageError, StorageResult};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Blob store backed by a directory tree
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn ensure_storage_dir(&self) -> StorageResult<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .await
                .map_err(|e| StorageError::io(self.root.display().to_string(), e))?;
        }
        Ok(())
    }

    /// Map a key to a path under the root, rejecting anything that escapes it
    fn key_path(&self, key: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(StorageError::invalid_key(key));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Bytes>> {
        let path = self.key_path(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
        let path = self.key_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(key, e))?;
        }

        // Readers must never observe a partially written blob
        let temp_path = temp_sibling(&path);
        if let Err(e) = write_then_rename(&temp_path, &path, &data).await {
            match fs::remove_file(&temp_path).await {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == ErrorKind::NotFound => {}
                Err(cleanup) => {
                    warn!("Failed to remove temporary file {:?}: {}", temp_path, cleanup)
                }
            }
            return Err(StorageError::io(key, e));
        }

        debug!("Stored {} bytes at {:?}", data.len(), path);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}

async fn write_then_rename(temp_path: &Path, path: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(temp_path, data).await?;
    fs::rename(temp_path, path).await
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{}.{}.{}.partial", file_name, std::process::id(), seq))
}
