//! Blob storage
//!
//! Rendered cards and the font asset live in a flat key/value blob store.
//! Keys are `/`-separated relative paths such as `ogp/foo.png`.

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::StorageResult;

pub mod fs;
pub mod memory;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

/// Key/value blob store
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the blob stored under `key`, `None` if absent
    async fn get(&self, key: &str) -> StorageResult<Option<Bytes>>;

    /// Store `data` under `key`, replacing any previous value
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
