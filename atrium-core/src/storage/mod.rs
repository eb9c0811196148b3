//! Blob storage port and adapters.
//!
//! Blobs are addressed by their [`MediaRef`]; the catalog only ever stores
//! that locator.

mod local;
mod memory;
mod path;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
pub use path::StoragePathGenerator;

use async_trait::async_trait;
use atrium_model::MediaRef;

use crate::error::BlobResult;

/// Storage for uploaded image bytes.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Write `bytes` under `media_ref`. Existing blobs are never overwritten.
    async fn put(&self, media_ref: &MediaRef, bytes: &[u8]) -> BlobResult<()>;

    /// Read a stored blob. Missing blobs are
    /// [`BlobError::NotFound`](crate::error::BlobError::NotFound).
    async fn get(&self, media_ref: &MediaRef) -> BlobResult<Vec<u8>>;

    /// Deleting a missing blob is not an error.
    async fn delete(&self, media_ref: &MediaRef) -> BlobResult<()>;

    /// Whether a blob is stored under `media_ref`.
    async fn exists(&self, media_ref: &MediaRef) -> BlobResult<bool>;
}
