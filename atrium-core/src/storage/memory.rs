use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use atrium_model::MediaRef;
use dashmap::{DashMap, mapref::entry::Entry};

use super::BlobStore;
use crate::error::{BlobError, BlobResult};

/// Process-local blob store used by tests and development setups.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<DashMap<MediaRef, Vec<u8>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBlobStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail with an IO error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, media_ref: &MediaRef, bytes: &[u8]) -> BlobResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BlobError::Io(std::io::Error::other(
                "blob store rejected write",
            )));
        }
        match self.blobs.entry(media_ref.clone()) {
            Entry::Occupied(_) => Err(BlobError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                media_ref.to_string(),
            ))),
            Entry::Vacant(slot) => {
                slot.insert(bytes.to_vec());
                Ok(())
            }
        }
    }

    async fn get(&self, media_ref: &MediaRef) -> BlobResult<Vec<u8>> {
        self.blobs
            .get(media_ref)
            .map(|blob| blob.value().clone())
            .ok_or_else(|| BlobError::NotFound(media_ref.to_string()))
    }

    async fn delete(&self, media_ref: &MediaRef) -> BlobResult<()> {
        self.blobs.remove(media_ref);
        Ok(())
    }

    async fn exists(&self, media_ref: &MediaRef) -> BlobResult<bool> {
        Ok(self.blobs.contains_key(media_ref))
    }
}
