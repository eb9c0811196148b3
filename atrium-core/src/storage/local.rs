use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use atrium_model::MediaRef;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use super::BlobStore;
use crate::error::{BlobError, BlobResult};

/// Filesystem blob store. A locator `<prefix>/<name>` maps to `<root>/<name>`,
/// so the root directory can be served directly under `/<prefix>`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    prefix: String,
}

impl LocalBlobStore {
    /// Store under `root`, accepting locators that start with `prefix`.
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into().trim_matches('/').to_string(),
        }
    }

    /// Create the root directory if it does not exist yet.
    pub async fn ensure_root(&self) -> BlobResult<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Directory the blobs live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, media_ref: &MediaRef) -> BlobResult<PathBuf> {
        let raw = media_ref.as_str();
        let relative = if self.prefix.is_empty() {
            raw
        } else {
            raw.strip_prefix(self.prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .ok_or_else(|| BlobError::InvalidPath(raw.to_string()))?
        };

        let relative = Path::new(relative);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || relative.as_os_str().is_empty() {
            return Err(BlobError::InvalidPath(raw.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, media_ref: &MediaRef, bytes: &[u8]) -> BlobResult<()> {
        let path = self.resolve(media_ref)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        debug!(media_ref = %media_ref, size = bytes.len(), "blob written");
        Ok(())
    }

    async fn get(&self, media_ref: &MediaRef) -> BlobResult<Vec<u8>> {
        let path = self.resolve(media_ref)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(BlobError::NotFound(media_ref.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, media_ref: &MediaRef) -> BlobResult<()> {
        let path = self.resolve(media_ref)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn exists(&self, media_ref: &MediaRef) -> BlobResult<bool> {
        let path = self.resolve(media_ref)?;
        Ok(fs::try_exists(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_ref(raw: &str) -> MediaRef {
        MediaRef::new(raw).unwrap()
    }

    #[tokio::test]
    async fn round_trips_bytes_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "uploads");

        let locator = media_ref("uploads/1-abc.png");
        store.put(&locator, b"png-bytes").await.unwrap();

        assert!(dir.path().join("1-abc.png").exists());
        assert_eq!(store.get(&locator).await.unwrap(), b"png-bytes");
        assert!(store.exists(&locator).await.unwrap());

        store.delete(&locator).await.unwrap();
        assert!(!store.exists(&locator).await.unwrap());
        store.delete(&locator).await.unwrap();
    }

    #[tokio::test]
    async fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "uploads");
        let locator = media_ref("uploads/same.gif");

        store.put(&locator, b"one").await.unwrap();
        assert!(store.put(&locator, b"two").await.is_err());
        assert_eq!(store.get(&locator).await.unwrap(), b"one");
    }

    #[tokio::test]
    async fn rejects_paths_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "uploads");

        for raw in ["uploads/../secret", "other/x.png", "/etc/passwd", "uploads/"] {
            let err = store.put(&media_ref(raw), b"x").await.unwrap_err();
            assert!(matches!(err, BlobError::InvalidPath(_)), "{raw}");
        }
    }

    #[tokio::test]
    async fn missing_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "uploads");
        let err = store.get(&media_ref("uploads/none.png")).await.unwrap_err();
        assert!(matches!(err, BlobError::NotFound(_)));
    }
}
