//! Error types of the ingestion, catalog and blob layers.

use atrium_model::ErrorKind;
use thiserror::Error;

/// Failures surfaced by [`crate::ingest::IngestService`].
#[derive(Error, Debug)]
pub enum IngestError {
    /// The request carried no file part.
    #[error("No file uploaded")]
    MissingFile,

    /// The declared content type is not on the image allow list.
    #[error("Unsupported file format: {0}")]
    UnsupportedMediaType(String),

    /// A required text field is missing or blank.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Writing the blob or the catalog entry failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl IngestError {
    /// Wire-level classification of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::MissingFile => ErrorKind::MissingFile,
            IngestError::UnsupportedMediaType(_) => {
                ErrorKind::UnsupportedMediaType
            }
            IngestError::Validation(_) => ErrorKind::ValidationError,
            IngestError::Storage(_) => ErrorKind::StorageError,
        }
    }

    /// True when the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        self.kind().is_client_error()
    }
}

impl From<BlobError> for IngestError {
    fn from(err: BlobError) -> Self {
        IngestError::Storage(err.to_string())
    }
}

impl From<CatalogError> for IngestError {
    fn from(err: CatalogError) -> Self {
        IngestError::Storage(err.to_string())
    }
}

/// Failures of the catalog store.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The store could not be reached.
    #[error("Catalog store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with an error.
    #[error("Catalog store error: {0}")]
    Storage(String),

    /// A stored row could not be turned into an entry.
    #[error("Invalid catalog record: {0}")]
    InvalidRecord(String),
}

impl CatalogError {
    /// `Unavailable` maps to `TransportError`, the rest to `StorageError`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Unavailable(_) => ErrorKind::TransportError,
            CatalogError::Storage(_) | CatalogError::InvalidRecord(_) => {
                ErrorKind::StorageError
            }
        }
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Tls(_) => CatalogError::Unavailable(err.to_string()),
            other => CatalogError::Storage(other.to_string()),
        }
    }
}

/// Failures of the blob store.
#[derive(Error, Debug)]
pub enum BlobError {
    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No blob is stored under the locator.
    #[error("Blob not found: {0}")]
    NotFound(String),

    /// The locator escapes the store root or uses a foreign prefix.
    #[error("Invalid blob path: {0}")]
    InvalidPath(String),
}

/// Result alias for catalog store calls.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
/// Result alias for blob store calls.
pub type BlobResult<T> = std::result::Result<T, BlobError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_errors_classify_caller_mistakes() {
        assert!(IngestError::MissingFile.is_client_error());
        assert!(
            IngestError::UnsupportedMediaType("text/plain".into())
                .is_client_error()
        );
        assert!(IngestError::Validation("empty".into()).is_client_error());
        assert!(!IngestError::Storage("disk full".into()).is_client_error());
    }

    #[test]
    fn unreachable_store_is_a_transport_error() {
        assert_eq!(
            CatalogError::Unavailable("refused".into()).kind(),
            ErrorKind::TransportError
        );
        assert_eq!(
            IngestError::from(CatalogError::Unavailable("refused".into()))
                .kind(),
            ErrorKind::StorageError
        );
    }
}
