//! Request/response payloads shared by the server and its clients.

use serde::{Deserialize, Serialize};

use crate::entry::CatalogEntry;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Image uploaded successfully!";

/// Coarse error classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationError,
    UnsupportedMediaType,
    MissingFile,
    StorageError,
    TransportError,
}

impl ErrorKind {
    /// Whether the caller can recover by correcting its input.
    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            ErrorKind::ValidationError
                | ErrorKind::UnsupportedMediaType
                | ErrorKind::MissingFile
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub entry: CatalogEntry,
}

impl UploadResponse {
    pub fn new(entry: CatalogEntry) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            entry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}
