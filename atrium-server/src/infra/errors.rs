use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use atrium_core::error::{CatalogError, IngestError};
use atrium_model::{ApiErrorBody, ErrorKind};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub kind: Option<ErrorKind>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            error: self.message,
            kind: self.kind,
        });

        (self.status, body).into_response()
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        let kind = err.kind();
        match err {
            IngestError::MissingFile | IngestError::Validation(_) => {
                Self::bad_request(err.to_string()).with_kind(kind)
            }
            IngestError::UnsupportedMediaType(_) => {
                Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, err.to_string())
                    .with_kind(kind)
            }
            IngestError::Storage(_) => {
                tracing::error!(error = %err, "upload failed");
                Self::internal("Failed to upload image").with_kind(kind)
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let kind = err.kind();
        tracing::error!(error = %err, "catalog operation failed");
        match err {
            CatalogError::Unavailable(_) => {
                Self::unavailable("Catalog temporarily unavailable")
                    .with_kind(kind)
            }
            CatalogError::Storage(_) | CatalogError::InvalidRecord(_) => {
                Self::internal("Failed to fetch catalog").with_kind(kind)
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        // Malformed or oversized multipart bodies are caller mistakes.
        Self::new(err.status(), err.body_text())
            .with_kind(ErrorKind::ValidationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_errors_map_to_statuses() {
        let cases = [
            (IngestError::MissingFile, StatusCode::BAD_REQUEST),
            (
                IngestError::UnsupportedMediaType("text/plain".into()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                IngestError::Validation("description is required".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                IngestError::Storage("disk full".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let kind = err.kind();
            let app: AppError = err.into();
            assert_eq!(app.status, status);
            assert_eq!(app.kind, Some(kind));
        }
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let app: AppError =
            IngestError::Storage("/var/lib/atrium/uploads: EACCES".into())
                .into();
        assert!(!app.message.contains("EACCES"));
    }

    #[test]
    fn unavailable_catalog_is_a_transport_error() {
        let app: AppError =
            CatalogError::Unavailable("connection refused".into()).into();
        assert_eq!(app.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(app.kind, Some(ErrorKind::TransportError));
    }
}
