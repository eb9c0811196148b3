//! Upload ingestion: validate, store the blob, persist the entry, fan out.

use std::sync::Arc;

use atrium_model::{CatalogEntry, EntryCreated, NewCatalogEntry};
use tracing::{info, warn};

use crate::{
    database::CatalogRepository,
    error::IngestError,
    fanout::FanOutChannel,
    media_type::ImageMediaType,
    storage::{BlobStore, StoragePathGenerator},
};

/// The file part of an upload as declared by the client.
#[derive(Debug, Clone, Default)]
pub struct UploadFile {
    /// Name the client gave the file, if any.
    pub file_name: Option<String>,
    /// Declared MIME type of the part.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// One upload request, fields as received.
#[derive(Debug, Clone, Default)]
pub struct UploadSubmission {
    /// The file part, `None` when the request had none.
    pub file: Option<UploadFile>,
    /// Free text shown with the image. Required.
    pub description: Option<String>,
    /// Category name. Blank values count as absent.
    pub category: Option<String>,
}

/// Input that passed every check and is ready to be stored.
#[derive(Debug)]
struct ValidatedUpload {
    file: UploadFile,
    media_type: ImageMediaType,
    description: String,
    category: Option<String>,
}

impl UploadSubmission {
    /// Checks run in a fixed order: file presence, declared media type,
    /// then description. Nothing is stored before all of them pass.
    fn validate(self) -> Result<ValidatedUpload, IngestError> {
        let file = self.file.ok_or(IngestError::MissingFile)?;

        let declared = file.content_type.clone().unwrap_or_default();
        let media_type = ImageMediaType::from_content_type(&declared)
            .ok_or_else(|| {
                IngestError::UnsupportedMediaType(if declared.is_empty() {
                    "missing content type".to_string()
                } else {
                    declared
                })
            })?;

        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| {
                IngestError::Validation("description is required".to_string())
            })?;

        let category = self.category.filter(|c| !c.trim().is_empty());

        Ok(ValidatedUpload {
            file,
            media_type,
            description,
            category,
        })
    }
}

/// Accepts uploads and keeps blobs, catalog and viewers in step.
#[derive(Debug, Clone)]
pub struct IngestService {
    blobs: Arc<dyn BlobStore>,
    catalog: Arc<dyn CatalogRepository>,
    fanout: Arc<FanOutChannel>,
    paths: StoragePathGenerator,
}

impl IngestService {
    /// Wire the service to its stores and the fan-out channel.
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        catalog: Arc<dyn CatalogRepository>,
        fanout: Arc<FanOutChannel>,
        paths: StoragePathGenerator,
    ) -> Self {
        Self {
            blobs,
            catalog,
            fanout,
            paths,
        }
    }

    /// Accept one upload.
    ///
    /// The catalog store is the source of truth: the creation event is
    /// published only after the insert succeeds, and a publish that reaches
    /// nobody does not fail the upload. Failures are not retried here.
    pub async fn ingest(
        &self,
        submission: UploadSubmission,
    ) -> Result<CatalogEntry, IngestError> {
        let upload = submission.validate()?;

        let media_ref = self
            .paths
            .generate(upload.file.file_name.as_deref(), upload.media_type);
        self.blobs.put(&media_ref, &upload.file.bytes).await?;

        let pending = NewCatalogEntry::new(
            media_ref.clone(),
            upload.description,
            upload.category,
        );

        let entry = match self.catalog.insert(pending).await {
            Ok(entry) => entry,
            Err(err) => {
                if let Err(cleanup) = self.blobs.delete(&media_ref).await {
                    warn!(
                        media_ref = %media_ref,
                        error = %cleanup,
                        "failed to remove orphaned blob"
                    );
                }
                return Err(err.into());
            }
        };

        let report = self.fanout.publish(&EntryCreated::from(&entry));
        info!(
            entry_id = %entry.id,
            media_ref = %entry.media_ref,
            media_type = %upload.media_type,
            size = upload.file.bytes.len(),
            delivered = report.delivered,
            dropped = report.dropped,
            "image ingested"
        );

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(content_type: &str, description: Option<&str>) -> UploadSubmission {
        UploadSubmission {
            file: Some(UploadFile {
                file_name: Some("photo.jpg".into()),
                content_type: Some(content_type.into()),
                bytes: vec![0xff, 0xd8, 0xff],
            }),
            description: description.map(str::to_string),
            category: None,
        }
    }

    #[test]
    fn missing_file_wins_over_other_problems() {
        let err = UploadSubmission::default().validate().unwrap_err();
        assert!(matches!(err, IngestError::MissingFile));
    }

    #[test]
    fn media_type_is_checked_before_description() {
        let err = submission("text/plain", None).validate().unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedMediaType(ref t) if t == "text/plain"));
    }

    #[test]
    fn blank_description_is_rejected() {
        let err = submission("image/png", Some("   ")).validate().unwrap_err();
        assert!(matches!(err, IngestError::Validation(_)));
    }

    #[test]
    fn keeps_description_as_given_and_drops_blank_category() {
        let mut input = submission("image/jpeg", Some("  Cozy studio "));
        input.category = Some("  ".into());
        let upload = input.validate().unwrap();
        assert_eq!(upload.description, "  Cozy studio ");
        assert_eq!(upload.category, None);
        assert_eq!(upload.media_type, ImageMediaType::Jpeg);
    }
}
