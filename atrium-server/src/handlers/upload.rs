use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use tracing::debug;

use atrium_core::{
    IngestError, UploadFile, UploadSubmission, api::routes::fields,
};
use atrium_model::UploadResponse;

use crate::infra::{app_state::AppState, errors::AppResult};

/// Accept one multipart upload and echo the created entry.
///
/// Only the first `file` part is used; unknown fields are ignored. A body
/// that is not multipart at all carries no file.
pub async fn upload_image_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let multipart = multipart.map_err(|rejection| {
        debug!(error = %rejection, "upload is not a multipart body");
        IngestError::MissingFile
    })?;
    let submission = read_submission(multipart).await?;
    let entry = state.ingest.ingest(submission).await?;
    Ok(Json(UploadResponse::new(entry)))
}

async fn read_submission(
    mut multipart: Multipart,
) -> AppResult<UploadSubmission> {
    let mut submission = UploadSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            fields::FILE if submission.file.is_none() => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                submission.file = Some(UploadFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            fields::DESCRIPTION => {
                submission.description = Some(field.text().await?);
            }
            fields::CATEGORY => {
                submission.category = Some(field.text().await?);
            }
            other => {
                debug!(field = other, "ignoring multipart field");
            }
        }
    }

    Ok(submission)
}
