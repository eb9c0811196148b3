use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use atrium_core::api::routes::v1;

use crate::{
    handlers::{events_handler, list_images_handler, upload_image_handler},
    infra::app_state::AppState,
};

/// Versioned API routes
pub fn create_v1_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            v1::images::COLLECTION,
            get(list_images_handler).post(upload_image_handler),
        )
        .route(v1::events::STREAM, get(events_handler))
        .layer(DefaultBodyLimit::max(state.config.upload.max_bytes))
}

/// Unversioned aliases served for clients of the first backend.
pub fn create_legacy_router(state: &AppState) -> Router<AppState> {
    use atrium_core::api::routes::legacy;

    Router::new()
        .route(legacy::UPLOAD, post(upload_image_handler))
        .route(legacy::IMAGES, get(list_images_handler))
        .layer(DefaultBodyLimit::max(state.config.upload.max_bytes))
}
