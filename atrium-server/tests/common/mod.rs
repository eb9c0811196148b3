#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use tempfile::TempDir;

use atrium_core::{
    database::InMemoryCatalogRepository,
    storage::{LocalBlobStore, MemoryBlobStore},
};
use atrium_server::{AppState, create_app, infra::config::Config};

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub catalog: Arc<InMemoryCatalogRepository>,
    pub upload_root: TempDir,
}

fn test_config(upload_root: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage.upload_root = upload_root.path().to_path_buf();
    config.upload.max_bytes = 64 * 1024;
    config
}

/// Router over an in-memory catalog and a blob store rooted in a temp dir.
pub async fn build_test_app() -> Result<TestApp> {
    let upload_root = tempfile::tempdir()?;
    let config = test_config(&upload_root);

    let blobs = LocalBlobStore::new(upload_root.path(), "uploads");
    blobs.ensure_root().await?;
    let catalog = Arc::new(InMemoryCatalogRepository::new());

    let state = AppState::new(config, Arc::new(blobs), catalog.clone());
    let server = TestServer::builder()
        .build(create_app(state.clone()))
        .map_err(|err| anyhow!(err.to_string()))?;

    Ok(TestApp {
        server,
        state,
        catalog,
        upload_root,
    })
}

/// Same wiring with a blob store whose writes can be made to fail.
pub async fn build_test_app_with_memory_blobs()
-> Result<(TestApp, MemoryBlobStore)> {
    let upload_root = tempfile::tempdir()?;
    let config = test_config(&upload_root);

    let blobs = MemoryBlobStore::new();
    let catalog = Arc::new(InMemoryCatalogRepository::new());

    let state = AppState::new(config, Arc::new(blobs.clone()), catalog.clone());
    let server = TestServer::builder()
        .build(create_app(state.clone()))
        .map_err(|err| anyhow!(err.to_string()))?;

    Ok((
        TestApp {
            server,
            state,
            catalog,
            upload_root,
        },
        blobs,
    ))
}

pub fn image_form(
    file_name: &str,
    mime: &str,
    bytes: &[u8],
    description: &str,
    category: Option<&str>,
) -> MultipartForm {
    let file = Part::bytes(bytes.to_vec())
        .file_name(file_name.to_string())
        .mime_type(mime.to_string());

    let mut form = MultipartForm::new()
        .add_part("file", file)
        .add_text("description", description.to_string());
    if let Some(category) = category {
        form = form.add_text("category", category.to_string());
    }
    form
}
