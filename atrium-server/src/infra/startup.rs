use std::sync::Arc;

use anyhow::Context;
use atrium_core::{
    database::{
        CatalogRepository, InMemoryCatalogRepository, PostgresCatalogRepository,
    },
    storage::{BlobStore, LocalBlobStore},
};
use tracing::{info, warn};

use crate::infra::{app_state::AppState, config::Config};

/// Connect the configured adapters and assemble the application state.
pub async fn build_app_state(config: Config) -> anyhow::Result<AppState> {
    let catalog: Arc<dyn CatalogRepository> = match &config.database.url {
        Some(url) => {
            let repo = PostgresCatalogRepository::connect(url)
                .await
                .context("failed to connect to the catalog database")?;
            repo.initialize_schema()
                .await
                .context("failed to apply catalog migrations")?;
            info!("catalog store: postgres");
            Arc::new(repo)
        }
        None => {
            warn!("catalog store: in-memory (entries are lost on restart)");
            Arc::new(InMemoryCatalogRepository::new())
        }
    };

    let local = LocalBlobStore::new(
        config.storage.upload_root.clone(),
        config.storage.public_prefix.clone(),
    );
    local.ensure_root().await.with_context(|| {
        format!(
            "failed to create upload root {}",
            config.storage.upload_root.display()
        )
    })?;
    info!(root = %local.root().display(), "blob store ready");
    let blobs: Arc<dyn BlobStore> = Arc::new(local);

    Ok(AppState::new(config, blobs, catalog))
}
