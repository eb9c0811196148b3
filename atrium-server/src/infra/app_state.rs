use std::{fmt, sync::Arc};

use atrium_core::{
    CatalogQueryService, FanOutChannel, IngestService,
    database::CatalogRepository,
    storage::{BlobStore, StoragePathGenerator},
};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ingest: Arc<IngestService>,
    pub catalog: Arc<CatalogQueryService>,
    pub fanout: Arc<FanOutChannel>,
    pub blobs: Arc<dyn BlobStore>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("subscribers", &self.fanout.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the services over the given store adapters.
    pub fn new(
        config: Config,
        blobs: Arc<dyn BlobStore>,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        let fanout =
            Arc::new(FanOutChannel::with_buffer(config.fanout.subscriber_buffer));
        let paths = StoragePathGenerator::new(config.storage.public_prefix.clone());

        let ingest = IngestService::new(
            Arc::clone(&blobs),
            Arc::clone(&catalog),
            Arc::clone(&fanout),
            paths,
        );

        Self {
            config: Arc::new(config),
            ingest: Arc::new(ingest),
            catalog: Arc::new(CatalogQueryService::new(catalog)),
            fanout,
            blobs,
        }
    }
}
