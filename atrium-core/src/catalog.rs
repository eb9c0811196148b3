//! Catalog reads.

use std::sync::Arc;

use atrium_model::CatalogEntry;
use tracing::error;

use crate::{database::CatalogRepository, error::CatalogResult};

/// Read side of the catalog. Returns the full snapshot; filtering is left
/// to clients.
#[derive(Debug, Clone)]
pub struct CatalogQueryService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogQueryService {
    /// Build a query service over `catalog`.
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// Every persisted entry in creation order.
    pub async fn list_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
        self.catalog.list_all().await.inspect_err(|err| {
            error!(error = %err, "failed to list catalog entries");
        })
    }

    /// Number of persisted entries.
    pub async fn count(&self) -> CatalogResult<u64> {
        self.catalog.count().await
    }
}
