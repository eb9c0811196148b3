//! Seam between the cache and whatever serves the catalog.

use async_trait::async_trait;

use atrium_model::CatalogEntry;

use crate::error::ClientError;

/// Where a [`crate::CatalogCache`] gets its snapshot from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// The full catalog in creation order.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ClientError>;
}
