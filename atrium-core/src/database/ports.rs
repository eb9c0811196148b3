use async_trait::async_trait;
use atrium_model::{CatalogEntry, NewCatalogEntry};

use crate::error::CatalogResult;

/// Repository port for the append-only catalog.
///
/// Inserts are the only write; adapters rely on the backing store's native
/// insert atomicity and never update a record in place.
#[async_trait]
pub trait CatalogRepository: Send + Sync + std::fmt::Debug {
    /// Persist a new entry and return it with its store-assigned id.
    async fn insert(&self, entry: NewCatalogEntry) -> CatalogResult<CatalogEntry>;

    /// Every persisted entry in creation order.
    async fn list_all(&self) -> CatalogResult<Vec<CatalogEntry>>;

    /// Number of persisted entries. Doubles as a reachability check.
    async fn count(&self) -> CatalogResult<u64>;
}
