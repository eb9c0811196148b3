use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use atrium_model::{CatalogEntry, EntryId, NewCatalogEntry};
use parking_lot::RwLock;

use super::ports::CatalogRepository;
use crate::error::{CatalogError, CatalogResult};

/// In-process catalog store. Used in tests and when no database is configured.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogRepository {
    entries: Arc<RwLock<Vec<CatalogEntry>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryCatalogRepository {
    /// Empty store that starts out available.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate the store becoming unreachable (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> CatalogResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CatalogError::Unavailable(
                "in-memory catalog store is offline".to_string(),
            ))
        }
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn insert(&self, entry: NewCatalogEntry) -> CatalogResult<CatalogEntry> {
        self.ensure_available()?;
        if entry.description.trim().is_empty() {
            return Err(CatalogError::InvalidRecord(
                "description is required".to_string(),
            ));
        }

        let stored = entry.into_entry(EntryId::new());
        self.entries.write().push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
        self.ensure_available()?;
        Ok(self.entries.read().clone())
    }

    async fn count(&self) -> CatalogResult<u64> {
        self.ensure_available()?;
        Ok(self.entries.read().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_model::MediaRef;

    fn new_entry(description: &str) -> NewCatalogEntry {
        NewCatalogEntry::new(
            MediaRef::new(format!("uploads/{description}.png")).unwrap(),
            description,
            None,
        )
    }

    #[tokio::test]
    async fn assigns_unique_ids_in_creation_order() {
        let repo = InMemoryCatalogRepository::new();
        let a = repo.insert(new_entry("a")).await.unwrap();
        let b = repo.insert(new_entry("b")).await.unwrap();

        assert_ne!(a.id, b.id);
        let listed = repo.list_all().await.unwrap();
        assert_eq!(listed, vec![a, b]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn offline_store_reports_unavailable() {
        let repo = InMemoryCatalogRepository::new();
        repo.set_available(false);

        assert!(matches!(
            repo.list_all().await,
            Err(CatalogError::Unavailable(_))
        ));
        assert!(repo.insert(new_entry("x")).await.is_err());

        repo.set_available(true);
        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
