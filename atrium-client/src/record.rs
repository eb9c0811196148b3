//! Catalog rows as the client holds them.

use chrono::{DateTime, Utc};

use atrium_model::{CatalogEntry, EntryCreated, EntryId, MediaRef};

/// One row of the client's catalog snapshot.
///
/// Rows fetched from the server are complete. Rows synthesized from a push
/// event may lack `id` and `created_at` until the next refresh replaces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    /// Store-assigned id. Absent on rows built from id-less events.
    pub id: Option<EntryId>,
    /// Locator of the image blob.
    pub media_ref: MediaRef,
    /// Free text shown with the image.
    pub description: String,
    /// Category name, if the entry has one.
    pub category: Option<String>,
    /// Creation time. Absent on rows built from events that omit it.
    pub created_at: Option<DateTime<Utc>>,
}

impl CatalogRecord {
    /// True until a refresh replaces this row with the stored entry.
    pub fn is_partial(&self) -> bool {
        self.id.is_none() || self.created_at.is_none()
    }

    /// Absolute URL of the image given the server's base URL.
    pub fn image_url(&self, base_url: &str) -> String {
        self.media_ref.resolve(base_url)
    }
}

impl From<CatalogEntry> for CatalogRecord {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: Some(entry.id),
            media_ref: entry.media_ref,
            description: entry.description,
            category: entry.category,
            created_at: Some(entry.created_at),
        }
    }
}

impl From<EntryCreated> for CatalogRecord {
    fn from(event: EntryCreated) -> Self {
        Self {
            id: event.id,
            media_ref: event.media_ref,
            description: event.description,
            category: event.category,
            created_at: event.created_at,
        }
    }
}
