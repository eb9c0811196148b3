use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{EntryId, MediaRef};

/// A persisted catalog record describing one uploaded image.
///
/// Entries are append-only: once the store assigns an `id` nothing about
/// the record changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub media_ref: MediaRef,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An entry that has been validated but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogEntry {
    pub media_ref: MediaRef,
    pub description: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewCatalogEntry {
    pub fn new(
        media_ref: MediaRef,
        description: impl Into<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            media_ref,
            description: description.into(),
            category,
            created_at: Utc::now(),
        }
    }

    /// Attach the store-assigned identifier.
    pub fn into_entry(self, id: EntryId) -> CatalogEntry {
        CatalogEntry {
            id,
            media_ref: self.media_ref,
            description: self.description,
            category: self.category,
            created_at: self.created_at,
        }
    }
}

impl CatalogEntry {
    pub fn is_uncategorized(&self) -> bool {
        self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_with_snake_case_fields() {
        let entry = NewCatalogEntry::new(
            MediaRef::new("uploads/1.jpg").unwrap(),
            "Modern loft",
            Some("Apartments".into()),
        )
        .into_entry(EntryId::new());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["media_ref"], "uploads/1.jpg");
        assert_eq!(json["description"], "Modern loft");
        assert_eq!(json["category"], "Apartments");
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn missing_category_deserializes_as_uncategorized() {
        let raw = r#"{
            "id": "0190f1e4-8a5c-7c2e-9b1a-4c2d3e4f5a6b",
            "media_ref": "uploads/2.png",
            "description": "Beach villa",
            "created_at": "2024-07-01T12:00:00Z"
        }"#;
        let entry: CatalogEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.is_uncategorized());
    }
}
