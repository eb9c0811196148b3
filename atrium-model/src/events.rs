use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::CatalogEntry;
use crate::ids::{EntryId, MediaRef};

/// Payload fanned out to connected viewers after a successful ingest.
///
/// Only `description` and `media_ref` are guaranteed; the remaining fields
/// are filled in when the publisher knows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCreated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    pub media_ref: MediaRef,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&CatalogEntry> for EntryCreated {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: Some(entry.id),
            media_ref: entry.media_ref.clone(),
            description: entry.description.clone(),
            category: entry.category.clone(),
            created_at: Some(entry.created_at),
        }
    }
}

/// Named frame carried over the real-time socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum SocketFrame {
    EntryCreated(EntryCreated),
}

impl SocketFrame {
    pub const ENTRY_CREATED: &'static str = "entry_created";

    pub fn name(&self) -> &'static str {
        match self {
            SocketFrame::EntryCreated(_) => Self::ENTRY_CREATED,
        }
    }
}
