//! Core data model definitions shared across Atrium crates.
#![allow(missing_docs)]

pub mod api;
pub mod category;
pub mod entry;
pub mod events;
pub mod ids;

pub use api::{ApiErrorBody, ErrorKind, UploadResponse, UPLOAD_SUCCESS_MESSAGE};
pub use category::{Category, DEFAULT_CATEGORIES};
pub use entry::{CatalogEntry, NewCatalogEntry};
pub use events::{EntryCreated, SocketFrame};
pub use ids::{EntryId, MediaRef};
