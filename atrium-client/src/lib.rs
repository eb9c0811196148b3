//! # Atrium Client
//!
//! Client side of the Atrium catalog: an HTTP [`ApiClient`], a
//! [`CatalogCache`] holding the fetched snapshot and the active filter, and
//! an [`EventFeed`] that turns socket frames into
//! [`EntryCreated`](atrium_model::EntryCreated) events for
//! [`CatalogCache::on_entry_created`].

pub mod api_client;
pub mod cache;
pub mod error;
pub mod events;
pub mod filter;
pub mod record;
pub mod source;

pub use api_client::{ApiClient, UploadRequest};
pub use cache::CatalogCache;
pub use error::ClientError;
pub use events::{EventFeed, decode_socket_frame};
pub use filter::{FilterState, derive_view};
pub use record::CatalogRecord;
pub use source::CatalogSource;
