//! # Atrium Core
//!
//! Domain services behind the Atrium image catalog.
//!
//! - [`ingest`]: validates an upload, writes the blob, persists a
//!   [`CatalogEntry`](atrium_model::CatalogEntry) and fans out a creation event
//! - [`fanout`]: best-effort, no-replay broadcast to connected viewers
//! - [`catalog`]: full-catalog reads
//! - [`storage`] and [`database`]: ports for the blob store and the catalog
//!   store, with filesystem, PostgreSQL and in-memory adapters
//!
//! ## Feature Flags
//!
//! - `database` (default): PostgreSQL catalog store via SQLx

pub mod api;
pub mod catalog;
pub mod database;
pub mod error;
pub mod fanout;
pub mod ingest;
pub mod media_type;
pub mod storage;

pub use catalog::CatalogQueryService;
pub use error::{BlobError, CatalogError, IngestError};
pub use fanout::{FanOutChannel, PublishReport, Subscription};
pub use ingest::{IngestService, UploadFile, UploadSubmission};
pub use media_type::ImageMediaType;

/// Embedded migrations for the PostgreSQL catalog store.
#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
