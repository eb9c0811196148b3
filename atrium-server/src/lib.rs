//! # Atrium Server
//!
//! axum service in front of [`atrium_core`]: multipart image uploads, the
//! catalog listing, a WebSocket stream of `entry_created` frames and
//! read-only access to stored blobs.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
