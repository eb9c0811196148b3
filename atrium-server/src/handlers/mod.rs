//! HTTP and WebSocket request handlers

pub mod catalog;
pub mod system;
pub mod upload;
pub mod websocket;

pub use catalog::list_images_handler;
pub use system::{health_handler, ping_handler};
pub use upload::upload_image_handler;
pub use websocket::events_handler;
