//! Route paths and form field names shared by the server and clients.

macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions shared by the server and clients
pub mod v1 {
    /// Prefix of every versioned route.
    pub const ROOT: &str = "/api/v1";
    /// Version segment of [`ROOT`].
    pub const VERSION: &str = "v1";

    /// Catalog collection.
    pub mod images {
        /// `POST` uploads an image, `GET` lists the catalog.
        pub const COLLECTION: &str = v1_path!("/images");
    }

    /// Push notifications.
    pub mod events {
        /// WebSocket endpoint streaming `entry_created` frames.
        pub const STREAM: &str = v1_path!("/events");
    }
}

/// Unversioned paths kept for clients built against the first backend.
pub mod legacy {
    /// `POST` alias of the versioned upload route.
    pub const UPLOAD: &str = "/upload";
    /// `GET` alias of the versioned catalog route.
    pub const IMAGES: &str = "/api/images";
}

/// Liveness endpoints, outside the versioned tree.
pub mod system {
    /// Liveness check that never touches a store.
    pub const PING: &str = "/ping";
    /// Reports whether the catalog store answers.
    pub const HEALTH: &str = "/health";
}

/// Multipart field names accepted by the upload endpoint.
pub mod fields {
    /// The image part.
    pub const FILE: &str = "file";
    /// Required free text.
    pub const DESCRIPTION: &str = "description";
    /// Optional category name.
    pub const CATEGORY: &str = "category";
}
