pub mod loader;
pub mod sources;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};

use std::path::PathBuf;

use atrium_core::fanout::DEFAULT_SUBSCRIBER_BUFFER;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    pub fanout: FanOutConfig,
    pub cors: CorsConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// `None` selects the in-memory catalog store.
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_root: PathBuf,
    /// First segment of every media reference, also the mount point of the
    /// static blob route.
    pub public_prefix: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct FanOutConfig {
    pub subscriber_buffer: usize,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
            database: DatabaseConfig::default(),
            storage: StorageConfig {
                upload_root: PathBuf::from("uploads"),
                public_prefix: "uploads".to_string(),
            },
            upload: UploadConfig {
                max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
            },
            fanout: FanOutConfig {
                subscriber_buffer: DEFAULT_SUBSCRIBER_BUFFER,
            },
            cors: CorsConfig {
                allowed_origins: loader::default_cors_origins(),
                allowed_methods: loader::default_cors_methods(),
                allowed_headers: loader::default_cors_headers(),
            },
            dev_mode: false,
            metadata: ConfigMetadata::default(),
        }
    }
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
