use std::{fs, path::PathBuf, sync::LazyLock};

use thiserror::Error;

use super::{
    Config, ConfigMetadata, ConfigWarnings, CorsConfig, DatabaseConfig,
    FanOutConfig, ServerConfig, StorageConfig, UploadConfig,
    sources::{EnvConfig, FileConfig},
};

static DEFAULT_CONFIG_LOCATIONS: LazyLock<Vec<PathBuf>> = LazyLock::new(|| {
    vec![
        PathBuf::from("atrium.toml"),
        PathBuf::from("config/atrium.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
struct ConfigLoaderOptions {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

/// Layers defaults, an optional TOML file and the environment, in that
/// order of increasing precedence.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Resolve against an explicit environment snapshot. `.env` files are
    /// not consulted.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) = compose_config(file_config, env, config_path)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = match (&self.options.config_path, &env.config_path)
        {
            (Some(path), _) => (path.clone(), true),
            (None, Some(path)) => (path.clone(), true),
            (None, None) => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => (path.clone(), false),
                None => return Ok((None, None)),
            },
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;

        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();
    let defaults = Config::default();

    if config_path.is_none() {
        warnings.push_with_hint(
            "No atrium.toml detected; using defaults and environment variables",
            "Create atrium.toml or pass --config to pin server settings",
        );
    }

    for rejected in &env.rejected {
        warnings.push_with_hint(
            format!(
                "Ignoring {}={:?}: expected {}",
                rejected.key, rejected.value, rejected.expected
            ),
            format!(
                "Fix or unset {} to use the file or default value",
                rejected.key
            ),
        );
    }

    let FileConfig {
        server: file_server,
        database: file_database,
        storage: file_storage,
        upload: file_upload,
        fanout: file_fanout,
        cors: file_cors,
        dev_mode: file_dev_mode,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or(defaults.server.host),
        port: env
            .server_port
            .or(file_server.port)
            .unwrap_or(defaults.server.port),
    };

    let database = DatabaseConfig {
        url: env
            .database_url
            .or(file_database.url)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty()),
    };
    if database.url.is_none() {
        warnings.push_with_hint(
            "No database URL configured; catalog entries are kept in memory and lost on restart",
            "Set DATABASE_URL or database.url to persist the catalog in PostgreSQL",
        );
    }

    let public_prefix = env
        .public_prefix
        .or(file_storage.public_prefix)
        .map(|prefix| prefix.trim_matches('/').to_string())
        .unwrap_or(defaults.storage.public_prefix);
    if public_prefix.is_empty() || public_prefix.contains('/') {
        return Err(ConfigLoadError::Invalid {
            field: "storage.public_prefix",
            reason: "must be a single non-empty path segment".to_string(),
        });
    }

    let storage = StorageConfig {
        upload_root: env
            .upload_root
            .or(file_storage.upload_root)
            .unwrap_or(defaults.storage.upload_root),
        public_prefix,
    };

    let max_bytes = env
        .upload_max_bytes
        .or(file_upload.max_bytes)
        .unwrap_or(defaults.upload.max_bytes);
    if max_bytes == 0 {
        return Err(ConfigLoadError::Invalid {
            field: "upload.max_bytes",
            reason: "must be greater than zero".to_string(),
        });
    }

    let subscriber_buffer = env
        .subscriber_buffer
        .or(file_fanout.subscriber_buffer)
        .unwrap_or(defaults.fanout.subscriber_buffer);
    if subscriber_buffer == 0 {
        return Err(ConfigLoadError::Invalid {
            field: "fanout.subscriber_buffer",
            reason: "must be greater than zero".to_string(),
        });
    }

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or(defaults.cors.allowed_origins),
        allowed_methods: file_cors
            .allowed_methods
            .unwrap_or(defaults.cors.allowed_methods),
        allowed_headers: file_cors
            .allowed_headers
            .unwrap_or(defaults.cors.allowed_headers),
    };

    let dev_mode = env.dev_mode.or(file_dev_mode).unwrap_or(false);
    if dev_mode {
        warnings.push("Development mode enabled");
    }

    let config = Config {
        server,
        database,
        storage,
        upload: UploadConfig { max_bytes },
        fanout: FanOutConfig { subscriber_buffer },
        cors,
        dev_mode,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    };

    Ok((config, warnings))
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error(transparent)]
    Dotenv(#[from] dotenvy::Error),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

/// `*` accepts any origin.
pub(crate) fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub(crate) fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()]
}

pub(crate) fn default_cors_headers() -> Vec<String> {
    vec!["Content-Type".to_string()]
}
