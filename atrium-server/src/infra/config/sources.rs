use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub storage: FileStorageConfig,
    #[serde(default)]
    pub upload: FileUploadConfig,
    #[serde(default)]
    pub fanout: FileFanOutConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileStorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_prefix: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileUploadConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileFanOutConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_buffer: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_headers: Option<Vec<String>>,
}

/// Values picked up from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub upload_root: Option<PathBuf>,
    pub public_prefix: Option<String>,
    pub upload_max_bytes: Option<usize>,
    pub subscriber_buffer: Option<usize>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub dev_mode: Option<bool>,
    /// Variables that were set but could not be parsed. They are ignored
    /// and reported as warnings.
    pub rejected: Vec<RejectedEnvValue>,
}

/// An environment variable whose value did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEnvValue {
    pub key: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests need not touch the real
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut reader = EnvReader {
            lookup,
            rejected: Vec::new(),
        };

        let port = reader.first_of(&["SERVER_PORT", "PORT"]);
        let server_port = reader.parsed::<u16>(port, "a port number");
        let max_bytes = reader.first_of(&["UPLOAD_MAX_BYTES"]);
        let upload_max_bytes =
            reader.parsed::<usize>(max_bytes, "a byte count");
        let buffer = reader.first_of(&["FANOUT_SUBSCRIBER_BUFFER"]);
        let subscriber_buffer =
            reader.parsed::<usize>(buffer, "a queue length");
        let dev_mode = reader.flag("DEV_MODE");

        Self {
            config_path: reader.get("ATRIUM_CONFIG").map(PathBuf::from),
            server_host: reader.get("SERVER_HOST"),
            server_port,
            database_url: reader
                .first_of(&["DATABASE_URL", "CATALOG_DATABASE_URL"])
                .map(|(_, value)| value),
            upload_root: reader.get("UPLOAD_ROOT").map(PathBuf::from),
            public_prefix: reader.get("UPLOAD_PUBLIC_PREFIX"),
            upload_max_bytes,
            subscriber_buffer,
            cors_allowed_origins: reader.get("CORS_ALLOWED_ORIGINS").map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            dev_mode,
            rejected: reader.rejected,
        }
    }
}

struct EnvReader<F> {
    lookup: F,
    rejected: Vec<RejectedEnvValue>,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Blank values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn first_of(
        &self,
        keys: &[&'static str],
    ) -> Option<(&'static str, String)> {
        keys.iter()
            .find_map(|key| self.get(key).map(|value| (*key, value)))
    }

    fn parsed<T: std::str::FromStr>(
        &mut self,
        raw: Option<(&'static str, String)>,
        expected: &'static str,
    ) -> Option<T> {
        let (key, value) = raw?;
        match value.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.rejected.push(RejectedEnvValue {
                    key,
                    value,
                    expected,
                });
                None
            }
        }
    }

    fn flag(&mut self, key: &'static str) -> Option<bool> {
        let value = self.get(key)?;
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => {
                self.rejected.push(RejectedEnvValue {
                    key,
                    value,
                    expected: "true or false",
                });
                None
            }
        }
    }
}
