// ABOUTME: Configuration loading and validation for the remedy server.
// ABOUTME: Reads REMEDY_* environment variables and enforces remote-access constraints.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("REMEDY_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("REMEDY_ALLOW_REMOTE is true but REMEDY_API_KEY is not set; refusing to start without authentication")]
    RemoteWithoutKey,

    #[error("bind address {0} is not loopback; set REMEDY_ALLOW_REMOTE=true to accept remote connections")]
    NonLoopbackBind(SocketAddr),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RemedyConfig {
    pub data_dir: PathBuf,
    pub medicines_file: PathBuf,
    pub disease_info_file: PathBuf,
    pub bind: SocketAddr,
    pub allow_remote: bool,
    pub api_key: Option<String>,
}

impl RemedyConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - REMEDY_DATA_DIR: directory holding both JSON files (default: .)
    /// - REMEDY_MEDICINES_FILE: treatment file, relative to the data dir (default: disease_medicines.json)
    /// - REMEDY_DISEASE_INFO_FILE: disease info file, relative to the data dir (default: disease_info.json)
    /// - REMEDY_BIND: socket address to bind (default: 127.0.0.1:8000)
    /// - REMEDY_ALLOW_REMOTE: allow non-loopback binds (default: false)
    /// - REMEDY_API_KEY: key expected in X-API-KEY for mutating requests (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source. Only parse
    /// errors are reported here; call `validate` once overrides are applied.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = var("REMEDY_DATA_DIR")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let medicines_file = var("REMEDY_MEDICINES_FILE")
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| "disease_medicines.json".to_string())
            .into();

        let disease_info_file = var("REMEDY_DISEASE_INFO_FILE")
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| "disease_info.json".to_string())
            .into();

        let bind_str = var("REMEDY_BIND").unwrap_or_else(|| "127.0.0.1:8000".to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let allow_remote = var("REMEDY_ALLOW_REMOTE")
            .map(|v| v == "true" || v == "1" || v == "yes")
            .unwrap_or(false);

        let api_key = var("REMEDY_API_KEY").filter(|k| !k.is_empty());

        Ok(Self {
            data_dir,
            medicines_file,
            disease_info_file,
            bind,
            allow_remote,
            api_key,
        })
    }

    /// Replace env values with command-line flags where given.
    pub fn with_overrides(mut self, bind: Option<SocketAddr>, data_dir: Option<PathBuf>) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    /// Enforce the remote-access rules before serving.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allow_remote && self.api_key.is_none() {
            return Err(ConfigError::RemoteWithoutKey);
        }
        if !self.allow_remote && !self.bind.ip().is_loopback() {
            return Err(ConfigError::NonLoopbackBind(self.bind));
        }
        Ok(())
    }

    /// Full path of the treatment file. An absolute REMEDY_MEDICINES_FILE
    /// ignores the data dir.
    pub fn medicines_path(&self) -> PathBuf {
        self.data_dir.join(&self.medicines_file)
    }

    pub fn disease_info_path(&self) -> PathBuf {
        self.data_dir.join(&self.disease_info_file)
    }
}
