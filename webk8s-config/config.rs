use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::ConfigError;

#[cfg(test)]
#[path = "./config.tests.rs"]
mod config_tests;

pub const APP_NAME: &str = "webk8s";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP server configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub assets: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            assets: PathBuf::from("./ui"),
        }
    }
}

/// Log streaming configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LogsConfig {
    pub tail_lines: i64,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self { tail_lines: 100 }
    }
}

/// Kubernetes cluster access configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClusterConfig {
    /// Timeout in seconds for listing namespaces.
    pub namespaces_timeout: u64,
    pub insecure: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            namespaces_timeout: 10,
            insecure: false,
        }
    }
}

impl ClusterConfig {
    /// Returns namespaces listing timeout as [`Duration`].
    pub fn namespaces_timeout(&self) -> Duration {
        Duration::from_secs(self.namespaces_timeout)
    }
}

/// Application configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logs: LogsConfig,

    #[serde(default)]
    pub cluster: ClusterConfig,
}

impl Config {
    /// Returns the default configuration path: `HOME/.webk8s/config.yaml`.
    pub fn default_path() -> PathBuf {
        match std::env::home_dir() {
            Some(path) => path.join(format!(".{APP_NAME}")).join("config.yaml"),
            None => PathBuf::from("config.yaml"),
        }
    }

    /// Loads the configuration from the specified file.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut file = File::open(path).await?;

        let mut config_str = String::new();
        file.read_to_string(&mut config_str).await?;

        Self::parse(&config_str)
    }

    /// Parses the configuration from YAML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str::<Config>(text)?)
    }

    /// Loads the configuration from `path` if provided, otherwise from the default location.\
    /// **Note** that a missing default file results in the default configuration,
    /// but any problem with an explicitly provided file is an error.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path).await;
        }

        let path = Self::default_path();
        match Self::load(&path).await {
            Ok(config) => Ok(config),
            Err(ConfigError::IoError(error)) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No configuration file at {}, using defaults", path.display());
                Ok(Self::default())
            },
            Err(error) => {
                tracing::error!("Cannot load config {}: {}", path.display(), error);
                Err(error)
            },
        }
    }
}
