pub use self::config::{APP_NAME, APP_VERSION, ClusterConfig, Config, LogsConfig, ServerConfig};
pub use self::errors::ConfigError;

mod config;
mod errors;
