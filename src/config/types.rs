//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_log_filter, default_service_name, default_true};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Service identity and switches.
    #[serde(default)]
    pub service: ServiceConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Channel bindings applied at startup, in file order.
    #[serde(default, rename = "binding")]
    pub bindings: Vec<BindingSeed>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Name used in logs (default: "chanbind").
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Collect Prometheus metrics (default: true).
    #[serde(default = "default_true")]
    pub metrics: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            metrics: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

/// A channel binding declared in the config file.
///
/// ```toml
/// [[binding]]
/// channel = "ops"
/// project = "OPS"
/// restricted = true
/// admin = "alice"
/// admins = ["carol"]
/// members = ["bob"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BindingSeed {
    pub channel: String,
    pub project: String,
    #[serde(default)]
    pub restricted: bool,
    /// Member that registers the channel and becomes its first admin.
    pub admin: String,
    /// Additional admins, added by `admin`.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Basic members, added by `admin`.
    #[serde(default)]
    pub members: Vec<String>,
}
