//! Configuration file structure
//!
//! Every key is optional. Precedence, lowest to highest: built-in
//! defaults, config file, environment (`HBNB_API_HOST`, `HBNB_API_PORT`,
//! `HBNB_TYPE_STORAGE`), command-line flags.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::UnknownFieldPolicy;
use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::storage::{FileStorage, MemoryStorage, Storage};

use super::errors::{CliError, CliResult};

pub const ENV_HOST: &str = "HBNB_API_HOST";
pub const ENV_PORT: &str = "HBNB_API_PORT";
pub const ENV_STORAGE: &str = "HBNB_TYPE_STORAGE";

/// Which storage gateway backs the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::File => "file",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => Err(CliError::config_error(format!(
                "Invalid storage backend: '{}'. Must be 'memory' or 'file'.",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub http: HttpServerConfig,

    /// Storage backend (default "memory")
    #[serde(default)]
    pub storage: StorageBackend,

    /// JSON file used by the file backend (default "file.json")
    #[serde(default = "default_file_path")]
    pub file_path: String,

    /// Handling of body keys a resource kind does not declare (default "accept")
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_file_path() -> String {
    "file.json".to_string()
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            storage: StorageBackend::default(),
            file_path: default_file_path(),
            unknown_fields: UnknownFieldPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, else start from defaults; then apply
    /// the process environment
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.http.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.parse().map_err(|_| {
                CliError::config_error(format!("Invalid {}: '{}'", ENV_PORT, port))
            })?;
        }
        if let Some(storage) = lookup(ENV_STORAGE) {
            self.storage = storage.parse()?;
        }
        Ok(())
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }
        if self.storage == StorageBackend::File && self.file_path.trim().is_empty() {
            return Err(CliError::config_error(
                "file_path is required when storage is 'file'",
            ));
        }
        Ok(())
    }

    /// Open the configured storage gateway
    pub fn open_storage(&self) -> CliResult<Arc<dyn Storage>> {
        match self.storage {
            StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
            StorageBackend::File => Ok(Arc::new(FileStorage::open(&self.file_path)?)),
        }
    }
}
