// crates/file-router-server/src/config.rs
// ============================================================================
// Module: Server Configuration
// Description: TOML configuration for the File Router server.
// Purpose: Load, override, and validate deployment configuration fail-closed.
// Dependencies: file-router-providers, file-router-storage-s3, file-router-store-postgres, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is a single TOML file resolved from an explicit path, the
//! `FILE_ROUTER_CONFIG` environment variable, or `file-router.toml` in the
//! working directory. The datastore connection string may be supplied
//! out-of-band through `FILE_ROUTER_DB_URL` so credentials stay out of the
//! file. Validation is fail-closed: an invalid configuration never yields a
//! partially wired server.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use file_router_providers::HttpSourceConfig;
use file_router_storage_s3::S3StorageConfig;
use file_router_store_postgres::PostgresStoreConfig;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the configuration file path.
pub(crate) const CONFIG_ENV_VAR: &str = "FILE_ROUTER_CONFIG";

/// Environment variable overriding the datastore connection string.
pub(crate) const DB_URL_ENV_VAR: &str = "FILE_ROUTER_DB_URL";

/// Default configuration file name.
const DEFAULT_CONFIG_PATH: &str = "file-router.toml";

/// Maximum accepted configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("config io error: {0}")]
    Io(String),
    /// Parsing the configuration file failed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The configuration is internally invalid.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Decision log file path; stderr when unset.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            log_file: None,
        }
    }
}

impl ServerConfig {
    /// Validates the listener settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid("invalid bind address".to_string()))?;
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Storage container names for the three relocation targets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerConfig {
    /// Container receiving successfully routed files.
    pub processed: String,
    /// Container receiving files with missing vendor metadata.
    pub quarantine: String,
    /// Container receiving files whose vendor has no routing rule.
    pub unmapped: String,
}

impl ContainerConfig {
    /// Validates that every container name is set.
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("containers.processed", &self.processed),
            ("containers.quarantine", &self.quarantine),
            ("containers.unmapped", &self.unmapped),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must be set")));
            }
        }
        Ok(())
    }
}

/// Report publication configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Bucket receiving report artifacts.
    pub bucket: String,
}

impl ReportConfig {
    /// Validates the report settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::Invalid("report.bucket must be set".to_string()));
        }
        Ok(())
    }
}

/// Top-level File Router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileRouterConfig {
    /// HTTP listener configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Relocation target containers.
    pub containers: ContainerConfig,
    /// Routing-table artifact source configuration.
    pub routing_table: HttpSourceConfig,
    /// Audit datastore configuration.
    #[serde(default)]
    pub store: PostgresStoreConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: S3StorageConfig,
    /// Report publication configuration.
    pub report: ReportConfig,
}

impl FileRouterConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        if let Ok(connection) = std::env::var(DB_URL_ENV_VAR)
            && !connection.trim().is_empty()
        {
            config.store.connection = connection;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.containers.validate()?;
        self.report.validate()?;
        if self.routing_table.url.trim().is_empty() {
            return Err(ConfigError::Invalid("routing_table.url must be set".to_string()));
        }
        if self.store.connection.trim().is_empty() {
            return Err(ConfigError::Invalid("store.connection must be set".to_string()));
        }
        if self.store.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "store.max_connections must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default bind address.
fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Default maximum request body size.
const fn default_max_body_bytes() -> usize {
    64 * 1024
}

/// Resolves the configuration file path from the explicit argument, the
/// environment, or the default location.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
        && !env_path.trim().is_empty()
    {
        return PathBuf::from(env_path);
    }
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
