//! # Configuration
//!
//! Application configuration loading and management.
//!
//! # Configuration Sources
//!
//! Configuration is loaded in the following order (later sources override earlier):
//! 1. Default values
//! 2. Configuration file (if exists)
//! 3. Environment variables (prefixed with `CONTAS_`)
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `CONTAS_CONFIG_FILE` | Configuration file path | `config.toml` |
//! | `CONTAS_REST_HOST` | REST server host | `0.0.0.0` |
//! | `CONTAS_REST_PORT` | REST server port | `8001` |
//! | `CONTAS_REST_LOG_HEADERS` | Log request headers at debug level | `false` |
//! | `CONTAS_LOG_LEVEL` | Log level | `info` |
//! | `CONTAS_LOG_FORMAT` | Log format (json/pretty) | `json` |
//! | `CONTAS_DATABASE_BACKEND` | Storage backend (postgres/memory) | `postgres` |
//! | `CONTAS_DATABASE_URL` | PostgreSQL URL | `postgres://localhost/contas` |
//! | `CONTAS_MONTHLY_ENTRY_LIMIT` | Entries allowed per due month | `5` |
//! | `CONTAS_SERVICE_NAME` | Service name | `contas-api` |
//! | `CONTAS_ENVIRONMENT` | Deployment environment | `development` |
//!
//! # Examples
//!
//! ```ignore
//! use contas_api::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("REST server: {}:{}", config.rest.host, config.rest.port);
//! ```

use crate::domain::services::MonthlyQuota;
use crate::infrastructure::persistence::postgres::PoolSettings;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse configuration.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Invalid configuration value.
    #[error("invalid config value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// REST/HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Server host address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "default_rest_port")]
    pub port: u16,

    /// Enable permissive CORS.
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log request headers, with credentials redacted, at debug level.
    #[serde(default)]
    pub log_headers: bool,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_rest_port(),
            enable_cors: true,
            log_headers: false,
        }
    }
}

impl RestConfig {
    /// Returns the socket address for the REST server.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be parsed.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::invalid("rest.host:port", format!("{e}")))
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (structured logging).
    #[default]
    Json,
    /// Pretty format (human-readable).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level or `EnvFilter` directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include target (module path) in logs.
    #[serde(default = "default_true")]
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Json,
            include_target: true,
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Where entries and counterparties are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL through a connection pool.
    #[default]
    Postgres,
    /// Process memory; lost on restart.
    Memory,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Storage backend.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database URL.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum connection pool size.
    #[serde(default = "default_pool_size")]
    pub max_connections: u32,

    /// Minimum connection pool size.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds.
    #[serde(default = "default_connection_timeout")]
    pub connect_timeout_secs: u64,

    /// Apply embedded migrations at startup.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: default_database_url(),
            max_connections: default_pool_size(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connection_timeout(),
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Returns the pool settings for the PostgreSQL backend.
    #[must_use]
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            acquire_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

// ============================================================================
// Ledger Configuration
// ============================================================================

/// Business rule settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Entries a due month may hold before creations are refused.
    #[serde(default = "default_monthly_entry_limit")]
    pub monthly_entry_limit: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            monthly_entry_limit: default_monthly_entry_limit(),
        }
    }
}

impl LedgerConfig {
    /// Returns the monthly quota built from this configuration.
    #[must_use]
    pub fn quota(&self) -> MonthlyQuota {
        MonthlyQuota::new(self.monthly_entry_limit)
    }
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// REST server configuration.
    #[serde(default)]
    pub rest: RestConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Business rule configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Service name for tracing.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Environment (development, staging, production).
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rest: RestConfig::default(),
            log: LogConfig::default(),
            database: DatabaseConfig::default(),
            ledger: LedgerConfig::default(),
            service_name: default_service_name(),
            environment: default_environment(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables and optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let config_path =
            std::env::var("CONTAS_CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        if Path::new(&config_path).exists() {
            config = Self::from_file(&config_path)?;
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `CONTAS_*` overrides read through `lookup`.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // REST configuration
        if let Some(host) = lookup("CONTAS_REST_HOST") {
            self.rest.host = host;
        }
        if let Some(port) = lookup("CONTAS_REST_PORT")
            && let Ok(p) = port.parse()
        {
            self.rest.port = p;
        }
        if let Some(flag) = lookup("CONTAS_REST_LOG_HEADERS")
            && let Ok(f) = flag.parse()
        {
            self.rest.log_headers = f;
        }

        // Logging configuration
        if let Some(level) = lookup("CONTAS_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Some(format) = lookup("CONTAS_LOG_FORMAT") {
            self.log.format = match format.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                _ => LogFormat::Json,
            };
        }

        // Database configuration
        if let Some(backend) = lookup("CONTAS_DATABASE_BACKEND") {
            match backend.to_lowercase().as_str() {
                "memory" => self.database.backend = StorageBackend::Memory,
                "postgres" => self.database.backend = StorageBackend::Postgres,
                _ => {}
            }
        }
        if let Some(url) = lookup("CONTAS_DATABASE_URL") {
            self.database.url = url;
        }

        // Ledger configuration
        if let Some(limit) = lookup("CONTAS_MONTHLY_ENTRY_LIMIT")
            && let Ok(l) = limit.parse()
        {
            self.ledger.monthly_entry_limit = l;
        }

        // Service configuration
        if let Some(name) = lookup("CONTAS_SERVICE_NAME") {
            self.service_name = name;
        }
        if let Some(env) = lookup("CONTAS_ENVIRONMENT") {
            self.environment = env;
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rest.socket_addr()?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "log.level",
                format!(
                    "invalid log level '{}', must be one of: {:?}",
                    self.log.level, valid_levels
                ),
            ));
        }

        if self.database.backend == StorageBackend::Postgres {
            if self.database.url.trim().is_empty() {
                return Err(ConfigError::invalid("database.url", "must not be empty"));
            }
            if self.database.max_connections == 0 {
                return Err(ConfigError::invalid(
                    "database.max_connections",
                    "must be at least 1",
                ));
            }
            if self.database.min_connections > self.database.max_connections {
                return Err(ConfigError::invalid(
                    "database.min_connections",
                    "must not exceed max_connections",
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Default Value Functions
// ============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_rest_port() -> u16 {
    8001
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_url() -> String {
    "postgres://localhost/contas".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_monthly_entry_limit() -> u64 {
    MonthlyQuota::DEFAULT_LIMIT
}

fn default_service_name() -> String {
    "contas-api".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.rest.port, 8001);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert_eq!(config.ledger.monthly_entry_limit, 5);
    }

    #[test]
    fn rest_config_socket_addr() {
        let addr = RestConfig::default().socket_addr().unwrap();
        assert_eq!(addr.port(), 8001);
    }

    #[test]
    fn rest_config_invalid_address() {
        let config = RestConfig {
            host: "invalid host with spaces".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn app_config_validate_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn app_config_validate_invalid_log_level() {
        let mut config = AppConfig::default();
        config.log.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn pool_bounds_are_checked_only_for_postgres() {
        let mut config = AppConfig::default();
        config.database.min_connections = 20;
        assert!(config.validate().is_err());

        config.database.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [rest]
            port = 9000
            log_headers = true

            [database]
            backend = "memory"

            [ledger]
            monthly_entry_limit = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.rest.port, 9000);
        assert_eq!(config.rest.host, "0.0.0.0");
        assert!(config.rest.log_headers);
        assert!(config.rest.enable_cors);
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.ledger.quota().limit(), 10);
        assert_eq!(config.service_name, "contas-api");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[rest\nport = "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn overrides_replace_values() {
        let vars: HashMap<&str, &str> = [
            ("CONTAS_REST_PORT", "8100"),
            ("CONTAS_REST_LOG_HEADERS", "true"),
            ("CONTAS_LOG_FORMAT", "Pretty"),
            ("CONTAS_DATABASE_BACKEND", "memory"),
            ("CONTAS_MONTHLY_ENTRY_LIMIT", "3"),
            ("CONTAS_ENVIRONMENT", "staging"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| (*v).to_string()));

        assert_eq!(config.rest.port, 8100);
        assert!(config.rest.log_headers);
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.ledger.monthly_entry_limit, 3);
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn unparsable_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| match name {
            "CONTAS_REST_PORT" => Some("not-a-port".to_string()),
            "CONTAS_DATABASE_BACKEND" => Some("sqlite".to_string()),
            _ => None,
        });
        assert_eq!(config.rest.port, 8001);
        assert_eq!(config.database.backend, StorageBackend::Postgres);
    }

    #[test]
    fn pool_settings_follow_database_config() {
        let settings = DatabaseConfig::default().pool_settings();
        assert_eq!(settings.max_connections, 10);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(30));
    }
}
