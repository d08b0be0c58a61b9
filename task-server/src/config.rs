use anyhow::{ensure, Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use database::DatabaseSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use task_api::{CorsPolicy, DEFAULT_ALLOWED_ORIGIN};

/// Built-in defaults, layered under every other source
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Prefix for structured environment overrides, e.g. `TASKS_SERVER__PORT`
const ENV_PREFIX: &str = "TASKS";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Optional database URL. If not provided, a per-user data file is used
    pub url: Option<String>,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
    /// Origin sent in Access-Control-Allow-Origin
    pub allowed_origin: String,
    /// How long in-flight requests may run after an interrupt
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl Config {
    /// Load configuration from the built-in defaults, an optional file, and
    /// environment variables, in increasing order of precedence
    pub fn load(config_file: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = config_file {
            builder = builder.add_source(File::with_name(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // DATABASE_URL, LISTEN_ADDR and LOG_LEVEL win over the prefixed forms
        result.apply_standard_env_vars(|key| env::var(key).ok());

        Ok(result)
    }

    /// Apply the conventional unprefixed variables, read through `lookup`
    pub fn apply_standard_env_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(database_url) = lookup("DATABASE_URL") {
            self.database.url = Some(database_url);
        }

        if let Some(listen_addr) = lookup("LISTEN_ADDR") {
            self.server.listen_addr = listen_addr;
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.logging.level = log_level;
        }
    }

    /// Get the database URL, falling back to a per-user data file
    pub fn database_url(&self) -> String {
        match &self.database.url {
            Some(url) => url.clone(),
            None => Self::default_database_url(),
        }
    }

    /// Default database location, preferring XDG_DATA_HOME over the home directory
    pub fn default_database_url() -> String {
        if let Ok(xdg_data) = env::var("XDG_DATA_HOME") {
            return format!("sqlite://{xdg_data}/family-tasks/tasks.sqlite");
        }

        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        format!("sqlite://{home}/family-tasks.sqlite")
    }

    /// Pool settings for the database connector
    pub fn database_settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            url: self.database_url(),
            max_connections: self.database.max_connections,
            connection_timeout: Duration::from_secs(self.database.connection_timeout),
        }
    }

    /// Get the server socket address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_secs)
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        ensure!(
            LEVELS.contains(&self.logging.level.to_lowercase().as_str()),
            "Invalid log level '{}', expected one of {}",
            self.logging.level,
            LEVELS.join(", ")
        );

        let database_url = self.database_url();
        ensure!(
            database_url.starts_with("sqlite:"),
            "Unsupported database URL '{database_url}': only sqlite: URLs are accepted"
        );

        ensure!(self.server.port != 0, "server.port must not be 0");
        ensure!(
            self.server.shutdown_timeout_secs > 0,
            "server.shutdown_timeout_secs must be at least 1"
        );
        ensure!(
            self.database.max_connections > 0,
            "database.max_connections must be at least 1"
        );

        CorsPolicy::new(&self.server.allowed_origin)
            .context("server.allowed_origin is not a valid header value")?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            server: ServerConfig {
                listen_addr: "0.0.0.0".to_string(),
                port: 8080,
                allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
                shutdown_timeout_secs: 5,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}
