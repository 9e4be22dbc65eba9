//! Application settings loading from config.toml
//!
//! Every section and key is optional; missing values fall back to defaults.
//! `DATABASE_URL` and `BIND_ADDRESS` from the environment (or `.env`) override
//! the file.

use crate::core::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable overriding `[server].bind_address`
pub const BIND_ADDRESS_ENV: &str = "BIND_ADDRESS";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerSettings,
    /// Storage settings
    pub database: DatabaseSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to listen on
    pub bind_address: String,
    /// Page size for `/orders` when the request gives none
    pub default_page_size: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection string, e.g. `sqlite://data/orders.sqlite?mode=rwc`
    pub url: Option<String>,
    /// Pool size
    pub max_connections: u32,
    /// Log every SQL statement at debug level
    pub log_statements: bool,
    /// Insert demo products and orders when the store is empty
    pub seed_on_startup: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            log_statements: false,
            seed_on_startup: true,
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    parse_config(&contents)
}

fn parse_config(contents: &str) -> Result<AppConfig> {
    let mut config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.server.default_page_size = config.server.default_page_size.clamp(1, MAX_PAGE_SIZE);
    Ok(config)
}

/// Loads settings from `path` if it exists, otherwise uses defaults, then
/// applies environment overrides.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_app_configuration<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let mut config = if path.exists() {
        load_config(path)?
    } else {
        info!("No {} found, using default settings.", path.display());
        AppConfig::default()
    };

    if let Ok(bind_address) = std::env::var(BIND_ADDRESS_ENV) {
        config.server.bind_address = bind_address;
    }

    Ok(config)
}
