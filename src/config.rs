//! Configuration management for the Toolcrib kiosk

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the JSON snapshot files
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationsConfig {
    /// Default auto-expiry delay for success/error toasts, in milliseconds
    pub toast_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix TOOLCRIB_)
            .add_source(
                Environment::with_prefix("TOOLCRIB")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override the data directory from TOOLCRIB_DATA_DIR if present
            .set_override_option("storage.path", env::var("TOOLCRIB_DATA_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "data".to_string(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            toast_delay_ms: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
