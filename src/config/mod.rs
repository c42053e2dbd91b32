//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with an environment variable
//! override for the database URL (`DATABASE_URL`). Every section has
//! defaults, so running without a config file is supported.

mod logging;

pub use logging::LoggingConfig;

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Remote user catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection configuration.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path, or `:memory:` for an ephemeral database.
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "runs.db".into(),
        }
    }
}

/// Remote user catalog configuration.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".into(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, then apply env overrides.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if a field
    /// fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.finish()
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    ///
    /// # Errors
    /// Returns an error if an explicit config file fails to load or if a
    /// field fails validation.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::default().finish(),
        }
    }

    fn finish(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if let Err(e) = url::Url::parse(&self.catalog.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "catalog.base_url",
                reason: e.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
