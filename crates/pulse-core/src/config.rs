//! Configuration loading and typed config structures for the dashboard.
//!
//! The canonical configuration lives in `pulse.yaml` next to the binary.
//! The file is optional: every field has a default matching the original
//! deployment, and environment variables override the values that
//! deployments actually vary (`DATABASE_PATH`, `DASHBOARD_SECRET_KEY`,
//! `DASHBOARD_PORT`).

use std::path::Path;

use pulse_types::Symbol;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value failed validation after parsing.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level dashboard configuration.
///
/// Mirrors the structure of `pulse.yaml`. All fields have defaults
/// matching the original deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardConfig {
    /// Store location.
    #[serde(default)]
    pub store: StoreConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Tracked asset settings.
    #[serde(default)]
    pub tracking: TrackingConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `DATABASE_PATH` overrides `store.database_path`
    /// - `DASHBOARD_SECRET_KEY` overrides `server.secret_key`
    /// - `DASHBOARD_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from the file when it exists, otherwise use
    /// defaults. Env overrides apply in both cases.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file cannot be read or
    /// parsed, or an override value is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides()?;
            Ok(config)
        }
    }

    /// Override values with environment variables when set.
    ///
    /// This lets a `.env`-style deployment set the store path and the
    /// secret without modifying the YAML config file.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("DATABASE_PATH") {
            self.store.database_path = val;
        }
        if let Ok(val) = std::env::var("DASHBOARD_SECRET_KEY") {
            self.server.secret_key = val;
        }
        if let Ok(val) = std::env::var("DASHBOARD_PORT") {
            self.server.port = val.parse().map_err(|_| ConfigError::Invalid {
                reason: format!("DASHBOARD_PORT is not a port number: {val}"),
            })?;
        }
        Ok(())
    }
}

/// Store location configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Path of the SQLite database file written by the analysis bot.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Session/CORS secret. Falling back to the default is insecure and
    /// logged as a deployment warning at startup.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
}

impl ServerSettings {
    /// Whether the secret key is still the insecure built-in default.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == default_secret_key()
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            secret_key: default_secret_key(),
        }
    }
}

/// Tracked asset settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackingConfig {
    /// Ticker symbols the dashboard tracks, as stored in the `chain`
    /// column.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<Symbol>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
        }
    }
}

fn default_database_path() -> String {
    String::from("data/crypto_history.db")
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5000
}

fn default_secret_key() -> String {
    String::from("default_secret_key")
}

fn default_symbols() -> Vec<Symbol> {
    vec![Symbol::from("SOL"), Symbol::from("DOT")]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_deployment() {
        let config = DashboardConfig::default();
        assert_eq!(config.store.database_path, "data/crypto_history.db");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.uses_default_secret());
        assert_eq!(
            config.tracking.symbols,
            vec![Symbol::from("SOL"), Symbol::from("DOT")]
        );
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let yaml = r"
store:
  database_path: /var/lib/pulse/history.db
server:
  port: 8080
";
        let config: DashboardConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.store.database_path, "/var/lib/pulse/history.db");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.tracking.symbols.len(), 2);
    }

    #[test]
    fn custom_symbol_list_parses() {
        let yaml = r"
tracking:
  symbols: [SOL, DOT, AVAX]
";
        let config: DashboardConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.tracking.symbols.len(), 3);
        assert_eq!(config.tracking.symbols[2], Symbol::from("AVAX"));
    }
}
