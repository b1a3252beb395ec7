//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! tide-times.toml file. It covers the WorldTides API settings (endpoint,
//! credential, mock toggle) and the saved location the binary falls back to
//! when no coordinate is given on the command line.
//!
//! The API credential is never hard-coded: it comes from the
//! `WORLDTIDES_API_KEY` environment variable or the config file, and a fixed
//! `test_key` placeholder is substituted when `TIDE_TESTING=true` so test
//! runs need no live credential.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Placeholder credential used when `TIDE_TESTING=true`
const TEST_KEY: &str = "test_key";

/// Application configuration loaded from tide-times.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// WorldTides API configuration
    pub api: ApiConfig,
    /// Saved location used when the caller does not supply a coordinate
    pub location: LocationConfig,
}

/// WorldTides API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base endpoint, e.g. "https://www.worldtides.info/api/v3"
    pub base_url: String,
    /// API credential; usually left unset in favor of `WORLDTIDES_API_KEY`
    pub key: Option<String>,
    /// Skip network access entirely and serve synthetic data
    pub use_mock_data: bool,
    /// Request timeout in seconds for the HTTP client
    pub timeout_secs: u64,
}

/// Saved `{name, latitude, longitude}` record
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Human-readable place name for display
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                base_url: "https://www.worldtides.info/api/v3".to_string(),
                key: None,
                use_mock_data: false,
                timeout_secs: 15,
            },
            location: LocationConfig {
                name: "Sydney, NSW".to_string(),
                latitude: -33.86,
                longitude: 151.21,
            },
        }
    }
}

impl Config {
    /// Load configuration from tide-times.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("tide-times.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    tracing::info!(location = %config.location.name, "loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(error = %e, "invalid config file format, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("no config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to tide-times.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("tide-times.toml", contents)?;
        Ok(())
    }
}

impl ApiConfig {
    /// Resolve the API credential for this process.
    ///
    /// Order: `TIDE_TESTING=true` substitutes the fixed placeholder, then
    /// `WORLDTIDES_API_KEY`, then the config file's `key` field. `None` means
    /// no credential is available and live fetches cannot be issued.
    pub fn resolve_key(&self) -> Option<String> {
        if env::var("TIDE_TESTING").map(|v| v == "true").unwrap_or(false) {
            return Some(TEST_KEY.to_string());
        }
        env::var("WORLDTIDES_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.key.clone())
    }
}
