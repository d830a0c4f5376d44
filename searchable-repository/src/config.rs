//! Configuration management using Figment
//!
//! Sources are layered, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`./config.toml` for [`Config::load`], or an explicit path)
//! 3. Environment variables prefixed with `SEARCH_REPO_`, nested keys separated
//!    by `__` (e.g. `SEARCH_REPO_SEARCH__DEFAULT_PER_PAGE=25`)

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::repository::{SearchDefaults, DEFAULT_PER_PAGE};

/// Prefix of environment variables overriding file configuration
pub const ENV_PREFIX: &str = "SEARCH_REPO_";

/// Separator between nested keys in environment variable names
const ENV_SPLIT: &str = "__";

/// Configuration file looked up by [`Config::load`]
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Service-level settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name, reported when tracing starts
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human-readable multi-line output
    Pretty,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size used when a request carries no valid `perPage`
    #[serde(default = "default_per_page")]
    pub default_per_page: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
        }
    }
}

impl SearchConfig {
    /// Normalization defaults for [`SearchParams::normalize_with`](crate::repository::SearchParams::normalize_with)
    ///
    /// A configured page size of zero falls back to the built-in default.
    pub fn defaults(&self) -> SearchDefaults {
        SearchDefaults::with_per_page(self.default_per_page)
    }
}

fn default_service_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

impl Config {
    /// Load configuration from `./config.toml` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; defaults and environment variables still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading configuration from: {}", path.display());
        } else {
            tracing::debug!("No configuration file at {}, using defaults", path.display());
        }

        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split(ENV_SPLIT))
            .extract()?;

        Ok(config)
    }
}
