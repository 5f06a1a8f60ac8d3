//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (TITLESEEK_*)
//! 2. TOML config file (if TITLESEEK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (TITLESEEK_*)
/// 2. TOML config file (if TITLESEEK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite result cache.
    ///
    /// Set via TITLESEEK_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// OpenSearch endpoint of the title-search service.
    ///
    /// Set via TITLESEEK_ENDPOINT environment variable.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via TITLESEEK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via TITLESEEK_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of titles requested per lookup.
    ///
    /// Set via TITLESEEK_RESULT_LIMIT environment variable.
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,

    /// Content namespace searched by the remote service.
    ///
    /// Set via TITLESEEK_NAMESPACE environment variable.
    #[serde(default)]
    pub namespace: u32,

    /// Quiet period before a burst of keystrokes triggers a lookup.
    ///
    /// Set via TITLESEEK_DEBOUNCE_MS environment variable.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Lifetime of a cached result list in seconds.
    ///
    /// Set via TITLESEEK_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Interval between background expiry sweeps in seconds.
    ///
    /// Set via TITLESEEK_SWEEP_INTERVAL_SECS environment variable.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./titleseek-cache.sqlite")
}

fn default_endpoint() -> String {
    "https://en.wikipedia.org/w/api.php".into()
}

fn default_user_agent() -> String {
    "titleseek/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_result_limit() -> u8 {
    10
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_cache_ttl_secs() -> u64 {
    30 * 60
}

fn default_sweep_interval_secs() -> u64 {
    5 * 60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            result_limit: default_result_limit(),
            namespace: 0,
            debounce_ms: default_debounce_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Debounce quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Cache entry lifetime.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `TITLESEEK_`
    /// 2. TOML file from `TITLESEEK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("TITLESEEK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("TITLESEEK_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }
}
