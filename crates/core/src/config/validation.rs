//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `endpoint` is not an http(s) URL
    /// - `user_agent` is empty
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `result_limit` is 0
    /// - `debounce_ms` exceeds 10 seconds
    /// - `cache_ttl_secs` or `sweep_interval_secs` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = url::Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::Invalid { field: "endpoint".into(), reason: format!("not a valid URL: {e}") })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid { field: "endpoint".into(), reason: "must be an http(s) URL".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.result_limit == 0 {
            return Err(ConfigError::Invalid { field: "result_limit".into(), reason: "must be greater than 0".into() });
        }

        if self.debounce_ms > 10_000 {
            return Err(ConfigError::Invalid {
                field: "debounce_ms".into(),
                reason: "must not exceed 10 seconds (10000ms)".into(),
            });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "sweep_interval_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.sweep_interval_secs > self.cache_ttl_secs {
            tracing::warn!(
                sweep_interval_secs = self.sweep_interval_secs,
                cache_ttl_secs = self.cache_ttl_secs,
                "sweep interval is longer than the cache TTL; expired rows will linger until read"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_endpoint_scheme() {
        let config = AppConfig { endpoint: "ftp://example.org/api.php".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "endpoint"));
    }

    #[test]
    fn test_validate_endpoint_without_host() {
        for endpoint in ["http://", "https://", "en.wikipedia.org/w/api.php"] {
            let config = AppConfig { endpoint: endpoint.into(), ..Default::default() };
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid { ref field, .. }) if field == "endpoint"),
                "accepted {endpoint}"
            );
        }
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));

        let config = AppConfig { timeout_ms: 301_000, ..Default::default() }; // 5min 1sec
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_result_limit_zero() {
        let config = AppConfig { result_limit: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "result_limit"));
    }

    #[test]
    fn test_validate_debounce_too_long() {
        let config = AppConfig { debounce_ms: 10_001, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "debounce_ms"));
    }

    #[test]
    fn test_validate_zero_ttl() {
        let config = AppConfig { cache_ttl_secs: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_ttl_secs"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { timeout_ms: 100, result_limit: 1, debounce_ms: 0, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
