//! Configuration
//!
//! Build-time settings for the client. Values come from environment variables
//! captured when the WASM bundle is compiled, with defaults for local
//! development. The resulting [`AppConfig`] is provided once at startup as
//! read-only context.

use thiserror::Error;

/// Backend used when `EXPENSE_API_BASE` is not set at build time
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Log filter used when `EXPENSE_LOG` is not set at build time
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the expense API, without a trailing slash
    pub api_base: String,
    /// `tracing` filter directive
    pub log_filter: String,
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    EmptyApiBase,

    #[error("API base URL must use http or https: {0}")]
    UnsupportedScheme(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Build from explicit overrides
    pub fn from_overrides(
        api_base: Option<&str>,
        log_filter: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base) = api_base {
            config.api_base = normalize_api_base(base)?;
        }

        if let Some(filter) = log_filter.map(str::trim).filter(|f| !f.is_empty()) {
            config.log_filter = filter.to_string();
        }

        Ok(config)
    }

    /// Load from the variables captured at build time, falling back to
    /// defaults when they are invalid.
    ///
    /// Returns the error alongside the fallback so the caller can report it
    /// once logging is up.
    pub fn from_build_env() -> (Self, Option<ConfigError>) {
        match Self::from_overrides(option_env!("EXPENSE_API_BASE"), option_env!("EXPENSE_LOG")) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Join an endpoint path onto the API base
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

fn normalize_api_base(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');

    if url.is_empty() {
        return Err(ConfigError::EmptyApiBase);
    }

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::UnsupportedScheme(url.to_string()));
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::from_overrides(Some("https://api.example.com/v1//"), None).unwrap();
        assert_eq!(config.api_base, "https://api.example.com/v1");
        assert_eq!(config.endpoint("/expenses"), "https://api.example.com/v1/expenses");
        assert_eq!(config.endpoint("stats/fy"), "https://api.example.com/v1/stats/fy");
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let err = AppConfig::from_overrides(Some("ftp://files.local"), None).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedScheme("ftp://files.local".to_string()));
    }

    #[test]
    fn test_rejects_empty_base() {
        assert_eq!(
            AppConfig::from_overrides(Some("  / "), None).unwrap_err(),
            ConfigError::EmptyApiBase
        );
    }

    #[test]
    fn test_blank_log_filter_keeps_default() {
        let config = AppConfig::from_overrides(None, Some("   ")).unwrap();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);

        let config = AppConfig::from_overrides(None, Some("expense_tracker=debug")).unwrap();
        assert_eq!(config.log_filter, "expense_tracker=debug");
    }
}
