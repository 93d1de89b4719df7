//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use legal_assistant_core::conversation::{DEFAULT_HISTORY_WINDOW, DEFAULT_LANGUAGE};
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub query_language: String,
    pub history_window: usize,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
            query_language: DEFAULT_LANGUAGE.to_string(),
            history_window: DEFAULT_HISTORY_WINDOW,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // --- Backend Connection ---
        let api_base_url = lookup("VERA_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "VERA_API_URL".to_string(),
                format!("'{}' is not an http(s) URL", api_base_url),
            ));
        }

        let request_timeout = match lookup("VERA_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidValue(
                        "VERA_REQUEST_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        // --- Chat Settings ---
        let query_language = lookup("VERA_QUERY_LANGUAGE").unwrap_or(defaults.query_language);

        let history_window = match lookup("VERA_HISTORY_WINDOW") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue("VERA_HISTORY_WINDOW".to_string(), e.to_string())
            })?,
            None => defaults.history_window,
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_base_url,
            request_timeout,
            query_language,
            history_window,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.query_language, "en");
        assert_eq!(config.history_window, 10);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("VERA_API_URL", "https://vera.example.com/"),
            ("VERA_REQUEST_TIMEOUT_SECS", "5"),
            ("VERA_HISTORY_WINDOW", "25"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://vera.example.com");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.history_window, 25);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("VERA_REQUEST_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidValue(var, _)) if var == "VERA_REQUEST_TIMEOUT_SECS"
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("VERA_API_URL", "localhost:8000")])),
            Err(ConfigError::InvalidValue(var, _)) if var == "VERA_API_URL"
        ));
        assert!(Config::from_lookup(lookup(&[("RUST_LOG", "chatty")])).is_err());
    }
}
