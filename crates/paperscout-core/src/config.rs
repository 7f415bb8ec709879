//! Paperscout configuration management
//!
//! Handles configuration from environment variables and config files
//! with sensible defaults for development. Credentials are only ever
//! read from the environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Search transport configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Research pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        // Search transport
        if let Ok(backend) = std::env::var("SEARCH_BACKEND") {
            config.search.backend = backend.parse()?;
        }
        if let Ok(key) = std::env::var("SERPAPI_API_KEY") {
            config.search.serpapi_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("BRAVE_API_KEY") {
            config.search.brave_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("FIRECRAWL_API_KEY") {
            config.search.firecrawl_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("FIRECRAWL_URL") {
            config.search.firecrawl_url = url;
        }

        // Pipeline
        if let Ok(delay) = std::env::var("QUERY_DELAY_MS") {
            config.pipeline.query_delay_ms =
                delay.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "QUERY_DELAY_MS".to_string(),
                    value: delay,
                })?;
        }
        if let Ok(path) = std::env::var("HISTORY_PATH") {
            config.pipeline.history_path = Some(PathBuf::from(path));
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 120,
        }
    }
}

/// Search transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Which search backend to use
    pub backend: SearchBackendKind,

    /// SerpAPI key
    pub serpapi_api_key: Option<String>,

    /// Brave Search subscription token
    pub brave_api_key: Option<String>,

    /// Firecrawl-compatible scraper key
    pub firecrawl_api_key: Option<String>,

    /// Firecrawl-compatible scraper base URL
    pub firecrawl_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: SearchBackendKind::Fixture,
            serpapi_api_key: None,
            brave_api_key: None,
            firecrawl_api_key: None,
            firecrawl_url: "https://api.firecrawl.dev".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Supported search backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackendKind {
    SerpApi,
    Brave,
    Fixture,
}

impl std::str::FromStr for SearchBackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "serpapi" => Ok(Self::SerpApi),
            "brave" => Ok(Self::Brave),
            "fixture" => Ok(Self::Fixture),
            _ => Err(ConfigError::InvalidValue {
                key: "SEARCH_BACKEND".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Research pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Delay between transport calls in milliseconds (provider rate limits)
    pub query_delay_ms: u64,

    /// Maximum ranked results returned to the caller
    pub max_results: usize,

    /// Maximum retained history entries, oldest evicted first
    pub history_capacity: usize,

    /// Optional file path for persistent history (in-memory when unset)
    pub history_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            query_delay_ms: 1500,
            max_results: 10,
            history_capacity: 20,
            history_path: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pipeline.max_results, 10);
        assert_eq!(config.pipeline.history_capacity, 20);
        assert_eq!(config.search.backend, SearchBackendKind::Fixture);
    }

    #[test]
    fn test_from_env_rejects_invalid_backend() {
        std::env::set_var("SEARCH_BACKEND", "bing");
        let result = AppConfig::from_env();
        std::env::remove_var("SEARCH_BACKEND");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "SEARCH_BACKEND"
        ));
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!(
            "serpapi".parse::<SearchBackendKind>().unwrap(),
            SearchBackendKind::SerpApi
        );
        assert_eq!(
            "Brave".parse::<SearchBackendKind>().unwrap(),
            SearchBackendKind::Brave
        );
        assert!("bing".parse::<SearchBackendKind>().is_err());
    }
}
