//! Configuration data structures for the TMDB companion backend.
//!
//! This module defines the schema for the application settings, including
//! server parameters, upstream TMDB credentials, and response cache tuning.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream TMDB API settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Performance and resource management settings.
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `5000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads for the Tokio runtime.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Settings for the upstream TMDB API connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// Base URL for the TMDB v3 API.
    /// Default: `https://api.themoviedb.org/3`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// v4 read access token, sent as a bearer credential.
    /// Falls back to the `TMDB_READ_TOKEN` environment variable.
    #[serde(default)]
    pub read_token: Option<String>,

    /// Legacy v3 API key. Only reported by the env health check.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    /// Default: `15`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for the in-process response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Whether cacheable routes consult the cache at all.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lifetime of a cached response in seconds.
    /// Default: `300` (5 minutes)
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,

    /// Upper bound on stored entries; least recently used entries go first.
    /// Default: `1024`
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// How often the background task drops expired entries. `0` disables it.
    /// Default: `60`
    #[serde(default = "default_purge_interval")]
    pub purge_interval_seconds: u64,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask bearer tokens in logged upstream bodies.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_tokens: bool,
}

/// Settings for tuning application performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum number of idle connections per host in the HTTP pool.
    /// Default: `32`
    #[serde(default = "default_pool_size")]
    pub connection_pool_size: usize,

    /// Whether to enable GZIP compression for HTTP responses.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enable_compression: bool,
}

impl TmdbConfig {
    /// The configured bearer token, ignoring empty strings.
    pub fn token(&self) -> Option<&str> {
        self.read_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn purge_interval(&self) -> Option<Duration> {
        (self.purge_interval_seconds > 0).then(|| Duration::from_secs(self.purge_interval_seconds))
    }
}

// Never print credentials, even at debug level
impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_base_url", &self.api_base_url)
            .field("read_token", &self.read_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            read_token: None,
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: default_cache_ttl(),
            max_entries: default_max_entries(),
            purge_interval_seconds: default_purge_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_tokens: true,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            connection_pool_size: default_pool_size(),
            enable_compression: true,
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_api_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_true() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

fn default_max_entries() -> usize {
    1024
}

fn default_purge_interval() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_pool_size() -> usize {
    32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let config = TmdbConfig {
            read_token: Some("eyJhbGciOiJIUzI1NiJ9.secret".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(printed.contains("[REDACTED]"));
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_blank_token_is_missing() {
        let config = TmdbConfig {
            read_token: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.token().is_none());
    }

    #[test]
    fn test_purge_interval_zero_disables() {
        let settings = CacheSettings {
            purge_interval_seconds: 0,
            ..Default::default()
        };
        assert!(settings.purge_interval().is_none());
        assert_eq!(CacheSettings::default().ttl(), Duration::from_secs(300));
    }
}
