// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ProxyError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file (`path`, or `~/.tmdb-companion/config.toml`)
    /// 3. Defaults (lowest)
    ///
    /// CLI overrides are applied by the caller on the returned value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::from(file).required(path.is_some()))
            // Override with environment variables (prefix: TMDB_COMPANION_)
            .add_source(
                Environment::with_prefix("TMDB_COMPANION")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        let mut loaded: Self = config
            .try_deserialize()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        loaded.apply_legacy_env();
        Ok(loaded)
    }

    /// Honor the bare `TMDB_READ_TOKEN` / `TMDB_API_KEY` variables when the
    /// prefixed ones are absent.
    fn apply_legacy_env(&mut self) {
        if self.tmdb.token().is_none() {
            self.tmdb.read_token = non_empty_env("TMDB_READ_TOKEN");
        }
        if self.tmdb.api_key.is_none() {
            self.tmdb.api_key = non_empty_env("TMDB_API_KEY");
        }
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tmdb-companion")
            .join("config.toml")
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
