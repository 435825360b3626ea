// CLI module for tmdb-companion
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// tmdb-companion - Caching TMDB API companion backend
#[derive(Parser, Debug)]
#[command(name = "tmdb-companion", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.tmdb-companion/config.toml)
    #[arg(short, long, env = "TMDB_COMPANION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut crate::config::AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from(["tmdb-companion", "--port", "8081", "--host", "127.0.0.1"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
