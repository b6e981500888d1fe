//! Command-line interface definition.

use clap::Parser;
use color_eyre::eyre::eyre;
use publisher_ledger::ResolverConfig;
use std::path::PathBuf;

/// Resolve verification metadata for publishers identified by opaque keys.
#[derive(Parser, Debug)]
#[command(name = "publisher-ledger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Publisher keys to resolve.
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Base URL of the publisher lookup service.
    #[arg(long, short, env = "PUBLISHER_LEDGER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Time-to-live for cached records, in seconds.
    #[arg(long, env = "PUBLISHER_LEDGER_TTL_SECS")]
    pub ttl_secs: Option<i64>,

    /// Timeout for a single lookup request, in seconds.
    #[arg(long, env = "PUBLISHER_LEDGER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log level.
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Path to configuration file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Convert CLI arguments into a resolver configuration and the keys to
    /// resolve.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be loaded or no endpoint is
    /// configured anywhere.
    pub fn into_config(self) -> color_eyre::Result<(ResolverConfig, Vec<String>)> {
        // Start with default config or load from file
        let mut config = if let Some(ref path) = self.config {
            ResolverConfig::from_file(path)?
        } else if let Some(path) = default_config_path().filter(|p| p.exists()) {
            ResolverConfig::from_file(&path)?
        } else {
            ResolverConfig::default()
        };

        // Override with CLI arguments
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(ttl_secs) = self.ttl_secs {
            config.ttl_secs = ttl_secs;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.request_timeout_secs = timeout_secs;
        }
        config.log_level = self.log_level;

        if config.endpoint.is_empty() {
            return Err(eyre!(
                "no lookup endpoint configured; pass --endpoint or set one in the config file"
            ));
        }

        Ok((config, self.keys))
    }
}

fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "publisher-ledger")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
