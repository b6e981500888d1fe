//! Configuration for publisher-ledger.

use crate::prefix::DEFAULT_PREFIX_LEN;
use crate::resolver::DEFAULT_TTL_SECS;
use serde::{Deserialize, Serialize};

/// Resolver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base URL of the publisher lookup service.
    #[serde(default)]
    pub endpoint: String,

    /// Time-to-live for cached records, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: i64,

    /// Number of hash bytes used for the query prefix.
    #[serde(default = "default_prefix_len")]
    pub prefix_len: usize,

    /// Timeout for a single lookup request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Capacity of the bundled in-memory store.
    #[serde(default = "default_store_capacity")]
    pub store_capacity: usize,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            ttl_secs: default_ttl_secs(),
            prefix_len: default_prefix_len(),
            request_timeout_secs: default_request_timeout_secs(),
            store_capacity: default_store_capacity(),
            log_level: default_log_level(),
        }
    }
}

const fn default_ttl_secs() -> i64 {
    DEFAULT_TTL_SECS
}

const fn default_prefix_len() -> usize {
    DEFAULT_PREFIX_LEN
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_store_capacity() -> usize {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ResolverConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
