//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: u64 = 60 * 60 * 1000;

// == Cache Config ==
/// Product cache tuning, fixed when the cache is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum age of an entry, measured from its creation, before it reads as absent
    pub expiry_hours: u64,
    /// Number of entries allowed to survive an eviction pass
    pub max_entries: usize,
    /// Extra entries removed per eviction pass so passes stay infrequent
    pub eviction_overshoot: usize,
}

impl CacheConfig {
    /// Creates a cache configuration with explicit values.
    pub fn new(expiry_hours: u64, max_entries: usize, eviction_overshoot: usize) -> Self {
        Self {
            expiry_hours,
            max_entries,
            eviction_overshoot,
        }
    }

    /// Expiry window in milliseconds.
    pub fn expiry_ms(&self) -> u64 {
        self.expiry_hours.saturating_mul(MS_PER_HOUR)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiry_hours: 24,
            max_entries: 500,
            eviction_overshoot: 50,
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Product cache tuning
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// User-Agent sent to Open Food Facts
    pub user_agent: String,
    /// Upstream request timeout in seconds
    pub fetch_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_EXPIRY_HOURS` - Entry lifetime in hours (default: 24)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached products (default: 500)
    /// - `CACHE_EVICTION_OVERSHOOT` - Extra entries dropped per eviction pass (default: 50)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `OFF_USER_AGENT` - User-Agent for upstream requests (default: `product-cache/<version>`)
    /// - `FETCH_TIMEOUT_SECS` - Upstream request timeout (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache: CacheConfig {
                expiry_hours: env_or("CACHE_EXPIRY_HOURS", defaults.cache.expiry_hours),
                max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache.max_entries),
                eviction_overshoot: env_or(
                    "CACHE_EVICTION_OVERSHOOT",
                    defaults.cache.eviction_overshoot,
                ),
            },
            server_port: env_or("SERVER_PORT", defaults.server_port),
            user_agent: env::var("OFF_USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            fetch_timeout_secs: env_or("FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            user_agent: format!("product-cache/{}", env!("CARGO_PKG_VERSION")),
            fetch_timeout_secs: 10,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
