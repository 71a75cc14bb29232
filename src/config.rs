//! Configuration Module
//!
//! Loads gateway and cache settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream REST API
    pub api_base_url: String,
    /// HTTP port the gateway listens on
    pub server_port: u16,
    /// TTL in seconds of the recipe-list store
    pub recipes_ttl: u64,
    /// TTL in seconds of the recipe-detail store
    pub recipe_ttl: u64,
    /// TTL in seconds of the reviews store
    pub reviews_ttl: u64,
    /// Per-store entry ceiling (least recently used entries go first)
    pub max_entries: usize,
    /// Share one upstream call between concurrent identical misses
    pub coalesce_requests: bool,
    /// Upstream request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_BASE_URL` - Upstream REST API (default: http://localhost:8000)
    /// - `SERVER_PORT` - Gateway port (default: 3000)
    /// - `RECIPES_TTL_SECS` - Recipe-list TTL (default: 300)
    /// - `RECIPE_TTL_SECS` - Recipe-detail TTL (default: 300)
    /// - `REVIEWS_TTL_SECS` - Reviews TTL (default: 180)
    /// - `MAX_ENTRIES` - Entries per store (default: 1000)
    /// - `COALESCE_REQUESTS` - In-flight request coalescing (default: false)
    /// - `REQUEST_TIMEOUT_SECS` - Upstream timeout (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            recipes_ttl: parse_var("RECIPES_TTL_SECS").unwrap_or(defaults.recipes_ttl),
            recipe_ttl: parse_var("RECIPE_TTL_SECS").unwrap_or(defaults.recipe_ttl),
            reviews_ttl: parse_var("REVIEWS_TTL_SECS").unwrap_or(defaults.reviews_ttl),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            coalesce_requests: parse_var("COALESCE_REQUESTS")
                .unwrap_or(defaults.coalesce_requests),
            request_timeout: parse_var("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.request_timeout),
        }
    }

    pub fn recipes_ttl(&self) -> Duration {
        Duration::from_secs(self.recipes_ttl)
    }

    pub fn recipe_ttl(&self) -> Duration {
        Duration::from_secs(self.recipe_ttl)
    }

    pub fn reviews_ttl(&self) -> Duration {
        Duration::from_secs(self.reviews_ttl)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            server_port: 3000,
            recipes_ttl: 300,
            recipe_ttl: 300,
            reviews_ttl: 180,
            max_entries: 1000,
            coalesce_requests: false,
            request_timeout: 10,
        }
    }
}
