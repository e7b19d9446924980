//! Configuration Module
//!
//! Cache construction parameters, loadable from environment variables or any
//! serde source. Values are checked by [`Config::validate`] before a cache is built.

use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Default time-to-live in milliseconds (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Default maximum number of live entries
pub const DEFAULT_ITEM_LIMIT: usize = 1000;

/// Cache configuration parameters.
///
/// Immutable for the lifetime of one cache instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds an entry may go unaccessed before it expires
    pub ttl_ms: u64,
    /// Maximum number of live entries
    pub item_limit: usize,
    /// Sweeper period in milliseconds, None = same as `ttl_ms`
    pub sweep_interval_ms: Option<u64>,
}

impl Config {
    /// Creates a config with the given TTL and item limit, sweeping once per TTL.
    pub fn new(ttl_ms: u64, item_limit: usize) -> Self {
        Self {
            ttl_ms,
            item_limit,
            sweep_interval_ms: None,
        }
    }

    /// Overrides the sweeper period.
    pub fn with_sweep_interval_ms(mut self, sweep_interval_ms: u64) -> Self {
        self.sweep_interval_ms = Some(sweep_interval_ms);
        self
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - TTL in milliseconds (default: 300000)
    /// - `CACHE_ITEM_LIMIT` - Maximum live entries (default: 1000)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweeper period in milliseconds (default: TTL)
    pub fn from_env() -> Self {
        Self {
            ttl_ms: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
            item_limit: env::var("CACHE_ITEM_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ITEM_LIMIT),
            sweep_interval_ms: env::var("CACHE_SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Rejects zero TTL, zero item limit and zero sweep interval.
    pub fn validate(&self) -> Result<()> {
        if self.ttl_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "ttl_ms must be greater than 0".to_string(),
            ));
        }
        if self.item_limit == 0 {
            return Err(CacheError::InvalidConfig(
                "item_limit must be greater than 0".to_string(),
            ));
        }
        if self.sweep_interval_ms == Some(0) {
            return Err(CacheError::InvalidConfig(
                "sweep_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Effective sweeper period.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms.unwrap_or(self.ttl_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS, DEFAULT_ITEM_LIMIT)
    }
}
