//! Configuration Module
//!
//! Capacity, expiry and cleanup cadence for a cache instance.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Longest TTL or cleanup period honoured (30 years); larger values are
/// clamped so deadlines never overflow `Instant`.
pub const MAX_DURATION: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// Cache configuration parameters.
///
/// All values can be loaded from environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Time-to-live applied on every `set`
    pub ttl: Duration,
    /// Interval between background expiry sweeps
    pub cleanup_period: Duration,
}

impl CacheConfig {
    pub fn new(max_size: usize, ttl: Duration, cleanup_period: Duration) -> Self {
        Self {
            max_size,
            ttl,
            cleanup_period,
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 300000)
    /// - `CACHE_CLEANUP_PERIOD_MS` - Sweep interval in milliseconds (default: 1000)
    ///
    /// Unset or unparsable variables fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: env_parse("CACHE_MAX_SIZE").unwrap_or(defaults.max_size),
            ttl: env_parse("CACHE_TTL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.ttl),
            cleanup_period: env_parse("CACHE_CLEANUP_PERIOD_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.cleanup_period),
        }
    }

    /// Rejects configurations that cannot be reasoned about: zero capacity,
    /// zero TTL or a zero cleanup period.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be greater than 0".to_string(),
            ));
        }
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "ttl must be greater than 0".to_string(),
            ));
        }
        if self.cleanup_period.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cleanup_period must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 1000,
            ttl: Duration::from_secs(300),
            cleanup_period: Duration::from_secs(1),
        }
    }
}

/// Milliseconds in `duration` for log fields, saturating at `u64::MAX`.
pub(crate) fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
