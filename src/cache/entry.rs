//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

use std::time::Duration;

use tokio::time::Instant;

use crate::config::MAX_DURATION;

// == Cache Entry ==
/// A single cache entry: the opaque payload plus its expiration instant.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiration instant
    pub expires_at: Instant,
    /// Store-wide write sequence number; orders entries that expire at the same instant
    pub seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now`.
    ///
    /// TTLs beyond `MAX_DURATION` are clamped to it.
    pub fn new(value: V, now: Instant, ttl: Duration, seq: u64) -> Self {
        Self {
            value,
            expires_at: now + ttl.min(MAX_DURATION),
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// live entry always has its expiration strictly after the time of the read.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime at `now`, zero once expired.
    pub fn ttl_remaining_at(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
