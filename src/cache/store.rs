//! Entry Store Module
//!
//! Key-to-entry mapping with the capacity bound and expiry pruning.
//! The store itself is single-threaded; `Cache` supplies the locking.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::eviction::select_victim;
use crate::cache::CacheEntry;

// == Entry Store ==
/// Bounded key-value storage with per-entry expiration.
#[derive(Debug)]
pub struct EntryStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL applied when the caller does not pass one
    default_ttl: Duration,
    /// Next write sequence number
    next_seq: u64,
}

impl<K, V> EntryStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty store that holds at most `max_size` entries.
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_size,
            default_ttl,
            next_seq: 0,
        }
    }

    // == Set ==
    /// Inserts or overwrites `key` with expiration `now + ttl` (default TTL if None).
    ///
    /// If `key` is new and the store is full, the entry expiring soonest is
    /// evicted first and its key returned. Overwrites never evict.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>, now: Instant) -> Option<K> {
        let evicted = if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            self.evict_one()
        } else {
            None
        };

        let seq = self.next_seq;
        self.next_seq += 1;

        let entry = CacheEntry::new(value, now, ttl.unwrap_or(self.default_ttl), seq);
        self.entries.insert(key, entry);

        evicted
    }

    // == Get ==
    /// Returns the entry for `key` if it is still live at `now`.
    ///
    /// Expired entries are treated as absent but left in place for the sweeper.
    pub fn get<Q>(&self, key: &Q, now: Instant) -> Option<&CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns true if one was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Remove Expired ==
    /// Removes all entries expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Peek Victim ==
    /// Returns the key the capacity guard would evict next, without removing it.
    pub fn peek_victim(&self) -> Option<&K> {
        select_victim(&self.entries)
    }

    fn evict_one(&mut self) -> Option<K> {
        let victim = self.peek_victim().cloned()?;
        self.entries.remove(&victim);
        Some(victim)
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
