//! Cache Facade
//!
//! Public surface composing the entry store, capacity guard, stats counters
//! and the expiry sweeper, and owning the locking discipline and lifecycle.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::cache::{CacheStats, EntryStore, StatsCounters};
use crate::config::{duration_millis, CacheConfig};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweeper;

// == Cache ==
/// A bounded, expiring, concurrency-safe cache.
///
/// All mutations take the store's write lock; `get` and `stats` take the read
/// lock. Hit/miss/eviction counters are atomics owned by this instance.
/// Share between callers with `Arc<Cache<K, V>>`.
///
/// Dropping the cache stops its sweeper, as does [`Cache::close`].
pub struct Cache<K, V> {
    store: Arc<RwLock<EntryStore<K, V>>>,
    stats: Arc<StatsCounters>,
    config: CacheConfig,
    shutdown: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Validates `config` and starts the expiry sweeper on the current Tokio runtime.
    ///
    /// # Errors
    /// - `CacheError::InvalidConfig` if any of `max_size`, `ttl` or `cleanup_period` is zero
    /// - `CacheError::NoRuntime` if called outside a Tokio runtime
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let store = Arc::new(RwLock::new(EntryStore::new(config.max_size, config.ttl)));
        let stats = Arc::new(StatsCounters::new());
        let (shutdown, shutdown_rx) = watch::channel(false);

        let handle = spawn_sweeper(
            &runtime,
            Arc::clone(&store),
            Arc::clone(&stats),
            config.cleanup_period,
            shutdown_rx,
        );

        info!(
            max_size = config.max_size,
            ttl_ms = duration_millis(config.ttl),
            cleanup_period_ms = duration_millis(config.cleanup_period),
            "Cache initialized"
        );

        Ok(Self {
            store,
            stats,
            config,
            shutdown,
            sweeper: Mutex::new(Some(handle)),
        })
    }

    // == Set ==
    /// Stores `value` under `key`, expiring after the configured TTL.
    ///
    /// If the key already exists, the value is overwritten and its TTL reset.
    /// If the key is new and the cache is full, the entry expiring soonest is
    /// evicted first.
    pub async fn set(&self, key: K, value: V) {
        self.insert(key, value, None).await;
    }

    // == Set With TTL ==
    /// Like [`Cache::set`], but with a TTL for this entry only.
    pub async fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.insert(key, value, Some(ttl)).await;
    }

    async fn insert(&self, key: K, value: V, ttl: Option<Duration>) {
        let evicted = {
            let mut store = self.store.write().await;
            store.set(key, value, ttl, Instant::now())
        };

        if evicted.is_some() {
            self.stats.record_evictions(1);
            debug!("Capacity reached, evicted entry expiring soonest");
        }
    }

    // == Get ==
    /// Returns a clone of the value for `key` if present and not expired.
    ///
    /// Counts exactly one hit or miss. Expired entries are reported as misses
    /// but stay in the store until swept, evicted or deleted.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = {
            let store = self.store.read().await;
            store
                .get(key, Instant::now())
                .map(|entry| entry.value.clone())
        };

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == TTL Remaining ==
    /// Time left before the entry for `key` expires, or None if absent or expired.
    ///
    /// Does not count as a hit or miss.
    pub async fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let store = self.store.read().await;
        store.get(key, now).map(|entry| entry.ttl_remaining_at(now))
    }

    // == Delete ==
    /// Removes the entry for `key`; no-op if absent.
    pub async fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.write().await.delete(key);
    }

    // == Clear ==
    /// Removes every entry.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    // == Stats ==
    /// Returns the current size and counters.
    pub async fn stats(&self) -> CacheStats {
        let size = self.store.read().await.len();
        self.stats.snapshot(size)
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Close ==
    /// Signals the sweeper to stop. Idempotent.
    ///
    /// The store remains usable; expired entries are then only hidden from
    /// reads, never removed in the background.
    pub fn close(&self) {
        let was_closed = self.shutdown.send_replace(true);
        if !was_closed {
            info!("Cache closed, expiry sweeper signalled to stop");
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }

    // == Shutdown ==
    /// Closes the cache and waits for the sweeper task to finish.
    pub async fn shutdown(&self) {
        self.close();

        let handle = self
            .sweeper
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                if err.is_panic() {
                    error!("Expiry sweeper panicked before shutdown: {}", err);
                }
            }
        }
    }
}

impl<K, V> std::fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("config", &self.config)
            .field("closed", &*self.shutdown.borrow())
            .finish_non_exhaustive()
    }
}
