//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{EntryStore, StatsCounters};
use crate::config::{duration_millis, MAX_DURATION};

/// Spawns the sweeper onto `runtime`.
///
/// Every `period` the task takes the store's write lock and removes all
/// expired entries, counting each removal as an eviction. It stops as soon as
/// `shutdown` carries `true` or its sender is dropped, and never sweeps after
/// the signal has been observed, including while it waited for the lock.
/// Signalling stop never requires the store lock. Periods beyond
/// `MAX_DURATION` are clamped to it.
pub fn spawn_sweeper<K, V>(
    runtime: &tokio::runtime::Handle,
    store: Arc<RwLock<EntryStore<K, V>>>,
    stats: Arc<StatsCounters>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    let period = period.min(MAX_DURATION);

    runtime.spawn(async move {
        info!(period_ms = duration_millis(period), "Expiry sweeper started");

        // First tick one period after start, not immediately
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if *shutdown.borrow() {
                        break;
                    }

                    let removed = {
                        let mut guard = store.write().await;
                        // Close may have landed while waiting for the lock
                        if *shutdown.borrow() {
                            None
                        } else {
                            Some(guard.remove_expired(Instant::now()))
                        }
                    };
                    let Some(removed) = removed else {
                        break;
                    };
                    stats.record_evictions(removed as u64);

                    if removed > 0 {
                        info!(removed, "Expiry sweep removed expired entries");
                    } else {
                        debug!("Expiry sweep: no expired entries found");
                    }
                }
            }
        }

        info!("Expiry sweeper stopped");
    })
}
