//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's capacity bound, eviction order and
//! the facade's counter accounting.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{Cache, EntryStore};
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 8;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Small key space so sequences collide, overwrite and fill the store
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..24
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: u8, value: u32, ttl_ms: u64 },
    Get { key: u8 },
    Delete { key: u8 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), any::<u32>(), 1u64..10_000)
            .prop_map(|(key, value, ttl_ms)| CacheOp::Set { key, value, ttl_ms }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, the store never holds more than max_size entries.
    #[test]
    fn prop_capacity_enforcement(ops in prop::collection::vec(cache_op_strategy(), 1..100)) {
        let mut store = EntryStore::new(TEST_MAX_SIZE, TEST_TTL);
        let now = Instant::now();

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl_ms } => {
                    store.set(key, value, Some(Duration::from_millis(ttl_ms)), now);
                }
                CacheOp::Get { key } => {
                    let _ = store.get(&key, now);
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
            }
            prop_assert!(store.len() <= TEST_MAX_SIZE, "Store exceeded max_size");
        }
    }

    // Inserting a new key into a full store evicts exactly the entry with the
    // earliest expiration, and nothing else.
    #[test]
    fn prop_eviction_picks_earliest_expiration(
        ttls in prop::collection::vec(1u64..10_000, TEST_MAX_SIZE..=TEST_MAX_SIZE)
    ) {
        let mut store = EntryStore::new(TEST_MAX_SIZE, TEST_TTL);
        let now = Instant::now();

        for (key, ttl_ms) in ttls.iter().enumerate() {
            store.set(key, key, Some(Duration::from_millis(*ttl_ms)), now);
        }

        let min_ttl = *ttls.iter().min().unwrap();
        // Lowest key among the minimum TTLs is the oldest write
        let expected = ttls.iter().position(|ttl| *ttl == min_ttl).unwrap();
        prop_assert_eq!(store.peek_victim().copied(), Some(expected));

        let evicted = store.set(TEST_MAX_SIZE, 0, None, now);
        prop_assert_eq!(evicted, Some(expected));
        prop_assert_eq!(store.len(), TEST_MAX_SIZE);
    }

    // Overwriting keys that are already present never evicts, even when full.
    #[test]
    fn prop_overwrite_never_evicts(
        overwrites in prop::collection::vec(0usize..TEST_MAX_SIZE, 1..50)
    ) {
        let mut store = EntryStore::new(TEST_MAX_SIZE, TEST_TTL);
        let now = Instant::now();
        for key in 0..TEST_MAX_SIZE {
            store.set(key, 0u32, None, now);
        }

        for (value, key) in overwrites.into_iter().enumerate() {
            prop_assert_eq!(store.set(key, value as u32, None, now), None);
        }

        let keys: HashSet<usize> = (0..TEST_MAX_SIZE)
            .filter(|key| store.get(key, now).is_some())
            .collect();
        prop_assert_eq!(keys.len(), TEST_MAX_SIZE);
    }

    // For any sequence of operations, hits, misses, evictions and size match a
    // model of the cache. All entries share one long TTL, so the model evicts
    // the least recently written key.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let config = CacheConfig::new(TEST_MAX_SIZE, TEST_TTL, Duration::from_secs(3600));
            let cache = Cache::new(config).unwrap();
            // Keys ordered by last write, oldest first
            let mut model: Vec<u8> = Vec::new();
            let mut expected_hits: u64 = 0;
            let mut expected_misses: u64 = 0;
            let mut expected_evicted: u64 = 0;

            for op in ops {
                match op {
                    CacheOp::Set { key, value, .. } => {
                        if let Some(pos) = model.iter().position(|k| *k == key) {
                            model.remove(pos);
                        } else if model.len() == TEST_MAX_SIZE {
                            model.remove(0);
                            expected_evicted += 1;
                        }
                        model.push(key);
                        cache.set(key, value).await;
                    }
                    CacheOp::Get { key } => {
                        let found = cache.get(&key).await.is_some();
                        prop_assert_eq!(found, model.contains(&key), "Presence mismatch for {}", key);
                        if found {
                            expected_hits += 1;
                        } else {
                            expected_misses += 1;
                        }
                    }
                    CacheOp::Delete { key } => {
                        cache.delete(&key).await;
                        model.retain(|k| *k != key);
                    }
                }
            }

            let stats = cache.stats().await;
            prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
            prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
            prop_assert_eq!(stats.evicted, expected_evicted, "Evictions mismatch");
            prop_assert_eq!(stats.size, model.len(), "Size mismatch");

            cache.shutdown().await;
            Ok(())
        })?;
    }
}
