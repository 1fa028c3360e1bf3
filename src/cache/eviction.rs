//! Capacity Guard
//!
//! Chooses which entry to evict when an insert would exceed the capacity bound.
//! Entries are ordered purely by expiration, not by access or insertion recency.

use std::collections::HashMap;

use crate::cache::CacheEntry;

// == Select Victim ==
/// Returns the key of the entry that expires soonest.
///
/// Ties on `expires_at` go to the lowest `seq`, i.e. the oldest write.
/// Returns None if there are no entries.
pub fn select_victim<K, V, S>(entries: &HashMap<K, CacheEntry<V>, S>) -> Option<&K> {
    entries
        .iter()
        .min_by_key(|(_, entry)| (entry.expires_at, entry.seq))
        .map(|(key, _)| key)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    #[test]
    fn test_select_victim_empty() {
        let entries: HashMap<String, CacheEntry<u32>> = HashMap::new();
        assert_eq!(select_victim(&entries), None);
    }

    #[test]
    fn test_select_victim_earliest_expiration() {
        let now = Instant::now();
        let mut entries = HashMap::new();
        entries.insert("long", CacheEntry::new(1, now, Duration::from_secs(60), 0));
        entries.insert("short", CacheEntry::new(2, now, Duration::from_secs(1), 1));
        entries.insert("mid", CacheEntry::new(3, now, Duration::from_secs(30), 2));

        // "short" was written after "long" but expires first
        assert_eq!(select_victim(&entries), Some(&"short"));
    }

    #[test]
    fn test_select_victim_tie_breaks_on_oldest_write() {
        let now = Instant::now();
        let ttl = Duration::from_secs(5);
        let mut entries = HashMap::new();
        entries.insert("c", CacheEntry::new(3, now, ttl, 9));
        entries.insert("a", CacheEntry::new(1, now, ttl, 4));
        entries.insert("b", CacheEntry::new(2, now, ttl, 6));

        assert_eq!(select_victim(&entries), Some(&"a"));
    }
}
