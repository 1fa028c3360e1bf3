//! Cache Module
//!
//! Bounded in-memory caching with TTL expiration and expiry-ordered eviction.

mod entry;
mod eviction;
mod facade;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use eviction::select_victim;
pub use facade::Cache;
pub use stats::{CacheStats, StatsCounters};
pub use store::EntryStore;
