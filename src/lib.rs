//! Fragment Cache - A bounded in-memory cache for intermediate state
//!
//! Holds opaque values under caller-defined keys with a fixed capacity, a TTL
//! per entry and a background sweeper that prunes expired entries. When full,
//! the entry expiring soonest is evicted.
//!
//! ```ignore
//! let cache: Cache<String, Arc<Fragment>> = Cache::new(CacheConfig::from_env())?;
//! cache.set("session:42".to_string(), fragment).await;
//! let hit = cache.get("session:42").await;
//! cache.shutdown().await;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheStats};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
