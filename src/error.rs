//! Error types for the fragment cache
//!
//! Runtime cache operations are total; errors only arise while constructing a cache.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the fragment cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Cache constructed outside of a Tokio runtime, so the sweeper cannot be spawned
    #[error("No Tokio runtime available to run the expiry sweeper")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the fragment cache.
pub type Result<T> = std::result::Result<T, CacheError>;
