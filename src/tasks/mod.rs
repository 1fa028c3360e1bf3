//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Expiry Sweeper: removes expired cache entries every cleanup period

mod sweeper;

pub use sweeper::spawn_sweeper;
