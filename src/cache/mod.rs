//! Cache Module
//!
//! In-memory response stores with lazy TTL expiry, prefix invalidation and an
//! optional LRU entry ceiling.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub(crate) use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;
