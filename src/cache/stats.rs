//! Cache Statistics Module
//!
//! Tracks per-store counters: hits, misses, lazy expirations, capacity
//! evictions and explicit invalidations.

use serde::Serialize;

// == Cache Stats ==
/// Counters for a single store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads answered from the store
    pub hits: u64,
    /// Reads that found nothing usable (absent or stale)
    pub misses: u64,
    /// Stale entries removed on access
    pub expirations: u64,
    /// Entries dropped by the capacity ceiling
    pub evictions: u64,
    /// Entries removed by invalidate, invalidate_prefix or clear
    pub invalidations: u64,
    /// Current number of entries held
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expiration ==
    /// A stale entry was found on read. Counts as a miss as well.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
