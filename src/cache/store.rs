//! Cache Store Module
//!
//! TTL-governed key/value store. Expiry is checked lazily on read; there is
//! no background sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, LruTracker, SystemClock};

// == Cache Store ==
/// One domain's cache: a key space, a fixed TTL and an optional entry ceiling.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Name used in log lines and stats
    name: &'static str,
    entries: HashMap<String, CacheEntry<V>>,
    /// Access order, only consulted when `max_entries` is set
    lru: LruTracker,
    stats: CacheStats,
    ttl: Duration,
    max_entries: Option<usize>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an unbounded store reading the wall clock.
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self::with_clock(name, ttl, Arc::new(SystemClock))
    }

    /// Creates an unbounded store reading time from `clock`.
    pub fn with_clock(name: &'static str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            ttl,
            max_entries: None,
            clock,
        }
    }

    /// Caps the store at `max_entries`, evicting least recently used keys.
    pub fn with_capacity(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }

    fn ttl_ms(&self) -> u64 {
        self.ttl.as_millis() as u64
    }

    // == Get ==
    /// Returns the cached payload if present and still valid.
    ///
    /// A stale entry is removed here and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms();

        let valid = match self.entries.get(key) {
            Some(entry) => entry.is_valid(now, ttl_ms),
            None => {
                self.stats.record_miss();
                debug!(store = self.name, key, "cache miss");
                return None;
            }
        };

        if !valid {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            debug!(store = self.name, key, "cache entry expired");
            return None;
        }

        self.stats.record_hit();
        if self.max_entries.is_some() {
            self.lru.touch(key);
        }
        debug!(store = self.name, key, "cache hit");
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Inserts or overwrites `key`, stamping it with the current time.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(max_entries) = self.max_entries {
            if !self.entries.contains_key(&key) && self.entries.len() >= max_entries {
                if let Some(evicted) = self.lru.evict_oldest() {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                    debug!(store = self.name, key = %evicted, "evicted least recently used entry");
                }
            }
            self.lru.touch(&key);
        }

        let entry = CacheEntry::new(value, self.clock.now_ms());
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Invalidate ==
    /// Removes `key` if present. Returns whether an entry was dropped.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.record_invalidations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(store = self.name, key, "invalidated cache entry");
        }
        removed
    }

    // == Invalidate Prefix ==
    /// Removes every entry whose key starts with `prefix`, stale ones included.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - self.entries.len();

        if removed > 0 {
            self.lru.retain(|key| !key.starts_with(prefix));
            self.stats.record_invalidations(removed);
            self.stats.set_total_entries(self.entries.len());
        }
        debug!(store = self.name, prefix, removed, "invalidated cache prefix");
        removed
    }

    // == Clear ==
    /// Drops every entry. Returns how many were held.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.record_invalidations(removed);
        self.stats.set_total_entries(0);
        debug!(store = self.name, removed, "cleared cache store");
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Number of entries held, including stale ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
