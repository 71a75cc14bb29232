//! LRU Tracker Module
//!
//! Access-order bookkeeping for the optional per-store entry ceiling.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Orders keys by a monotonically increasing access tick; the lowest tick is
/// the least recently used key.
#[derive(Debug, Default)]
pub(crate) struct LruTracker {
    tick: u64,
    by_tick: BTreeMap<u64, String>,
    ticks: HashMap<String, u64>,
}

impl LruTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub(crate) fn touch(&mut self, key: &str) {
        self.tick += 1;
        if let Some(old) = self.ticks.insert(key.to_string(), self.tick) {
            self.by_tick.remove(&old);
        }
        self.by_tick.insert(self.tick, key.to_string());
    }

    pub(crate) fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.by_tick.remove(&tick);
        }
    }

    /// Stops tracking every key for which `keep` returns `false`.
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.by_tick.retain(|_, key| keep(key));
        let by_tick = &self.by_tick;
        self.ticks.retain(|_, tick| by_tick.contains_key(tick));
    }

    pub(crate) fn clear(&mut self) {
        self.by_tick.clear();
        self.ticks.clear();
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    pub(crate) fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_tick.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }
}
