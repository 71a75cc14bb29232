//! In-flight request coalescing.
//!
//! Concurrent misses for the same key share one upstream call. Keys match
//! the cache keys exactly.

use std::collections::HashMap;
use std::fmt;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use crate::error::Result;

/// A fetch that any number of callers can await.
pub type PendingFetch<V> = Shared<BoxFuture<'static, Result<V>>>;

pub struct InFlight<V> {
    pending: Mutex<HashMap<String, PendingFetch<V>>>,
}

impl<V> Default for InFlight<V> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> InFlight<V> {
    pub fn new() -> Self {
        Self::default()
    }

    // == Join Or Start ==
    /// Joins the unfinished fetch for `key`, or starts one with `start`.
    ///
    /// The boolean is `true` for the caller that started the fetch; that
    /// caller owns calling [`InFlight::finish`]. A fetch that already
    /// resolved is never joined.
    pub fn join_or_start<F>(&self, key: &str, start: F) -> (PendingFetch<V>, bool)
    where
        F: FnOnce() -> BoxFuture<'static, Result<V>>,
    {
        let mut pending = self.pending.lock();
        if let Some(existing) = pending.get(key) {
            if existing.peek().is_none() {
                return (existing.clone(), false);
            }
        }

        let fetch = start().shared();
        pending.insert(key.to_string(), fetch.clone());
        (fetch, true)
    }

    // == Start ==
    /// Starts a new fetch for `key` even if one is already running. Later
    /// joiners get the new fetch; callers of the old one keep theirs.
    pub fn start<F>(&self, key: &str, start: F) -> PendingFetch<V>
    where
        F: FnOnce() -> BoxFuture<'static, Result<V>>,
    {
        let fetch = start().shared();
        self.pending.lock().insert(key.to_string(), fetch.clone());
        fetch
    }

    /// Forgets `fetch` under `key`, unless a newer fetch has taken its place.
    pub fn finish(&self, key: &str, fetch: &PendingFetch<V>) {
        let mut pending = self.pending.lock();
        if pending.get(key).is_some_and(|current| current.ptr_eq(fetch)) {
            pending.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl<V> fmt::Debug for InFlight<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("pending", &self.pending.lock().len())
            .finish()
    }
}
