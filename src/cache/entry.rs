//! Cache Entry Module
//!
//! Defines a single cached payload and its insertion time.

// == Cache Entry ==
/// A cached payload with the time it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The cached payload
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped with `now_ms`.
    pub fn new(value: V, now_ms: u64) -> Self {
        Self {
            value,
            stored_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds since the entry was stored. A clock that went backwards
    /// yields zero rather than underflowing.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at)
    }

    // == Is Valid ==
    /// Checks the entry against the store TTL.
    ///
    /// Boundary condition: an entry is valid only while `now - stored_at < ttl`.
    /// Once the full TTL has elapsed it is stale.
    pub fn is_valid(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.age_ms(now_ms) < ttl_ms
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds, `0` once stale.
    pub fn ttl_remaining_ms(&self, now_ms: u64, ttl_ms: u64) -> u64 {
        ttl_ms.saturating_sub(self.age_ms(now_ms))
    }
}
