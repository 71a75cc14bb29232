//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's expiry, overwrite and invalidation
//! properties against a manual clock.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, ManualClock};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

fn new_store() -> (CacheStore<String>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let store = CacheStore::with_clock("prop", TEST_TTL, clock.clone());
    (store, clock)
}

// == Strategies ==
/// Keys drawn from the three real key families plus arbitrary ones
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,4}".prop_map(|id| format!("recipe_{}", id)),
        "[0-9]{1,4}".prop_map(|id| format!("reviews_{}", id)),
        "[a-z]{0,6}".prop_map(|c| format!("recipes_{{\"category\":\"{}\"}}", c)),
        "[a-zA-Z0-9_]{1,16}",
    ]
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

fn prefix_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("recipe_".to_string()),
        Just("recipes_".to_string()),
        Just("reviews_".to_string()),
        "[a-z_]{0,4}",
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Invalidate { key: String },
    Advance { millis: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Invalidate { key }),
        (0u64..200_000).prop_map(|millis| CacheOp::Advance { millis }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A value is served while younger than the TTL and gone (and evicted)
    // from the moment its age reaches the TTL.
    #[test]
    fn prop_ttl_expiry(
        key in key_strategy(),
        value in value_strategy(),
        age_ms in 0u64..600_000,
    ) {
        let (mut store, clock) = new_store();
        store.set(key.clone(), value.clone());
        clock.advance(Duration::from_millis(age_ms));

        let ttl_ms = TEST_TTL.as_millis() as u64;
        if age_ms < ttl_ms {
            prop_assert_eq!(store.get(&key), Some(value));
            prop_assert_eq!(store.len(), 1);
        } else {
            prop_assert_eq!(store.get(&key), None);
            prop_assert_eq!(store.len(), 0, "stale entry must be removed on access");
        }
    }

    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy(),
    ) {
        let (mut store, _clock) = new_store();

        store.set(key.clone(), value1);
        store.set(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Every key under the prefix is gone, every other key is untouched.
    #[test]
    fn prop_prefix_invalidation_completeness(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 0..40),
        prefix in prefix_strategy(),
    ) {
        let (mut store, _clock) = new_store();
        for (key, value) in &entries {
            store.set(key.clone(), value.clone());
        }
        let survivors: Vec<(String, String)> = {
            let mut latest = std::collections::HashMap::new();
            for (key, value) in &entries {
                latest.insert(key.clone(), value.clone());
            }
            latest.into_iter().filter(|(k, _)| !k.starts_with(&prefix)).collect()
        };
        let matching = store.len() - survivors.len();

        let removed = store.invalidate_prefix(&prefix);

        prop_assert_eq!(removed, matching);
        for (key, _) in &entries {
            if key.starts_with(&prefix) {
                prop_assert_eq!(store.get(key), None);
            }
        }
        for (key, value) in survivors {
            prop_assert_eq!(store.get(&key), Some(value));
        }
    }

    #[test]
    fn prop_invalidate_is_idempotent(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 0..20),
        target in key_strategy(),
    ) {
        let (mut once, _c1) = new_store();
        let (mut twice, _c2) = new_store();
        for (key, value) in &entries {
            once.set(key.clone(), value.clone());
            twice.set(key.clone(), value.clone());
        }

        once.invalidate(&target);
        twice.invalidate(&target);
        prop_assert!(!twice.invalidate(&target));

        prop_assert_eq!(once.len(), twice.len());
        for (key, _) in &entries {
            prop_assert_eq!(once.get(key), twice.get(key));
        }
    }

    // The store never answers with something it was not given for that key.
    #[test]
    fn prop_get_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let (mut store, clock) = new_store();
        let ttl_ms = TEST_TTL.as_millis() as u64;
        let mut model: std::collections::HashMap<String, (String, u64)> = Default::default();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    model.insert(key.clone(), (value.clone(), clock_now(&clock)));
                    store.set(key, value);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key).and_then(|(value, at)| {
                        (clock_now(&clock) - at < ttl_ms).then(|| value.clone())
                    });
                    if expected.is_none() {
                        model.remove(&key);
                    }
                    prop_assert_eq!(store.get(&key), expected);
                }
                CacheOp::Invalidate { key } => {
                    model.remove(&key);
                    store.invalidate(&key);
                }
                CacheOp::Advance { millis } => clock.advance(Duration::from_millis(millis)),
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.total_entries, store.len());
    }

    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200)
    ) {
        let max_entries = 16;
        let (store, _clock) = new_store();
        let mut store = store.with_capacity(max_entries);

        for (key, value) in entries {
            store.set(key, value);
            prop_assert!(
                store.len() <= max_entries,
                "Cache size {} exceeds max {}",
                store.len(),
                max_entries
            );
        }
    }
}

fn clock_now(clock: &ManualClock) -> u64 {
    use crate::cache::Clock;
    clock.now_ms()
}
