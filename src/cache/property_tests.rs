//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store behaviour over arbitrary keys and payloads.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::cache::CacheStore;
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

fn test_store() -> CacheStore {
    CacheStore::new(&CacheConfig::new(TEST_TTL))
}

// == Strategies ==
/// Keys shaped like resource identifiers, including slashes
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9:/._-]{0,48}"
}

/// Arbitrary binary payloads, empty included
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    // A small key space so operations collide on the same keys.
    let key = "[a-d]{1,2}";
    prop_oneof![
        (key, payload_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key.prop_map(|key| CacheOp::Get { key }),
        key.prop_map(|key| CacheOp::Remove { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Adding then immediately getting returns the exact payload.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in payload_strategy()) {
        let store = test_store();

        store.add(key.clone(), value.clone());

        prop_assert_eq!(store.get(&key), Some(Bytes::from(value)));
    }

    // A key that was never added is a miss.
    #[test]
    fn prop_absent_key_misses(
        key in key_strategy(),
        other in key_strategy(),
        value in payload_strategy()
    ) {
        prop_assume!(key != other);
        let store = test_store();

        store.add(other, value);

        prop_assert_eq!(store.get(&key), None);
    }

    // The second write to a key is the one observed.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in payload_strategy(),
        value2 in payload_strategy()
    ) {
        let store = test_store();

        store.add(key.clone(), value1);
        store.add(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(Bytes::from(value2)));
        prop_assert_eq!(store.len(), 1);
    }

    // The store behaves like a plain map over any op sequence, and the
    // counters track every lookup.
    #[test]
    fn prop_matches_model_map(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let store = test_store();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    store.add(key.clone(), value.clone());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key);
                    let expected = model.get(&key).cloned().map(Bytes::from);
                    if expected.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                    prop_assert_eq!(got, expected);
                }
                CacheOp::Remove { key } => {
                    let removed = store.remove(&key);
                    prop_assert_eq!(removed, model.remove(&key).map(Bytes::from));
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, model.len());
    }

    // Sweeping fresh entries never removes anything.
    #[test]
    fn prop_sweep_keeps_fresh_entries(
        entries in prop::collection::hash_map(key_strategy(), payload_strategy(), 0..30)
    ) {
        let store = test_store();
        for (key, value) in &entries {
            store.add(key.clone(), value.clone());
        }

        prop_assert_eq!(store.sweep(), 0);
        prop_assert_eq!(store.len(), entries.len());
    }
}
