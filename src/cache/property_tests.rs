//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a naive recency-ordered model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
/// Long enough that nothing expires while a case runs
const TEST_TTL: Duration = Duration::from_secs(3600);

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Has { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Has { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

// == Reference Model ==
/// Keys ordered least to most recently used, plus their values.
#[derive(Debug, Default)]
struct Model {
    order: Vec<String>,
    values: HashMap<String, u32>,
    limit: usize,
}

impl Model {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push(key.to_string());
    }

    fn get(&mut self, key: &str) -> Option<u32> {
        let value = self.values.get(key).copied();
        if value.is_some() {
            self.touch(key);
        }
        value
    }

    fn set(&mut self, key: &str, value: u32) -> Option<String> {
        let mut evicted = None;
        if !self.values.contains_key(key) && self.values.len() == self.limit {
            let oldest = self.order.remove(0);
            self.values.remove(&oldest);
            evicted = Some(oldest);
        }
        self.values.insert(key.to_string(), value);
        self.touch(key);
        evicted
    }

    fn remove(&mut self, key: &str) -> Option<u32> {
        self.order.retain(|k| k != key);
        self.values.remove(key)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every operation agrees with the model, and the recency order matches
    // after each step.
    #[test]
    fn prop_matches_reference_model(
        limit in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let mut store = CacheStore::new(TEST_TTL, limit);
        let mut model = Model::new(limit);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    let evicted = model.set(&key, value);
                    store.set(key, value);
                    if let Some(evicted) = evicted {
                        prop_assert!(store.peek(&evicted).is_none());
                    }
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key).copied(), model.get(&key));
                }
                CacheOp::Has { key } => {
                    prop_assert_eq!(store.has(&key), model.get(&key).is_some());
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(store.remove(&key), model.remove(&key));
                }
            }

            let keys: Vec<&str> = store.keys().collect();
            let expected: Vec<&str> = model.order.iter().map(String::as_str).collect();
            prop_assert_eq!(keys, expected);
        }
    }

    // The number of entries never exceeds the item limit.
    #[test]
    fn prop_capacity_enforcement(
        limit in 1usize..20,
        keys in prop::collection::vec("[a-z]{1,4}", 1..200)
    ) {
        let mut store = CacheStore::new(TEST_TTL, limit);

        for (i, key) in keys.into_iter().enumerate() {
            store.set(key, i);
            prop_assert!(
                store.len() <= limit,
                "Cache size {} exceeds limit {}",
                store.len(),
                limit
            );
        }
    }

    // Setting an existing key changes its value without evicting anything.
    #[test]
    fn prop_update_does_not_evict(
        value1 in any::<u32>(),
        value2 in any::<u32>()
    ) {
        let mut store = CacheStore::new(TEST_TTL, 2);

        store.set("a", value1);
        store.set("b", value1);
        store.set("a", value2);

        prop_assert_eq!(store.len(), 2);
        prop_assert_eq!(store.stats().evictions, 0);
        prop_assert_eq!(store.get("a").copied(), Some(value2));
        prop_assert_eq!(store.get("b").copied(), Some(value1));
    }

    // Statistics count every lookup as exactly one hit or one miss.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_TTL, 4);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => store.set(key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Has { key } => {
                    if store.has(&key) {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                }
                CacheOp::Remove { key } => {
                    store.remove(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
        prop_assert_eq!(stats.expirations, 0);
    }
}
