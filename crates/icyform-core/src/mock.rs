//! Mock capability contract.
//!
//! `Entity::mock` synthesizes raw instances from two collaborators: a
//! [`Faker`] that produces random data by dotted generator path, and a
//! [`MockStore`] holding instances already generated for other entities, used
//! to sample nested references.

use crate::SchemaError;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

///
/// Faker
///

pub trait Faker {
    /// Produce a value with the generator at dotted `path`.
    fn generate(&mut self, path: &str, args: &[JsonValue]) -> Result<JsonValue, SchemaError>;

    /// Random index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

///
/// MockStore
///

pub trait MockStore {
    /// Live instances of `entity`, as raw data.
    fn instances(&self, entity: &str) -> Vec<JsonValue>;
}

impl MockStore for () {
    fn instances(&self, _: &str) -> Vec<JsonValue> {
        Vec::new()
    }
}

impl<S: BuildHasher> MockStore for HashMap<String, Vec<JsonValue>, S> {
    fn instances(&self, entity: &str) -> Vec<JsonValue> {
        self.get(entity).cloned().unwrap_or_default()
    }
}

impl MockStore for BTreeMap<String, Vec<JsonValue>> {
    fn instances(&self, entity: &str) -> Vec<JsonValue> {
        self.get(entity).cloned().unwrap_or_default()
    }
}

// pools keyed by identifier, as produced by `Entity::mock_many`
impl<S: BuildHasher> MockStore for HashMap<String, IndexMap<String, JsonValue>, S> {
    fn instances(&self, entity: &str) -> Vec<JsonValue> {
        self.get(entity)
            .map(|pool| pool.values().cloned().collect())
            .unwrap_or_default()
    }
}

/// One element of `pool`, chosen by `faker`.
pub fn sample(faker: &mut dyn Faker, pool: &[JsonValue]) -> Option<JsonValue> {
    if pool.is_empty() {
        return None;
    }

    pool.get(faker.pick(pool.len()) % pool.len()).cloned()
}

/// `size` distinct elements of `pool`, chosen by `faker` (partial shuffle).
pub fn sample_size(faker: &mut dyn Faker, pool: &[JsonValue], size: usize) -> Vec<JsonValue> {
    let mut remaining = pool.to_vec();
    let mut picked = Vec::with_capacity(size.min(pool.len()));

    while picked.len() < size && !remaining.is_empty() {
        let index = faker.pick(remaining.len()) % remaining.len();
        picked.push(remaining.swap_remove(index));
    }

    picked
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Cycle(usize);

    impl Faker for Cycle {
        fn generate(&mut self, path: &str, _: &[JsonValue]) -> Result<JsonValue, SchemaError> {
            Err(SchemaError::UnknownGenerator(path.to_string()))
        }

        fn pick(&mut self, len: usize) -> usize {
            self.0 += 1;
            self.0 % len
        }
    }

    #[test]
    fn sample_size_picks_distinct_elements() {
        let pool = vec![json!(1), json!(2), json!(3)];
        let picked = sample_size(&mut Cycle(0), &pool, 3);

        assert_eq!(picked.len(), 3);
        for value in &pool {
            assert!(picked.contains(value));
        }
        assert_eq!(sample_size(&mut Cycle(0), &pool, 10).len(), 3);
    }

    #[test]
    fn sampling_empty_pool() {
        assert_eq!(sample(&mut Cycle(0), &[]), None);
        assert!(sample_size(&mut Cycle(0), &[], 2).is_empty());
    }

    #[test]
    fn stores() {
        let mut store = HashMap::new();
        store.insert("Tag".to_string(), vec![json!({ "label": "a" })]);

        assert_eq!(store.instances("Tag").len(), 1);
        assert!(store.instances("Other").is_empty());
        assert!(().instances("Tag").is_empty());
    }
}
