use crate::value::{NULL, Value};
use derive_more::Deref;
use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::sync::Arc;

///
/// Record
///
/// Immutable, ordered `name → Value` mapping produced from raw data.
/// Cloning is cheap; every transform returns a new `Record` and leaves the
/// original untouched, so one record can be shared across threads freely.
///
/// Keys whose value is absent (for example an identifier with no default)
/// are not present at all; `value` reads them back as `Value::Null`.
///

#[derive(Clone, Debug, Default, Deref, PartialEq)]
#[deref(forward)]
pub struct Record(Arc<IndexMap<String, Value>>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_map(map: IndexMap<String, Value>) -> Self {
        Self(Arc::new(map))
    }

    /// Read a slot, treating an absent key as `Null`.
    #[must_use]
    pub fn value(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }

    /// Return a new record with `key` set to `value`.
    ///
    /// An existing key keeps its position; a new key is appended.
    #[must_use]
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = (*self.0).clone();
        map.insert(key.into(), value.into());

        Self::from_map(map)
    }

    /// Return a new record without `key`, preserving the order of the rest.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        if !self.0.contains_key(key) {
            return self.clone();
        }

        let mut map = (*self.0).clone();
        map.shift_remove(key);

        Self::from_map(map)
    }

    /// Apply `f` to every slot, producing a new record.
    pub fn map_values<E>(
        &self,
        mut f: impl FnMut(&str, &Value) -> Result<Value, E>,
    ) -> Result<Self, E> {
        let map = self
            .0
            .iter()
            .map(|(k, v)| Ok((k.clone(), f(k, v)?)))
            .collect::<Result<IndexMap<_, _>, E>>()?;

        Ok(Self::from_map(map))
    }

    /// Deep-unwrap into a plain JSON object.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.to_json_map())
    }

    #[must_use]
    pub fn to_json_map(&self) -> JsonMap<String, JsonValue> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }

    /// Structural copy of a plain JSON object.
    #[must_use]
    pub fn from_json_map(map: &JsonMap<String, JsonValue>) -> Self {
        map.iter()
            .map(|(k, v)| (k.clone(), Value::from_json(v)))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Value); N]> for Record {
    fn from(entries: [(K, Value); N]) -> Self {
        entries.into_iter().collect()
    }
}
