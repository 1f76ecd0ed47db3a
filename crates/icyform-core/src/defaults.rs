//! Default-value resolution.
//!
//! Resolves initial raw values from a shared context object, with explicit
//! overrides. The caller passes both in; nothing is read from ambient state.

use serde_json::{Map as JsonMap, Value as JsonValue};

/// Resolve one raw value per mapped key.
///
/// For each `(key, fallbacks)` pair: a value in `overrides` under `key` wins
/// (an explicit `null` included); otherwise the first fallback name whose
/// value in `context` is truthy supplies it; otherwise the key is absent from
/// the result.
///
/// The result is a raw data object, ready for `Entity::data_to_record`.
pub fn resolve<'a, M, F>(
    mapping: M,
    context: &JsonMap<String, JsonValue>,
    overrides: &JsonMap<String, JsonValue>,
) -> JsonMap<String, JsonValue>
where
    M: IntoIterator<Item = (&'a str, F)>,
    F: IntoIterator<Item = &'a str>,
{
    let mut resolved = JsonMap::new();

    for (key, fallbacks) in mapping {
        if let Some(value) = overrides.get(key) {
            resolved.insert(key.to_string(), value.clone());
            continue;
        }

        let found = fallbacks
            .into_iter()
            .find_map(|name| context.get(name).filter(|value| is_truthy(value)));

        if let Some(value) = found {
            resolved.insert(key.to_string(), value.clone());
        }
    }

    resolved
}

/// Truthiness of a raw value: `null`, `false`, zero, NaN and empty text are
/// falsy.
#[must_use]
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> JsonMap<String, JsonValue> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn override_wins() {
        let context = object(json!({ "team": "context" }));
        let overrides = object(json!({ "team": "override" }));

        let resolved = resolve([("team", ["team"])], &context, &overrides);

        assert_eq!(resolved.get("team"), Some(&json!("override")));
    }

    #[test]
    fn explicit_null_override_counts() {
        let context = object(json!({ "team": "context" }));
        let overrides = object(json!({ "team": null }));

        let resolved = resolve([("team", ["team"])], &context, &overrides);

        assert_eq!(resolved.get("team"), Some(&JsonValue::Null));
    }

    #[test]
    fn first_truthy_fallback() {
        let context = object(json!({ "a": "", "b": 0, "c": "found", "d": "later" }));

        let resolved = resolve([("key", vec!["a", "b", "c", "d"])], &context, &JsonMap::new());

        assert_eq!(resolved.get("key"), Some(&json!("found")));
    }

    #[test]
    fn unresolved_keys_are_absent() {
        let context = object(json!({ "other": 1 }));

        let resolved = resolve([("key", ["missing"])], &context, &JsonMap::new());

        assert!(resolved.is_empty());
    }
}
