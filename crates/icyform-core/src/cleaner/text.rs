use crate::{
    SchemaError,
    cleaner::{Clean, Cleaner},
    context::CleanContext,
    value::Value,
};
use regex::Regex;
use std::sync::LazyLock;

static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("multi-space pattern compiles"));

///
/// RemoveMultiSpace
///
/// Collapses every run of two or more whitespace characters into one space.
/// A lone whitespace character is kept as it is.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RemoveMultiSpace;

impl RemoveMultiSpace {
    #[must_use]
    pub fn collapse(s: &str) -> String {
        MULTI_SPACE.replace_all(s, " ").into_owned()
    }
}

impl Clean for RemoveMultiSpace {
    fn clean(&self, value: Value, _: &CleanContext<'_>) -> Result<Value, SchemaError> {
        ensure_contract!(
            matches!(value, Value::Text(_)),
            "cleaner.remove_multi_space",
            "value must be of type string, got {}",
            value.type_name()
        );

        Ok(match value {
            Value::Text(s) => Value::Text(Self::collapse(&s)),
            other => other,
        })
    }
}

#[must_use]
pub fn remove_multi_space() -> Cleaner {
    Cleaner::new("remove_multi_space", RemoveMultiSpace)
}

///
/// SliceToMaxLength
///
/// Truncates text to the invoking field's `max_length`, counted in
/// characters. No-op when the field has no (or a zero) `max_length`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SliceToMaxLength;

impl Clean for SliceToMaxLength {
    fn clean(&self, value: Value, ctx: &CleanContext<'_>) -> Result<Value, SchemaError> {
        ensure_contract!(
            ctx.field.is_some(),
            "cleaner.slice_to_max_length",
            "\"field\" option is required"
        );
        ensure_contract!(
            matches!(value, Value::Text(_)),
            "cleaner.slice_to_max_length",
            "value must be of type string, got {}",
            value.type_name()
        );

        let max_length = ctx
            .field
            .and_then(|field| field.max_length())
            .filter(|&max| max > 0);

        Ok(match (value, max_length) {
            (Value::Text(s), Some(max)) if s.chars().count() > max => {
                Value::Text(s.chars().take(max).collect())
            }
            (other, _) => other,
        })
    }
}

#[must_use]
pub fn slice_to_max_length() -> Cleaner {
    Cleaner::new("slice_to_max_length", SliceToMaxLength)
}
