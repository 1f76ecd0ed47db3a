//! Fields: one record slot's type, defaulting, coercion, cleaning and
//! validation.

mod address;
mod builder;
mod coerce;
mod date;
mod kind;

#[cfg(test)]
mod tests;

pub use builder::{FieldBuilder, MOCK_INDEX};
pub use date::{DEFAULT_DATE_FORMAT, DEFAULT_DATETIME_FORMAT, DateFormat};
pub use kind::{EntityRef, FieldDefault, FieldKind, MockHint};

use crate::{
    SchemaError,
    cleaner::{self, Cleaner},
    context::{CleanContext, DataContext, ValidateContext},
    issue::Issue,
    validator::{self, Validator, ValidatorSpec},
    value::{Record, Value},
};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

///
/// FieldValidateOptions
///
/// Per-call inputs of [`Field::validate`].
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FieldValidateOptions<'a> {
    pub field_name: Option<&'a str>,
    pub record: Option<&'a Record>,
    pub validators: Option<&'a ValidatorSpec>,
    pub flag: Option<&'a str>,
}

///
/// Field
///
/// Immutable field schema produced by [`FieldBuilder::build`].
///

#[derive(Clone, Debug)]
pub struct Field {
    kind: FieldKind,
    type_tag: &'static str,
    blank: bool,
    many: bool,
    local: bool,
    max_length: Option<usize>,
    options: Vec<Value>,
    cleaners: Vec<Cleaner>,
    validators: Vec<Validator>,
    flags: IndexMap<String, Validator>,
    default: Option<FieldDefault>,
    mock: Option<MockHint>,
}

impl Field {
    #[must_use]
    pub fn any() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Any)
    }

    #[must_use]
    pub fn boolean() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Boolean)
    }

    #[must_use]
    pub fn char() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Char)
    }

    #[must_use]
    pub fn date() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Date(DateFormat::date()))
    }

    #[must_use]
    pub fn datetime() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Date(DateFormat::datetime()))
    }

    /// Entity field targeting the registered entity `name`.
    #[must_use]
    pub fn entity(name: &'static str) -> FieldBuilder {
        FieldBuilder::new(FieldKind::Entity(EntityRef::new(name)))
    }

    pub fn enumeration<I, V>(options: I) -> FieldBuilder
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        FieldBuilder::new(FieldKind::Enum).options(options)
    }

    #[must_use]
    pub fn id() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Id)
    }

    #[must_use]
    pub fn integer() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Integer)
    }

    #[must_use]
    pub fn number() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Number)
    }

    #[must_use]
    pub fn text() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Text)
    }

    // ---- accessors ----

    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        self.type_tag
    }

    #[must_use]
    pub const fn blank(&self) -> bool {
        self.blank
    }

    #[must_use]
    pub const fn many(&self) -> bool {
        self.many
    }

    /// Local fields never leave the process: `to_data` and `to_params` skip them.
    #[must_use]
    pub const fn local(&self) -> bool {
        self.local
    }

    #[must_use]
    pub const fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    #[must_use]
    pub fn cleaners(&self) -> &[Cleaner] {
        &self.cleaners
    }

    #[must_use]
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Flag validator registered under `name`.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&Validator> {
        self.flags.get(name)
    }

    #[must_use]
    pub const fn mock(&self) -> Option<&MockHint> {
        self.mock.as_ref()
    }

    #[must_use]
    pub const fn entity_ref(&self) -> Option<&EntityRef> {
        match &self.kind {
            FieldKind::Entity(target) => Some(target),
            _ => None,
        }
    }

    /// Configured options, or none.
    #[must_use]
    pub fn get_options(&self) -> &[Value] {
        &self.options
    }

    // ---- conversion ----

    /// Parse one raw element into its internal value.
    pub fn data_to_value(&self, raw: &JsonValue) -> Result<Value, SchemaError> {
        self.data_to_value_in(raw, &DataContext::default())
    }

    pub(crate) fn data_to_value_in(
        &self,
        raw: &JsonValue,
        ctx: &DataContext<'_>,
    ) -> Result<Value, SchemaError> {
        Ok(match &self.kind {
            FieldKind::Any | FieldKind::Char | FieldKind::Enum | FieldKind::Text => {
                Value::from_json(raw)
            }
            FieldKind::Boolean => coerce::boolean(raw),
            FieldKind::Date(format) => format.parse(raw),
            FieldKind::Id => coerce::identifier(raw),
            FieldKind::Integer => coerce::integer(raw),
            FieldKind::Number => coerce::number(raw),
            FieldKind::Entity(target) => {
                let nested = ctx.descend(raw.as_object())?;
                target
                    .resolve()?
                    .data_to_record_in(raw, &nested)?
                    .map_or(Value::Null, Value::Record)
            }
        })
    }

    /// Parse a raw slot, element-wise when it is an array.
    pub(crate) fn data_to_slot(
        &self,
        raw: &JsonValue,
        ctx: &DataContext<'_>,
    ) -> Result<Value, SchemaError> {
        match raw {
            JsonValue::Array(items) => items
                .iter()
                .map(|item| self.data_to_value_in(item, ctx))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            other => self.data_to_value_in(other, ctx),
        }
    }

    /// One internal value back to raw data.
    pub fn to_data(&self, value: &Value) -> Result<JsonValue, SchemaError> {
        match &self.kind {
            FieldKind::Date(format) => Ok(format
                .format(value)
                .map_or(JsonValue::Null, JsonValue::String)),
            FieldKind::Entity(target) => target.resolve()?.value_to_data(value),
            _ => Ok(value.to_json()),
        }
    }

    /// Query-string form of one value.
    pub fn to_params(&self, value: &Value) -> Result<String, SchemaError> {
        match &self.kind {
            FieldKind::Date(format) => Ok(format.format(value).unwrap_or_default()),
            FieldKind::Entity(_) => Ok(self
                .get_id(value, None)?
                .map(|id| id.to_string())
                .unwrap_or_default()),
            _ if is_falsy(value) => Ok(String::new()),
            _ => Ok(value.to_string()),
        }
    }

    /// Display string of one value.
    pub fn display(&self, value: &Value) -> Result<String, SchemaError> {
        match &self.kind {
            FieldKind::Date(format) => Ok(format.format(value).unwrap_or_default()),
            FieldKind::Entity(target) => target.resolve()?.display_value(value),
            _ => Ok(value.to_string()),
        }
    }

    /// Initial value of the slot when it is absent from raw data. `None`
    /// leaves the slot absent.
    pub fn default_value(&self, ctx: &DataContext<'_>) -> Result<Option<Value>, SchemaError> {
        if let Some(default) = &self.default {
            return Ok(Some(default.resolve(ctx)));
        }

        match &self.kind {
            FieldKind::Id => Ok(None),
            _ if self.many => Ok(Some(Value::List(Vec::new()))),
            FieldKind::Entity(target) if !self.blank => {
                let nested = ctx.descend(None)?;
                let record = target.resolve()?.default_record_in(&nested)?;

                Ok(Some(Value::Record(record)))
            }
            _ => Ok(Some(Value::Null)),
        }
    }

    // ---- cleaning and validation ----

    /// True for `Null`, an empty list on a many-field, or empty text.
    ///
    /// `name` may only be given on entity fields, where it must address a
    /// declared nested field.
    pub fn is_blank(&self, value: &Value, name: Option<&str>) -> Result<bool, SchemaError> {
        self.check_name("field.is_blank", name)?;

        Ok(match value {
            Value::Null => true,
            Value::List(items) if self.many => items.is_empty(),
            _ if self.many => false,
            Value::Text(s) => s.is_empty(),
            _ => false,
        })
    }

    /// Fold the value through this field's cleaners.
    pub fn clean(&self, value: Value) -> Result<Value, SchemaError> {
        cleaner::run_all(&self.cleaners, value, &CleanContext::for_field(self))
    }

    /// Run the effective validator sequence, keeping every reported issue.
    pub fn validate(
        &self,
        value: &Value,
        options: &FieldValidateOptions<'_>,
    ) -> Result<Vec<Issue>, SchemaError> {
        ensure_contract!(
            !self.many || value.is_list(),
            "field.validate",
            "({}-{}) \"value\" must be a list with field option \"many\"",
            self.type_tag,
            options.field_name.unwrap_or_default()
        );

        let ctx = ValidateContext {
            field: self,
            field_name: options.field_name,
            record: options.record,
            flag: options.flag,
        };

        match options.validators {
            Some(spec) => validator::run_all(&spec.resolve(&self.validators), value, &ctx),
            None => validator::run_all(&self.validators, value, &ctx),
        }
    }
}

// falsy values have no query-string form
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Int(i) => *i == 0,
        Value::Float(f) => *f == 0.0 || f.is_nan(),
        Value::Text(s) => s.is_empty(),
        Value::Date(_) | Value::List(_) | Value::Record(_) => false,
    }
}
