use crate::{
    SchemaError,
    cleaner::Cleaner,
    context::DataContext,
    field::{Field, FieldDefault, FieldKind, MockHint},
    validator::{Validator, ValidatorSpec, entity_valid, is_option, is_required, list},
    value::Value,
};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Mock path that stands for the instance index.
pub const MOCK_INDEX: &str = "index";

///
/// FieldBuilder
///
/// Schema-authoring surface of a field. `build` resolves the validator
/// sequence and checks the configuration.
///

#[derive(Clone, Debug)]
#[must_use]
pub struct FieldBuilder {
    kind: FieldKind,
    type_tag: Option<&'static str>,
    blank: bool,
    many: bool,
    local: bool,
    max_length: Option<usize>,
    options: Vec<Value>,
    cleaners: Vec<Cleaner>,
    validators: Option<ValidatorSpec>,
    flags: IndexMap<String, Validator>,
    default: Option<FieldDefault>,
    mock: Option<MockHint>,
}

impl FieldBuilder {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            type_tag: None,
            blank: false,
            many: false,
            local: false,
            max_length: None,
            options: Vec::new(),
            cleaners: Vec::new(),
            validators: None,
            flags: IndexMap::new(),
            default: None,
            mock: None,
        }
    }

    pub const fn type_tag(mut self, tag: &'static str) -> Self {
        self.type_tag = Some(tag);
        self
    }

    pub const fn blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    pub const fn many(mut self, many: bool) -> Self {
        self.many = many;
        self
    }

    pub const fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn options<I, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn cleaner(mut self, cleaner: Cleaner) -> Self {
        self.cleaners.push(cleaner);
        self
    }

    pub fn cleaners(mut self, cleaners: impl IntoIterator<Item = Cleaner>) -> Self {
        self.cleaners.extend(cleaners);
        self
    }

    /// Replace (`ValidatorSpec::List`) or transform the default validators.
    pub fn validators(mut self, spec: impl Into<ValidatorSpec>) -> Self {
        self.validators = Some(spec.into());
        self
    }

    /// Register a named flag validator, consulted by `may_not_be_blank`.
    pub fn flag(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.flags.insert(name.into(), validator);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Default computed from the raw data the record is built from.
    pub fn default_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&DataContext<'_>) -> Value + Send + Sync + 'static,
    {
        self.default = Some(FieldDefault::Computed(Arc::new(f)));
        self
    }

    /// Mock with the faker generator at dotted `path`. The bare path
    /// `"index"` is the same as [`Self::mock_index`].
    pub fn mock(self, path: impl Into<String>) -> Self {
        let path = path.into();
        if path == MOCK_INDEX {
            return self.mock_index();
        }

        self.mock_with(path, Vec::new())
    }

    pub fn mock_with(mut self, path: impl Into<String>, args: Vec<JsonValue>) -> Self {
        self.mock = Some(MockHint::Generator {
            path: path.into(),
            args,
        });
        self
    }

    /// Mock with the index of the generated instance.
    pub fn mock_index(mut self) -> Self {
        self.mock = Some(MockHint::Index);
        self
    }

    /// Date pattern, in `time` format-description syntax. Ignored by
    /// non-date kinds.
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        if let FieldKind::Date(format) = &mut self.kind {
            *format = format.clone().with_pattern(pattern);
        }
        self
    }

    pub fn allow_time(mut self, allow_time: bool) -> Self {
        if let FieldKind::Date(format) = &mut self.kind {
            *format = format.clone().with_allow_time(allow_time);
        }
        self
    }

    // validators attached by the kind itself, after the required check
    fn kind_validators(&self) -> Vec<Validator> {
        match &self.kind {
            FieldKind::Entity(_) if self.many => vec![list([entity_valid()])],
            FieldKind::Entity(_) => vec![entity_valid()],
            FieldKind::Enum => vec![is_option()],
            _ => Vec::new(),
        }
    }

    pub fn build(self) -> Result<Field, SchemaError> {
        let type_tag = self.type_tag.unwrap_or_else(|| self.kind.default_tag());

        ensure_contract!(
            !self.options.iter().enumerate().any(|(i, option)| self.options[..i].contains(option)),
            "field.build",
            "({type_tag}) options must have unique items"
        );
        ensure_contract!(
            !(self.many && matches!(self.kind, FieldKind::Id)),
            "field.build",
            "\"many\" option is not supported"
        );

        if let FieldKind::Date(format) = &self.kind {
            format.check()?;
        }

        let mut defaults = if self.blank {
            Vec::new()
        } else {
            vec![is_required()]
        };
        defaults.extend(self.kind_validators());

        let validators = match &self.validators {
            Some(spec) => spec.resolve(&defaults),
            None => defaults,
        };

        Ok(Field {
            kind: self.kind,
            type_tag,
            blank: self.blank,
            many: self.many,
            local: self.local,
            max_length: self.max_length,
            options: self.options,
            cleaners: self.cleaners,
            validators,
            flags: self.flags,
            default: self.default,
            mock: self.mock,
        })
    }
}
