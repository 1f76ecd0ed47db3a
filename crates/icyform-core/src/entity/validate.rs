use crate::{
    SchemaError,
    cleaner,
    context::CleanContext,
    entity::{Entity, ValidateOptions},
    field::FieldValidateOptions,
    issue::{EntityError, Issue},
    value::{Record, Value},
};
use indexmap::IndexMap;
use tracing::trace;

impl Entity {
    /// Fold the record through the entity cleaners, in order.
    pub fn clean(&self, record: Record) -> Result<Record, SchemaError> {
        let cleaned = cleaner::run_all(
            self.cleaners(),
            Value::Record(record),
            &CleanContext::for_entity(self),
        )?;

        match cleaned {
            Value::Record(record) => Ok(record),
            other => Err(SchemaError::contract(
                "entity.clean",
                format!(
                    "({}) cleaners must return a record, got {}",
                    self.name(),
                    other.type_name()
                ),
            )),
        }
    }

    /// Validate every declared field (or only those named in
    /// `options.fields`). `None` means the record is valid.
    pub fn validate(
        &self,
        record: &Record,
        options: &ValidateOptions,
    ) -> Result<Option<EntityError>, SchemaError> {
        let mut errors = IndexMap::new();

        for (&name, field) in self.fields() {
            let validators = match &options.fields {
                Some(fields) => match fields.get(name) {
                    Some(spec) => Some(spec),
                    None => continue,
                },
                None => None,
            };

            let issues = field.validate(
                record.value(name),
                &FieldValidateOptions {
                    field_name: Some(name),
                    record: Some(record),
                    validators,
                    flag: options.flag.as_deref(),
                },
            )?;

            if !issues.is_empty() {
                errors.insert(name.to_string(), issues);
            }
        }

        trace!(entity = self.name(), invalid = errors.len(), "validated record");

        Ok((!errors.is_empty()).then(|| EntityError::new(errors)))
    }

    /// `validate` over a slot value that should hold a record or `null`.
    /// `null` is valid.
    pub fn validate_value(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> Result<Option<EntityError>, SchemaError> {
        match value {
            Value::Null => Ok(None),
            Value::Record(record) => self.validate(record, options),
            other => {
                ensure_contract!(
                    false,
                    "entity.validate",
                    "({}) record must be either a record or null, got {}",
                    self.name(),
                    other.type_name()
                );

                Ok(None)
            }
        }
    }

    pub fn is_valid(&self, record: &Record, options: &ValidateOptions) -> Result<bool, SchemaError> {
        Ok(self.validate(record, options)?.is_none())
    }

    /// Validity judged from issues already collected. With `names`, only
    /// entity errors recorded against those fields count.
    #[must_use]
    pub fn is_valid_from_errors(errors: &[Issue], names: Option<&[&str]>) -> bool {
        let Some(names) = names else {
            return errors.is_empty();
        };

        !names.iter().any(|name| {
            errors
                .iter()
                .filter_map(Issue::as_entity)
                .any(|err| !err.field(name).is_empty())
        })
    }
}
