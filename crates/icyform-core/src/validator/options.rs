use crate::{
    SchemaError,
    context::ValidateContext,
    issue::Issue,
    validator::{Validate, Validator},
    value::Value,
};

///
/// IsOption
///
/// Non-blank values must be one of the field's `options`. Each element of a
/// many-field is checked on its own.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsOption;

impl Validate for IsOption {
    fn validate(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        if ctx.field.is_blank(value, None)? {
            return Ok(None);
        }

        let options = ctx.field.get_options();
        let candidates = match value {
            Value::List(items) => items.as_slice(),
            other => std::slice::from_ref(other),
        };

        Ok(candidates
            .iter()
            .find(|candidate| !options.contains(candidate))
            .map(|candidate| Issue::message(format!("'{candidate}' is not an allowed option"))))
    }
}

#[must_use]
pub fn is_option() -> Validator {
    Validator::new("is_option", IsOption)
}
