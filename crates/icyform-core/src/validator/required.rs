use crate::{
    SchemaError,
    context::ValidateContext,
    issue::{BLANK_MESSAGE, Issue},
    validator::{Validate, Validator},
    value::Value,
};
use std::sync::Arc;

///
/// IsRequired
///
/// Fails with "May not be blank" when the field considers the value blank.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsRequired;

impl Validate for IsRequired {
    fn validate(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        let blank = ctx.field.is_blank(value, None)?;

        Ok(blank.then(|| Issue::from(BLANK_MESSAGE)))
    }
}

#[must_use]
pub fn is_required() -> Validator {
    Validator::new("is_required", IsRequired)
}

///
/// IsRequiredIf
///
/// `IsRequired`, but only when the predicate holds for this value and context.
///

type Predicate = Arc<dyn Fn(&Value, &ValidateContext<'_>) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct IsRequiredIf {
    predicate: Predicate,
}

impl IsRequiredIf {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &ValidateContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }
}

impl Validate for IsRequiredIf {
    fn validate(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        if (self.predicate)(value, ctx) {
            IsRequired.validate(value, ctx)
        } else {
            Ok(None)
        }
    }
}

pub fn is_required_if<F>(predicate: F) -> Validator
where
    F: Fn(&Value, &ValidateContext<'_>) -> bool + Send + Sync + 'static,
{
    Validator::new("is_required_if", IsRequiredIf::new(predicate))
}

///
/// AllowBlank
///
/// Always passes.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct AllowBlank;

impl Validate for AllowBlank {
    fn validate(&self, _: &Value, _: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        Ok(None)
    }
}

#[must_use]
pub fn allow_blank() -> Validator {
    Validator::new("allow_blank", AllowBlank)
}

///
/// MayNotBeBlank
///
/// Combines the field's own required check with an optional flag validator
/// looked up by `ctx.flag` in the field's `flags`:
///
/// - no flag validator: the required error, if the field is not `blank`
/// - required error and flag error: the required error
/// - required error only: pass
/// - flag error only: "May not be blank"
///

#[derive(Clone, Copy, Debug, Default)]
pub struct MayNotBeBlank;

impl Validate for MayNotBeBlank {
    fn validate(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        let default_error = if ctx.field.blank() {
            None
        } else {
            IsRequired.validate(value, ctx)?
        };

        let Some(flag_validator) = ctx.flag.and_then(|flag| ctx.field.flag(flag)) else {
            return Ok(default_error);
        };

        let flag_error = flag_validator.run(value, ctx)?;

        Ok(match (default_error, flag_error) {
            (Some(default_error), Some(_)) => Some(default_error),
            (None, Some(_)) => Some(Issue::from(BLANK_MESSAGE)),
            (_, None) => None,
        })
    }
}

#[must_use]
pub fn may_not_be_blank() -> Validator {
    Validator::new("may_not_be_blank", MayNotBeBlank)
}
