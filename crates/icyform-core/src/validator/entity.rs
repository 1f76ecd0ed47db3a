use crate::{
    SchemaError,
    context::ValidateContext,
    entity::{Entity, ValidateOptions},
    issue::Issue,
    validator::{Validate, Validator},
    value::Value,
};
use std::sync::Arc;

// nested entity of the field being validated
fn nested_entity(ctx: &ValidateContext<'_>, context: &'static str) -> Result<Option<Arc<Entity>>, SchemaError> {
    match ctx.field.entity_ref() {
        Some(target) => target.resolve().map(Some),
        None => {
            ensure_contract!(
                false,
                context,
                "({}) field is not an entity field",
                ctx.field_name.unwrap_or(ctx.field.type_tag())
            );

            Ok(None)
        }
    }
}

///
/// EntityValid
///
/// Runs the nested entity's own validation over a nested record. The active
/// flag carries through; per-call field overrides do not.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct EntityValid;

impl Validate for EntityValid {
    fn validate(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        let Some(entity) = nested_entity(ctx, "validator.entity_valid")? else {
            return Ok(None);
        };

        let options = ValidateOptions {
            flag: ctx.flag.map(str::to_string),
            ..ValidateOptions::default()
        };

        Ok(entity.validate_value(value, &options)?.map(Issue::from))
    }
}

#[must_use]
pub fn entity_valid() -> Validator {
    Validator::new("entity_valid", EntityValid)
}

///
/// EntityCheck
///

type EntityPredicate =
    Arc<dyn Fn(&Value, &Entity, &ValidateContext<'_>) -> Option<Issue> + Send + Sync>;

#[derive(Clone)]
pub enum EntityCheck {
    /// Validate the nested record with these options.
    Options(ValidateOptions),

    /// Judge the nested record with a custom predicate.
    Predicate(EntityPredicate),
}

///
/// EntityWith
///
/// Validator factory over the nested entity of an entity field.
///

#[derive(Clone)]
pub struct EntityWith {
    check: EntityCheck,
}

impl EntityWith {
    #[must_use]
    pub const fn new(check: EntityCheck) -> Self {
        Self { check }
    }
}

impl Validate for EntityWith {
    fn validate(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        let Some(entity) = nested_entity(ctx, "validator.entity_with")? else {
            return Ok(None);
        };

        match &self.check {
            EntityCheck::Options(options) => {
                Ok(entity.validate_value(value, options)?.map(Issue::from))
            }
            EntityCheck::Predicate(predicate) => Ok(predicate(value, &entity, ctx)),
        }
    }
}

#[must_use]
pub fn entity_with_options(options: ValidateOptions) -> Validator {
    Validator::new("entity_with", EntityWith::new(EntityCheck::Options(options)))
}

pub fn entity_with<F>(predicate: F) -> Validator
where
    F: Fn(&Value, &Entity, &ValidateContext<'_>) -> Option<Issue> + Send + Sync + 'static,
{
    Validator::new(
        "entity_with",
        EntityWith::new(EntityCheck::Predicate(Arc::new(predicate))),
    )
}
