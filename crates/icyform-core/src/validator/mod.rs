//! Field validators.
//!
//! A validator inspects one value and either passes (`Ok(None)`) or reports
//! an [`Issue`]. `Err` is reserved for contract violations such as running a
//! list validator over a scalar.

mod entity;
mod list;
mod options;
mod required;


pub use entity::{EntityCheck, EntityValid, EntityWith, entity_valid, entity_with, entity_with_options};
pub use list::{List, list};
pub use options::{IsOption, is_option};
pub use required::{
    AllowBlank, IsRequired, IsRequiredIf, MayNotBeBlank, allow_blank, is_required,
    is_required_if, may_not_be_blank,
};

use crate::{SchemaError, context::ValidateContext, issue::Issue, value::Value};
use std::{fmt, sync::Arc};

///
/// Validate
///
/// Anything that can judge a value. Closures with the matching signature
/// implement it directly.
///

pub trait Validate: Send + Sync {
    fn validate(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError>;
}

impl<F> Validate for F
where
    F: Fn(&Value, &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> + Send + Sync,
{
    fn validate(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        self(value, ctx)
    }
}

///
/// Validator
///
/// Shared, named handle to a [`Validate`] implementation. Field schemas hold
/// these in order; cloning only bumps a reference count.
///

#[derive(Clone)]
pub struct Validator {
    name: &'static str,
    inner: Arc<dyn Validate>,
}

impl Validator {
    pub fn new(name: &'static str, validator: impl Validate + 'static) -> Self {
        Self {
            name,
            inner: Arc::new(validator),
        }
    }

    /// Build a validator from a closure.
    pub fn from_fn<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&Value, &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(name, f)
    }

    /// Build a validator from a closure that cannot raise contract errors.
    pub fn check<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&Value, &ValidateContext<'_>) -> Option<Issue> + Send + Sync + 'static,
    {
        Self::from_fn(name, move |value, ctx| Ok(f(value, ctx)))
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        self.inner.validate(value, ctx)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

///
/// ValidatorSpec
///
/// How a field (or a per-call override) chooses its validator sequence.
///
/// List       → replaces the defaults entirely
/// Transform  → receives the default sequence and returns the final one
///

#[derive(Clone)]
pub enum ValidatorSpec {
    List(Vec<Validator>),
    Transform(Arc<dyn Fn(Vec<Validator>) -> Vec<Validator> + Send + Sync>),
}

impl ValidatorSpec {
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(Vec<Validator>) -> Vec<Validator> + Send + Sync + 'static,
    {
        Self::Transform(Arc::new(f))
    }

    /// Final validator sequence given the field's `defaults`.
    #[must_use]
    pub fn resolve(&self, defaults: &[Validator]) -> Vec<Validator> {
        match self {
            Self::List(validators) => validators.clone(),
            Self::Transform(f) => f(defaults.to_vec()),
        }
    }
}

impl fmt::Debug for ValidatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(validators) => f.debug_tuple("List").field(validators).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

impl From<Vec<Validator>> for ValidatorSpec {
    fn from(validators: Vec<Validator>) -> Self {
        Self::List(validators)
    }
}

impl<const N: usize> From<[Validator; N]> for ValidatorSpec {
    fn from(validators: [Validator; N]) -> Self {
        Self::List(validators.into())
    }
}

/// Run `validators` in order, collecting every issue.
pub(crate) fn run_all(
    validators: &[Validator],
    value: &Value,
    ctx: &ValidateContext<'_>,
) -> Result<Vec<Issue>, SchemaError> {
    let mut issues = Vec::new();
    for validator in validators {
        if let Some(issue) = validator.run(value, ctx)? {
            issues.push(issue);
        }
    }

    Ok(issues)
}
