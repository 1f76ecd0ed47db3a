use crate::{
    SchemaError,
    context::ValidateContext,
    issue::{Issue, ListError},
    validator::{Validate, Validator, run_all},
    value::Value,
};

///
/// List
///
/// Applies the inner validators to every element of a list value. Fails with
/// a `ListError` aligned to the elements when any element fails.
///

#[derive(Clone, Debug)]
pub struct List {
    validators: Vec<Validator>,
}

impl List {
    #[must_use]
    pub const fn new(validators: Vec<Validator>) -> Self {
        Self { validators }
    }
}

impl Validate for List {
    fn validate(&self, value: &Value, ctx: &ValidateContext<'_>) -> Result<Option<Issue>, SchemaError> {
        ensure_contract!(value.is_list(), "validator.list", "\"values\" must be a list");

        let Some(items) = value.as_list() else {
            return Ok(None);
        };

        let errors = items
            .iter()
            .map(|item| run_all(&self.validators, item, ctx))
            .collect::<Result<Vec<_>, _>>()?;

        if errors.iter().all(Vec::is_empty) {
            Ok(None)
        } else {
            Ok(Some(Issue::from(ListError::new(errors))))
        }
    }
}

pub fn list(validators: impl IntoIterator<Item = Validator>) -> Validator {
    Validator::new("list", List::new(validators.into_iter().collect()))
}
