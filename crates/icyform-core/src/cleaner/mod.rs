//! Cleaners.
//!
//! A cleaner maps a value to a normalized value. Field cleaners run over a
//! single slot; entity cleaners run over the whole record, in order, each
//! seeing the previous one's output.

mod entity;
mod text;


pub use entity::{CleanFields, clean_fields};
pub use text::{RemoveMultiSpace, SliceToMaxLength, remove_multi_space, slice_to_max_length};

use crate::{SchemaError, context::CleanContext, value::Value};
use std::{fmt, sync::Arc};

///
/// Clean
///

pub trait Clean: Send + Sync {
    fn clean(&self, value: Value, ctx: &CleanContext<'_>) -> Result<Value, SchemaError>;
}

impl<F> Clean for F
where
    F: Fn(Value, &CleanContext<'_>) -> Result<Value, SchemaError> + Send + Sync,
{
    fn clean(&self, value: Value, ctx: &CleanContext<'_>) -> Result<Value, SchemaError> {
        self(value, ctx)
    }
}

///
/// Cleaner
///
/// Shared, named handle to a [`Clean`] implementation.
///

#[derive(Clone)]
pub struct Cleaner {
    name: &'static str,
    inner: Arc<dyn Clean>,
}

impl Cleaner {
    pub fn new(name: &'static str, cleaner: impl Clean + 'static) -> Self {
        Self {
            name,
            inner: Arc::new(cleaner),
        }
    }

    pub fn from_fn<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(Value, &CleanContext<'_>) -> Result<Value, SchemaError> + Send + Sync + 'static,
    {
        Self::new(name, f)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(&self, value: Value, ctx: &CleanContext<'_>) -> Result<Value, SchemaError> {
        self.inner.clean(value, ctx)
    }
}

impl fmt::Debug for Cleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cleaner").field(&self.name).finish()
    }
}

/// Fold `value` through `cleaners` in order.
pub(crate) fn run_all(
    cleaners: &[Cleaner],
    value: Value,
    ctx: &CleanContext<'_>,
) -> Result<Value, SchemaError> {
    cleaners
        .iter()
        .try_fold(value, |value, cleaner| cleaner.run(value, ctx))
}
