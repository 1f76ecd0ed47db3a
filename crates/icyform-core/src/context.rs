//! Contexts threaded through conversion, cleaning and validation.
//!
//! Each context borrows the schema node that invokes the callback, so
//! validators and cleaners can read field configuration (`blank`, `many`,
//! `max_length`, `flags`, the nested entity) without ambient state.

use crate::{MAX_NESTING_DEPTH, SchemaError, entity::Entity, field::Field, value::Record};
use serde_json::{Map as JsonMap, Value as JsonValue};

///
/// ValidateContext
///

#[derive(Clone, Copy)]
pub struct ValidateContext<'a> {
    /// The field whose validators are running.
    pub field: &'a Field,

    /// Name of the slot being validated, when validating a record.
    pub field_name: Option<&'a str>,

    /// The record the value belongs to, when validating a record.
    pub record: Option<&'a Record>,

    /// Named flag consulted by `may_not_be_blank`.
    pub flag: Option<&'a str>,
}

impl<'a> ValidateContext<'a> {
    #[must_use]
    pub const fn new(field: &'a Field) -> Self {
        Self {
            field,
            field_name: None,
            record: None,
            flag: None,
        }
    }

    #[must_use]
    pub const fn with_field_name(mut self, name: &'a str) -> Self {
        self.field_name = Some(name);
        self
    }

    #[must_use]
    pub const fn with_record(mut self, record: &'a Record) -> Self {
        self.record = Some(record);
        self
    }

    #[must_use]
    pub const fn with_flag(mut self, flag: Option<&'a str>) -> Self {
        self.flag = flag;
        self
    }
}

///
/// CleanContext
///
/// Field-level cleaners see `field`; entity-level cleaners see `entity`.
///

#[derive(Clone, Copy, Default)]
pub struct CleanContext<'a> {
    pub field: Option<&'a Field>,
    pub entity: Option<&'a Entity>,
}

impl<'a> CleanContext<'a> {
    #[must_use]
    pub const fn for_field(field: &'a Field) -> Self {
        Self {
            field: Some(field),
            entity: None,
        }
    }

    #[must_use]
    pub const fn for_entity(entity: &'a Entity) -> Self {
        Self {
            field: None,
            entity: Some(entity),
        }
    }
}

///
/// DataContext
///
/// Passed to `data_to_value` and to computed defaults: the raw data object
/// the record is being built from, plus the current nesting depth.
///

#[derive(Clone, Copy, Default)]
pub struct DataContext<'a> {
    pub data: Option<&'a JsonMap<String, JsonValue>>,
    depth: usize,
}

impl<'a> DataContext<'a> {
    #[must_use]
    pub const fn new(data: Option<&'a JsonMap<String, JsonValue>>) -> Self {
        Self { data, depth: 0 }
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Same depth, different data object.
    pub(crate) const fn with_data(&self, data: Option<&'a JsonMap<String, JsonValue>>) -> Self {
        Self {
            data,
            depth: self.depth,
        }
    }

    /// Context for converting one level further down a nested entity.
    pub(crate) const fn descend(
        &self,
        data: Option<&'a JsonMap<String, JsonValue>>,
    ) -> Result<Self, SchemaError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SchemaError::NestingDepth(MAX_NESTING_DEPTH));
        }

        Ok(Self {
            data,
            depth: self.depth + 1,
        })
    }
}
