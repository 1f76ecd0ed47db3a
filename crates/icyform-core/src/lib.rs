//! Core runtime for IcyForm: values and records, fields, entities, the schema
//! registry, stock validators and cleaners, and the error model handed to the
//! UI layer.
//!
//! Records flow through a linear pipeline:
//! raw data → `Entity::data_to_record` → `Entity::clean` → `Entity::validate`
//! → `Entity::to_data` / `Entity::to_params`.
#![warn(unreachable_pub)]

#[macro_use]
mod macros;

pub mod cleaner;
pub mod config;
pub mod context;
pub mod defaults;
pub mod entity;
pub mod error;
pub mod field;
pub mod issue;
pub mod mock;
pub mod registry;
pub mod validator;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::SchemaError;

///
/// CONSTANTS
///

/// Default identifier field name for entities.
pub const DEFAULT_ID_FIELD: &str = "uuid";

/// Maximum depth of nested entity conversion.
///
/// Non-blank single entity fields materialize a defaulted nested record, so a
/// self-referential schema would otherwise recurse without bound.
pub const MAX_NESTING_DEPTH: usize = 64;

///
/// Prelude
///
/// Prelude contains only schema-authoring vocabulary.
///

pub mod prelude {
    pub use crate::{
        cleaner::{Clean, Cleaner},
        context::{CleanContext, ValidateContext},
        entity::{Entity, EntityBuilder, ValidateOptions},
        field::{Field, FieldBuilder, FieldKind},
        issue::{EntityError, Issue, ListError},
        validator::{Validate, Validator, ValidatorSpec},
        value::{Record, Value},
    };
}
