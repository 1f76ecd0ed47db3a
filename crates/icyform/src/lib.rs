//! ## Crate layout
//! - `core`: values and records, fields, entities, the schema registry, stock
//!   validators and cleaners, the issue model, and the mock contract.
//! - `base`: schema presets (pagination filters) and the seeded faker.
//!
//! The `prelude` module carries the schema-authoring vocabulary plus the
//! pipeline types a form layer handles: `Record`, `Issue`, `EntityError`.

pub use icyform_base as base;
pub use icyform_core as core;

/// re-exports
///
/// raw data crosses the API as `serde_json` values; re-exported so callers
/// build it with the same version
pub mod __reexports {
    pub use serde_json;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{DEFAULT_ID_FIELD, MAX_NESTING_DEPTH, SchemaError};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        base::{entity::filter, faker::SeededFaker},
        core::{
            SchemaError,
            cleaner::{self, Clean, Cleaner},
            context::{CleanContext, DataContext, ValidateContext},
            defaults,
            entity::{ArrayAction, Entity, EntityBuilder, ValidateOptions},
            field::{Field, FieldBuilder, FieldKind, FieldValidateOptions},
            issue::{EntityError, Issue, ListError},
            mock::{Faker, MockStore},
            registry,
            validator::{self, Validate, Validator, ValidatorSpec},
            value::{Record, Value},
        },
    };
}
