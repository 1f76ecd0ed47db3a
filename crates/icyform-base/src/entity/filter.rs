//! Pagination state for list views.
//!
//! A filter is an ordinary entity whose records become query parameters via
//! `Entity::to_params`; list filters add their own search fields on top.

use icyform_core::{
    SchemaError,
    entity::{Entity, EntityBuilder},
    field::Field,
};
use std::sync::Arc;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Builder preloaded with `page`, `page_size` and the blank `uuid`
/// identifier.
pub fn builder(name: &'static str) -> EntityBuilder {
    Entity::builder(name)
        .field("page", Field::integer().default_value(DEFAULT_PAGE))
        .field("page_size", Field::integer().default_value(DEFAULT_PAGE_SIZE))
        .field("uuid", Field::id().blank(true).mock("random.uuid"))
}

/// Register a bare pagination filter under `name`.
pub fn register(name: &'static str) -> Result<Arc<Entity>, SchemaError> {
    builder(name).register()
}

///
/// TESTS
///
