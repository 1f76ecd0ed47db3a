//! Entities: named schemas made of fields, an identifier field, entity-level
//! cleaners and path metadata.

mod action;
mod convert;
mod mock;
mod validate;


pub use action::ArrayAction;

use crate::{
    DEFAULT_ID_FIELD, SchemaError,
    cleaner::Cleaner,
    field::{Field, FieldBuilder},
    registry,
    validator::ValidatorSpec,
};
use indexmap::IndexMap;
use std::sync::Arc;

///
/// ValidateOptions
///
/// `fields` restricts validation to the named fields and gives each its own
/// validator spec. `flag` selects the flag validators consulted by
/// `may_not_be_blank`.
///

#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    pub fields: Option<IndexMap<String, ValidatorSpec>>,
    pub flag: Option<String>,
}

impl ValidateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `name` with `spec`. The first call restricts validation to
    /// the fields named this way.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<ValidatorSpec>) -> Self {
        self.fields
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), spec.into());
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }
}

///
/// Entity
///

#[derive(Debug)]
pub struct Entity {
    name: &'static str,
    fields: IndexMap<&'static str, Field>,
    id_field: &'static str,
    cleaners: Vec<Cleaner>,
    paths: IndexMap<&'static str, String>,
}

impl Entity {
    #[must_use]
    pub fn builder(name: &'static str) -> EntityBuilder {
        EntityBuilder::new(name)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields, in declaration order.
    #[must_use]
    pub const fn fields(&self) -> &IndexMap<&'static str, Field> {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    #[must_use]
    pub const fn id_field(&self) -> &'static str {
        self.id_field
    }

    #[must_use]
    pub fn cleaners(&self) -> &[Cleaner] {
        &self.cleaners
    }

    #[must_use]
    pub const fn get_paths(&self) -> &IndexMap<&'static str, String> {
        &self.paths
    }

    #[must_use]
    pub fn path(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    /// Builder of an entity field targeting this entity.
    #[must_use]
    pub fn entity_field(&self) -> FieldBuilder {
        Field::entity(self.name)
    }
}

///
/// EntityBuilder
///
/// Starts with the standard identifier field: `uuid`, a blank identifier
/// mocked with `random.uuid`. Declaring a field under an existing name
/// replaces it in place.
///

#[derive(Clone, Debug)]
#[must_use]
pub struct EntityBuilder {
    name: &'static str,
    fields: IndexMap<&'static str, FieldBuilder>,
    id_field: &'static str,
    cleaners: Vec<Cleaner>,
    paths: IndexMap<&'static str, String>,
}

impl EntityBuilder {
    pub fn new(name: &'static str) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(
            DEFAULT_ID_FIELD,
            Field::id().blank(true).mock("random.uuid"),
        );

        Self {
            name,
            fields,
            id_field: DEFAULT_ID_FIELD,
            cleaners: Vec::new(),
            paths: IndexMap::new(),
        }
    }

    pub fn field(mut self, name: &'static str, field: FieldBuilder) -> Self {
        self.fields.insert(name, field);
        self
    }

    pub fn without_field(mut self, name: &str) -> Self {
        self.fields.shift_remove(name);
        self
    }

    pub const fn id_field(mut self, name: &'static str) -> Self {
        self.id_field = name;
        self
    }

    pub fn cleaner(mut self, cleaner: Cleaner) -> Self {
        self.cleaners.push(cleaner);
        self
    }

    /// Attach a named path template (for example a route or API endpoint).
    pub fn path(mut self, name: &'static str, template: impl Into<String>) -> Self {
        self.paths.insert(name, template.into());
        self
    }

    pub fn build(self) -> Result<Entity, SchemaError> {
        ensure_contract!(
            self.fields.contains_key(self.id_field),
            "entity.build",
            "({}) id field '{}' is not a declared field",
            self.name,
            self.id_field
        );

        let fields = self
            .fields
            .into_iter()
            .map(|(name, field)| Ok((name, field.build()?)))
            .collect::<Result<IndexMap<_, _>, SchemaError>>()?;

        Ok(Entity {
            name: self.name,
            fields,
            id_field: self.id_field,
            cleaners: self.cleaners,
            paths: self.paths,
        })
    }

    /// Build and insert into the process-wide registry.
    pub fn register(self) -> Result<Arc<Entity>, SchemaError> {
        registry::register(self.build()?)
    }
}
