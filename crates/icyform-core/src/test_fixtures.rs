//! Schemas shared by the unit tests.
//!
//! The registry is process-wide and write-once, so fixtures register exactly
//! once and every suite reads them back by name.

use crate::{
    SchemaError,
    cleaner::{clean_fields, remove_multi_space, slice_to_max_length},
    entity::Entity,
    field::Field,
    mock::Faker,
    registry,
};
use serde_json::Value as JsonValue;
use std::sync::{Arc, OnceLock};

pub(crate) const ADDRESS: &str = "FixtureAddress";
pub(crate) const TAG: &str = "FixtureTag";
pub(crate) const PERSON: &str = "FixturePerson";
pub(crate) const NODE: &str = "FixtureNode";
pub(crate) const LOOP: &str = "FixtureLoop";
pub(crate) const TEAM: &str = "FixtureTeam";

static INIT: OnceLock<()> = OnceLock::new();

fn register_all() -> Result<(), SchemaError> {
    Entity::builder(ADDRESS)
        .field("street", Field::char().blank(true))
        .field("city", Field::char())
        .register()?;

    Entity::builder(TAG)
        .field("label", Field::char().mock("lorem.word"))
        .register()?;

    Entity::builder(PERSON)
        .field(
            "name",
            Field::char()
                .max_length(10)
                .cleaners([remove_multi_space(), slice_to_max_length()]),
        )
        .field("age", Field::integer().blank(true).mock_index())
        .field("score", Field::number().blank(true))
        .field("active", Field::boolean().blank(true).default_value(false))
        .field("born", Field::date().blank(true))
        .field(
            "role",
            Field::enumeration(["admin", "member"]).default_value("member"),
        )
        .field("address", Field::entity(ADDRESS))
        .field("previous", Field::entity(ADDRESS).blank(true))
        .field("tags", Field::entity(TAG).many(true).blank(true))
        .field("aliases", Field::char().many(true).blank(true))
        .field("notes", Field::text().blank(true).local(true))
        .cleaner(clean_fields())
        .path("detail", "/people/{uuid}")
        .register()?;

    Entity::builder(NODE)
        .field("label", Field::char().blank(true))
        .field("parent", Field::entity(NODE).blank(true))
        .register()?;

    Entity::builder(TEAM)
        .field("members", Field::entity(TAG).many(true))
        .register()?;

    Entity::builder(LOOP)
        .field("child", Field::entity(LOOP))
        .register()?;

    Ok(())
}

pub(crate) fn init() {
    INIT.get_or_init(|| register_all().expect("fixture schemas register"));
}

pub(crate) fn entity(name: &str) -> Arc<Entity> {
    init();
    registry::get(name).expect("fixture entity is registered")
}

pub(crate) fn person() -> Arc<Entity> {
    entity(PERSON)
}

///
/// SequenceFaker
///
/// Deterministic faker: generated values and picks follow a counter.
///

#[derive(Default)]
pub(crate) struct SequenceFaker {
    counter: usize,
}

impl Faker for SequenceFaker {
    fn generate(&mut self, path: &str, _: &[JsonValue]) -> Result<JsonValue, SchemaError> {
        self.counter += 1;

        match path {
            "random.uuid" => Ok(JsonValue::from(format!("uuid-{}", self.counter))),
            "lorem.word" => Ok(JsonValue::from(format!("word{}", self.counter))),
            other => Err(SchemaError::UnknownGenerator(other.to_string())),
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        self.counter += 1;
        self.counter % len
    }
}
