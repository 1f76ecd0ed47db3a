#![allow(dead_code)]

use icyform::prelude::*;
use serde_json::json;
use std::sync::{Arc, OnceLock};

pub const AUTHOR: &str = "Author";
pub const ARTICLE: &str = "Article";
pub const ARTICLE_FILTER: &str = "ArticleFilter";
pub const COMMENT: &str = "Comment";
pub const THREAD: &str = "Thread";

static INIT: OnceLock<()> = OnceLock::new();

fn register_all() -> Result<(), SchemaError> {
    Entity::builder(AUTHOR)
        .field("name", Field::char().mock("name.firstName"))
        .field("email", Field::char().blank(true).mock("internet.email"))
        .register()?;

    Entity::builder(ARTICLE)
        .field(
            "title",
            Field::char()
                .max_length(20)
                .cleaners([cleaner::remove_multi_space(), cleaner::slice_to_max_length()])
                .mock_with("lorem.words", vec![json!(2)]),
        )
        .field("views", Field::integer().blank(true).mock_index())
        .field("rating", Field::number().blank(true))
        .field("published", Field::boolean().blank(true).default_value(false))
        .field("published_on", Field::date().blank(true).mock("date.past"))
        .field(
            "category",
            Field::enumeration(["news", "opinion"]).default_value("news"),
        )
        .field("author", Field::entity(AUTHOR))
        .field("tags", Field::char().many(true).blank(true))
        .field("draft_note", Field::text().blank(true).local(true))
        .cleaner(cleaner::clean_fields())
        .path("detail", "/articles/{uuid}")
        .register()?;

    Entity::builder(COMMENT)
        .field("body", Field::text().mock("lorem.sentence"))
        .register()?;

    Entity::builder(THREAD)
        .field("comments", Field::entity(COMMENT).many(true))
        .register()?;

    filter::builder(ARTICLE_FILTER)
        .field("search", Field::char().blank(true))
        .field(
            "category",
            Field::enumeration(["news", "opinion"]).many(true).blank(true),
        )
        .register()?;

    Ok(())
}

pub fn entity(name: &str) -> Arc<Entity> {
    INIT.get_or_init(|| register_all().expect("schemas register"));

    registry::get(name).expect("schema is registered")
}
