mod common;

use common::{ARTICLE, ARTICLE_FILTER, AUTHOR, THREAD, entity};
use icyform::prelude::*;
use serde_json::{Map as JsonMap, Value as JsonValue, json};

fn article_raw() -> JsonValue {
    json!({
        "uuid": "a-1",
        "title": "Hello",
        "views": "12",
        "rating": 4.5,
        "published": true,
        "published_on": "2024-03-05",
        "category": "opinion",
        "author": { "uuid": "u-1", "name": "Ada", "email": "ada@example.com" },
        "tags": ["rust", "forms"],
        "draft_note": "local only",
        "unknown": "dropped",
    })
}

#[test]
fn raw_data_round_trips_through_records() {
    let article = entity(ARTICLE);
    let record = article.data_to_record(&article_raw()).unwrap().unwrap();

    assert_eq!(record.value("draft_note"), &Value::from("local only"));
    assert!(record.get("unknown").is_none());

    let data = article.to_data(&record).unwrap();

    assert_eq!(
        JsonValue::Object(data),
        json!({
            "uuid": "a-1",
            "title": "Hello",
            "views": 12,
            "rating": 4.5,
            "published": true,
            "published_on": "2024-03-05",
            "category": "opinion",
            "author": { "uuid": "u-1", "name": "Ada", "email": "ada@example.com" },
            "tags": ["rust", "forms"],
        })
    );
}

#[test]
fn empty_data_yields_defaults() {
    let article = entity(ARTICLE);
    let record = article.data_to_record(&json!({})).unwrap().unwrap();

    assert!(record.get("uuid").is_none());
    assert_eq!(record.value("published"), &Value::Bool(false));
    assert_eq!(record.value("category"), &Value::from("news"));
    assert_eq!(record.value("tags"), &Value::List(vec![]));
    assert!(record.value("author").is_record());
    assert_eq!(article.data_to_record(&JsonValue::Null).unwrap(), None);
}

#[test]
fn clean_then_validate_reports_nested_issues() {
    let article = entity(ARTICLE);
    let record = article
        .data_to_record(&json!({
            "title": "Hello    big   wide world of forms",
            "author": { "email": "nobody@example.com" },
        }))
        .unwrap()
        .unwrap();

    let cleaned = article.clean(record).unwrap();
    assert_eq!(cleaned.value("title"), &Value::from("Hello big wide world"));

    let err = article
        .validate(&cleaned, &ValidateOptions::default())
        .unwrap()
        .expect("author name is missing");

    assert_eq!(
        err.to_json(),
        json!({
            "detail": true,
            "list": false,
            "message": "Invalid Entity",
            "errors": {
                "author": [{
                    "detail": true,
                    "list": false,
                    "message": "Invalid Entity",
                    "errors": { "name": ["May not be blank"] },
                }],
            },
        })
    );

    let author_field = article.field("author").unwrap();
    let issues = err.field("author");
    assert_eq!(
        author_field.get_errors(issues, Some("name")).unwrap(),
        vec![Issue::from("May not be blank")]
    );
    assert!(!Entity::is_valid_from_errors(
        &[Issue::from(err.clone())],
        Some(&["author"][..])
    ));
    assert!(Entity::is_valid_from_errors(
        &[Issue::from(err)],
        Some(&["title"][..])
    ));
}

#[test]
fn valid_record_has_no_errors() {
    let article = entity(ARTICLE);
    let record = article.data_to_record(&article_raw()).unwrap().unwrap();

    assert!(article.is_valid(&record, &ValidateOptions::default()).unwrap());
}

#[test]
fn validation_can_be_restricted() {
    let article = entity(ARTICLE);
    let record = article
        .data_to_record(&json!({ "title": "Only a title" }))
        .unwrap()
        .unwrap();

    let options = ValidateOptions::new().field("title", [validator::is_required()]);

    assert!(article.validate(&record, &options).unwrap().is_none());
    assert!(article.validate(&record, &ValidateOptions::default()).unwrap().is_some());
}

#[test]
fn many_entity_errors_align_with_elements() {
    let thread = entity(THREAD);
    let record = thread
        .data_to_record(&json!({
            "comments": [{ "body": "first" }, { "body": "" }, { "body": "third" }],
        }))
        .unwrap()
        .unwrap();

    let err = thread
        .validate(&record, &ValidateOptions::default())
        .unwrap()
        .expect("second comment is blank");
    let issues = err.field("comments");

    assert_eq!(
        issues[0].to_json()["errors"],
        json!([
            false,
            [{
                "detail": true,
                "list": false,
                "message": "Invalid Entity",
                "errors": { "body": ["May not be blank"] },
            }],
            false,
        ])
    );

    let comments = thread.field("comments").unwrap();
    assert!(comments.get_errors_array(issues, 0).is_empty());
    assert_eq!(comments.get_errors_array(issues, 1).len(), 1);
}

#[test]
fn empty_required_many_field_is_blank() {
    let thread = entity(THREAD);
    let record = thread.data_to_record(&json!({})).unwrap().unwrap();

    let err = thread
        .validate(&record, &ValidateOptions::default())
        .unwrap()
        .expect("comments are required");

    assert_eq!(err.field("comments"), [Issue::from("May not be blank")]);
}

#[test]
fn filter_to_params() {
    let filter = entity(ARTICLE_FILTER);
    let record = filter
        .data_to_record(&json!({
            "page": 2,
            "search": "rust",
            "category": ["news", "opinion"],
        }))
        .unwrap()
        .unwrap();

    let params = filter.to_params(&record).unwrap();
    let pairs: Vec<_> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

    assert_eq!(
        pairs,
        [
            ("page", "2"),
            ("page_size", "20"),
            ("search", "rust"),
            ("category", "news,opinion"),
        ]
    );
}

#[test]
fn list_actions_on_many_fields() {
    let article = entity(ARTICLE);
    let tags = Value::List(vec![Value::from("a"), Value::from("b"), Value::from("c")]);

    assert_eq!(
        article
            .action_array_move_at_index(&tags, ArrayAction::moving(0, 2))
            .unwrap(),
        Value::List(vec![Value::from("b"), Value::from("c"), Value::from("a")])
    );
    assert_eq!(
        article
            .action_array_delete_at_index(&tags, ArrayAction::at(1))
            .unwrap(),
        Value::List(vec![Value::from("a"), Value::from("c")])
    );
}

#[test]
fn reset_keeps_identifier_only() {
    let article = entity(ARTICLE);
    let record = article.data_to_record(&article_raw()).unwrap().unwrap();

    let reset = article.action_reset(&record, None).unwrap();

    assert_eq!(reset.value("uuid"), &Value::from("a-1"));
    assert_eq!(reset.value("title"), &Value::Null);
    assert_eq!(reset.value("category"), &Value::from("news"));
    assert_eq!(article.action_reset(&reset, Some(&record)).unwrap(), record);
}

#[test]
fn resolved_defaults_feed_records() {
    let article = entity(ARTICLE);
    let context = json!({ "section": "opinion", "headline": "" });
    let context = context.as_object().unwrap();

    let data = defaults::resolve(
        [("category", vec!["section"]), ("title", vec!["headline"])],
        context,
        &JsonMap::new(),
    );
    let record = article.record_from(&data).unwrap();

    assert_eq!(record.value("category"), &Value::from("opinion"));
    assert_eq!(record.value("title"), &Value::Null);
}

#[test]
fn display_and_paths() {
    let article = entity(ARTICLE);
    let record = article.data_to_record(&article_raw()).unwrap().unwrap();

    assert_eq!(article.display(Some(&record)), "a-1");
    assert_eq!(article.path("detail"), Some("/articles/{uuid}"));
    assert_eq!(
        article
            .field("author")
            .unwrap()
            .display(record.value("author"))
            .unwrap(),
        "u-1"
    );
}

#[test]
fn registry_resolves_by_name() {
    let author = entity(AUTHOR);

    assert_eq!(author.name(), AUTHOR);
    assert_eq!(
        registry::get("NoSuchEntity").unwrap_err(),
        SchemaError::UnknownEntity("NoSuchEntity".into())
    );
    assert!(
        Entity::builder(AUTHOR)
            .register()
            .is_err_and(|err| err == SchemaError::DuplicateEntity(AUTHOR.into()))
    );
}
