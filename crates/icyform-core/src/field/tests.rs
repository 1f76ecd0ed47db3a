use crate::{
    SchemaError,
    config::CONTRACT_CHECKS,
    context::DataContext,
    field::{Field, FieldKind, FieldValidateOptions},
    issue::{BLANK_MESSAGE, EntityError, Issue, ListError},
    test_fixtures::{self, ADDRESS, NODE},
    validator::{ValidatorSpec, allow_blank},
    value::{Record, Value},
};
use indexmap::IndexMap;
use serde_json::json;
use time::macros::datetime;

// ---- data_to_value -------------------------------------------------------

#[test]
fn integer_field_parses() {
    let field = Field::integer().build().unwrap();

    assert_eq!(field.data_to_value(&json!("abc")).unwrap(), Value::Null);
    assert_eq!(field.data_to_value(&json!("42")).unwrap(), Value::Int(42));
}

#[test]
fn text_kinds_copy_structure() {
    let field = Field::any().build().unwrap();

    assert_eq!(
        field.data_to_value(&json!({ "a": [1] })).unwrap(),
        Value::Record(Record::from([("a", Value::List(vec![Value::Int(1)]))]))
    );
    assert_eq!(
        Field::char().build().unwrap().data_to_value(&json!("x")).unwrap(),
        Value::from("x")
    );
}

#[test]
fn datetime_field_round_trips_its_format() {
    let field = Field::datetime().build().unwrap();
    let value = field.data_to_value(&json!("2024-03-05 10:30")).unwrap();

    assert_eq!(value, Value::Date(datetime!(2024-03-05 10:30)));
    assert_eq!(field.to_data(&value).unwrap(), json!("2024-03-05 10:30"));
    assert_eq!(field.to_params(&value).unwrap(), "2024-03-05 10:30");
    assert_eq!(field.display(&Value::Null).unwrap(), "");
    assert_eq!(field.type_tag(), "datetime");
}

#[test]
fn date_field_custom_format() {
    let field = Field::date().date_format("[day].[month].[year]").build().unwrap();
    let value = field.data_to_value(&json!("05.03.2024")).unwrap();

    assert_eq!(field.to_data(&value).unwrap(), json!("05.03.2024"));
    assert_eq!(field.to_data(&Value::Null).unwrap(), json!(null));
}

#[test]
fn invalid_date_format_fails_to_build() {
    let err = Field::date().date_format("[bogus]").build().unwrap_err();

    assert!(err.is_contract());
}

#[test]
fn id_field_stringifies() {
    let field = Field::id().build().unwrap();

    assert_eq!(field.data_to_value(&json!(17)).unwrap(), Value::from("17"));
    assert_eq!(field.default_value(&DataContext::default()).unwrap(), None);
}

#[test]
fn id_field_rejects_many() {
    let result = Field::id().many(true).build();

    if CONTRACT_CHECKS {
        assert!(result.unwrap_err().is_contract());
    } else {
        assert!(result.is_ok());
    }
}

#[test]
fn duplicate_options_are_rejected() {
    let result = Field::enumeration(["a", "b", "a"]).build();

    if CONTRACT_CHECKS {
        assert!(result.is_err());
    }
    assert_eq!(
        Field::enumeration(["a", "b"]).build().unwrap().get_options(),
        [Value::from("a"), Value::from("b")]
    );
}

// ---- defaults ------------------------------------------------------------

#[test]
fn base_defaults() {
    let ctx = DataContext::default();

    assert_eq!(
        Field::char().build().unwrap().default_value(&ctx).unwrap(),
        Some(Value::Null)
    );
    assert_eq!(
        Field::char().many(true).build().unwrap().default_value(&ctx).unwrap(),
        Some(Value::List(vec![]))
    );
    assert_eq!(
        Field::integer().default_value(7).build().unwrap().default_value(&ctx).unwrap(),
        Some(Value::Int(7))
    );
}

#[test]
fn computed_default_sees_raw_data() {
    let field = Field::char()
        .default_with(|ctx| {
            ctx.data
                .and_then(|data| data.get("first"))
                .map_or(Value::Null, Value::from_json)
        })
        .build()
        .unwrap();

    let data = json!({ "first": "Ada" });
    let ctx = DataContext::new(data.as_object());

    assert_eq!(field.default_value(&ctx).unwrap(), Some(Value::from("Ada")));
}

#[test]
fn entity_field_defaults() {
    let ctx = DataContext::default();

    let many = Field::entity(ADDRESS).many(true).build().unwrap();
    assert_eq!(many.default_value(&ctx).unwrap(), Some(Value::List(vec![])));

    let blank = Field::entity(ADDRESS).blank(true).build().unwrap();
    assert_eq!(blank.default_value(&ctx).unwrap(), Some(Value::Null));

    test_fixtures::init();
    let required = Field::entity(ADDRESS).build().unwrap();
    let Some(Value::Record(record)) = required.default_value(&ctx).unwrap() else {
        panic!("non-blank entity field defaults to a nested record");
    };
    assert!(record.value("city").is_null());
}

#[test]
fn unknown_entity_target_is_reported() {
    let field = Field::entity("NoSuchEntity").build().unwrap();

    assert_eq!(
        field.data_to_value(&json!({})).unwrap_err(),
        SchemaError::UnknownEntity("NoSuchEntity".into())
    );
}

// ---- blank ---------------------------------------------------------------

#[test]
fn blank_values() {
    let scalar = Field::char().build().unwrap();
    let many = Field::char().many(true).build().unwrap();

    assert!(scalar.is_blank(&Value::Null, None).unwrap());
    assert!(scalar.is_blank(&Value::from(""), None).unwrap());
    assert!(!scalar.is_blank(&Value::Int(0), None).unwrap());
    assert!(many.is_blank(&Value::List(vec![]), None).unwrap());
    assert!(!many.is_blank(&Value::List(vec![Value::Null]), None).unwrap());
}

#[test]
fn entity_field_blank_checks_name() {
    test_fixtures::init();
    let field = Field::entity(ADDRESS).build().unwrap();
    let empty = Value::Record(Record::new());

    assert!(!field.is_blank(&empty, None).unwrap());
    assert!(field.is_blank(&Value::Null, Some("city")).unwrap());
    assert_eq!(
        field.is_blank(&empty, Some("zip")).unwrap_err(),
        SchemaError::unknown_field(ADDRESS, "zip")
    );
}

// ---- validate ------------------------------------------------------------

#[test]
fn validate_collects_issues() {
    let field = Field::char().build().unwrap();

    assert_eq!(
        field.validate(&Value::Null, &FieldValidateOptions::default()).unwrap(),
        vec![Issue::from(BLANK_MESSAGE)]
    );
    assert!(
        field
            .validate(&Value::from("x"), &FieldValidateOptions::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn validate_override_spec() {
    let field = Field::char().build().unwrap();
    let spec = ValidatorSpec::from(vec![allow_blank()]);
    let options = FieldValidateOptions {
        validators: Some(&spec),
        ..FieldValidateOptions::default()
    };

    assert!(field.validate(&Value::Null, &options).unwrap().is_empty());
}

#[test]
fn many_field_requires_list_value() {
    let field = Field::char().many(true).build().unwrap();
    let result = field.validate(&Value::from("x"), &FieldValidateOptions::default());

    if CONTRACT_CHECKS {
        assert!(result.unwrap_err().is_contract());
    }
}

// ---- params and display --------------------------------------------------

#[test]
fn to_params_of_scalars() {
    let field = Field::any().build().unwrap();

    assert_eq!(field.to_params(&Value::Null).unwrap(), "");
    assert_eq!(field.to_params(&Value::from("a b")).unwrap(), "a b");
    assert_eq!(field.to_params(&Value::Int(3)).unwrap(), "3");
    assert_eq!(field.to_params(&Value::Int(0)).unwrap(), "");
    assert_eq!(field.to_params(&Value::Bool(false)).unwrap(), "");
    assert_eq!(field.display(&Value::Int(0)).unwrap(), "0");
}

// ---- addressing ----------------------------------------------------------

fn address_record() -> Value {
    test_fixtures::init();
    let address = test_fixtures::entity(ADDRESS);

    address
        .data_to_record(&json!({ "uuid": "a-1", "city": "Oslo" }))
        .unwrap()
        .map(Value::Record)
        .unwrap()
}

#[test]
fn get_field_descends_one_level() {
    test_fixtures::init();
    let field = Field::entity(ADDRESS).build().unwrap();

    assert!(matches!(field.get_field(None).unwrap().kind(), FieldKind::Entity(_)));
    assert!(matches!(field.get_field(Some("city")).unwrap().kind(), FieldKind::Char));
    assert!(field.get_field(Some("zip")).is_err());
}

#[test]
fn get_value_and_id() {
    let field = Field::entity(ADDRESS).build().unwrap();
    let value = address_record();

    assert_eq!(field.get_value(&value, Some("city")).unwrap(), &Value::from("Oslo"));
    assert_eq!(field.get_value(&value, None).unwrap(), &value);
    assert_eq!(field.get_id(&value, None).unwrap(), Some(Value::from("a-1")));
    assert_eq!(field.get_key(&value).unwrap(), "a-1");
    assert_eq!(field.to_params(&value).unwrap(), "a-1");
    assert_eq!(field.display(&value).unwrap(), "a-1");
}

#[test]
fn get_id_descends_into_nested_entity_fields() {
    test_fixtures::init();
    let node = test_fixtures::entity(NODE);
    let field = Field::entity(NODE).build().unwrap();
    let value = node
        .data_to_record(&json!({ "uuid": "child", "parent": { "uuid": "root" } }))
        .unwrap()
        .map(Value::Record)
        .unwrap();

    assert_eq!(field.get_id(&value, Some("parent")).unwrap(), Some(Value::from("root")));
}

#[test]
fn scalar_fields_reject_names() {
    let field = Field::char().build().unwrap();

    assert_eq!(field.get_key(&Value::from("k")).unwrap(), "k");
    if CONTRACT_CHECKS {
        assert!(field.get_value(&Value::Null, Some("x")).is_err());
        assert!(field.get_id(&Value::Null, None).is_err());
        assert!(field.get_errors(&[], Some("x")).is_err());
    }
}

#[test]
fn get_errors_extracts_nested_issues() {
    test_fixtures::init();
    let field = Field::entity(ADDRESS).build().unwrap();

    let mut detail = IndexMap::new();
    detail.insert("city".to_string(), vec![Issue::from(BLANK_MESSAGE)]);
    let errors = vec![Issue::from("top level"), Issue::from(EntityError::new(detail))];

    assert_eq!(field.get_errors(&errors, None).unwrap().len(), 2);
    assert_eq!(
        field.get_errors(&errors, Some("city")).unwrap(),
        vec![Issue::from(BLANK_MESSAGE)]
    );
    assert!(field.get_errors(&errors, Some("street")).unwrap().is_empty());
}

#[test]
fn get_errors_array_extracts_element_issues() {
    let field = Field::char().many(true).build().unwrap();
    let errors = vec![Issue::from(ListError::new(vec![
        vec![],
        vec![Issue::from("bad")],
    ]))];

    assert!(field.get_errors_array(&errors, 0).is_empty());
    assert_eq!(field.get_errors_array(&errors, 1), vec![Issue::from("bad")]);
    assert!(field.get_errors_array(&errors, 5).is_empty());
}
