//! Validation error model.
//!
//! Business-rule failures are data, never `Err`. A field's validator sequence
//! yields a `Vec<Issue>`; an entity collects the non-empty ones per field name
//! into an [`EntityError`]; a list validator aligns one `Vec<Issue>` per
//! element into a [`ListError`].
//!
//! The UI boundary consumes the serialized "ErrorMap" shape:
//! `{ detail, list, message, errors }`, with message issues rendered as plain
//! strings. That shape is produced once, by the `Serialize` impls below.

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value as JsonValue;

/// Summary message of an entity-level error.
pub const ENTITY_MESSAGE: &str = "Invalid Entity";

/// Summary message of a list-level error.
pub const LIST_MESSAGE: &str = "Invalid list";

/// Message produced by the required-value validators.
pub const BLANK_MESSAGE: &str = "May not be blank";

///
/// Issue
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum Issue {
    Entity(EntityError),
    List(ListError),
    Message(String),
}

impl Issue {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Human-readable summary of this issue.
    #[must_use]
    pub fn summary(&self) -> &str {
        match self {
            Self::Entity(err) => &err.message,
            Self::List(err) => &err.message,
            Self::Message(msg) => msg,
        }
    }

    /// True when the errors address named sub-fields of an entity.
    #[must_use]
    pub const fn is_detail(&self) -> bool {
        matches!(self, Self::Entity(_))
    }

    /// True when the errors are aligned with the elements of a many-field.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    #[must_use]
    pub const fn as_entity(&self) -> Option<&EntityError> {
        match self {
            Self::Entity(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&ListError> {
        match self {
            Self::List(err) => Some(err),
            _ => None,
        }
    }

    /// Render the ErrorMap shape consumed by the UI layer.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

impl From<EntityError> for Issue {
    fn from(err: EntityError) -> Self {
        Self::Entity(err)
    }
}

impl From<ListError> for Issue {
    fn from(err: ListError) -> Self {
        Self::List(err)
    }
}

impl From<&str> for Issue {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<String> for Issue {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Entity(err) => err.serialize(serializer),
            Self::List(err) => err.serialize(serializer),
            Self::Message(msg) => serializer.serialize_str(msg),
        }
    }
}

///
/// EntityError
///
/// Per-field issues of one record. Only fields with at least one issue are
/// present; an entity with no failing field produces no `EntityError` at all.
///

#[derive(Clone, Debug, PartialEq)]
pub struct EntityError {
    pub message: String,
    pub errors: IndexMap<String, Vec<Issue>>,
}

impl EntityError {
    #[must_use]
    pub fn new(errors: IndexMap<String, Vec<Issue>>) -> Self {
        Self {
            message: ENTITY_MESSAGE.to_string(),
            errors,
        }
    }

    /// Issues recorded against field `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> &[Issue] {
        self.errors.get(name).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

impl Serialize for EntityError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("detail", &true)?;
        map.serialize_entry("list", &false)?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("errors", &self.errors)?;
        map.end()
    }
}

///
/// ListError
///
/// One entry per element of the validated sequence; an element that passed
/// has an empty entry.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ListError {
    pub message: String,
    pub errors: Vec<Vec<Issue>>,
}

impl ListError {
    #[must_use]
    pub fn new(errors: Vec<Vec<Issue>>) -> Self {
        Self {
            message: LIST_MESSAGE.to_string(),
            errors,
        }
    }

    /// Issues recorded against element `index`.
    #[must_use]
    pub fn element(&self, index: usize) -> &[Issue] {
        self.errors.get(index).map_or(&[], Vec::as_slice)
    }
}

impl Serialize for ListError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // passing elements render as `false`, matching the ErrorMap contract
        struct Element<'a>(&'a [Issue]);

        impl Serialize for Element<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if self.0.is_empty() {
                    serializer.serialize_bool(false)
                } else {
                    self.0.serialize(serializer)
                }
            }
        }

        let elements: Vec<_> = self.errors.iter().map(|e| Element(e.as_slice())).collect();

        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("detail", &false)?;
        map.serialize_entry("list", &true)?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("errors", &elements)?;
        map.end()
    }
}

///
/// TESTS
///
