mod record;


pub use record::Record;

use serde_json::{Number as JsonNumber, Value as JsonValue};
use std::{fmt, sync::LazyLock};
use time::{PrimitiveDateTime, format_description::OwnedFormatItem};

///
/// CONSTANTS
///

/// Format used when a date has to be rendered without a field-specific format.
pub const ISO_DATETIME_FORMAT: &str = "[year]-[month]-[day]T[hour]:[minute]:[second]";

/// Shared `Null`, for lookups that have to hand back a reference.
pub(crate) static NULL: Value = Value::Null;

static ISO_DATETIME: LazyLock<Option<OwnedFormatItem>> =
    LazyLock::new(|| time::format_description::parse_owned::<2>(ISO_DATETIME_FORMAT).ok());

///
/// Value
///
/// Internal, typed representation of one record slot.
///
/// Null    → explicitly empty (JSON `null`); absent slots never reach a Value.
/// List    → the value of a many-field, or any raw array.
/// Record  → a nested entity record, or any raw object copied structurally.
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Date(PrimitiveDateTime),
    Float(f64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Record(Record),
    Text(String),
}

impl Value {
    /// Structural copy of raw data into the immutable value model.
    #[must_use]
    pub fn from_json(data: &JsonValue) -> Self {
        match data {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => Self::from_json_number(n),
            JsonValue::String(s) => Self::Text(s.clone()),
            JsonValue::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            JsonValue::Object(map) => Self::Record(Record::from_json_map(map)),
        }
    }

    fn from_json_number(n: &JsonNumber) -> Self {
        if let Some(i) = n.as_i64() {
            Self::Int(i)
        } else {
            n.as_f64().map_or(Self::Null, Self::Float)
        }
    }

    /// Deep-unwrap into plain data.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(f) => JsonNumber::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Date(d) => JsonValue::String(format_iso(d)),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Record(record) => record.to_json(),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<&PrimitiveDateTime> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::List(_) => "list",
            Self::Null => "null",
            Self::Record(_) => "record",
            Self::Text(_) => "text",
        }
    }
}

fn format_iso(d: &PrimitiveDateTime) -> String {
    ISO_DATETIME
        .as_ref()
        .and_then(|format| d.format(format).ok())
        .unwrap_or_else(|| d.to_string())
}

// Display is the base display string: empty for null, elements joined with
// commas for lists, JSON text for records.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => f.write_str(&format_iso(d)),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Record(record) => write!(f, "{}", record.to_json()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<PrimitiveDateTime> for Value {
    fn from(d: PrimitiveDateTime) -> Self {
        Self::Date(d)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}
