use crate::{
    SchemaError, context::DataContext, entity::Entity, field::date::DateFormat, registry,
    value::Value,
};
use derive_more::Display;
use serde_json::Value as JsonValue;
use std::{fmt, sync::Arc};

///
/// FieldKind
///
/// Closed set of field variants. Each variant selects the coercion and
/// serialization rules applied by [`crate::field::Field`].
///

#[derive(Clone, Debug)]
#[remain::sorted]
pub enum FieldKind {
    Any,
    Boolean,
    Char,
    Date(DateFormat),
    Entity(EntityRef),
    Enum,
    Id,
    Integer,
    Number,
    Text,
}

impl FieldKind {
    /// Type tag a field of this kind reports unless configured otherwise.
    #[must_use]
    pub const fn default_tag(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::Date(format) => {
                if format.allow_time() {
                    "datetime"
                } else {
                    "date"
                }
            }
            Self::Entity(_) => "entity",
            Self::Enum => "enum",
            Self::Id => "id",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Text => "text",
        }
    }
}

///
/// EntityRef
///
/// Name of a registered entity, resolved lazily so schemas may reference each
/// other (or themselves) regardless of definition order.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("{name}")]
pub struct EntityRef {
    name: &'static str,
}

impl EntityRef {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn resolve(&self) -> Result<Arc<Entity>, SchemaError> {
        registry::get(self.name)
    }
}

///
/// FieldDefault
///
/// Configured initial value of a field that is absent from raw data.
///

type ComputedDefault = Arc<dyn Fn(&DataContext<'_>) -> Value + Send + Sync>;

#[derive(Clone)]
pub enum FieldDefault {
    Computed(ComputedDefault),
    Value(Value),
}

impl FieldDefault {
    #[must_use]
    pub fn resolve(&self, ctx: &DataContext<'_>) -> Value {
        match self {
            Self::Computed(f) => f(ctx),
            Self::Value(value) => value.clone(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Computed(_) => f.write_str("Computed(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

///
/// MockHint
///
/// How `Entity::mock` synthesizes a value for a field.
///

#[derive(Clone, Debug, PartialEq)]
pub enum MockHint {
    /// Call a named generator on the faker, by dotted path.
    Generator { path: String, args: Vec<JsonValue> },

    /// Echo the index of the instance being generated.
    Index,
}
