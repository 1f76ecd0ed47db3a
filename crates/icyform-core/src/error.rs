use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Programmer errors: malformed schema definitions, wrong argument shapes,
/// addressing fields that do not exist. Business-rule failures are never
/// reported through this type; they are returned as [`crate::issue::Issue`]
/// data instead.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("{context}: {message}")]
    Contract {
        context: &'static str,
        message: String,
    },

    #[error("entity '{0}' is already registered")]
    DuplicateEntity(String),

    #[error("maximum nesting depth ({0}) exceeded")]
    NestingDepth(usize),

    #[error("entity '{0}' is not registered")]
    UnknownEntity(String),

    #[error("{entity}: field '{field}' not found")]
    UnknownField { entity: String, field: String },

    #[error("mock generator '{0}' not found")]
    UnknownGenerator(String),
}

impl SchemaError {
    /// Construct a contract violation raised by `context`.
    pub fn contract(context: &'static str, message: impl Into<String>) -> Self {
        Self::Contract {
            context,
            message: message.into(),
        }
    }

    pub fn unknown_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// True for errors raised by contract checks that a release build skips.
    #[must_use]
    pub const fn is_contract(&self) -> bool {
        matches!(self, Self::Contract { .. } | Self::UnknownField { .. })
    }
}

///
/// TESTS
///
