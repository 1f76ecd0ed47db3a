//! Addressing helpers: descend one level into the nested entity of an entity
//! field by field name. Without a name every helper is the identity.

use crate::{
    SchemaError,
    entity::Entity,
    field::{Field, FieldKind},
    issue::Issue,
    value::{NULL, Value},
};
use std::{borrow::Cow, sync::Arc};

impl Field {
    /// Resolve the nested entity addressed by `name`, checking that `name` is
    /// one of its declared fields. Scalar fields accept no name at all.
    pub(crate) fn check_name(
        &self,
        context: &'static str,
        name: Option<&str>,
    ) -> Result<Option<Arc<Entity>>, SchemaError> {
        let Some(name) = name else {
            return Ok(None);
        };

        let FieldKind::Entity(target) = self.kind() else {
            ensure_contract!(
                false,
                context,
                "({}) option \"name\" is not supported",
                self.type_tag()
            );
            return Ok(None);
        };

        let entity = target.resolve()?;
        if entity.field(name).is_none() {
            return Err(SchemaError::unknown_field(entity.name(), name));
        }

        Ok(Some(entity))
    }

    /// This field, or the nested field `name`.
    pub fn get_field(&self, name: Option<&str>) -> Result<Cow<'_, Self>, SchemaError> {
        let Some(name) = name else {
            return Ok(Cow::Borrowed(self));
        };

        match self.check_name("field.get_field", Some(name))? {
            Some(entity) => entity
                .field(name)
                .cloned()
                .map(Cow::Owned)
                .ok_or_else(|| SchemaError::unknown_field(entity.name(), name)),
            None => Err(SchemaError::contract(
                "field.get_field",
                format!("({}) method with option name is not supported", self.type_tag()),
            )),
        }
    }

    /// The value itself, or the nested slot `name` of a nested record.
    pub fn get_value<'v>(&self, value: &'v Value, name: Option<&str>) -> Result<&'v Value, SchemaError> {
        let Some(name) = name else {
            return Ok(value);
        };

        if self.check_name("field.get_value", Some(name))?.is_none() {
            return Ok(&NULL);
        }

        Ok(match value {
            Value::Record(record) => record.value(name),
            other => other,
        })
    }

    /// Identifier of the nested record (or of the record nested under `name`).
    pub fn get_id(&self, value: &Value, name: Option<&str>) -> Result<Option<Value>, SchemaError> {
        if !matches!(self.kind(), FieldKind::Entity(_)) {
            ensure_contract!(
                false,
                "field.get_id",
                "({}) method is not supported",
                self.type_tag()
            );
            return Ok(None);
        }

        let field = self.get_field(name)?;
        let value = self.get_value(value, name)?;

        let Some(target) = field.entity_ref() else {
            ensure_contract!(
                false,
                "field.get_id",
                "field '{}' is not an entity field",
                name.unwrap_or_default()
            );
            return Ok(None);
        };

        Ok(target.resolve()?.get_id(value.as_record()))
    }

    /// Stable key of a value: the nested identifier for entity fields, the
    /// display string otherwise.
    pub fn get_key(&self, value: &Value) -> Result<String, SchemaError> {
        if matches!(self.kind(), FieldKind::Entity(_)) {
            Ok(self
                .get_id(value, None)?
                .map(|id| id.to_string())
                .unwrap_or_default())
        } else {
            self.display(value)
        }
    }

    /// Issues of the nested field `name`, pulled out of entity errors.
    pub fn get_errors(&self, errors: &[Issue], name: Option<&str>) -> Result<Vec<Issue>, SchemaError> {
        let Some(name) = name else {
            return Ok(errors.to_vec());
        };

        if self.check_name("field.get_errors", Some(name))?.is_none() {
            return Ok(errors.to_vec());
        }

        Ok(errors
            .iter()
            .filter_map(Issue::as_entity)
            .flat_map(|err| err.field(name).iter().cloned())
            .collect())
    }

    /// Issues of element `index`, pulled out of list errors.
    #[must_use]
    pub fn get_errors_array(&self, errors: &[Issue], index: usize) -> Vec<Issue> {
        errors
            .iter()
            .filter_map(Issue::as_list)
            .flat_map(|err| err.element(index).iter().cloned())
            .collect()
    }
}
