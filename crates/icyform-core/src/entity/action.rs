use crate::{
    SchemaError,
    entity::Entity,
    value::{Record, Value},
};
use serde_json::Map as JsonMap;

///
/// ArrayAction
///
/// Positions for the list actions. Out-of-range positions leave the list
/// unchanged; `index_to` past the end appends.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArrayAction {
    pub index: Option<usize>,
    pub index_to: Option<usize>,
}

impl ArrayAction {
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self {
            index: Some(index),
            index_to: None,
        }
    }

    #[must_use]
    pub const fn moving(index: usize, index_to: usize) -> Self {
        Self {
            index: Some(index),
            index_to: Some(index_to),
        }
    }
}

impl Entity {
    /// Remove the element at `action.index`.
    pub fn action_array_delete_at_index(
        &self,
        records: &Value,
        action: ArrayAction,
    ) -> Result<Value, SchemaError> {
        ensure_contract!(
            records.is_list(),
            "entity.action_array_delete_at_index",
            "({}) \"records\" must be a list",
            self.name()
        );
        ensure_contract!(
            action.index.is_some(),
            "entity.action_array_delete_at_index",
            "({}) \"index\" is required",
            self.name()
        );

        let (Value::List(items), Some(index)) = (records, action.index) else {
            return Ok(records.clone());
        };
        if index >= items.len() {
            return Ok(records.clone());
        }

        let mut items = items.clone();
        items.remove(index);

        Ok(Value::List(items))
    }

    /// Move the element at `action.index` to `action.index_to`.
    pub fn action_array_move_at_index(
        &self,
        records: &Value,
        action: ArrayAction,
    ) -> Result<Value, SchemaError> {
        ensure_contract!(
            records.is_list(),
            "entity.action_array_move_at_index",
            "({}) \"records\" must be a list",
            self.name()
        );
        ensure_contract!(
            action.index.is_some(),
            "entity.action_array_move_at_index",
            "({}) \"index\" is required",
            self.name()
        );
        ensure_contract!(
            action.index_to.is_some(),
            "entity.action_array_move_at_index",
            "({}) \"index_to\" is required",
            self.name()
        );

        let (Value::List(items), Some(index), Some(index_to)) =
            (records, action.index, action.index_to)
        else {
            return Ok(records.clone());
        };
        if index >= items.len() {
            return Ok(records.clone());
        }

        let mut items = items.clone();
        let moved = items.remove(index);
        items.insert(index_to.min(items.len()), moved);

        Ok(Value::List(items))
    }

    /// `value_initial` when given, otherwise a freshly defaulted record that
    /// keeps only the current identifier.
    pub fn action_reset(
        &self,
        record: &Record,
        value_initial: Option<&Record>,
    ) -> Result<Record, SchemaError> {
        if let Some(initial) = value_initial {
            return Ok(initial.clone());
        }

        let mut data = JsonMap::new();
        if let (Some(id), Some(field)) = (record.get(self.id_field()), self.field(self.id_field())) {
            data.insert(self.id_field().to_string(), field.to_data(id)?);
        }

        self.record_from(&data)
    }
}
