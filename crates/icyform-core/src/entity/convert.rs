use crate::{
    SchemaError,
    context::DataContext,
    entity::Entity,
    value::{Record, Value},
};
use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as JsonValue};

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl Entity {
    /// Build a record from raw data. `null` yields no record.
    ///
    /// Declared fields present in `data` are coerced (element-wise for
    /// arrays); absent fields take their default. Keys that are not
    /// declared fields are ignored. The record follows field declaration
    /// order.
    pub fn data_to_record(&self, data: &JsonValue) -> Result<Option<Record>, SchemaError> {
        self.data_to_record_in(data, &DataContext::default())
    }

    /// Build a record from a raw data object.
    pub fn record_from(&self, data: &JsonMap<String, JsonValue>) -> Result<Record, SchemaError> {
        self.record_from_map(data, &DataContext::default())
    }

    /// A record with every field at its default.
    pub fn default_record(&self) -> Result<Record, SchemaError> {
        self.default_record_in(&DataContext::default())
    }

    pub(crate) fn data_to_record_in(
        &self,
        data: &JsonValue,
        ctx: &DataContext<'_>,
    ) -> Result<Option<Record>, SchemaError> {
        match data {
            JsonValue::Null => Ok(None),
            JsonValue::Object(map) => self.record_from_map(map, ctx).map(Some),
            other => {
                ensure_contract!(
                    false,
                    "entity.data_to_record",
                    "({}) data must be an object or null, got {}",
                    self.name(),
                    json_type(other)
                );

                Ok(None)
            }
        }
    }

    pub(crate) fn default_record_in(&self, ctx: &DataContext<'_>) -> Result<Record, SchemaError> {
        self.record_from_map(&JsonMap::new(), ctx)
    }

    fn record_from_map(
        &self,
        data: &JsonMap<String, JsonValue>,
        ctx: &DataContext<'_>,
    ) -> Result<Record, SchemaError> {
        let ctx = ctx.with_data(Some(data));
        let mut values = IndexMap::with_capacity(self.fields().len());

        for (&name, field) in self.fields() {
            let value = match data.get(name) {
                Some(raw) => Some(field.data_to_slot(raw, &ctx)?),
                None => field.default_value(&ctx)?,
            };

            if let Some(value) = value {
                values.insert(name.to_string(), value);
            }
        }

        Ok(Record::from_map(values))
    }

    /// Raw data of a record. Local and undeclared slots are dropped.
    pub fn to_data(&self, record: &Record) -> Result<JsonMap<String, JsonValue>, SchemaError> {
        let mut data = JsonMap::new();

        for (key, value) in record.iter() {
            let Some(field) = self.field(key) else {
                continue;
            };
            if field.local() {
                continue;
            }

            let raw = match value {
                Value::List(items) => JsonValue::Array(
                    items
                        .iter()
                        .map(|item| field.to_data(item))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                other => field.to_data(other)?,
            };
            data.insert(key.clone(), raw);
        }

        Ok(data)
    }

    /// `to_data` over a slot value that should hold a record or `null`.
    pub fn value_to_data(&self, value: &Value) -> Result<JsonValue, SchemaError> {
        match value {
            Value::Null => Ok(JsonValue::Null),
            Value::Record(record) => self.to_data(record).map(JsonValue::Object),
            other => {
                ensure_contract!(
                    false,
                    "entity.to_data",
                    "({}) record must be either a record or null, got {}",
                    self.name(),
                    other.type_name()
                );

                Ok(other.to_json())
            }
        }
    }

    /// Query-parameter mapping of a record.
    ///
    /// Many-fields are joined with commas under one key; an empty list drops
    /// the key. Local and undeclared slots are dropped.
    pub fn to_params(&self, record: &Record) -> Result<IndexMap<String, String>, SchemaError> {
        let mut params = IndexMap::new();

        for (key, value) in record.iter() {
            let Some(field) = self.field(key) else {
                continue;
            };
            if field.local() {
                continue;
            }

            match value {
                Value::List(items) => {
                    let mut joined: Option<String> = None;
                    for item in items {
                        let param = field.to_params(item)?;
                        joined = Some(match joined {
                            Some(prev) if !prev.is_empty() => format!("{prev},{param}"),
                            _ => param,
                        });
                    }

                    if let Some(joined) = joined {
                        params.insert(key.clone(), joined);
                    }
                }
                other => {
                    params.insert(key.clone(), field.to_params(other)?);
                }
            }
        }

        Ok(params)
    }

    /// Identifier of a record.
    #[must_use]
    pub fn get_id(&self, record: Option<&Record>) -> Option<Value> {
        record.and_then(|record| record.get(self.id_field())).cloned()
    }

    /// Display string of a record: its identifier, or empty.
    #[must_use]
    pub fn display(&self, record: Option<&Record>) -> String {
        self.get_id(record)
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// `display` over a slot value that should hold a record or `null`.
    pub fn display_value(&self, value: &Value) -> Result<String, SchemaError> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Record(record) => Ok(self.display(Some(record))),
            other => {
                ensure_contract!(
                    false,
                    "entity.display",
                    "({}) record must be either a record or null, got {}",
                    self.name(),
                    other.type_name()
                );

                Ok(other.to_string())
            }
        }
    }
}
