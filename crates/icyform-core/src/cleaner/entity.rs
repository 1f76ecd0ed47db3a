use crate::{
    SchemaError,
    cleaner::{Clean, Cleaner},
    context::CleanContext,
    value::Value,
};

///
/// CleanFields
///
/// Entity cleaner that runs each declared field's own cleaners over its slot.
/// Many-fields are cleaned element by element. Null and absent slots are
/// left alone.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CleanFields;

impl Clean for CleanFields {
    fn clean(&self, value: Value, ctx: &CleanContext<'_>) -> Result<Value, SchemaError> {
        ensure_contract!(
            ctx.entity.is_some(),
            "cleaner.clean_fields",
            "\"entity\" option is required"
        );

        let (Some(entity), Value::Record(record)) = (ctx.entity, &value) else {
            return Ok(value);
        };

        let cleaned = record.map_values(|name, slot| {
            let Some(field) = entity.field(name) else {
                return Ok(slot.clone());
            };
            if field.cleaners().is_empty() || slot.is_null() {
                return Ok(slot.clone());
            }

            match slot {
                Value::List(items) if field.many() => items
                    .iter()
                    .map(|item| field.clean(item.clone()))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List),
                other => field.clean(other.clone()),
            }
        })?;

        Ok(Value::Record(cleaned))
    }
}

#[must_use]
pub fn clean_fields() -> Cleaner {
    Cleaner::new("clean_fields", CleanFields)
}
