use crate::{
    SchemaError,
    entity::Entity,
    field::{Field, MockHint},
    mock::{Faker, MockStore, sample, sample_size},
};
use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::trace;

impl Entity {
    /// Synthesize one raw instance.
    ///
    /// Non-blank entity fields sample the live pool of their target in
    /// `store`: one instance, or a random non-empty subset for many-fields.
    /// Other fields use their mock hint; fields without one are left to
    /// their default. `extra` overrides are merged last, and the result is
    /// round-tripped through `data_to_record` and `to_data`.
    pub fn mock(
        &self,
        faker: &mut dyn Faker,
        store: &dyn MockStore,
        index: usize,
        extra: Option<&JsonMap<String, JsonValue>>,
    ) -> Result<JsonMap<String, JsonValue>, SchemaError> {
        let mut data = JsonMap::new();

        for (&name, field) in self.fields() {
            if let Some(sampled) = sample_reference(field, faker, store) {
                data.insert(name.to_string(), sampled);
                continue;
            }

            let value = match field.mock() {
                Some(MockHint::Index) => JsonValue::from(index),
                Some(MockHint::Generator { path, args }) => faker.generate(path, args)?,
                None => continue,
            };
            data.insert(name.to_string(), value);
        }

        if let Some(extra) = extra {
            for (key, value) in extra {
                data.insert(key.clone(), value.clone());
            }
        }

        trace!(entity = self.name(), index, "mocked instance");

        let record = self.record_from(&data)?;
        self.to_data(&record)
    }

    /// Synthesize `size` instances keyed by identifier. Instances without an
    /// identifier are keyed by their index.
    pub fn mock_many(
        &self,
        faker: &mut dyn Faker,
        store: &dyn MockStore,
        size: usize,
    ) -> Result<IndexMap<String, JsonValue>, SchemaError> {
        let mut instances = IndexMap::with_capacity(size);

        for index in 0..size {
            let data = self.mock(faker, store, index, None)?;
            let key = match data.get(self.id_field()) {
                Some(JsonValue::String(id)) => id.clone(),
                Some(JsonValue::Null) | None => index.to_string(),
                Some(other) => other.to_string(),
            };
            instances.insert(key, JsonValue::Object(data));
        }

        Ok(instances)
    }
}

fn sample_reference(
    field: &Field,
    faker: &mut dyn Faker,
    store: &dyn MockStore,
) -> Option<JsonValue> {
    let target = field.entity_ref()?;
    if field.blank() {
        return None;
    }

    let pool = store.instances(target.name());
    if pool.is_empty() {
        return None;
    }

    if field.many() {
        let size = 1 + faker.pick(pool.len()) % pool.len();
        Some(JsonValue::Array(sample_size(faker, &pool, size)))
    } else {
        sample(faker, &pool)
    }
}
