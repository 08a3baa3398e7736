//! Raw bag → typed record

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::EntityMapper;
use super::coerce;
use crate::error::Error;
use crate::error::MappingError;
use crate::model::Attributes;
use crate::model::CREATED_ON;
use crate::model::CrmEntity;
use crate::model::FieldDescriptor;
use crate::model::FieldValue;
use crate::model::MODIFIED_ON;
use crate::model::PendingLoad;
use crate::model::Value;

/// OData collection body.
#[derive(Deserialize)]
struct Collection {
    #[serde(default)]
    value: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl EntityMapper {
    /// Builds a record of type `E` from an existing raw bag.
    ///
    /// Fails on the first field that cannot be mapped; the registry and
    /// other records are unaffected.
    pub fn hydrate<E: CrmEntity>(&self, id: Uuid, attributes: Attributes) -> Result<E, Error> {
        let sets = self.registry.snapshot();
        let schema = E::schema();
        let mut record = E::default();
        let mut pending = Vec::new();

        for binding in schema.bindings() {
            let descriptor = binding.descriptor;
            let Some(raw) = attributes.get(&descriptor.read_key()) else {
                continue;
            };

            let value = coerce::coerce(&descriptor, raw)
                .map_err(|cause| MappingError::failed(descriptor, raw, cause))?;
            let field_value = schema
                .transforms()
                .hydrate(&descriptor, &value, binding.target, &sets)?;

            let linked = match (&binding.link, &field_value) {
                (Some(link), FieldValue::Reference(linked_id)) if !linked_id.is_nil() => {
                    Some((link, *linked_id))
                }
                _ => None,
            };
            if let Some((link, linked_id)) = linked {
                log::debug!(
                    "Placeholder for {} {} in field '{}'",
                    link.entity.logical(),
                    linked_id,
                    descriptor.name()
                );
                pending.push((
                    descriptor.name(),
                    PendingLoad {
                        entity: link.entity.clone(),
                        id: linked_id,
                    },
                ));
            }

            (binding.write)(&mut record, field_value)
                .map_err(|cause| MappingError::failed(descriptor, raw, cause))?;
        }

        let created_on = system_timestamp(&attributes, &CREATED_ON)?;
        let modified_on = system_timestamp(&attributes, &MODIFIED_ON)?;

        let base = record.base_mut();
        base.set_id(id);
        base.set_timestamps(created_on, modified_on);
        for (field, load) in pending {
            base.register_pending(field, load);
        }
        *base.attributes_mut() = attributes;

        Ok(record)
    }

    /// Builds a record from a JSON object as returned by the Web API.
    ///
    /// The id is read from the primary id attribute (`<logical name>id`);
    /// a record without one is treated as new.
    pub fn hydrate_json<E: CrmEntity>(&self, body: &str) -> Result<E, Error> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(body)?;
        self.hydrate_object(&object)
    }

    /// Builds records from an OData collection body (`{"value": [...]}`).
    pub fn hydrate_collection<E: CrmEntity>(&self, body: &str) -> Result<Vec<E>, Error> {
        let collection: Collection = serde_json::from_str(body)?;
        collection
            .value
            .iter()
            .map(|object| self.hydrate_object(object))
            .collect()
    }

    fn hydrate_object<E: CrmEntity>(
        &self,
        object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<E, Error> {
        let attributes = Attributes::from_json_object(object);
        let id_attribute = E::entity_name().id_attribute();
        let id = match attributes.get(&id_attribute) {
            Some(Value::Guid(id)) => *id,
            Some(Value::String(s)) => s
                .parse()
                .map_err(|_| MappingError::conversion("string", "guid", s))?,
            Some(other) => {
                return Err(MappingError::conversion(other.type_name(), "guid", other).into());
            }
            None => Uuid::nil(),
        };
        self.hydrate(id, attributes)
    }
}

fn system_timestamp(
    attributes: &Attributes,
    descriptor: &FieldDescriptor,
) -> Result<Option<DateTime<Utc>>, MappingError> {
    attributes
        .get(descriptor.name())
        .map(|raw| {
            coerce::to_datetime(raw).map_err(|cause| MappingError::failed(*descriptor, raw, cause))
        })
        .transpose()
}
