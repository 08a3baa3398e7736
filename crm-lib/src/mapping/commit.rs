//! Typed record → raw bag

use super::EntityMapper;
use crate::error::Error;
use crate::model::CrmEntity;

impl EntityMapper {
    /// Writes every set field of `record` into its raw attribute bag.
    ///
    /// Unset fields (empty strings, default timestamps, nil ids, `None`) are
    /// skipped and leave the bag untouched. On failure, fields written
    /// before the failing one stay in the bag; treat the record as not
    /// safely serialized.
    pub fn commit<E: CrmEntity>(&self, record: &mut E) -> Result<(), Error> {
        let sets = self.registry.snapshot();
        let schema = E::schema();

        for binding in schema.bindings() {
            let Some(value) = (binding.read)(record) else {
                continue;
            };
            let raw = schema
                .transforms()
                .commit(&binding.descriptor, &value, &sets)?;
            record
                .base_mut()
                .attributes_mut()
                .insert(binding.descriptor.name(), raw);
        }

        Ok(())
    }
}
