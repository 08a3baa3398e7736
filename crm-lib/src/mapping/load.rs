//! Deferred loading of lookup fields

use super::EntityMapper;
use crate::RecordSource;
use crate::error::Error;
use crate::error::MappingError;
use crate::model::CrmEntity;

impl EntityMapper {
    /// Loads the record behind a lookup field and installs it in place of
    /// the placeholder.
    ///
    /// `field` is the remote name of a field registered with
    /// [`SchemaBuilder::lookup`](crate::model::SchemaBuilder::lookup) that
    /// has a deferred load pending. The load is consumed on success and kept
    /// on failure, so it can be retried.
    pub async fn load_reference<E: CrmEntity>(
        &self,
        record: &mut E,
        field: &str,
        source: &dyn RecordSource,
    ) -> Result<(), Error> {
        let link = E::schema()
            .binding(field)
            .and_then(|binding| binding.link.as_ref());
        let pending = record.base().pending_load(field).cloned();

        let (Some(link), Some(pending)) = (link, pending) else {
            return Err(MappingError::NoPendingLoad {
                field: field.to_string(),
            }
            .into());
        };

        log::debug!(
            "Loading {} {} for field '{}'",
            pending.entity.logical(),
            pending.id,
            field
        );
        let attributes = source.fetch_by_id(&pending.entity, pending.id).await?;
        (link.resolve)(self, record, pending.id, attributes)?;
        record.base_mut().complete_pending(field);

        Ok(())
    }

    /// Runs every pending deferred load of `record`, returning how many ran.
    ///
    /// Stops at the first failure.
    pub async fn load_references<E: CrmEntity>(
        &self,
        record: &mut E,
        source: &dyn RecordSource,
    ) -> Result<usize, Error> {
        let fields: Vec<&'static str> = record.base().pending_fields().collect();
        for field in &fields {
            self.load_reference(record, field, source).await?;
        }
        Ok(fields.len())
    }
}
