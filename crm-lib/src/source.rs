//! RecordSource trait

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::model::Attributes;
use crate::model::EntityName;

/// Fetches raw records from the remote store.
///
/// This is the boundary to the transport layer: the mapping engine only
/// uses it to run deferred lookup loads. Implementations own HTTP, auth and
/// retries.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use crm_lib::{RecordSource, error::Error, model::{Attributes, EntityName}};
/// use uuid::Uuid;
///
/// struct WebApiSource {
///     client: MyHttpClient,
/// }
///
/// #[async_trait]
/// impl RecordSource for WebApiSource {
///     async fn fetch_by_id(&self, entity: &EntityName, id: Uuid) -> Result<Attributes, Error> {
///         let body = self
///             .client
///             .get(&format!("{}({})", entity.set(), id))
///             .await
///             .map_err(|e| Error::source(e.to_string()))?;
///         Attributes::from_json(&body)
///     }
/// }
/// ```
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches the raw attributes of one record.
    async fn fetch_by_id(&self, entity: &EntityName, id: Uuid) -> Result<Attributes, Error>;
}

/// An in-memory record source.
///
/// Useful for testing or for serving records that are already at hand.
#[derive(Debug, Default)]
pub struct StaticRecordSource {
    records: RwLock<HashMap<(String, Uuid), Attributes>>,
}

impl StaticRecordSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record (builder pattern).
    pub fn with_record(self, entity: &str, id: Uuid, attributes: Attributes) -> Self {
        self.insert(entity, id, attributes);
        self
    }

    /// Adds or replaces a record.
    pub fn insert(&self, entity: &str, id: Uuid, attributes: Attributes) {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.insert((entity.to_string(), id), attributes);
    }
}

#[async_trait]
impl RecordSource for StaticRecordSource {
    async fn fetch_by_id(&self, entity: &EntityName, id: Uuid) -> Result<Attributes, Error> {
        let records = self
            .records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records
            .get(&(entity.logical().to_string(), id))
            .cloned()
            .ok_or_else(|| Error::source(format!("{} {} not found", entity.logical(), id)))
    }
}
