//! Typed records

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::Attributes;
use super::EntityName;
use super::FieldDescriptor;
use super::Schema;

/// Creation timestamp, maintained by the remote store.
pub const CREATED_ON: FieldDescriptor = FieldDescriptor::datetime("createdon");

/// Last modification timestamp, maintained by the remote store.
pub const MODIFIED_ON: FieldDescriptor = FieldDescriptor::datetime("modifiedon");

/// A typed record type.
///
/// Implementors are plain structs holding an [`EntityBase`] plus one field
/// per mapped attribute. The field bindings live in a [`Schema`] built once
/// per type, typically in a `OnceLock`.
///
/// # Example
///
/// ```
/// use std::sync::OnceLock;
///
/// use crm_lib::model::{CrmEntity, EntityBase, FieldDescriptor, Property, Schema};
///
/// #[derive(Debug, Default)]
/// struct Contact {
///     base: EntityBase,
///     last_name: String,
/// }
///
/// impl Contact {
///     const LAST_NAME: Property<Contact, String> =
///         Property::new("last_name", FieldDescriptor::string("lastname"));
/// }
///
/// impl CrmEntity for Contact {
///     const LOGICAL_NAME: &'static str = "contact";
///
///     fn schema() -> &'static Schema<Self> {
///         static SCHEMA: OnceLock<Schema<Contact>> = OnceLock::new();
///         SCHEMA.get_or_init(|| {
///             Schema::builder()
///                 .field(Contact::LAST_NAME, |c| &c.last_name, |c| &mut c.last_name)
///                 .build()
///         })
///     }
///
///     fn base(&self) -> &EntityBase {
///         &self.base
///     }
///
///     fn base_mut(&mut self) -> &mut EntityBase {
///         &mut self.base
///     }
/// }
///
/// assert_eq!(Contact::entity_name().set(), "contacts");
/// ```
pub trait CrmEntity: Default + Send + Sync + 'static {
    /// The logical name (e.g. "lead").
    const LOGICAL_NAME: &'static str;

    /// The entity set name; derived from the logical name when `None`.
    const SET_NAME: Option<&'static str> = None;

    /// Returns the field bindings of this type.
    fn schema() -> &'static Schema<Self>;

    /// Returns the shared record state.
    fn base(&self) -> &EntityBase;

    /// Returns the shared record state mutably.
    fn base_mut(&mut self) -> &mut EntityBase;

    /// Returns the remote identity of this type.
    fn entity_name() -> EntityName {
        EntityName::from_parts(Self::LOGICAL_NAME, Self::SET_NAME)
    }

    /// Returns the record id; `None` before creation.
    fn id(&self) -> Option<Uuid> {
        self.base().id()
    }

    /// Returns the raw attribute bag.
    fn attributes(&self) -> &Attributes {
        self.base().attributes()
    }
}

/// State shared by every record: identity, raw attributes, system
/// timestamps and the lookups still waiting to be loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityBase {
    id: Option<Uuid>,
    attributes: Attributes,
    created_on: Option<DateTime<Utc>>,
    modified_on: Option<DateTime<Utc>>,
    pending: BTreeMap<&'static str, PendingLoad>,
}

impl EntityBase {
    /// Creates an empty base for a new record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a base for an existing record.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Sets the record id; a nil id clears it.
    pub fn set_id(&mut self, id: Uuid) {
        self.id = (!id.is_nil()).then_some(id);
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created_on
    }

    pub fn modified_on(&self) -> Option<DateTime<Utc>> {
        self.modified_on
    }

    pub(crate) fn set_timestamps(
        &mut self,
        created_on: Option<DateTime<Utc>>,
        modified_on: Option<DateTime<Utc>>,
    ) {
        self.created_on = created_on;
        self.modified_on = modified_on;
    }

    /// Returns the deferred load registered for a lookup field.
    pub fn pending_load(&self, field: &str) -> Option<&PendingLoad> {
        self.pending.get(field)
    }

    /// Iterates over the lookup fields that still have a deferred load.
    pub fn pending_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pending.keys().copied()
    }

    pub(crate) fn register_pending(&mut self, field: &'static str, load: PendingLoad) {
        self.pending.insert(field, load);
    }

    pub(crate) fn complete_pending(&mut self, field: &str) -> Option<PendingLoad> {
        self.pending.remove(field)
    }
}

/// A deferred load: which record to fetch to resolve a lookup field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    /// The linked record type.
    pub entity: EntityName,
    /// The linked record id.
    pub id: Uuid,
}
