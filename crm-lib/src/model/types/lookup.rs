//! Lookup fields: links to other records that load on demand

use uuid::Uuid;

use crate::error::MappingError;
use crate::model::CrmEntity;
use crate::model::EntityName;
use crate::model::FieldType;
use crate::model::FieldValue;
use crate::model::Target;

/// A link to another record.
///
/// Hydration only knows the linked id, so a lookup starts out
/// `Unresolved`. Resolving replaces the placeholder with the fully hydrated
/// record; the state is never mutated in place.
///
/// # Example
///
/// ```ignore
/// let mut parent = lead.parent_account.clone();
/// parent.resolve_with(|id| client.account(id))?;
/// println!("{}", parent.get().map(|a| a.name.as_str()).unwrap_or_default());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Only the id of the linked record is known.
    Unresolved { id: Uuid },
    /// The linked record has been loaded.
    Resolved(Box<T>),
}

impl<T> Default for Lookup<T> {
    fn default() -> Self {
        Lookup::Unresolved { id: Uuid::nil() }
    }
}

impl<T: CrmEntity> Lookup<T> {
    /// Creates a placeholder for the record with this id.
    pub fn unresolved(id: Uuid) -> Self {
        Lookup::Unresolved { id }
    }

    /// Creates a resolved lookup.
    pub fn resolved(record: T) -> Self {
        Lookup::Resolved(Box::new(record))
    }

    /// Returns the id of the linked record (nil if unknown).
    pub fn id(&self) -> Uuid {
        match self {
            Lookup::Unresolved { id } => *id,
            Lookup::Resolved(record) => record.id().unwrap_or_else(Uuid::nil),
        }
    }

    /// Returns `true` once the linked record has been loaded.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Lookup::Resolved(_))
    }

    /// Returns the linked record if resolved.
    pub fn get(&self) -> Option<&T> {
        match self {
            Lookup::Resolved(record) => Some(record),
            Lookup::Unresolved { .. } => None,
        }
    }

    /// Consumes the lookup, returning the linked record if resolved.
    pub fn into_record(self) -> Option<T> {
        match self {
            Lookup::Resolved(record) => Some(*record),
            Lookup::Unresolved { .. } => None,
        }
    }

    /// Returns the entity name of the linked record type.
    pub fn entity_name(&self) -> EntityName {
        T::entity_name()
    }

    /// Resolves the placeholder with `resolver`, which loads a record by id.
    ///
    /// Does nothing if already resolved. On error the placeholder is kept.
    pub fn resolve_with<F, E>(&mut self, resolver: F) -> Result<(), E>
    where
        F: FnOnce(Uuid) -> Result<T, E>,
    {
        if let Lookup::Unresolved { id } = *self {
            *self = Lookup::Resolved(Box::new(resolver(id)?));
        }
        Ok(())
    }
}

impl<T: CrmEntity> FieldType for Lookup<T> {
    const TARGET: Target = Target::Reference;

    fn to_field_value(&self) -> Option<FieldValue> {
        let id = self.id();
        (!id.is_nil()).then_some(FieldValue::Reference(id))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, MappingError> {
        match value {
            FieldValue::Reference(id) => Ok(Lookup::Unresolved { id }),
            FieldValue::Text(text) => text
                .parse()
                .map(|id| Lookup::Unresolved { id })
                .map_err(|_| MappingError::conversion("text", "lookup", text)),
            other => Err(MappingError::conversion(other.type_name(), "lookup", &other)),
        }
    }
}

/// A field slot that can hold a resolved lookup: `Lookup<T>` or `Option<Lookup<T>>`.
pub trait LookupSlot: FieldType {
    /// The linked record type.
    type Record: CrmEntity;

    /// Replaces the slot's content with a resolved record.
    fn set_resolved(&mut self, record: Self::Record);
}

impl<T: CrmEntity> LookupSlot for Lookup<T> {
    type Record = T;

    fn set_resolved(&mut self, record: T) {
        *self = Lookup::Resolved(Box::new(record));
    }
}

impl<T: CrmEntity> LookupSlot for Option<Lookup<T>> {
    type Record = T;

    fn set_resolved(&mut self, record: T) {
        *self = Some(Lookup::Resolved(Box::new(record)));
    }
}
