//! Per-type field registration
//!
//! A [`Schema`] is the explicit table of mapped fields of a record type:
//! each entry pairs a [`FieldDescriptor`] with a typed accessor/mutator,
//! erased behind closures so the mapping engine can walk them uniformly.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use uuid::Uuid;

use super::Attributes;
use super::CrmEntity;
use super::EntityName;
use super::FieldDescriptor;
use super::FieldKind;
use super::FieldType;
use super::FieldValue;
use super::LookupSlot;
use super::Target;
use super::Value;
use super::ValueType;
use crate::error::Error;
use crate::error::MappingError;
use crate::mapping::EntityMapper;
use crate::mapping::Transforms;

/// A typed path to a mapped field of `E` holding a `T`.
///
/// Declared as associated constants of the record type and used both to
/// register the field in the [`Schema`] and to build queries.
///
/// ```
/// use crm_lib::model::{FieldDescriptor, Property};
///
/// struct Lead;
///
/// const CITY: Property<Lead, String> =
///     Property::new("city", FieldDescriptor::string("address1_city"));
///
/// assert_eq!(CITY.descriptor().name(), "address1_city");
/// ```
pub struct Property<E, T> {
    name: &'static str,
    descriptor: FieldDescriptor,
    _marker: PhantomData<fn(&E) -> &T>,
}

impl<E, T> Property<E, T> {
    /// Creates a property; `name` is the Rust field name, used in diagnostics.
    pub const fn new(name: &'static str, descriptor: FieldDescriptor) -> Self {
        Self {
            name,
            descriptor,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn descriptor(&self) -> FieldDescriptor {
        self.descriptor
    }
}

impl<E, T> Clone for Property<E, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, T> Copy for Property<E, T> {}

impl<E, T> fmt::Debug for Property<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

/// A property that can appear in a `$select` list of a query over `E`.
pub trait Selectable<E> {
    /// Returns the remote name to select.
    fn select_name(&self) -> Cow<'static, str>;
}

impl<E, T> Selectable<E> for Property<E, T> {
    fn select_name(&self) -> Cow<'static, str> {
        self.descriptor.read_key()
    }
}

type Reader<E> = Box<dyn Fn(&E) -> Option<FieldValue> + Send + Sync>;
type Writer<E> = Box<dyn Fn(&mut E, FieldValue) -> Result<(), MappingError> + Send + Sync>;
type Resolver<E> =
    Box<dyn Fn(&EntityMapper, &mut E, Uuid, Attributes) -> Result<(), Error> + Send + Sync>;

/// One registered field.
pub(crate) struct Binding<E> {
    pub(crate) name: &'static str,
    pub(crate) descriptor: FieldDescriptor,
    pub(crate) target: Target,
    pub(crate) read: Reader<E>,
    pub(crate) write: Writer<E>,
    pub(crate) link: Option<Link<E>>,
}

/// How to load and install the record a lookup field points at.
pub(crate) struct Link<E> {
    pub(crate) entity: EntityName,
    pub(crate) resolve: Resolver<E>,
}

/// The mapped fields and custom transforms of a record type.
pub struct Schema<E> {
    bindings: Vec<Binding<E>>,
    transforms: Transforms,
}

impl<E: CrmEntity> Schema<E> {
    /// Starts a new schema.
    pub fn builder() -> SchemaBuilder<E> {
        SchemaBuilder {
            bindings: Vec::new(),
            transforms: Transforms::default(),
        }
    }

    /// Iterates over the descriptors of all mapped fields, in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.bindings.iter().map(|b| &b.descriptor)
    }

    /// Returns the descriptor registered for a Rust field name.
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.descriptor)
    }

    /// Returns the number of mapped fields.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no fields are mapped.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn bindings(&self) -> &[Binding<E>] {
        &self.bindings
    }

    pub(crate) fn binding(&self, remote_name: &str) -> Option<&Binding<E>> {
        self.bindings
            .iter()
            .find(|b| b.descriptor.name() == remote_name)
    }

    pub(crate) fn transforms(&self) -> &Transforms {
        &self.transforms
    }
}

impl<E> fmt::Debug for Schema<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field(
                "fields",
                &self.bindings.iter().map(|b| b.descriptor).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Builder for [`Schema`].
pub struct SchemaBuilder<E> {
    bindings: Vec<Binding<E>>,
    transforms: Transforms,
}

impl<E: CrmEntity> SchemaBuilder<E> {
    /// Maps a field.
    pub fn field<T: FieldType>(
        mut self,
        property: Property<E, T>,
        get: fn(&E) -> &T,
        get_mut: fn(&mut E) -> &mut T,
    ) -> Self {
        self.bindings.push(Self::binding(property, get, get_mut, None));
        self
    }

    /// Maps a lookup field that can be loaded on demand.
    ///
    /// Hydration registers a deferred load for it; see
    /// [`EntityMapper::load_reference`].
    pub fn lookup<L: LookupSlot>(
        mut self,
        property: Property<E, L>,
        get: fn(&E) -> &L,
        get_mut: fn(&mut E) -> &mut L,
    ) -> Self {
        let link = Link {
            entity: L::Record::entity_name(),
            resolve: Box::new(move |mapper, record, id, attributes| {
                let linked = mapper.hydrate::<L::Record>(id, attributes)?;
                get_mut(record).set_resolved(linked);
                Ok(())
            }),
        };
        self.bindings
            .push(Self::binding(property, get, get_mut, Some(link)));
        self
    }

    /// Registers a hydrate transform for one remote field; it wins over every
    /// other transform for that field.
    pub fn on_hydrate_field<F>(mut self, remote_name: &'static str, transform: F) -> Self
    where
        F: Fn(&FieldDescriptor, &Value) -> Result<FieldValue, Error> + Send + Sync + 'static,
    {
        self.transforms
            .hydrate_by_field
            .insert(remote_name, Box::new(transform));
        self
    }

    /// Registers a hydrate transform for a field kind and raw value type.
    pub fn on_hydrate_type<F>(mut self, kind: FieldKind, value_type: ValueType, transform: F) -> Self
    where
        F: Fn(&FieldDescriptor, &Value) -> Result<FieldValue, Error> + Send + Sync + 'static,
    {
        self.transforms
            .hydrate_by_type
            .insert((kind, value_type), Box::new(transform));
        self
    }

    /// Registers a hydrate transform for every field of a kind.
    pub fn on_hydrate_kind<F>(mut self, kind: FieldKind, transform: F) -> Self
    where
        F: Fn(&FieldDescriptor, &Value) -> Result<FieldValue, Error> + Send + Sync + 'static,
    {
        self.transforms
            .hydrate_by_kind
            .insert(kind, Box::new(transform));
        self
    }

    /// Registers a commit transform for one remote field.
    pub fn on_commit_field<F>(mut self, remote_name: &'static str, transform: F) -> Self
    where
        F: Fn(&FieldDescriptor, &FieldValue) -> Result<Value, Error> + Send + Sync + 'static,
    {
        self.transforms
            .commit_by_field
            .insert(remote_name, Box::new(transform));
        self
    }

    /// Registers a commit transform for a field kind and field value shape.
    pub fn on_commit_type<F>(mut self, kind: FieldKind, target: Target, transform: F) -> Self
    where
        F: Fn(&FieldDescriptor, &FieldValue) -> Result<Value, Error> + Send + Sync + 'static,
    {
        self.transforms
            .commit_by_type
            .insert((kind, target), Box::new(transform));
        self
    }

    /// Registers a commit transform for every field of a kind.
    pub fn on_commit_kind<F>(mut self, kind: FieldKind, transform: F) -> Self
    where
        F: Fn(&FieldDescriptor, &FieldValue) -> Result<Value, Error> + Send + Sync + 'static,
    {
        self.transforms
            .commit_by_kind
            .insert(kind, Box::new(transform));
        self
    }

    /// Finishes the schema.
    pub fn build(self) -> Schema<E> {
        Schema {
            bindings: self.bindings,
            transforms: self.transforms,
        }
    }

    fn binding<T: FieldType>(
        property: Property<E, T>,
        get: fn(&E) -> &T,
        get_mut: fn(&mut E) -> &mut T,
        link: Option<Link<E>>,
    ) -> Binding<E> {
        Binding {
            name: property.name(),
            descriptor: property.descriptor(),
            target: T::TARGET,
            read: Box::new(move |record| get(record).to_field_value()),
            write: Box::new(move |record, value| {
                *get_mut(record) = T::from_field_value(value)?;
                Ok(())
            }),
            link,
        }
    }
}
