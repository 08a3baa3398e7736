//! Attribute mapping engine
//!
//! Moves values between a record's raw [`Attributes`](crate::model::Attributes)
//! and its typed fields:
//!
//! - **hydrate**: raw bag + id → record. Each mapped field is read from the
//!   bag (lookups under `_<name>_value`), coerced to its kind, transformed
//!   and stored. Missing attributes leave the field at its default.
//! - **commit**: record → raw bag. Every set field is transformed back and
//!   written under its remote name. Unset fields are skipped.
//!
//! Lookups hydrate to an unresolved placeholder; fields registered with
//! [`SchemaBuilder::lookup`](crate::model::SchemaBuilder::lookup) also get a
//! deferred load, run on request with [`EntityMapper::load_reference`].

mod coerce;
mod commit;
mod hydrate;
mod load;
mod transform;

pub use coerce::parse_datetime;
pub use transform::CommitTransform;
pub use transform::HydrateTransform;
pub(crate) use transform::Transforms;

use crate::option_set::OptionSetRegistry;

/// Hydrates and commits typed records against an option set registry.
///
/// Each hydrate or commit reads one registry snapshot, so a concurrent
/// reload never splits a single record across two sets of definitions.
#[derive(Debug, Clone, Default)]
pub struct EntityMapper {
    registry: OptionSetRegistry,
}

impl EntityMapper {
    /// Creates a mapper sharing `registry`.
    pub fn new(registry: &OptionSetRegistry) -> Self {
        Self {
            registry: registry.clone(),
        }
    }

    /// Returns the option set registry.
    pub fn registry(&self) -> &OptionSetRegistry {
        &self.registry
    }
}
