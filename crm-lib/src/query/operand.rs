//! Comparison operands of typed properties

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Literal;
use crate::model::CrmEntity;
use crate::model::Lookup;
use crate::model::OptionSetEnum;

/// A field type that can be compared in a filter.
///
/// `Operand` is what a comparison on a property of this type accepts.
pub trait Filterable {
    type Operand: Into<Literal>;
}

/// A text field type; enables `contains`, `starts_with` and `ends_with`.
pub trait TextFilterable: Filterable {}

impl Filterable for String {
    type Operand = String;
}

impl TextFilterable for String {}

impl Filterable for i32 {
    type Operand = i32;
}

impl Filterable for Decimal {
    type Operand = Decimal;
}

impl Filterable for f64 {
    type Operand = f64;
}

impl Filterable for bool {
    type Operand = bool;
}

impl Filterable for DateTime<Utc> {
    type Operand = DateTime<Utc>;
}

/// Lookups compare against the id of the linked record.
impl<T: CrmEntity> Filterable for Lookup<T> {
    type Operand = EntityId;
}

/// Option set fields compare against the option code.
impl<E: OptionSetEnum> Filterable for E {
    type Operand = i32;
}

impl<T: Filterable> Filterable for Option<T> {
    type Operand = T::Operand;
}

impl TextFilterable for Option<String> {}

/// The id of a linked record used as a comparison operand.
///
/// Built from a record (its id, nil if it has none yet) or a bare id;
/// renders single-quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub Uuid);

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        EntityId(id)
    }
}

impl<T: CrmEntity> From<&T> for EntityId {
    fn from(record: &T) -> Self {
        EntityId(record.id().unwrap_or_else(Uuid::nil))
    }
}

impl From<EntityId> for Literal {
    fn from(id: EntityId) -> Self {
        Literal::Entity(id.0)
    }
}
