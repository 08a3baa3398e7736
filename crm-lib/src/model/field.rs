//! Typed field values and the conversions between them and Rust field types

use std::fmt;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::error::MappingError;

/// A typed field value in transit between a record field and the attribute bag.
///
/// Transforms produce a `FieldValue` on hydrate and consume one on commit;
/// [`FieldType`] converts it to and from the concrete Rust field type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i32),
    Decimal(Decimal),
    Double(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
    /// Option set label of an enum field.
    Choice(String),
    /// Id of a linked record.
    Reference(Uuid),
}

impl FieldValue {
    /// Returns the target shape this value naturally converts into.
    pub fn target(&self) -> Target {
        match self {
            FieldValue::Text(_) => Target::Text,
            FieldValue::Int(_) => Target::Int,
            FieldValue::Decimal(_) => Target::Decimal,
            FieldValue::Double(_) => Target::Double,
            FieldValue::Bool(_) => Target::Bool,
            FieldValue::DateTime(_) => Target::DateTime,
            FieldValue::Choice(_) => Target::Choice,
            FieldValue::Reference(_) => Target::Reference,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        self.target().name()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::Double(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            FieldValue::Reference(id) => write!(f, "{}", id),
        }
    }
}

/// The shape of a Rust field type, used to key commit transforms and to
/// pick the hydrate result (e.g. year-only timestamps, enum labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Text,
    Int,
    Decimal,
    Double,
    Bool,
    DateTime,
    Choice,
    Reference,
}

impl Target {
    /// Returns the target name.
    pub fn name(&self) -> &'static str {
        match self {
            Target::Text => "text",
            Target::Int => "int",
            Target::Decimal => "decimal",
            Target::Double => "double",
            Target::Bool => "bool",
            Target::DateTime => "datetime",
            Target::Choice => "choice",
            Target::Reference => "reference",
        }
    }
}

/// A Rust type that can back a mapped record field.
///
/// Implemented for `String`, `i32`, `Decimal`, `f64`, `bool`,
/// `DateTime<Utc>`, [`Lookup<T>`](super::Lookup), every
/// [`OptionSetEnum`](super::OptionSetEnum) and `Option` of any of these.
pub trait FieldType: Sized + Send + Sync + 'static {
    /// The shape this type accepts.
    const TARGET: Target;

    /// Returns the value to commit, or `None` if the field is unset and
    /// must be skipped (empty string, default timestamp, nil id, `None`).
    fn to_field_value(&self) -> Option<FieldValue>;

    /// Converts a hydrated value into this type.
    fn from_field_value(value: FieldValue) -> Result<Self, MappingError>;
}

impl<T: FieldType> FieldType for Option<T> {
    const TARGET: Target = T::TARGET;

    fn to_field_value(&self) -> Option<FieldValue> {
        self.as_ref().and_then(T::to_field_value)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, MappingError> {
        T::from_field_value(value).map(Some)
    }
}

impl FieldType for String {
    const TARGET: Target = Target::Text;

    fn to_field_value(&self) -> Option<FieldValue> {
        (!self.is_empty()).then(|| FieldValue::Text(self.clone()))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, MappingError> {
        match value {
            FieldValue::Text(s) | FieldValue::Choice(s) => Ok(s),
            other => Ok(other.to_string()),
        }
    }
}

impl FieldType for i32 {
    const TARGET: Target = Target::Int;

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Int(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, MappingError> {
        let converted = match &value {
            FieldValue::Int(n) => Some(*n),
            FieldValue::Decimal(d) if d.fract().is_zero() => d.to_i32(),
            FieldValue::Double(n) if n.fract() == 0.0 => n.to_i32(),
            FieldValue::Bool(b) => Some(i32::from(*b)),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        };
        converted.ok_or_else(|| MappingError::conversion(value.type_name(), "i32", &value))
    }
}

impl FieldType for Decimal {
    const TARGET: Target = Target::Decimal;

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Decimal(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, MappingError> {
        let converted = match &value {
            FieldValue::Decimal(d) => Some(*d),
            FieldValue::Int(n) => Some(Decimal::from(*n)),
            // Through the shortest text form so 0.1 stays 0.1
            FieldValue::Double(n) => n.to_string().parse().ok().or_else(|| Decimal::from_f64(*n)),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        };
        converted.ok_or_else(|| MappingError::conversion(value.type_name(), "decimal", &value))
    }
}

impl FieldType for f64 {
    const TARGET: Target = Target::Double;

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Double(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, MappingError> {
        let converted = match &value {
            FieldValue::Double(n) => Some(*n),
            FieldValue::Int(n) => Some(f64::from(*n)),
            FieldValue::Decimal(d) => d.to_f64(),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        };
        converted.ok_or_else(|| MappingError::conversion(value.type_name(), "f64", &value))
    }
}

impl FieldType for bool {
    const TARGET: Target = Target::Bool;

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Bool(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, MappingError> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            FieldValue::Int(n) => Ok(n != 0),
            other => Err(MappingError::conversion(other.type_name(), "bool", &other)),
        }
    }
}

impl FieldType for DateTime<Utc> {
    const TARGET: Target = Target::DateTime;

    fn to_field_value(&self) -> Option<FieldValue> {
        is_set_timestamp(self).then_some(FieldValue::DateTime(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, MappingError> {
        match value {
            FieldValue::DateTime(dt) => Ok(dt),
            other => Err(MappingError::conversion(other.type_name(), "datetime", &other)),
        }
    }
}

/// Returns `false` for the minimum and the default (epoch) timestamp.
pub fn is_set_timestamp(dt: &DateTime<Utc>) -> bool {
    *dt != DateTime::<Utc>::MIN_UTC && *dt != DateTime::<Utc>::default()
}
