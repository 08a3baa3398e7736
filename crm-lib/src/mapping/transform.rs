//! Transform dispatch
//!
//! Lookup order, first match wins: a transform registered for the field's
//! remote name, then one registered for (kind, value type), then one
//! registered for the kind alone, then the built-in transform of the kind. No match is an
//! [`UnmappableField`](MappingError::UnmappableField) error; a failing
//! transform is wrapped in [`MappingFailed`](MappingError::MappingFailed).

use std::collections::HashMap;

use chrono::Datelike;

use super::coerce;
use crate::error::Error;
use crate::error::MappingError;
use crate::model::FieldDescriptor;
use crate::model::FieldKind;
use crate::model::FieldValue;
use crate::model::Target;
use crate::model::Value;
use crate::model::ValueType;
use crate::option_set::OptionKey;
use crate::option_set::OptionSets;

/// Converts a (coerced) raw value into a field value.
pub type HydrateTransform =
    Box<dyn Fn(&FieldDescriptor, &Value) -> Result<FieldValue, Error> + Send + Sync>;

/// Converts a field value into a raw value.
pub type CommitTransform =
    Box<dyn Fn(&FieldDescriptor, &FieldValue) -> Result<Value, Error> + Send + Sync>;

/// Custom transforms of one record type.
#[derive(Default)]
pub(crate) struct Transforms {
    pub(crate) hydrate_by_field: HashMap<&'static str, HydrateTransform>,
    pub(crate) hydrate_by_type: HashMap<(FieldKind, ValueType), HydrateTransform>,
    pub(crate) hydrate_by_kind: HashMap<FieldKind, HydrateTransform>,
    pub(crate) commit_by_field: HashMap<&'static str, CommitTransform>,
    pub(crate) commit_by_type: HashMap<(FieldKind, Target), CommitTransform>,
    pub(crate) commit_by_kind: HashMap<FieldKind, CommitTransform>,
}

impl Transforms {
    pub(crate) fn hydrate(
        &self,
        descriptor: &FieldDescriptor,
        value: &Value,
        target: Target,
        sets: &OptionSets,
    ) -> Result<FieldValue, Error> {
        let outcome = if let Some(transform) = self.hydrate_by_field.get(descriptor.name()) {
            Some(transform(descriptor, value))
        } else if let Some(transform) = self
            .hydrate_by_type
            .get(&(descriptor.kind(), value.value_type()))
        {
            Some(transform(descriptor, value))
        } else if let Some(transform) = self.hydrate_by_kind.get(&descriptor.kind()) {
            Some(transform(descriptor, value))
        } else {
            hydrate_kind(descriptor, value, target, sets)
        };

        match outcome {
            Some(result) => result.map_err(|cause| MappingError::failed(*descriptor, value, cause).into()),
            None => Err(MappingError::unmappable(*descriptor, value.type_name()).into()),
        }
    }

    pub(crate) fn commit(
        &self,
        descriptor: &FieldDescriptor,
        value: &FieldValue,
        sets: &OptionSets,
    ) -> Result<Value, Error> {
        let outcome = if let Some(transform) = self.commit_by_field.get(descriptor.name()) {
            Some(transform(descriptor, value))
        } else if let Some(transform) = self.commit_by_type.get(&(descriptor.kind(), value.target())) {
            Some(transform(descriptor, value))
        } else if let Some(transform) = self.commit_by_kind.get(&descriptor.kind()) {
            Some(transform(descriptor, value))
        } else {
            commit_kind(descriptor, value, sets)
        };

        match outcome {
            Some(result) => result.map_err(|cause| MappingError::failed(*descriptor, value, cause).into()),
            None => Err(MappingError::unmappable(*descriptor, value.type_name()).into()),
        }
    }
}

/// Built-in hydrate transforms, by field kind.
fn hydrate_kind(
    descriptor: &FieldDescriptor,
    value: &Value,
    target: Target,
    sets: &OptionSets,
) -> Option<Result<FieldValue, Error>> {
    let field_value = match (descriptor.kind(), value) {
        (FieldKind::String, value) => Ok(FieldValue::Text(value.to_string())),
        (FieldKind::Int, value) => coerce::to_int(value).map(FieldValue::Int).map_err(Error::from),
        (FieldKind::Boolean, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (FieldKind::Decimal, Value::Decimal(d)) => Ok(FieldValue::Decimal(*d)),
        (FieldKind::Double, Value::Float(n)) => Ok(FieldValue::Double(*n)),
        // Integer targets keep the year only
        (FieldKind::DateTime, Value::DateTime(dt)) => Ok(match target {
            Target::Int => FieldValue::Int(dt.year()),
            _ => FieldValue::DateTime(*dt),
        }),
        (FieldKind::Option, Value::Int(code)) => decode_option(descriptor, *code, target, sets),
        (FieldKind::Reference, Value::Guid(id)) => Ok(FieldValue::Reference(*id)),
        _ => return None,
    };
    Some(field_value)
}

fn decode_option(
    descriptor: &FieldDescriptor,
    code: i64,
    target: Target,
    sets: &OptionSets,
) -> Result<FieldValue, Error> {
    let set = option_set_name(descriptor)?;
    let code = i32::try_from(code).map_err(|_| MappingError::conversion("int", "i32", code))?;
    let label = sets.decode(code, set)?;

    Ok(match target {
        Target::Int => FieldValue::Int(code),
        Target::Choice => FieldValue::Choice(label.to_string()),
        _ => FieldValue::Text(label.to_string()),
    })
}

/// Built-in commit transforms, by field kind.
fn commit_kind(
    descriptor: &FieldDescriptor,
    value: &FieldValue,
    sets: &OptionSets,
) -> Option<Result<Value, Error>> {
    let raw = match (descriptor.kind(), value) {
        (FieldKind::Option, FieldValue::Choice(label) | FieldValue::Text(label)) => {
            encode_option(descriptor, OptionKey::Label(label), sets)
        }
        (FieldKind::Option, FieldValue::Int(code)) => {
            encode_option(descriptor, OptionKey::from(*code), sets)
        }
        (FieldKind::Reference, FieldValue::Reference(id)) => Ok(Value::Guid(*id)),
        (FieldKind::DateTime, FieldValue::Int(year)) => {
            coerce::year_start(*year).map(Value::DateTime).map_err(Error::from)
        }
        (FieldKind::DateTime, FieldValue::DateTime(dt)) => Ok(Value::DateTime(*dt)),
        (FieldKind::String, value) => Ok(Value::String(value.to_string())),
        (FieldKind::Int | FieldKind::Decimal | FieldKind::Double | FieldKind::Boolean, value) => {
            Ok(scalar(value)?)
        }
        _ => return None,
    };
    Some(raw)
}

fn encode_option(
    descriptor: &FieldDescriptor,
    key: OptionKey<'_>,
    sets: &OptionSets,
) -> Result<Value, Error> {
    let set = option_set_name(descriptor)?;
    let code = sets.encode(key, set)?;
    Ok(Value::Int(code.into()))
}

fn scalar(value: &FieldValue) -> Option<Value> {
    match value {
        FieldValue::Int(n) => Some(Value::Int((*n).into())),
        FieldValue::Decimal(d) => Some(Value::Decimal(*d)),
        FieldValue::Double(n) => Some(Value::Float(*n)),
        FieldValue::Bool(b) => Some(Value::Bool(*b)),
        _ => None,
    }
}

fn option_set_name(descriptor: &FieldDescriptor) -> Result<&'static str, MappingError> {
    descriptor.option_set().ok_or_else(|| {
        MappingError::custom(format!("Field '{}' has no option set", descriptor.name()))
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    const SYNC: FieldDescriptor = FieldDescriptor::option("test_sync_state", "test_sync_states");

    fn sets() -> OptionSets {
        OptionSets::new().with_set(
            "test_sync_states",
            [(1, "Synchronized"), (2, "Out of Sync"), (3, "Error")],
        )
    }

    #[test]
    fn test_option_decodes_by_target() {
        let transforms = Transforms::default();
        let sets = sets();

        assert_eq!(
            transforms.hydrate(&SYNC, &Value::Int(2), Target::Text, &sets).unwrap(),
            FieldValue::Text("Out of Sync".into())
        );
        assert_eq!(
            transforms.hydrate(&SYNC, &Value::Int(2), Target::Choice, &sets).unwrap(),
            FieldValue::Choice("Out of Sync".into())
        );
        assert_eq!(
            transforms.hydrate(&SYNC, &Value::Int(2), Target::Int, &sets).unwrap(),
            FieldValue::Int(2)
        );
    }

    #[test]
    fn test_unknown_option_is_wrapped() {
        let err = Transforms::default()
            .hydrate(&SYNC, &Value::Int(7), Target::Text, &sets())
            .unwrap_err();

        match err {
            Error::Mapping(MappingError::MappingFailed { descriptor, value, cause }) => {
                assert_eq!(descriptor, SYNC);
                assert_eq!(value, "7");
                assert!(matches!(*cause, Error::OptionSet(_)));
            }
            other => panic!("expected MappingFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_unmappable_combination() {
        let descriptor = FieldDescriptor::reference("parentaccountid");
        let err = Transforms::default()
            .hydrate(&descriptor, &Value::Int(3), Target::Reference, &sets())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Mapping(MappingError::UnmappableField { value_type: "int", .. })
        ));
    }

    #[test]
    fn test_field_transform_wins() {
        let mut transforms = Transforms::default();
        transforms.hydrate_by_field.insert(
            "crefonumber",
            Box::new(|_: &FieldDescriptor, value: &Value| {
                Ok(FieldValue::Text(format!("000{}", value)))
            }),
        );
        transforms.hydrate_by_type.insert(
            (FieldKind::String, ValueType::String),
            Box::new(|_: &FieldDescriptor, _: &Value| Ok(FieldValue::Text("by type".into()))),
        );

        let crefo = FieldDescriptor::string("crefonumber");
        let city = FieldDescriptor::string("address1_city");
        assert_eq!(
            transforms.hydrate(&crefo, &Value::from("1234"), Target::Text, &sets()).unwrap(),
            FieldValue::Text("0001234".into())
        );
        assert_eq!(
            transforms.hydrate(&city, &Value::from("Berlin"), Target::Text, &sets()).unwrap(),
            FieldValue::Text("by type".into())
        );
    }

    #[test]
    fn test_kind_transform_before_builtin() {
        let mut transforms = Transforms::default();
        transforms.commit_by_kind.insert(
            FieldKind::String,
            Box::new(|_: &FieldDescriptor, value: &FieldValue| {
                Ok(Value::String(value.to_string().to_uppercase()))
            }),
        );
        transforms.commit_by_type.insert(
            (FieldKind::String, Target::Int),
            Box::new(|_: &FieldDescriptor, _: &FieldValue| Ok(Value::from("by type"))),
        );

        let city = FieldDescriptor::string("address1_city");
        assert_eq!(
            transforms.commit(&city, &FieldValue::Text("Berlin".into()), &sets()).unwrap(),
            Value::from("BERLIN")
        );
        assert_eq!(
            transforms.commit(&city, &FieldValue::Int(7), &sets()).unwrap(),
            Value::from("by type")
        );
    }

    #[test]
    fn test_year_only_datetime() {
        let descriptor = FieldDescriptor::datetime("test_founded");
        let transforms = Transforms::default();
        let founded = Utc.with_ymd_and_hms(2019, 6, 15, 8, 0, 0).unwrap();

        let hydrated = transforms
            .hydrate(&descriptor, &Value::DateTime(founded), Target::Int, &sets())
            .unwrap();
        assert_eq!(hydrated, FieldValue::Int(2019));

        let committed = transforms.commit(&descriptor, &hydrated, &sets()).unwrap();
        assert_eq!(
            committed,
            Value::DateTime(Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_commit_scalars() {
        let transforms = Transforms::default();
        let budget = FieldDescriptor::decimal("budgetamount");
        assert_eq!(
            transforms
                .commit(&budget, &FieldValue::Decimal(Decimal::new(15, 1)), &sets())
                .unwrap(),
            Value::Decimal(Decimal::new(15, 1))
        );
        assert!(transforms
            .commit(&budget, &FieldValue::Text("1.5".into()), &sets())
            .is_err());
    }

    #[test]
    fn test_commit_option_by_label_and_code() {
        let transforms = Transforms::default();
        assert_eq!(
            transforms
                .commit(&SYNC, &FieldValue::Choice("Error".into()), &sets())
                .unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            transforms.commit(&SYNC, &FieldValue::Int(2), &sets()).unwrap(),
            Value::Int(2)
        );
    }
}
