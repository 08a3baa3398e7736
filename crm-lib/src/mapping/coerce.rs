//! Raw value coercion applied before any transform runs

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::error::MappingError;
use crate::model::FieldDescriptor;
use crate::model::FieldKind;
use crate::model::Value;

/// Brings a raw value into the representation its field kind expects.
///
/// Decimal, double, timestamp and boolean kinds are converted explicitly;
/// lookups and option codes delivered as text are parsed. Other kinds pass
/// through untouched.
pub fn coerce(descriptor: &FieldDescriptor, value: &Value) -> Result<Value, MappingError> {
    match descriptor.kind() {
        FieldKind::Decimal => to_decimal(value).map(Value::Decimal),
        FieldKind::Double => to_double(value).map(Value::Float),
        FieldKind::DateTime => to_datetime(value).map(Value::DateTime),
        FieldKind::Boolean => to_bool(value).map(Value::Bool),
        FieldKind::Reference => match value {
            Value::String(s) => s
                .parse::<Uuid>()
                .map(Value::Guid)
                .map_err(|_| MappingError::conversion("string", "guid", s)),
            other => Ok(other.clone()),
        },
        FieldKind::Option => match value {
            Value::String(s) => Ok(s.trim().parse::<i64>().map(Value::Int).unwrap_or_else(|_| value.clone())),
            other => Ok(other.clone()),
        },
        FieldKind::String | FieldKind::Int => Ok(value.clone()),
    }
}

pub fn to_decimal(value: &Value) -> Result<Decimal, MappingError> {
    let converted = match value {
        Value::Decimal(d) => Some(*d),
        Value::Int(n) => Some(Decimal::from(*n)),
        // Shortest round-trip text keeps 100000.5 exact
        Value::Float(n) => n.to_string().parse().ok().or_else(|| Decimal::from_f64(*n)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(Decimal::from(u8::from(*b))),
        Value::DateTime(_) | Value::Guid(_) => None,
    };
    converted.ok_or_else(|| MappingError::conversion(value.type_name(), "decimal", value))
}

pub fn to_double(value: &Value) -> Result<f64, MappingError> {
    let converted = match value {
        Value::Float(n) => Some(*n),
        Value::Int(n) => n.to_f64(),
        Value::Decimal(d) => d.to_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::DateTime(_) | Value::Guid(_) => None,
    };
    converted.ok_or_else(|| MappingError::conversion(value.type_name(), "double", value))
}

pub fn to_bool(value: &Value) -> Result<bool, MappingError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Int(n) => Ok(*n != 0),
        Value::Float(n) => Ok(*n != 0.0),
        Value::Decimal(d) => Ok(!d.is_zero()),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
        other => Err(MappingError::conversion(other.type_name(), "bool", other)),
    }
}

/// Integer conversion with fallback: fractional numbers round to nearest.
pub fn to_int(value: &Value) -> Result<i32, MappingError> {
    let converted = match value {
        Value::Int(n) => i32::try_from(*n).ok(),
        Value::Float(n) => n.round().to_i32(),
        Value::Decimal(d) => d.round().to_i32(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i32::from(*b)),
        Value::DateTime(_) | Value::Guid(_) => None,
    };
    converted.ok_or_else(|| MappingError::conversion(value.type_name(), "i32", value))
}

pub fn to_datetime(value: &Value) -> Result<DateTime<Utc>, MappingError> {
    match value {
        Value::DateTime(dt) => Ok(*dt),
        Value::String(s) => {
            parse_datetime(s).ok_or_else(|| MappingError::conversion("string", "datetime", s))
        }
        other => Err(MappingError::conversion(other.type_name(), "datetime", other)),
    }
}

/// Parses RFC 3339, `yyyy-MM-dd HH:mm:ss` (UTC) or a bare date (midnight UTC).
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// January 1st, midnight UTC, of `year`.
pub fn year_start(year: i32) -> Result<DateTime<Utc>, MappingError> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| MappingError::conversion("int", "datetime", year))
}
