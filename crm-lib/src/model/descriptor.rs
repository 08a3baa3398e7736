//! Field descriptors: how a record field maps to a remote attribute

use std::borrow::Cow;
use std::fmt;

/// The remote value representation of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Int,
    Decimal,
    Double,
    Boolean,
    DateTime,
    /// Picklist value, translated through an option set.
    Option,
    /// Lookup to another record.
    Reference,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Decimal => "decimal",
            FieldKind::Double => "double",
            FieldKind::Boolean => "bool",
            FieldKind::DateTime => "datetime",
            FieldKind::Option => "option",
            FieldKind::Reference => "reference",
        };
        f.write_str(name)
    }
}

/// Immutable metadata binding a record field to a remote attribute.
///
/// Descriptors are `const`-constructible so they can live in the
/// [`Property`](super::Property) constants of a record type.
///
/// # Example
///
/// ```
/// use crm_lib::model::{FieldDescriptor, FieldKind};
///
/// const CITY: FieldDescriptor = FieldDescriptor::string("address1_city");
/// const SYNC: FieldDescriptor = FieldDescriptor::option("test_sync_state", "test_sync_states");
///
/// assert_eq!(CITY.kind(), FieldKind::String);
/// assert_eq!(SYNC.option_set(), Some("test_sync_states"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: &'static str,
    kind: FieldKind,
    option_set: Option<&'static str>,
}

impl FieldDescriptor {
    /// Creates a descriptor of any kind without an option set.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            option_set: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    pub const fn decimal(name: &'static str) -> Self {
        Self::new(name, FieldKind::Decimal)
    }

    pub const fn double(name: &'static str) -> Self {
        Self::new(name, FieldKind::Double)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub const fn datetime(name: &'static str) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    /// Creates a picklist descriptor translated through `option_set`.
    pub const fn option(name: &'static str, option_set: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Option,
            option_set: Some(option_set),
        }
    }

    /// Creates a lookup descriptor.
    pub const fn reference(name: &'static str) -> Self {
        Self::new(name, FieldKind::Reference)
    }

    /// Returns the remote attribute name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the value kind.
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the option set name; only set for [`FieldKind::Option`].
    pub const fn option_set(&self) -> Option<&'static str> {
        self.option_set
    }

    /// Returns the key under which the remote store exposes this field on reads.
    ///
    /// Lookups are read as `_<name>_value`; everything else by plain name.
    pub fn read_key(&self) -> Cow<'static, str> {
        match self.kind {
            FieldKind::Reference => Cow::Owned(reference_key(self.name)),
            _ => Cow::Borrowed(self.name),
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.option_set {
            Some(set) => write!(f, "{} ({}: {})", self.name, self.kind, set),
            None => write!(f, "{} ({})", self.name, self.kind),
        }
    }
}

/// Returns the read key of a lookup attribute (`_<name>_value`).
pub fn reference_key(name: &str) -> String {
    format!("_{}_value", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_key() {
        assert_eq!(FieldDescriptor::string("address1_city").read_key(), "address1_city");
        assert_eq!(
            FieldDescriptor::reference("parentaccountid").read_key(),
            "_parentaccountid_value"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FieldDescriptor::option("test_sync_state", "test_sync_states").to_string(),
            "test_sync_state (option: test_sync_states)"
        );
        assert_eq!(FieldDescriptor::decimal("budgetamount").to_string(), "budgetamount (decimal)");
    }
}
