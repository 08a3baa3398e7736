//! Entity naming (logical name and entity set name)

use std::fmt;

/// The remote identity of a record type.
///
/// Web API URLs use the entity set name (e.g. `/leads`), records and lookups
/// use the logical name (e.g. `lead`). When no set name is given it is
/// derived from the logical name, see [`pluralize`].
///
/// # Examples
///
/// ```
/// use crm_lib::model::EntityName;
///
/// let lead = EntityName::new("lead");
/// assert_eq!(lead.set(), "leads");
///
/// let opportunity = EntityName::new("opportunity");
/// assert_eq!(opportunity.set(), "opportunities");
///
/// let custom = EntityName::with_set("test_person", "test_people");
/// assert_eq!(custom.set(), "test_people");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityName {
    logical: String,
    set: String,
}

impl EntityName {
    /// Creates a name from a logical name, deriving the set name.
    pub fn new(logical: impl Into<String>) -> Self {
        let logical = logical.into();
        let set = pluralize(&logical);
        Self { logical, set }
    }

    /// Creates a name with an explicit entity set name.
    pub fn with_set(logical: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            logical: logical.into(),
            set: set.into(),
        }
    }

    /// Creates a name from static parts; an empty or missing set name is derived.
    pub fn from_parts(logical: &str, set: Option<&str>) -> Self {
        match set {
            Some(set) if !set.is_empty() => Self::with_set(logical, set),
            _ => Self::new(logical),
        }
    }

    /// Returns the logical name (e.g. "account").
    pub fn logical(&self) -> &str {
        &self.logical
    }

    /// Returns the entity set name (e.g. "accounts").
    pub fn set(&self) -> &str {
        &self.set
    }

    /// Returns the primary id attribute (e.g. "accountid").
    pub fn id_attribute(&self) -> String {
        format!("{}id", self.logical)
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.logical, self.set)
    }
}

/// Derives an entity set name: a trailing `y` becomes `ies`, anything else gets `s`.
pub fn pluralize(logical: &str) -> String {
    match logical.strip_suffix('y') {
        Some(stem) => format!("{}ies", stem),
        None => format!("{}s", logical),
    }
}
