//! The raw attribute bag of a record

use std::collections::HashMap;

use super::Value;
use crate::error::Error;

/// Remote attribute name → raw value.
///
/// Null entries are never stored: inserting `None` leaves the bag untouched
/// and JSON nulls are dropped on parse.
///
/// # Example
///
/// ```
/// use crm_lib::model::Attributes;
///
/// let attributes = Attributes::new()
///     .set("address1_city", "Berlin")
///     .set("numberofemployees", 120);
///
/// assert!(attributes.contains("address1_city"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: HashMap<String, Value>,
}

impl Attributes {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns `true` if the bag holds `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Sets a value (builder pattern).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Inserts a value if present; `None` is a no-op.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<Value>) {
        if let Some(value) = value {
            self.values.insert(key.into(), value);
        }
    }

    /// Removes a value and returns it.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Returns the number of stored attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no attributes are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all attributes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    // =========================================================================
    // JSON conversion
    // =========================================================================

    /// Builds a bag from a JSON object as returned by the Web API.
    ///
    /// OData annotations (`@odata.etag`, `field@OData.Community...`) are
    /// skipped, as are nulls. Arrays and objects (expanded navigation
    /// properties) cannot be represented and are dropped.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut attributes = Self::new();

        for (key, json) in object {
            if key.contains('@') {
                continue;
            }
            match Value::from_json(json) {
                Some(value) => attributes.insert(key.as_str(), value),
                None if !json.is_null() => {
                    log::debug!("Dropping non-scalar attribute '{}'", key);
                }
                None => {}
            }
        }

        attributes
    }

    /// Parses a JSON object body into a bag.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(body)?;
        Ok(Self::from_json_object(&object))
    }

    /// Converts the bag into a JSON object for POST/PATCH bodies.
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .values
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .filter(|(_, json)| !json.is_null())
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(object)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_skips_nulls_and_annotations() {
        let body = r#"{
            "@odata.etag": "W/\"123\"",
            "address1_city": "Berlin",
            "address1_line1": null,
            "_parentaccountid_value": "0d8a9c4e-5b1f-4b9e-9a0e-9a4c2a1e7f10",
            "_parentaccountid_value@OData.Community.Display.V1.FormattedValue": "Contoso",
            "budgetamount": 100000.5,
            "contacts": []
        }"#;

        let attributes = Attributes::from_json(body).unwrap();

        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes.get("address1_city"), Some(&Value::from("Berlin")));
        assert!(!attributes.contains("address1_line1"));
        assert!(!attributes.contains("contacts"));
        assert_eq!(attributes.get("budgetamount"), Some(&Value::Float(100000.5)));
    }

    #[test]
    fn test_insert_opt_none_is_noop() {
        let mut attributes = Attributes::new().set("name", "Contoso");
        attributes.insert_opt("name", None);
        assert_eq!(attributes.get("name"), Some(&Value::from("Contoso")));
    }

    #[test]
    fn test_to_json() {
        let attributes = Attributes::new()
            .set("name", "Contoso")
            .set("numberofemployees", 12);
        assert_eq!(
            attributes.to_json(),
            serde_json::json!({"name": "Contoso", "numberofemployees": 12})
        );
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(Attributes::from_json("[1, 2]").is_err());
    }
}
