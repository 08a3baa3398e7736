//! Hot-swappable option set registry

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::OptionKey;
use super::OptionSetConfig;
use super::OptionSets;
use crate::error::Error;
use crate::error::OptionSetError;
use crate::model::metadata::OptionSetDocument;

/// Shared, refreshable option set definitions.
///
/// Cloning is cheap and clones share the same definitions. A load builds a
/// complete new [`OptionSets`] and publishes it in one atomic swap, so
/// concurrent readers see either the previous or the new definitions, never
/// a mix. Take a [`snapshot`](Self::snapshot) to run several lookups against
/// the same definitions.
///
/// # Example
///
/// ```
/// use crm_lib::option_set::OptionSetRegistry;
///
/// let registry = OptionSetRegistry::new();
/// registry.load_json(r#"{
///     "value": [{
///         "Name": "test_sync_states",
///         "IsCustomOptionSet": true,
///         "Options": [
///             {"Value": 1, "Label": {"LocalizedLabels": [{"Label": "Synchronized", "LanguageCode": 1033}]}},
///             {"Value": 2, "Label": {"LocalizedLabels": [{"Label": "Out of Sync", "LanguageCode": 1033}]}}
///         ]
///     }]
/// }"#)?;
///
/// assert_eq!(registry.encode("Out of Sync", "test_sync_states")?, 2);
/// assert_eq!(registry.decode(1, "test_sync_states")?, "Synchronized");
/// # Ok::<(), crm_lib::error::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionSetRegistry {
    sets: Arc<ArcSwap<OptionSets>>,
    config: OptionSetConfig,
}

impl OptionSetRegistry {
    /// Creates an empty registry with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given config.
    pub fn with_config(config: OptionSetConfig) -> Self {
        Self {
            sets: Arc::default(),
            config,
        }
    }

    /// Creates a registry holding `sets`.
    pub fn from_sets(sets: OptionSets) -> Self {
        let registry = Self::new();
        registry.replace(sets);
        registry
    }

    /// Returns the config.
    pub fn config(&self) -> &OptionSetConfig {
        &self.config
    }

    /// Replaces all definitions with those of `document`.
    ///
    /// Returns the number of option sets loaded.
    pub fn load(&self, document: &OptionSetDocument) -> usize {
        let sets = OptionSets::from_document(document, &self.config);
        let count = sets.len();
        log::debug!(
            "Loaded {} option sets ({} definitions in document)",
            count,
            document.option_sets.len()
        );
        self.replace(sets);
        count
    }

    /// Parses a `GlobalOptionSetDefinitions` body and loads it.
    ///
    /// On a parse error the current definitions stay in place.
    pub fn load_json(&self, body: &str) -> Result<usize, Error> {
        let document = OptionSetDocument::from_json(body)?;
        Ok(self.load(&document))
    }

    /// Publishes a complete set of definitions.
    pub fn replace(&self, sets: OptionSets) {
        self.sets.store(Arc::new(sets));
    }

    /// Returns the current definitions.
    pub fn snapshot(&self) -> Arc<OptionSets> {
        self.sets.load_full()
    }

    /// Returns the code of the option matching `key` in `set`.
    pub fn encode<'a>(&self, key: impl Into<OptionKey<'a>>, set: &str) -> Result<i32, OptionSetError> {
        self.sets.load().encode(key, set)
    }

    /// Returns the label of the option with `code` in `set`.
    pub fn decode(&self, code: i32, set: &str) -> Result<String, OptionSetError> {
        self.sets.load().decode(code, set).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_survives_reload() {
        let registry = OptionSetRegistry::from_sets(
            OptionSets::new().with_set("colors", [(1, "Red")]),
        );
        let before = registry.snapshot();

        registry.replace(OptionSets::new().with_set("colors", [(1, "Blue")]));

        assert_eq!(before.decode(1, "colors").unwrap(), "Red");
        assert_eq!(registry.decode(1, "colors").unwrap(), "Blue");
    }

    #[test]
    fn test_clones_share_definitions() {
        let registry = OptionSetRegistry::new();
        let clone = registry.clone();

        registry.replace(OptionSets::new().with_set("colors", [(1, "Red")]));

        assert_eq!(clone.encode("red", "colors").unwrap(), 1);
    }

    #[test]
    fn test_failed_load_keeps_definitions() {
        let registry = OptionSetRegistry::from_sets(
            OptionSets::new().with_set("colors", [(1, "Red")]),
        );

        assert!(registry.load_json("not json").is_err());
        assert_eq!(registry.decode(1, "colors").unwrap(), "Red");
    }

    #[test]
    fn test_system_sets_are_skipped_by_default() {
        let body = r#"{"value": [
            {"Name": "statecode", "IsCustomOptionSet": false,
             "Options": [{"Value": 0, "Label": {"LocalizedLabels": [{"Label": "Active", "LanguageCode": 1033}]}}]}
        ]}"#;

        let registry = OptionSetRegistry::new();
        assert_eq!(registry.load_json(body).unwrap(), 0);

        let registry = OptionSetRegistry::with_config(OptionSetConfig::new().with_system_sets(true));
        assert_eq!(registry.load_json(body).unwrap(), 1);
        assert_eq!(registry.decode(0, "statecode").unwrap(), "Active");
    }
}
