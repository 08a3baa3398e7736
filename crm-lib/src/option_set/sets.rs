//! Immutable option set snapshot

use std::collections::HashMap;

use super::OptionSetConfig;
use crate::error::OptionSetError;
use crate::model::metadata::OptionSetDocument;

/// One option: the stored code and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub code: i32,
    pub label: String,
}

/// What to look up when encoding: a label or a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey<'a> {
    /// Matched against labels, ignoring case.
    Label(&'a str),
    /// Matched against codes numerically.
    Code(i64),
}

impl<'a> From<&'a str> for OptionKey<'a> {
    fn from(label: &'a str) -> Self {
        OptionKey::Label(label)
    }
}

impl<'a> From<&'a String> for OptionKey<'a> {
    fn from(label: &'a String) -> Self {
        OptionKey::Label(label)
    }
}

impl From<i32> for OptionKey<'_> {
    fn from(code: i32) -> Self {
        OptionKey::Code(code.into())
    }
}

impl From<i64> for OptionKey<'_> {
    fn from(code: i64) -> Self {
        OptionKey::Code(code)
    }
}

/// A complete set of option set definitions: set name → options.
///
/// Never mutated once published by the
/// [`OptionSetRegistry`](super::OptionSetRegistry).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSets {
    sets: HashMap<String, Vec<OptionEntry>>,
}

impl OptionSets {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds options to a set (builder pattern); options of an existing set are appended.
    pub fn with_set<L: Into<String>>(
        mut self,
        name: impl Into<String>,
        options: impl IntoIterator<Item = (i32, L)>,
    ) -> Self {
        self.sets
            .entry(name.into())
            .or_default()
            .extend(options.into_iter().map(|(code, label)| OptionEntry {
                code,
                label: label.into(),
            }));
        self
    }

    /// Builds the collection from a descriptor document.
    ///
    /// Sets without options are skipped, as are sets not marked custom
    /// unless the config includes system sets. Options of sets sharing a
    /// name are merged.
    pub fn from_document(document: &OptionSetDocument, config: &OptionSetConfig) -> Self {
        let mut sets: HashMap<String, Vec<OptionEntry>> = HashMap::new();

        for definition in &document.option_sets {
            let Some(options) = &definition.options else {
                log::debug!("Skipping option set '{}': no options", definition.name);
                continue;
            };
            if !definition.is_custom() && !config.include_system_sets {
                log::debug!("Skipping option set '{}': not custom", definition.name);
                continue;
            }

            let entries = options.iter().filter_map(|option| {
                match option.label.text(config.language_code) {
                    Some(label) => Some(OptionEntry {
                        code: option.value,
                        label: label.to_string(),
                    }),
                    None => {
                        log::warn!(
                            "Option {} of set '{}' has no label, skipping",
                            option.value,
                            definition.name
                        );
                        None
                    }
                }
            });
            let entries: Vec<_> = entries.collect();

            if !entries.is_empty() {
                sets.entry(definition.name.clone())
                    .or_default()
                    .extend(entries);
            }
        }

        Self { sets }
    }

    /// Returns the options of a set.
    pub fn get(&self, name: &str) -> Option<&[OptionEntry]> {
        self.sets.get(name).map(Vec::as_slice)
    }

    /// Returns `true` if a set with this name is loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Returns the number of sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if no sets are loaded.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterates over the loaded set names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Returns the code of the option matching `key` in `set`.
    pub fn encode<'a>(&self, key: impl Into<OptionKey<'a>>, set: &str) -> Result<i32, OptionSetError> {
        let key = key.into();
        self.options(set)?
            .iter()
            .find(|option| match key {
                OptionKey::Label(label) => option.label.eq_ignore_ascii_case(label),
                OptionKey::Code(code) => i64::from(option.code) == code,
            })
            .map(|option| option.code)
            .ok_or_else(|| match key {
                OptionKey::Label(label) => OptionSetError::unknown_value(set, label),
                OptionKey::Code(code) => OptionSetError::unknown_value(set, code),
            })
    }

    /// Returns the label of the option with `code` in `set`.
    pub fn decode(&self, code: i32, set: &str) -> Result<&str, OptionSetError> {
        self.options(set)?
            .iter()
            .find(|option| option.code == code)
            .map(|option| option.label.as_str())
            .ok_or_else(|| OptionSetError::unknown_value(set, code))
    }

    fn options(&self, set: &str) -> Result<&[OptionEntry], OptionSetError> {
        self.get(set).ok_or_else(|| OptionSetError::unknown_set(set))
    }
}
