//! Global option set definitions
//!
//! Mirrors the body of `GET GlobalOptionSetDefinitions`. Only the fields the
//! registry needs are modelled; everything else in the response is ignored.

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::error::OptionSetError;

/// A list of global option set definitions (`{"value": [...]}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionSetDocument {
    /// The option set definitions.
    #[serde(rename = "value", default)]
    pub option_sets: Vec<GlobalOptionSetDefinition>,
}

impl OptionSetDocument {
    /// Parses a descriptor document from its JSON body.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body)
            .map_err(|e| OptionSetError::Document(e.to_string()).into())
    }
}

/// Definition of a single global option set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalOptionSetDefinition {
    /// The option set name (e.g. "test_sync_states").
    pub name: String,

    /// Whether the set was created by a customizer rather than shipped by the system.
    #[serde(default)]
    pub is_custom_option_set: Option<bool>,

    /// Display name of the set.
    #[serde(default)]
    pub display_name: Label,

    /// The available options; absent for boolean sets.
    #[serde(default)]
    pub options: Option<Vec<OptionDefinition>>,
}

impl GlobalOptionSetDefinition {
    /// Returns `true` if the set is marked custom.
    pub fn is_custom(&self) -> bool {
        self.is_custom_option_set.unwrap_or(false)
    }
}

/// A single option of a set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionDefinition {
    /// The integer code stored by the remote store.
    pub value: i32,

    /// The display label.
    #[serde(default)]
    pub label: Label,
}

/// A localizable label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    /// The label in the calling user's language.
    #[serde(default)]
    pub user_localized_label: Option<LocalizedLabel>,

    /// All localized labels.
    #[serde(default)]
    pub localized_labels: Vec<LocalizedLabel>,
}

impl Label {
    /// Picks the label text.
    ///
    /// Order: the label for `language_code` if given, then the first
    /// localized label, then the user-localized label.
    pub fn text(&self, language_code: Option<i32>) -> Option<&str> {
        language_code
            .and_then(|code| self.localized_labels.iter().find(|l| l.language_code == code))
            .or_else(|| self.localized_labels.first())
            .or(self.user_localized_label.as_ref())
            .map(|l| l.label.as_str())
    }
}

/// A label localized to one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizedLabel {
    /// The localized text.
    pub label: String,

    /// The language code (LCID), e.g. 1033 for English.
    #[serde(default)]
    pub language_code: i32,
}
