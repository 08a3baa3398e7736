//! Registry configuration

/// Controls how a descriptor document is turned into option sets.
///
/// # Example
///
/// ```
/// use crm_lib::option_set::OptionSetConfig;
///
/// let config = OptionSetConfig::default()
///     .with_language_code(1031)
///     .with_system_sets(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSetConfig {
    /// Preferred label language (LCID).
    ///
    /// Default: none, the first localized label is used
    pub language_code: Option<i32>,

    /// Also load option sets that are not marked custom.
    ///
    /// Default: false
    pub include_system_sets: bool,
}

impl OptionSetConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the preferred label language.
    pub fn with_language_code(mut self, language_code: i32) -> Self {
        self.language_code = Some(language_code);
        self
    }

    /// Sets whether system (non-custom) option sets are loaded.
    pub fn with_system_sets(mut self, include: bool) -> Self {
        self.include_system_sets = include;
        self
    }
}
