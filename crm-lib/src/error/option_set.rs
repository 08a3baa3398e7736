//! Option set (enumeration) errors

/// Errors raised by the option set registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionSetError {
    /// No option set with this name is loaded.
    #[error("Option set '{name}' not found")]
    UnknownOptionSet { name: String },

    /// The option set exists but has no option matching the value.
    #[error("'{value}' was not found in option set '{set}'")]
    UnknownOptionValue { set: String, value: String },

    /// The descriptor document could not be parsed.
    #[error("Invalid option set document: {0}")]
    Document(String),
}

impl OptionSetError {
    /// Creates an unknown option set error.
    pub fn unknown_set(name: impl Into<String>) -> Self {
        Self::UnknownOptionSet { name: name.into() }
    }

    /// Creates an unknown option value error.
    pub fn unknown_value(set: impl Into<String>, value: impl ToString) -> Self {
        Self::UnknownOptionValue {
            set: set.into(),
            value: value.to_string(),
        }
    }
}
