//! Attribute mapping errors

use super::Error;
use crate::model::FieldDescriptor;

/// Errors raised while moving values between the attribute bag and typed fields.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// No transform handles this combination of field kind, value and target.
    #[error("No transform maps {value_type} into field '{name}' ({kind})", name = .descriptor.name(), kind = .descriptor.kind())]
    UnmappableField {
        descriptor: FieldDescriptor,
        value_type: &'static str,
    },

    /// A transform failed; the cause is preserved.
    #[error("'{value}' cannot be transformed for field '{name}': {cause}", name = .descriptor.name())]
    MappingFailed {
        descriptor: FieldDescriptor,
        value: String,
        #[source]
        cause: Box<Error>,
    },

    /// A value could not be converted to the requested type.
    #[error("Cannot convert {from} '{value}' to {to}")]
    Conversion {
        from: &'static str,
        to: &'static str,
        value: String,
    },

    /// No deferred load is pending for the field.
    #[error("No deferred load pending for field '{field}'")]
    NoPendingLoad { field: String },

    /// Failure raised by a user-registered transform.
    #[error("{0}")]
    Custom(String),
}

impl MappingError {
    /// Creates an unmappable field error.
    pub fn unmappable(descriptor: FieldDescriptor, value_type: &'static str) -> Self {
        Self::UnmappableField {
            descriptor,
            value_type,
        }
    }

    /// Wraps a transform failure with the field and offending value.
    pub fn failed(descriptor: FieldDescriptor, value: impl ToString, cause: impl Into<Error>) -> Self {
        Self::MappingFailed {
            descriptor,
            value: value.to_string(),
            cause: Box::new(cause.into()),
        }
    }

    /// Creates a conversion error.
    pub fn conversion(from: &'static str, to: &'static str, value: impl ToString) -> Self {
        Self::Conversion {
            from,
            to,
            value: value.to_string(),
        }
    }

    /// Creates an error from a custom transform message.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Returns the descriptor of the failing field, if known.
    pub fn descriptor(&self) -> Option<&FieldDescriptor> {
        match self {
            Self::UnmappableField { descriptor, .. } | Self::MappingFailed { descriptor, .. } => {
                Some(descriptor)
            }
            _ => None,
        }
    }

    /// Returns the underlying cause of a [`MappingError::MappingFailed`].
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Self::MappingFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
