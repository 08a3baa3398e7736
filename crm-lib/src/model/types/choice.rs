//! Option set (picklist) enums

use crate::error::MappingError;
use crate::model::FieldType;
use crate::model::FieldValue;
use crate::model::Target;

/// A Rust enum backed by an option set.
///
/// Each variant carries the option label it encodes to; hydrate matches the
/// decoded label against these case-insensitively. Use [`option_set_enum!`]
/// to declare one.
///
/// [`option_set_enum!`]: crate::option_set_enum
pub trait OptionSetEnum: Copy + Send + Sync + 'static {
    /// All variants, in declaration order.
    const VARIANTS: &'static [Self];

    /// Returns the option label of this variant.
    fn label(&self) -> &'static str;

    /// Finds the variant whose label matches, ignoring case.
    fn from_label(label: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|variant| variant.label().eq_ignore_ascii_case(label))
            .copied()
    }
}

// Enum fields are always committed; only `Option<E>::None` is skipped.
impl<E: OptionSetEnum> FieldType for E {
    const TARGET: Target = Target::Choice;

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Choice(self.label().to_string()))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, MappingError> {
        match value {
            FieldValue::Choice(label) | FieldValue::Text(label) => E::from_label(&label)
                .ok_or_else(|| MappingError::conversion("label", std::any::type_name::<E>(), label)),
            other => Err(MappingError::conversion(
                other.type_name(),
                std::any::type_name::<E>(),
                &other,
            )),
        }
    }
}

/// Declares an enum backed by an option set.
///
/// Variants default to their identifier as label; give another label with
/// `Variant => "Label"`. Derive at least `Clone` and `Copy`.
///
/// ```
/// use crm_lib::option_set_enum;
/// use crm_lib::model::OptionSetEnum;
///
/// option_set_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
///     pub enum SyncState {
///         #[default]
///         Synchronized,
///         OutOfSync => "Out of Sync",
///         Error,
///     }
/// }
///
/// assert_eq!(SyncState::OutOfSync.label(), "Out of Sync");
/// assert_eq!(SyncState::from_label("error"), Some(SyncState::Error));
/// ```
#[macro_export]
macro_rules! option_set_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $crate::model::OptionSetEnum for $name {
            const VARIANTS: &'static [Self] = &[$($name::$variant),*];

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $crate::__option_label!($variant $(, $label)?),)*
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __option_label {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident, $label:literal) => {
        $label
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::option_set_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Priority {
            Low,
            VeryHigh => "Very High",
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Priority::Low.label(), "Low");
        assert_eq!(Priority::VeryHigh.label(), "Very High");
        assert_eq!(Priority::from_label("very high"), Some(Priority::VeryHigh));
        assert_eq!(Priority::from_label("VeryHigh"), None);
    }

    #[test]
    fn test_field_type() {
        assert_eq!(
            Priority::VeryHigh.to_field_value(),
            Some(FieldValue::Choice("Very High".into()))
        );
        assert_eq!(
            Priority::from_field_value(FieldValue::Choice("LOW".into())).unwrap(),
            Priority::Low
        );
        assert!(Priority::from_field_value(FieldValue::Int(1)).is_err());
        assert_eq!(Option::<Priority>::None.to_field_value(), None);
    }
}
