//! Validated field names for filters and orders.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Which kind of field a name belongs to, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A filter field.
    Filter,
    /// An order field.
    Order,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Filter => write!(f, "filter"),
            FieldKind::Order => write!(f, "order"),
        }
    }
}

/// Checks that a field name is non-empty, trimmed and printable.
///
/// Interior spaces are allowed. Other whitespace and separators, control
/// characters, invisible format characters (such as U+200B or U+00AD) and
/// private-use characters are not.
pub fn validate_field_name(kind: FieldKind, value: &str) -> ModelResult<()> {
    if value.is_empty() {
        return Err(ModelError::EmptyField { kind });
    }
    if value.trim() != value {
        return Err(ModelError::UntrimmedField {
            kind,
            value: value.to_string(),
        });
    }
    if !value.chars().all(is_printable) {
        return Err(ModelError::NonPrintableField {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !c.is_control() && !c.is_whitespace() && !is_format(c) && !is_private_use(c)
}

/// Unicode general category Cf.
const FORMAT_CHARS: &[(char, char)] = &[
    ('\u{00AD}', '\u{00AD}'),
    ('\u{0600}', '\u{0605}'),
    ('\u{061C}', '\u{061C}'),
    ('\u{06DD}', '\u{06DD}'),
    ('\u{070F}', '\u{070F}'),
    ('\u{0890}', '\u{0891}'),
    ('\u{08E2}', '\u{08E2}'),
    ('\u{180E}', '\u{180E}'),
    ('\u{200B}', '\u{200F}'),
    ('\u{202A}', '\u{202E}'),
    ('\u{2060}', '\u{2064}'),
    ('\u{2066}', '\u{206F}'),
    ('\u{FEFF}', '\u{FEFF}'),
    ('\u{FFF9}', '\u{FFFB}'),
    ('\u{110BD}', '\u{110BD}'),
    ('\u{110CD}', '\u{110CD}'),
    ('\u{13430}', '\u{1343F}'),
    ('\u{1BCA0}', '\u{1BCA3}'),
    ('\u{1D173}', '\u{1D17A}'),
    ('\u{E0001}', '\u{E0001}'),
    ('\u{E0020}', '\u{E007F}'),
];

fn is_format(c: char) -> bool {
    FORMAT_CHARS.iter().any(|&(start, end)| (start..=end).contains(&c))
}

fn is_private_use(c: char) -> bool {
    matches!(
        c,
        '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}'
    )
}

macro_rules! field_type {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a field name, validating it.
            pub fn new(value: impl Into<String>) -> ModelResult<Self> {
                let value = value.into();
                validate_field_name($kind, &value)?;
                Ok(Self(value))
            }

            /// Returns the field name.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(field: $name) -> Self {
                field.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

field_type!(
    /// Name of the field a filter applies to.
    FilterField,
    FieldKind::Filter
);

field_type!(
    /// Name of the field an order sorts by.
    OrderField,
    FieldKind::Order
);
