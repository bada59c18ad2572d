//! String-backed symbolic values.
//!
//! Meanings, world objects, categories, and agent identities are all
//! opaque symbols such as `#'OBJECT-3`. Word forms are a separate type so
//! that a meaning can never be passed where an utterance is expected.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_symbol {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap the given string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the underlying string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Number of bytes in the underlying string.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Whether the underlying string is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_symbol! {
    /// An opaque referential symbol: a world object, a category, or an agent id.
    ///
    /// In the Naming Game a meaning is an object symbol; in the Guessing
    /// Game it is a category symbol.
    Symbol
}

define_symbol! {
    /// A word form (utterance) associated with a meaning.
    Form
}
