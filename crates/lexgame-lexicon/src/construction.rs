//! Meaning/form associations and their values.
//!
//! A [`Construction`] is a state/action pair of the agent's bandit: its
//! identity is the `(meaning, form)` pair and its `q_value` evolves as the
//! agent learns. Equality and hashing only ever look at the identity.

use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::symbols::{Form, Symbol};

/// The identity of a [`Construction`]: its meaning and form.
///
/// Agents hold keys rather than references so that the lexicon stays the
/// sole owner of its constructions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConstructionKey {
    /// The meaning side of the association.
    pub meaning: Symbol,
    /// The form side of the association.
    pub form: Form,
}

impl ConstructionKey {
    /// Build a key from its two halves.
    pub fn new(meaning: impl Into<Symbol>, form: impl Into<Form>) -> Self {
        Self {
            meaning: meaning.into(),
            form: form.into(),
        }
    }
}

/// A learned meaning/form association with a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Construction {
    meaning: Symbol,
    form: Form,
    q_value: f64,
}

impl Construction {
    /// Create a construction with the given initial value.
    pub fn new(meaning: impl Into<Symbol>, form: impl Into<Form>, q_value: f64) -> Self {
        Self {
            meaning: meaning.into(),
            form: form.into(),
            q_value,
        }
    }

    /// The meaning this construction expresses.
    pub const fn meaning(&self) -> &Symbol {
        &self.meaning
    }

    /// The form used to express the meaning.
    pub const fn form(&self) -> &Form {
        &self.form
    }

    /// The current value of the association.
    pub const fn q_value(&self) -> f64 {
        self.q_value
    }

    /// Overwrite the value. Identity is never affected.
    pub const fn set_q_value(&mut self, q_value: f64) {
        self.q_value = q_value;
    }

    /// Clone out the identity of this construction.
    pub fn key(&self) -> ConstructionKey {
        ConstructionKey {
            meaning: self.meaning.clone(),
            form: self.form.clone(),
        }
    }

    /// Whether this construction has the given identity.
    pub fn matches(&self, key: &ConstructionKey) -> bool {
        self.meaning == key.meaning && self.form == key.form
    }
}

impl PartialEq for Construction {
    fn eq(&self, other: &Self) -> bool {
        self.meaning == other.meaning && self.form == other.form
    }
}

impl Eq for Construction {}

impl Hash for Construction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.meaning.hash(state);
        self.form.hash(state);
    }
}

impl core::fmt::Display for Construction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({} - {}) -> {}", self.meaning, self.form, self.q_value)
    }
}
