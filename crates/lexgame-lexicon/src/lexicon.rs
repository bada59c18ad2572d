//! The dynamic bidirectional lexicon owned by one agent.
//!
//! A [`Lexicon`] is the agent's whole action space: an insertion-ordered
//! list of [`Construction`]s with no two sharing a `(meaning, form)` pair.
//! It is searched in both directions, by meaning when producing and by form
//! when comprehending. Iteration order is insertion order, which is what
//! breaks ties between equally valued constructions.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::Serialize;

use crate::construction::{Construction, ConstructionKey};
use crate::error::LexiconError;
use crate::invention::{DEFAULT_SYLLABLES, invent_form};
use crate::symbols::{Form, Symbol};
use crate::table::render_table;

/// An ordered, duplicate-free collection of constructions.
#[derive(Debug, Clone, Serialize)]
pub struct Lexicon {
    /// Value given to every invented or adopted construction.
    initial_value: f64,
    /// Constructions in insertion order.
    constructions: Vec<Construction>,
}

impl Lexicon {
    /// Create an empty lexicon whose new entries start at `initial_value`.
    pub const fn new(initial_value: f64) -> Self {
        Self {
            initial_value,
            constructions: Vec::new(),
        }
    }

    /// The value assigned to new constructions.
    pub const fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Invent a fresh random form for `meaning` and append it.
    ///
    /// Competing forms for the same meaning are expected. In the unlikely
    /// case that the random form already exists for this meaning, the
    /// existing construction is kept untouched. Returns a copy of the
    /// stored construction.
    pub fn invent<R: Rng + ?Sized>(&mut self, meaning: &Symbol, rng: &mut R) -> Construction {
        let form = invent_form(rng, DEFAULT_SYLLABLES);
        self.adopt(meaning.clone(), form)
    }

    /// Add `(meaning, form)` unless an equal construction is already present.
    ///
    /// An existing construction keeps its current value. Returns a copy of
    /// the stored construction.
    pub fn adopt(&mut self, meaning: Symbol, form: Form) -> Construction {
        let key = ConstructionKey { meaning, form };
        if let Some(existing) = self.get(&key) {
            return existing.clone();
        }
        let construction = Construction::new(key.meaning, key.form, self.initial_value);
        self.constructions.push(construction.clone());
        construction
    }

    /// Insert a construction with its own value, keeping set semantics.
    ///
    /// Returns `false` (and leaves the lexicon unchanged) if an equal
    /// construction already exists.
    pub fn insert(&mut self, construction: Construction) -> bool {
        if self.constructions.contains(&construction) {
            return false;
        }
        self.constructions.push(construction);
        true
    }

    /// All constructions whose meaning is one of `meanings`, in lexicon order.
    pub fn lookup_by_meaning(&self, meanings: &[Symbol]) -> Vec<&Construction> {
        self.constructions
            .iter()
            .filter(|cxn| meanings.contains(cxn.meaning()))
            .collect()
    }

    /// All constructions whose form is one of `forms`, in lexicon order.
    pub fn lookup_by_form(&self, forms: &[Form]) -> Vec<&Construction> {
        self.constructions
            .iter()
            .filter(|cxn| forms.contains(cxn.form()))
            .collect()
    }

    /// Look up a construction by identity.
    pub fn get(&self, key: &ConstructionKey) -> Option<&Construction> {
        self.constructions.iter().find(|cxn| cxn.matches(key))
    }

    /// Look up a construction by identity for mutation of its value.
    pub fn get_mut(&mut self, key: &ConstructionKey) -> Option<&mut Construction> {
        self.constructions.iter_mut().find(|cxn| cxn.matches(key))
    }

    /// Whether a construction with this identity exists.
    pub fn contains(&self, key: &ConstructionKey) -> bool {
        self.position(key).is_some()
    }

    /// Remove the construction with this identity and return it.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::NotFound`] if no such construction exists;
    /// the lexicon is left unchanged.
    pub fn remove(&mut self, key: &ConstructionKey) -> Result<Construction, LexiconError> {
        let idx = self.position(key).ok_or_else(|| LexiconError::NotFound {
            meaning: key.meaning.clone(),
            form: key.form.clone(),
        })?;
        Ok(self.constructions.remove(idx))
    }

    /// Number of constructions.
    pub const fn len(&self) -> usize {
        self.constructions.len()
    }

    /// Whether the lexicon holds no constructions.
    pub const fn is_empty(&self) -> bool {
        self.constructions.is_empty()
    }

    /// Iterate over constructions in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Construction> {
        self.constructions.iter()
    }

    /// The set of identities, for comparing lexicons.
    pub fn keys(&self) -> BTreeSet<ConstructionKey> {
        self.constructions.iter().map(Construction::key).collect()
    }

    fn position(&self, key: &ConstructionKey) -> Option<usize> {
        self.constructions.iter().position(|cxn| cxn.matches(key))
    }
}

impl<'a> IntoIterator for &'a Lexicon {
    type Item = &'a Construction;
    type IntoIter = core::slice::Iter<'a, Construction>;

    fn into_iter(self) -> Self::IntoIter {
        self.constructions.iter()
    }
}

/// Renders the lexicon as a meaning x form table of values.
///
/// Rows are meanings ordered by length then name, columns are forms in
/// lexical order, and each cell holds the value rounded to three decimals.
impl core::fmt::Display for Lexicon {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let forms: BTreeSet<&Form> = self.constructions.iter().map(Construction::form).collect();
        let mut rows: BTreeMap<(usize, &Symbol), BTreeMap<&Form, String>> = BTreeMap::new();
        for cxn in &self.constructions {
            rows.entry((cxn.meaning().len(), cxn.meaning()))
                .or_default()
                .insert(cxn.form(), format!("{:.3}", cxn.q_value()));
        }

        let mut header = vec![String::from("m/f")];
        header.extend(forms.iter().map(ToString::to_string));
        let mut table = vec![header];
        for ((_, meaning), cells) in &rows {
            let mut row = vec![meaning.to_string()];
            row.extend(
                forms
                    .iter()
                    .map(|form| cells.get(form).cloned().unwrap_or_default()),
            );
            table.push(row);
        }

        f.write_str(render_table(&table).trim_end())
    }
}
