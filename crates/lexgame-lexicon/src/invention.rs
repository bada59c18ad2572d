//! Word invention and scoped symbolic identifiers.
//!
//! New word forms are strings of consonant-vowel syllables drawn uniformly
//! at random. Nothing prevents two inventions from producing the same
//! form; such collisions simply become homonyms or synonyms.
//!
//! Identifiers look like Lisp symbols (`#'AGENT-0`, `#'OBJECT-12`) and are
//! numbered per namespace. The counters live in a [`ScopedIds`] value owned
//! by whoever builds the world and population, so a fresh instance starts
//! every namespace at zero again.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::symbols::{Form, Symbol};

/// Number of syllables in an invented word unless stated otherwise.
pub const DEFAULT_SYLLABLES: usize = 3;

/// Vowels a syllable may end with.
pub const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Consonants a syllable may start with.
pub const CONSONANTS: [char; 21] = [
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w', 'x',
    'y', 'z',
];

/// Invent a random word of `syllables` consonant-vowel pairs.
///
/// The result is always `2 * syllables` characters long.
pub fn invent_form<R: Rng + ?Sized>(rng: &mut R, syllables: usize) -> Form {
    let mut word = String::with_capacity(syllables.saturating_mul(2));
    for _ in 0..syllables {
        if let (Some(consonant), Some(vowel)) = (CONSONANTS.choose(rng), VOWELS.choose(rng)) {
            word.push(*consonant);
            word.push(*vowel);
        }
    }
    Form::from(word)
}

/// Per-namespace counters for unique symbolic identifiers.
#[derive(Debug, Clone, Default)]
pub struct ScopedIds {
    counters: BTreeMap<String, u64>,
}

impl ScopedIds {
    /// Create a generator with every namespace starting at zero.
    pub const fn new() -> Self {
        Self {
            counters: BTreeMap::new(),
        }
    }

    /// Produce the next identifier in `namespace`, e.g. `#'AGENT-3`.
    pub fn next_id(&mut self, namespace: &str) -> Symbol {
        let counter = self.counters.entry(namespace.to_owned()).or_insert(0);
        let id = Symbol::from(format!("#'{namespace}-{counter}"));
        *counter = counter.saturating_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn scoped_ids_count_per_namespace() {
        let mut ids = ScopedIds::new();
        assert_eq!(ids.next_id("AG").as_str(), "#'AG-0");
        assert_eq!(ids.next_id("AG").as_str(), "#'AG-1");
        assert_eq!(ids.next_id("OBJ").as_str(), "#'OBJ-0");
        assert_eq!(ids.next_id("AG").as_str(), "#'AG-2");
        assert_eq!(ids.next_id("OBJ").as_str(), "#'OBJ-1");
        assert_eq!(ids.next_id("CATEGORY").as_str(), "#'CATEGORY-0");
    }

    #[test]
    fn fresh_generator_restarts_numbering() {
        let mut first = ScopedIds::new();
        let _ = first.next_id("AG");
        let mut second = ScopedIds::new();
        assert_eq!(second.next_id("AG").as_str(), "#'AG-0");
    }

    #[test]
    fn invented_form_length_matches_syllables() {
        let mut rng = StdRng::seed_from_u64(3);
        for syllables in 1..=4 {
            let form = invent_form(&mut rng, syllables);
            assert_eq!(form.len(), syllables * 2);
        }
    }

    #[test]
    fn invented_form_alternates_consonant_vowel() {
        let mut rng = StdRng::seed_from_u64(11);
        let form = invent_form(&mut rng, DEFAULT_SYLLABLES);
        for (idx, letter) in form.as_str().chars().enumerate() {
            if idx % 2 == 0 {
                assert!(CONSONANTS.contains(&letter), "{letter} is not a consonant");
            } else {
                assert!(VOWELS.contains(&letter), "{letter} is not a vowel");
            }
        }
    }

    #[test]
    fn zero_syllables_gives_empty_form() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(invent_form(&mut rng, 0).is_empty());
    }
}
