//! Guessing Game behaviour: meanings are categories, interpreted against
//! the episode context.
//!
//! A parsed construction only points somewhere when its category is held
//! by exactly one object of the context. That (construction, object) pair
//! is a [`ContextPath`]. Categories shared by several context objects are
//! ambiguous and dropped.
//!
//! When an episode fails, the hearer first looks for a parsed construction
//! whose path leads to the true topic. If one exists (and the hearer did
//! apply a construction) it becomes the correct path, rewarded as a success
//! during alignment. Otherwise the hearer conceptualizes the topic against
//! its own context and adopts the heard form for every discriminating
//! category.

use std::collections::BTreeSet;

use lexgame_lexicon::{Construction, ConstructionKey, Form, Symbol};
use lexgame_world::GuessingWorld;
use serde::Serialize;
use tracing::trace;

use crate::agent::Agent;
use crate::policy::first_max_by;

/// A parsed construction together with the single context object its
/// category identifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextPath {
    /// The parsed construction.
    pub construction: ConstructionKey,
    /// The object the construction's category singles out.
    pub object: Symbol,
}

/// How a hearer learned from a failed Guessing Game episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Adoption {
    /// A parsed construction already pointed at the topic.
    AlternatePath(ConstructionKey),
    /// The form was adopted for every discriminating category; the number
    /// of constructions actually added is recorded.
    Reconceptualized {
        /// Categories the form was adopted for.
        categories: BTreeSet<Symbol>,
        /// Constructions that were new to the lexicon.
        added: usize,
    },
}

impl Adoption {
    /// Whether the lexicon gained constructions.
    pub const fn changed_lexicon(&self) -> bool {
        matches!(self, Self::Reconceptualized { added, .. } if *added > 0)
    }
}

impl Agent {
    /// Keep the parsed constructions whose category identifies exactly one
    /// object of the current context.
    pub fn find_in_context(
        &self,
        parsed: &[ConstructionKey],
        world: &GuessingWorld,
    ) -> Vec<ContextPath> {
        let context = &self.episode().context;
        parsed
            .iter()
            .filter_map(|key| {
                let mut holders = context
                    .iter()
                    .filter(|obj| world.categories_of(obj).contains(&key.meaning));
                match (holders.next(), holders.next()) {
                    (Some(object), None) => Some(ContextPath {
                        construction: key.clone(),
                        object: object.clone(),
                    }),
                    _ => None,
                }
            })
            .collect()
    }

    /// Interpret `form` against the current context, greedily.
    ///
    /// Records the parsed constructions, the applied construction, and the
    /// inferred object. `None` if the form is unknown or every parsed
    /// category is ambiguous in this context.
    pub fn comprehend_in_context(&mut self, form: &Form, world: &GuessingWorld) -> Option<Symbol> {
        let parsed: Vec<ConstructionKey> = self
            .lexicon()
            .lookup_by_form(core::slice::from_ref(form))
            .into_iter()
            .map(Construction::key)
            .collect();
        let paths = self.find_in_context(&parsed, world);
        let best = first_max_by(paths, |path| self.q_value_of(&path.construction));

        let episode = self.episode_mut();
        episode.parsed = parsed;
        let path = best?;
        episode.applied = Some(path.construction);
        episode.interpretation = Some(path.object.clone());
        Some(path.object)
    }

    /// The best parsed construction whose path leads to `topic`.
    pub fn other_path(&self, topic: &Symbol, world: &GuessingWorld) -> Option<ConstructionKey> {
        let paths = self
            .find_in_context(&self.episode().parsed, world)
            .into_iter()
            .filter(|path| path.object == *topic);
        first_max_by(paths, |path| self.q_value_of(&path.construction))
            .map(|path| path.construction)
    }

    /// Learn `form` for `topic` after a failed episode.
    ///
    /// Prefers an alternate path when the hearer applied a construction and
    /// another parsed construction would have led to `topic`; falls back to
    /// reconceptualization.
    pub fn adopt_in_context(
        &mut self,
        topic: &Symbol,
        form: &Form,
        world: &GuessingWorld,
    ) -> Adoption {
        let alternate = self
            .episode()
            .applied
            .as_ref()
            .and_then(|_| self.other_path(topic, world));
        if let Some(correct) = alternate {
            trace!(agent = %self.id(), construction = ?correct, "Alternate path to topic");
            self.episode_mut().correct_path = Some(correct.clone());
            return Adoption::AlternatePath(correct);
        }
        self.reconceptualize_and_adopt(topic, form, world)
    }

    /// Conceptualize `topic` against the agent's own context and adopt
    /// `form` for every discriminating category.
    pub fn reconceptualize_and_adopt(
        &mut self,
        topic: &Symbol,
        form: &Form,
        world: &GuessingWorld,
    ) -> Adoption {
        let categories = world.conceptualize(topic, &self.episode().context);
        let before = self.lexicon().len();
        for category in &categories {
            self.lexicon_mut().adopt(category.clone(), form.clone());
        }
        let added = self.lexicon().len().saturating_sub(before);
        Adoption::Reconceptualized { categories, added }
    }

    /// What this agent would say for `topic` as a speaker, without side
    /// effects: conceptualize against its own context and return the
    /// highest valued form for any discriminating category.
    pub fn produce_as_hearer_in_context(
        &self,
        topic: &Symbol,
        world: &GuessingWorld,
    ) -> Option<Form> {
        let categories: Vec<Symbol> = world
            .conceptualize(topic, &self.episode().context)
            .into_iter()
            .collect();
        let candidates = self.lexicon().lookup_by_meaning(&categories);
        first_max_by(candidates, |construction| construction.q_value())
            .map(|construction| construction.form().clone())
    }

    fn q_value_of(&self, key: &ConstructionKey) -> f64 {
        self.lexicon()
            .get(key)
            .map_or(f64::NEG_INFINITY, Construction::q_value)
    }
}
