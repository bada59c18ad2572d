//! Naming Game behaviour: meanings are the objects themselves.

use lexgame_lexicon::{Construction, Form, Symbol};
use rand::Rng;

use crate::agent::Agent;
use crate::policy::{epsilon_greedy, first_max_by};

impl Agent {
    /// Interpret `form`, choosing epsilon-greedily among the constructions
    /// that carry it. Records the choice as the applied construction.
    ///
    /// `None` when no construction has this form.
    pub fn comprehend<R: Rng + ?Sized>(&mut self, form: &Form, rng: &mut R) -> Option<Symbol> {
        let eps = self.config().eps_greedy;
        let key = epsilon_greedy(
            &self.lexicon().lookup_by_form(core::slice::from_ref(form)),
            eps,
            rng,
        )
        .map(Construction::key)?;

        let meaning = key.meaning.clone();
        let episode = self.episode_mut();
        episode.applied = Some(key);
        episode.interpretation = Some(meaning.clone());
        Some(meaning)
    }

    /// Adopt `(topic, form)` after a failed episode. Adopting a known pair
    /// leaves the lexicon unchanged.
    ///
    /// Returns whether the lexicon grew.
    pub fn adopt(&mut self, topic: Symbol, form: Form) -> bool {
        let before = self.lexicon().len();
        self.lexicon_mut().adopt(topic, form);
        self.lexicon().len() > before
    }

    /// What this agent would say for `topic` as a speaker, without side
    /// effects: the highest valued form for `topic`, provided `topic` is
    /// in the current context.
    pub fn produce_as_hearer(&self, topic: &Symbol) -> Option<Form> {
        if !self.episode().context.contains(topic) {
            return None;
        }
        let candidates = self
            .lexicon()
            .lookup_by_meaning(core::slice::from_ref(topic));
        first_max_by(candidates, |construction| construction.q_value())
            .map(|construction| construction.form().clone())
    }
}
