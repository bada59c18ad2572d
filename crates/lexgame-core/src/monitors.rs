//! Per-episode measures, recorded as one series per trial.
//!
//! Each measure is keyed by name and holds `trials x episodes` values.
//! Boolean measures are stored as `0.0` / `1.0` so every series shares
//! one numeric type.
//!
//! Form competition is kept apart: it follows the value of every form one
//! agent has for one object, one entry per recorded episode. A form holds
//! `None` for the episodes before it was first seen and after it was
//! pruned.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use lexgame_agents::Agent;
use lexgame_lexicon::{Form, Lexicon};
use serde::Serialize;

use crate::environment::GameEnvironment;
use crate::error::{EnvironmentError, ExperimentError};

/// The speaker's communicative success flag.
pub const COMMUNICATIVE_SUCCESS: &str = "communicative-success";
/// Average lexicon size over the population.
pub const LEXICON_SIZE: &str = "lexicon-size";
/// Overlap between the speaker's and the hearer's lexicon.
pub const LEXICON_SIMILARITY: &str = "lexicon-similarity";
/// Whether the hearer would have said what the speaker said.
pub const LEXICON_COHERENCE: &str = "lexicon-coherence";
/// Whether a lexicon gained or lost a construction.
pub const LEXICON_CHANGE: &str = "lexicon-change";
/// Average number of forms per meaning, over the population.
pub const FORMS_PER_MEANING: &str = "forms-per-meaning";
/// Average number of meanings per form, over the population.
pub const MEANINGS_PER_FORM: &str = "meanings-per-form";
/// Value of each competing form for one agent and object.
pub const FORM_COMPETITION: &str = "form-competition";

/// How lexicon size is counted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeFilter {
    /// Count every construction.
    All,
    /// Count only constructions valued above the threshold.
    Above(f64),
}

/// Recorded measures, keyed by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Monitors {
    series: BTreeMap<String, Vec<Vec<f64>>>,
    competition: BTreeMap<Form, Vec<Option<f64>>>,
    competition_records: usize,
}

impl Monitors {
    /// No measures recorded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event` to the series of `trial`. The first event of a trial
    /// opens its series; trials are expected in order.
    pub fn add_event_to_trial(&mut self, monitor: &str, trial: u32, event: f64) {
        let trials = self.series.entry(monitor.to_owned()).or_default();
        match usize::try_from(trial).ok().and_then(|t| trials.get_mut(t)) {
            Some(events) => events.push(event),
            None => trials.push(vec![event]),
        }
    }

    /// Record every measure for the episode `env` just played.
    pub fn record<E: GameEnvironment + ?Sized>(&mut self, trial: u32, env: &E, filter: SizeFilter) {
        let success = env.speaker().is_some_and(Agent::communicative_success);
        self.add_event_to_trial(COMMUNICATIVE_SUCCESS, trial, flag(success));

        let population = env.population();
        let size = mean(population.iter().map(|a| lexicon_size(a.lexicon(), filter)));
        self.add_event_to_trial(LEXICON_SIZE, trial, size);

        if let (Some(speaker), Some(hearer)) = (env.speaker(), env.hearer()) {
            let similarity = lexicon_similarity(speaker.lexicon(), hearer.lexicon());
            self.add_event_to_trial(LEXICON_SIMILARITY, trial, similarity);
        }

        self.add_event_to_trial(LEXICON_COHERENCE, trial, flag(env.lexicon_coherence()));
        self.add_event_to_trial(LEXICON_CHANGE, trial, flag(env.lexicon_change()));

        let fpm = mean(population.iter().map(|a| forms_per_meaning(a.lexicon())));
        self.add_event_to_trial(FORMS_PER_MEANING, trial, fpm);
        let mpf = mean(population.iter().map(|a| meanings_per_form(a.lexicon())));
        self.add_event_to_trial(MEANINGS_PER_FORM, trial, mpf);
    }

    /// Append one competition record: `(form, value)` pairs seen this
    /// episode. A form seen for the first time is back-filled with `None`;
    /// a known form missing from `events` gets `None`.
    pub fn add_event_competition(&mut self, events: &[(Form, f64)]) {
        let records = self.competition_records;
        for series in self.competition.values_mut() {
            series.push(None);
        }
        for (form, value) in events {
            let series = self
                .competition
                .entry(form.clone())
                .or_insert_with(|| vec![None; records.saturating_add(1)]);
            if let Some(last) = series.last_mut() {
                *last = Some(*value);
            }
        }
        self.competition_records = records.saturating_add(1);
    }

    /// Record the value of every form `agent` has for world object
    /// `object`.
    pub fn record_form_competition<E: GameEnvironment + ?Sized>(
        &mut self,
        env: &E,
        agent: usize,
        object: usize,
    ) -> Result<(), EnvironmentError> {
        let meaning = env
            .objects()
            .get(object)
            .ok_or(EnvironmentError::UnknownObject { index: object })?;
        let lexicon = env
            .population()
            .get(agent)
            .ok_or(EnvironmentError::UnknownAgent { index: agent })?
            .lexicon();
        let events: Vec<(Form, f64)> = lexicon
            .lookup_by_meaning(core::slice::from_ref(meaning))
            .into_iter()
            .map(|c| (c.form().clone(), c.q_value()))
            .collect();
        self.add_event_competition(&events);
        Ok(())
    }

    /// Form competition series, keyed by form.
    pub const fn competition(&self) -> &BTreeMap<Form, Vec<Option<f64>>> {
        &self.competition
    }

    /// The series of one measure, one inner vector per trial.
    pub fn get(&self, monitor: &str) -> Option<&[Vec<f64>]> {
        self.series.get(monitor).map(Vec::as_slice)
    }

    /// Write each measure to `<dir>/monitors/<name>.json`, and form
    /// competition, if any was recorded, to `form-competition.json` as an
    /// object from form to values with `null` for gaps.
    ///
    /// Returns the paths written.
    pub fn write(&self, dir: &Path) -> Result<Vec<PathBuf>, ExperimentError> {
        let dir = dir.join("monitors");
        fs::create_dir_all(&dir)?;
        let mut written = Vec::with_capacity(self.series.len().saturating_add(1));
        for (name, trials) in &self.series {
            let path = dir.join(format!("{name}.json"));
            fs::write(&path, serde_json::to_string(trials)?)?;
            written.push(path);
        }
        if self.competition_records > 0 {
            let path = dir.join(format!("{FORM_COMPETITION}.json"));
            fs::write(&path, serde_json::to_string(&self.competition)?)?;
            written.push(path);
        }
        Ok(written)
    }
}

const fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Arithmetic mean; 0 for no values.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| {
        (sum + v, count.saturating_add(1))
    });
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Number of constructions, optionally ignoring those valued at or below
/// the threshold.
#[allow(clippy::cast_precision_loss)]
pub fn lexicon_size(lexicon: &Lexicon, filter: SizeFilter) -> f64 {
    let count = match filter {
        SizeFilter::All => lexicon.len(),
        SizeFilter::Above(threshold) => lexicon
            .iter()
            .filter(|c| c.q_value() > threshold)
            .count(),
    };
    count as f64
}

/// Dice coefficient of two lexicons' (meaning, form) sets; 0 when both
/// are empty.
#[allow(clippy::cast_precision_loss)]
pub fn lexicon_similarity(a: &Lexicon, b: &Lexicon) -> f64 {
    let total = a.len().saturating_add(b.len());
    if total == 0 {
        return 0.0;
    }
    let shared = a.keys().intersection(&b.keys()).count();
    2.0 * shared as f64 / total as f64
}

/// Constructions per distinct meaning; 0 for an empty lexicon.
#[allow(clippy::cast_precision_loss)]
pub fn forms_per_meaning(lexicon: &Lexicon) -> f64 {
    let meanings: BTreeSet<_> = lexicon.iter().map(|c| c.meaning()).collect();
    if meanings.is_empty() {
        return 0.0;
    }
    lexicon.len() as f64 / meanings.len() as f64
}

/// Constructions per distinct form; 0 for an empty lexicon.
#[allow(clippy::cast_precision_loss)]
pub fn meanings_per_form(lexicon: &Lexicon) -> f64 {
    let forms: BTreeSet<_> = lexicon.iter().map(|c| c.form()).collect();
    if forms.is_empty() {
        return 0.0;
    }
    lexicon.len() as f64 / forms.len() as f64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lexgame_lexicon::Construction;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn lexicon(pairs: &[(&str, &str, f64)]) -> Lexicon {
        let mut lexicon = Lexicon::new(0.5);
        for (meaning, form, q) in pairs {
            lexicon.insert(Construction::new(*meaning, *form, *q));
        }
        lexicon
    }

    #[test]
    fn events_open_one_series_per_trial() {
        let mut monitors = Monitors::new();
        monitors.add_event_to_trial("m", 0, 1.0);
        monitors.add_event_to_trial("m", 0, 0.0);
        monitors.add_event_to_trial("m", 1, 1.0);
        assert_eq!(monitors.get("m").unwrap(), &[vec![1.0, 0.0], vec![1.0]]);
        assert!(monitors.get("other").is_none());
    }

    #[test]
    fn similarity_is_dice_coefficient() {
        let a = lexicon(&[("o1", "fa", 0.5), ("o2", "ke", 0.5)]);
        let b = lexicon(&[("o1", "fa", 0.1), ("o3", "mu", 0.5), ("o2", "zi", 0.5)]);
        assert!(approx(lexicon_similarity(&a, &b), 2.0 / 5.0));
        assert!(approx(lexicon_similarity(&a, &a), 1.0));
        let empty = Lexicon::new(0.5);
        assert!(approx(lexicon_similarity(&empty, &empty), 0.0));
    }

    #[test]
    fn low_values_can_be_ignored_in_size() {
        let lex = lexicon(&[("o1", "fa", -0.995), ("o1", "ke", 0.3), ("o2", "ke", 0.7)]);
        assert!(approx(lexicon_size(&lex, SizeFilter::All), 3.0));
        assert!(approx(lexicon_size(&lex, SizeFilter::Above(-0.99)), 2.0));
    }

    #[test]
    fn synonymy_and_homonymy_averages() {
        let lex = lexicon(&[("o1", "fa", 0.5), ("o1", "ke", 0.5), ("o2", "ke", 0.5)]);
        assert!(approx(forms_per_meaning(&lex), 1.5));
        assert!(approx(meanings_per_form(&lex), 1.5));
        let empty = Lexicon::new(0.5);
        assert!(approx(forms_per_meaning(&empty), 0.0));
        assert!(approx(meanings_per_form(&empty), 0.0));
    }

    fn form(name: &str) -> Form {
        Form::new(name)
    }

    #[test]
    fn late_forms_are_back_filled() {
        let mut monitors = Monitors::new();
        monitors.add_event_competition(&[(form("fa"), 0.5)]);
        monitors.add_event_competition(&[(form("fa"), 0.75), (form("ke"), 0.5)]);
        let competition = monitors.competition();
        assert_eq!(competition.get(&form("fa")).unwrap(), &[Some(0.5), Some(0.75)]);
        assert_eq!(competition.get(&form("ke")).unwrap(), &[None, Some(0.5)]);
    }

    #[test]
    fn pruned_forms_get_gaps() {
        let mut monitors = Monitors::new();
        monitors.add_event_competition(&[(form("fa"), 0.5), (form("ke"), 0.5)]);
        monitors.add_event_competition(&[(form("fa"), 0.75)]);
        monitors.add_event_competition(&[]);
        let competition = monitors.competition();
        assert_eq!(competition.get(&form("fa")).unwrap(), &[Some(0.5), Some(0.75), None]);
        assert_eq!(competition.get(&form("ke")).unwrap(), &[Some(0.5), None, None]);
    }

    #[test]
    fn competition_is_written_with_nulls() {
        let mut monitors = Monitors::new();
        monitors.add_event_competition(&[]);
        monitors.add_event_competition(&[(form("fa"), 0.5)]);
        let dir = std::env::temp_dir().join(format!("lexgame-competition-{}", std::process::id()));
        let written = monitors.write(&dir).unwrap();
        assert_eq!(written.len(), 1);
        let raw = fs::read_to_string(dir.join("monitors").join("form-competition.json")).unwrap();
        assert_eq!(raw, r#"{"fa":[null,0.5]}"#);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn write_emits_one_json_file_per_measure() {
        let mut monitors = Monitors::new();
        monitors.add_event_to_trial(LEXICON_SIZE, 0, 2.0);
        monitors.add_event_to_trial(LEXICON_CHANGE, 0, 1.0);
        let dir = std::env::temp_dir().join(format!("lexgame-monitors-{}", std::process::id()));
        let written = monitors.write(&dir).unwrap();
        assert_eq!(written.len(), 2);
        let raw = fs::read_to_string(dir.join("monitors").join("lexicon-size.json")).unwrap();
        let parsed: Vec<Vec<f64>> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec![vec![2.0]]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
