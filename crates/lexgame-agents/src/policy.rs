//! Arm selection.
//!
//! Ties are always broken in favour of the candidate that comes first, so
//! with exploration disabled the choice depends only on candidate order.

use lexgame_lexicon::Construction;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Return the first item with the greatest `value`. `None` when empty.
pub fn first_max_by<T, I, F>(items: I, mut value: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(T, f64)> = None;
    for item in items {
        let v = value(&item);
        match &best {
            Some((_, best_v)) if v <= *best_v => {}
            _ => best = Some((item, v)),
        }
    }
    best.map(|(item, _)| item)
}

/// Pick a candidate: with probability `1 - eps` the highest valued one,
/// otherwise a uniformly random one.
///
/// With `eps <= 0` the random source is never consulted.
pub fn epsilon_greedy<'a, R: Rng + ?Sized>(
    candidates: &[&'a Construction],
    eps: f64,
    rng: &mut R,
) -> Option<&'a Construction> {
    if candidates.is_empty() {
        return None;
    }
    if eps > 0.0 && rng.random::<f64>() < eps {
        return candidates.choose(rng).copied();
    }
    first_max_by(candidates.iter().copied(), |cxn| cxn.q_value())
}
