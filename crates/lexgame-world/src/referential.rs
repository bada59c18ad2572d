//! Context and topic sampling shared by every world.

use lexgame_lexicon::Symbol;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::WorldError;

/// A universe of object symbols that episodes draw their context from.
pub trait ReferentialWorld {
    /// Every object in the world, in creation order.
    fn objects(&self) -> &[Symbol];

    /// Check that contexts of `min..=max` objects can be drawn from this world.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidContextBounds`] for `min == 0` or
    /// `min > max`, and [`WorldError::ContextTooLarge`] if `max` exceeds
    /// the number of objects.
    fn check_context_bounds(&self, min: usize, max: usize) -> Result<(), WorldError> {
        if min == 0 || min > max {
            return Err(WorldError::InvalidContextBounds { min, max });
        }
        let available = self.objects().len();
        if max > available {
            return Err(WorldError::ContextTooLarge {
                requested: max,
                available,
            });
        }
        Ok(())
    }

    /// Sample a context: a uniformly sized subset of the objects, drawn
    /// without replacement, with size in `min..=max`.
    ///
    /// # Errors
    ///
    /// Fails with the errors of [`check_context_bounds`](Self::check_context_bounds).
    fn pick_context<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min: usize,
        max: usize,
    ) -> Result<Vec<Symbol>, WorldError> {
        self.check_context_bounds(min, max)?;
        let size = rng.random_range(min..=max);
        Ok(self.objects().choose_multiple(rng, size).cloned().collect())
    }

    /// Pick the topic uniformly from `context`. `None` for an empty context.
    fn pick_topic<R: Rng + ?Sized>(&self, rng: &mut R, context: &[Symbol]) -> Option<Symbol> {
        context.choose(rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::naming::NamingWorld;
    use lexgame_lexicon::ScopedIds;

    fn world(size: usize) -> NamingWorld {
        NamingWorld::new(size, &mut ScopedIds::new())
    }

    #[test]
    fn context_is_subset_of_world() {
        let world = world(10);
        let mut rng = StdRng::seed_from_u64(5);
        let context = world.pick_context(&mut rng, 5, 5);
        assert!(context.is_ok());
        let context = context.unwrap_or_default();
        assert_eq!(context.len(), 5);
        assert!(context.iter().all(|obj| world.objects().contains(obj)));
    }

    #[test]
    fn context_has_no_duplicates() {
        let world = world(10);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let mut context = world.pick_context(&mut rng, 2, 10).unwrap_or_default();
            let len = context.len();
            context.sort();
            context.dedup();
            assert_eq!(context.len(), len);
        }
    }

    #[test]
    fn context_size_within_bounds() {
        let world = world(10);
        let mut rng = StdRng::seed_from_u64(13);
        for (min, max) in [(6, 9), (1, 2), (5, 10)] {
            for _ in 0..20 {
                let size = world.pick_context(&mut rng, min, max).map(|c| c.len());
                assert!(size.is_ok_and(|s| (min..=max).contains(&s)));
            }
        }
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let world = world(4);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            world.pick_context(&mut rng, 3, 2).err(),
            Some(WorldError::InvalidContextBounds { min: 3, max: 2 })
        );
        assert_eq!(
            world.pick_context(&mut rng, 0, 2).err(),
            Some(WorldError::InvalidContextBounds { min: 0, max: 2 })
        );
        assert_eq!(
            world.pick_context(&mut rng, 2, 5).err(),
            Some(WorldError::ContextTooLarge {
                requested: 5,
                available: 4
            })
        );
    }

    #[test]
    fn topic_is_member_of_context() {
        let world = world(10);
        let mut rng = StdRng::seed_from_u64(21);
        let context = vec![Symbol::from("a"), Symbol::from("b"), Symbol::from("c")];
        for _ in 0..20 {
            let topic = world.pick_topic(&mut rng, &context);
            assert!(topic.is_some_and(|t| context.contains(&t)));
        }
        assert!(world.pick_topic(&mut rng, &[]).is_none());
    }
}
