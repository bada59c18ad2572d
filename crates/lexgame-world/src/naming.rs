//! The Naming Game world: a flat set of opaque objects.

use lexgame_lexicon::{ScopedIds, Symbol};
use serde::Serialize;

use crate::referential::ReferentialWorld;

/// Namespace used for object identifiers.
pub const OBJECT_NAMESPACE: &str = "OBJECT";

/// A fixed set of object symbols generated once at construction.
#[derive(Debug, Clone, Serialize)]
pub struct NamingWorld {
    objects: Vec<Symbol>,
}

impl NamingWorld {
    /// Create `world_size` fresh objects named from `ids`.
    pub fn new(world_size: usize, ids: &mut ScopedIds) -> Self {
        let objects = (0..world_size)
            .map(|_| ids.next_id(OBJECT_NAMESPACE))
            .collect();
        Self { objects }
    }
}

impl ReferentialWorld for NamingWorld {
    fn objects(&self) -> &[Symbol] {
        &self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_has_requested_size() {
        let mut ids = ScopedIds::new();
        assert_eq!(NamingWorld::new(5, &mut ids).objects().len(), 5);
        assert_eq!(NamingWorld::new(9, &mut ids).objects().len(), 9);
    }

    #[test]
    fn objects_are_unique() {
        let world = NamingWorld::new(12, &mut ScopedIds::new());
        let mut objects = world.objects().to_vec();
        objects.sort();
        objects.dedup();
        assert_eq!(objects.len(), 12);
        assert!(world.objects().first().is_some_and(|o| o.as_str() == "#'OBJECT-0"));
    }
}
