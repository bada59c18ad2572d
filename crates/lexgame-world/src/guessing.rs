//! The Guessing Game world: objects described by sets of categories.
//!
//! Every object is assigned `categories_per_object` distinct categories,
//! sampled uniformly from a universe of `amount_categories` categories.
//! The mapping never changes after construction.
//!
//! # Conceptualization
//!
//! A category *discriminates* the topic within a context when the topic has
//! it and no other context member does:
//!
//! `discriminating = categories(topic) \ ⋃ categories(other)`
//!
//! An empty result means no utterance can identify the topic in that
//! context.

use std::collections::{BTreeMap, BTreeSet};

use lexgame_lexicon::{ScopedIds, Symbol, render_table};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::debug;

use crate::error::WorldError;
use crate::naming::OBJECT_NAMESPACE;
use crate::referential::ReferentialWorld;

/// Namespace used for category identifiers.
pub const CATEGORY_NAMESPACE: &str = "CATEGORY";

/// An immutable object-to-categories mapping.
#[derive(Debug, Clone, Serialize)]
pub struct GuessingWorld {
    /// The category universe in creation order.
    categories: Vec<Symbol>,
    /// Objects in creation order.
    objects: Vec<Symbol>,
    /// The categories of every object.
    object_categories: BTreeMap<Symbol, Vec<Symbol>>,
}

impl GuessingWorld {
    /// Generate a world of `world_size` objects over `amount_categories`
    /// categories, each object holding `categories_per_object` of them.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TooManyCategoriesPerObject`] if
    /// `categories_per_object > amount_categories`.
    pub fn new<R: Rng + ?Sized>(
        world_size: usize,
        amount_categories: usize,
        categories_per_object: usize,
        ids: &mut ScopedIds,
        rng: &mut R,
    ) -> Result<Self, WorldError> {
        if categories_per_object > amount_categories {
            return Err(WorldError::TooManyCategoriesPerObject {
                per_object: categories_per_object,
                available: amount_categories,
            });
        }
        let categories: Vec<Symbol> = (0..amount_categories)
            .map(|_| ids.next_id(CATEGORY_NAMESPACE))
            .collect();

        let mut objects = Vec::with_capacity(world_size);
        let mut object_categories = BTreeMap::new();
        for _ in 0..world_size {
            let object = ids.next_id(OBJECT_NAMESPACE);
            let assigned: Vec<Symbol> = categories
                .choose_multiple(rng, categories_per_object)
                .cloned()
                .collect();
            object_categories.insert(object.clone(), assigned);
            objects.push(object);
        }

        debug!(
            objects = objects.len(),
            categories = categories.len(),
            categories_per_object,
            "Guessing world generated"
        );
        Ok(Self {
            categories,
            objects,
            object_categories,
        })
    }

    /// Build a world from an explicit mapping. Objects keep the order given.
    pub fn from_mapping<I, C>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (Symbol, C)>,
        C: IntoIterator<Item = Symbol>,
    {
        let mut categories: BTreeSet<Symbol> = BTreeSet::new();
        let mut objects = Vec::new();
        let mut object_categories = BTreeMap::new();
        for (object, cats) in mapping {
            let cats: Vec<Symbol> = cats.into_iter().collect();
            categories.extend(cats.iter().cloned());
            objects.push(object.clone());
            object_categories.insert(object, cats);
        }
        Self {
            categories: categories.into_iter().collect(),
            objects,
            object_categories,
        }
    }

    /// The category universe.
    pub fn categories(&self) -> &[Symbol] {
        &self.categories
    }

    /// The categories of `object`. Empty for an object not in this world.
    pub fn categories_of(&self, object: &Symbol) -> &[Symbol] {
        self.object_categories
            .get(object)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The categories that single `topic` out of `context`.
    ///
    /// Every context member other than the topic removes its own categories
    /// from the topic's set. A context holding only the topic yields all of
    /// the topic's categories.
    pub fn conceptualize(&self, topic: &Symbol, context: &[Symbol]) -> BTreeSet<Symbol> {
        let mut discriminating: BTreeSet<Symbol> =
            self.categories_of(topic).iter().cloned().collect();
        for other in context.iter().filter(|obj| *obj != topic) {
            for category in self.categories_of(other) {
                discriminating.remove(category);
            }
        }
        discriminating
    }

    /// Render the category x object incidence matrix for `context`.
    ///
    /// Only categories held by at least one context member are listed. The
    /// topic column is marked `-> obj <-`.
    pub fn contextualization_table(&self, topic: &Symbol, context: &[Symbol]) -> String {
        let mut columns: Vec<&Symbol> = context.iter().collect();
        columns.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let mut header = vec![String::from("m/o")];
        header.extend(columns.iter().map(|obj| {
            if *obj == topic {
                format!("-> {obj} <-")
            } else {
                obj.to_string()
            }
        }));
        let mut table = vec![header];
        for category in &self.categories {
            let marks: Vec<String> = columns
                .iter()
                .map(|obj| {
                    if self.categories_of(obj).contains(category) {
                        String::from("x")
                    } else {
                        String::new()
                    }
                })
                .collect();
            if marks.iter().any(|mark| !mark.is_empty()) {
                let mut row = vec![category.to_string()];
                row.extend(marks);
                table.push(row);
            }
        }

        render_table(&table)
    }
}

impl ReferentialWorld for GuessingWorld {
    fn objects(&self) -> &[Symbol] {
        &self.objects
    }
}
