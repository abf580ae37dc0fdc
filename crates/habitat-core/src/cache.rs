//! Per-vessel resource cache: ledgers plus the tick's pending recipes.

use std::collections::HashMap;

use crate::ledger::ResourceLedger;
use crate::recipe::{EXEC_EPSILON, Recipe};
use crate::storage::Storage;

/// Every ledger and queued recipe of one vessel.
///
/// Producers and consumers talk to this during the tick; the
/// orchestrator calls [`VesselResources::sync`] once at the boundary.
#[derive(Debug, Default)]
pub struct VesselResources {
    ledgers: HashMap<String, ResourceLedger>,
    recipes: Vec<Recipe>,
}

impl VesselResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger for `resource`, created from a storage scan on first use.
    /// Resources never referenced on this vessel never get a ledger.
    pub fn info<S: Storage>(&mut self, storage: &S, resource: &str) -> &mut ResourceLedger {
        self.ledgers
            .entry(resource.to_string())
            .or_insert_with(|| ResourceLedger::new(storage, resource))
    }

    /// Read-only peek at an existing ledger, without creating one.
    pub fn ledger(&self, resource: &str) -> Option<&ResourceLedger> {
        self.ledgers.get(resource)
    }

    pub fn ledger_count(&self) -> usize {
        self.ledgers.len()
    }

    pub fn pending_recipes(&self) -> usize {
        self.recipes.len()
    }

    /// Record a deferred production against the named ledger.
    pub fn produce<S: Storage>(&mut self, storage: &S, resource: &str, quantity: f64) {
        self.info(storage, resource).produce(quantity);
    }

    /// Record a deferred consumption against the named ledger.
    pub fn consume<S: Storage>(&mut self, storage: &S, resource: &str, quantity: f64) {
        self.info(storage, resource).consume(quantity);
    }

    /// Queue a recipe for resolution at the next sync.
    pub fn transform(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    /// Tick boundary: resolve every queued recipe to a fixed point, then
    /// commit every ledger's deferred delta to storage.
    ///
    /// The resolution loop rescans all pending recipes for as long as at
    /// least one of them makes progress. Recipes consuming another
    /// recipe's output settle without an explicit dependency graph:
    /// each pass only moves resources toward their bounds, and `left`
    /// strictly decreases for any recipe that runs, so the loop
    /// terminates. A genuine cycle with no fresh input simply stops
    /// progressing and is discarded with the rest -- shortages never
    /// carry into the next tick.
    pub fn sync<S: Storage>(&mut self, storage: &mut S, elapsed: f64) {
        assert!(elapsed > 0.0, "elapsed seconds must be positive");

        let mut recipes = std::mem::take(&mut self.recipes);
        let mut executing = true;
        while executing {
            executing = false;
            for recipe in &mut recipes {
                if recipe.left() > EXEC_EPSILON {
                    executing |= recipe.execute(&*storage, self);
                }
            }
        }

        for ledger in self.ledgers.values_mut() {
            ledger.sync(storage, elapsed);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
