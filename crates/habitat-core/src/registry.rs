//! Vessel identity to resource cache map, owned by the orchestrator.

use std::collections::HashMap;

use crate::cache::VesselResources;
use crate::id::VesselId;
use crate::ledger::ResourceLedger;
use crate::recipe::Recipe;
use crate::storage::Storage;

/// Tracks one [`VesselResources`] per vessel.
///
/// A plain owned value: the tick-driving orchestrator holds one and
/// passes it wherever resource access is needed. Two registries never
/// share state, so tests build as many as they like.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    entries: HashMap<VesselId, VesselResources>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache for a vessel, created empty on first access.
    pub fn get(&mut self, vessel: VesselId) -> &mut VesselResources {
        self.entries.entry(vessel).or_default()
    }

    /// Drop one vessel's cache: destroyed, merged by docking, or its id
    /// retired. Ledgers and pending recipes go with it.
    pub fn purge(&mut self, vessel: VesselId) {
        self.entries.remove(&vessel);
    }

    /// Drop every cache (scene change).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, vessel: VesselId) -> bool {
        self.entries.contains_key(&vessel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -----------------------------------------------------------------------
    // Shortcuts delegating to the vessel's cache
    // -----------------------------------------------------------------------

    pub fn info<S: Storage>(
        &mut self,
        vessel: VesselId,
        storage: &S,
        resource: &str,
    ) -> &mut ResourceLedger {
        self.get(vessel).info(storage, resource)
    }

    pub fn produce<S: Storage>(
        &mut self,
        vessel: VesselId,
        storage: &S,
        resource: &str,
        quantity: f64,
    ) {
        self.get(vessel).produce(storage, resource, quantity);
    }

    pub fn consume<S: Storage>(
        &mut self,
        vessel: VesselId,
        storage: &S,
        resource: &str,
        quantity: f64,
    ) {
        self.get(vessel).consume(storage, resource, quantity);
    }

    pub fn transform(&mut self, vessel: VesselId, recipe: Recipe) {
        self.get(vessel).transform(recipe);
    }

    pub fn sync<S: Storage>(&mut self, vessel: VesselId, storage: &mut S, elapsed: f64) {
        self.get(vessel).sync(storage, elapsed);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{EC, OXYGEN, assert_close, storage_with};

    const STATION: VesselId = VesselId(1);
    const LANDER: VesselId = VesselId(2);

    #[test]
    fn get_creates_lazily() {
        let mut registry = ResourceRegistry::new();
        assert!(registry.is_empty());
        registry.get(STATION);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(STATION));
        assert!(!registry.contains(LANDER));
    }

    #[test]
    fn vessels_are_isolated() {
        let station_storage = storage_with(&[(EC, 100.0, 100.0)]);
        let lander_storage = storage_with(&[(EC, 20.0, 20.0)]);

        let mut registry = ResourceRegistry::new();
        registry.consume(STATION, &station_storage, EC, 5.0);
        registry.produce(LANDER, &lander_storage, EC, 1.0);

        assert_close(registry.info(STATION, &station_storage, EC).deferred(), -5.0);
        assert_close(registry.info(LANDER, &lander_storage, EC).deferred(), 1.0);
    }

    #[test]
    fn purge_discards_cache_state() {
        let mut storage = storage_with(&[(EC, 100.0, 100.0)]);
        let mut registry = ResourceRegistry::new();
        registry.consume(STATION, &storage, EC, 5.0);
        registry.purge(STATION);
        assert!(!registry.contains(STATION));

        // A fresh cache rebuilds from storage, not from stale deferred state.
        registry.sync(STATION, &mut storage, 1.0);
        assert_close(registry.info(STATION, &storage, EC).amount(), 100.0);
    }

    #[test]
    fn clear_drops_every_vessel() {
        let mut registry = ResourceRegistry::new();
        registry.get(STATION);
        registry.get(LANDER);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn registries_are_independent() {
        let storage = storage_with(&[(EC, 100.0, 100.0)]);
        let mut a = ResourceRegistry::new();
        let mut b = ResourceRegistry::new();
        a.consume(STATION, &storage, EC, 5.0);
        assert_close(b.info(STATION, &storage, EC).deferred(), 0.0);
    }

    #[test]
    fn transform_shortcut_queues_on_the_right_vessel() {
        let mut storage = storage_with(&[(EC, 10.0, 100.0), (OXYGEN, 0.0, 50.0)]);
        let mut registry = ResourceRegistry::new();
        registry.transform(
            STATION,
            Recipe::new(false).with_input(EC, 5.0).with_output(OXYGEN, 2.0),
        );
        assert_eq!(registry.get(STATION).pending_recipes(), 1);
        assert_eq!(registry.get(LANDER).pending_recipes(), 0);

        registry.sync(STATION, &mut storage, 1.0);
        assert_close(registry.info(STATION, &storage, OXYGEN).amount(), 2.0);
    }
}
