//! Registry lifecycle over vessel creation, docking, and scene changes.

use habitat_core::id::VesselId;
use habitat_core::recipe::Recipe;
use habitat_core::registry::ResourceRegistry;
use habitat_core::storage::{Part, PartStorage};
use habitat_core::test_utils::{EC, OXYGEN, assert_close};

const STATION: VesselId = VesselId(10);
const TUG: VesselId = VesselId(11);

fn station_storage() -> PartStorage {
    let mut storage = PartStorage::new();
    storage.push_part(
        Part::new("core-module")
            .with_container(EC, 500.0, 500.0)
            .with_container(OXYGEN, 100.0, 200.0),
    );
    storage
}

fn tug_storage() -> PartStorage {
    let mut storage = PartStorage::new();
    storage.push_part(
        Part::new("tug")
            .with_container(EC, 50.0, 50.0)
            .with_container(OXYGEN, 10.0, 20.0),
    );
    storage
}

#[test]
fn vessels_tick_independently() {
    let mut registry = ResourceRegistry::new();
    let mut station = station_storage();
    let mut tug = tug_storage();

    registry.consume(STATION, &station, EC, 20.0);
    registry.consume(TUG, &tug, EC, 5.0);

    registry.sync(STATION, &mut station, 1.0);
    registry.sync(TUG, &mut tug, 1.0);

    assert_close(registry.info(STATION, &station, EC).amount(), 480.0);
    assert_close(registry.info(TUG, &tug, EC).amount(), 45.0);
}

#[test]
fn docking_merges_storage_and_purges_the_visitor() {
    let mut registry = ResourceRegistry::new();
    let mut station = station_storage();
    let tug = tug_storage();

    registry.sync(STATION, &mut station, 1.0);
    registry.sync(TUG, &mut tug.clone(), 1.0);
    assert_eq!(registry.len(), 2);

    // The tug docks: its parts join the station, its own identity is
    // retired, and its cache goes with it.
    for part in tug.parts {
        station.push_part(part);
    }
    registry.purge(TUG);
    assert_eq!(registry.len(), 1);

    // The station's next tick sees the merged capacity.
    registry.sync(STATION, &mut station, 1.0);
    let oxygen = registry.info(STATION, &station, OXYGEN);
    assert_close(oxygen.amount(), 110.0);
    assert_close(oxygen.capacity(), 220.0);
}

#[test]
fn undocking_splits_into_a_fresh_cache() {
    let mut registry = ResourceRegistry::new();
    let mut station = station_storage();
    for part in tug_storage().parts {
        station.push_part(part);
    }
    registry.sync(STATION, &mut station, 1.0);

    // The tug undocks with its own parts.
    let mut tug = PartStorage::new();
    tug.parts = station
        .parts
        .iter()
        .filter(|p| p.name == "tug")
        .cloned()
        .collect();
    station.remove_part("tug");

    // Both vessels resync against their own storage; the station's
    // ledger sheds the departed capacity on its next tick.
    registry.sync(STATION, &mut station, 1.0);
    registry.sync(TUG, &mut tug, 1.0);

    assert_close(registry.info(STATION, &station, OXYGEN).capacity(), 200.0);
    assert_close(registry.info(TUG, &tug, OXYGEN).capacity(), 20.0);
    assert_close(registry.info(TUG, &tug, OXYGEN).amount(), 10.0);
}

#[test]
fn scene_change_clears_every_cache() {
    let mut registry = ResourceRegistry::new();
    let station = station_storage();
    let tug = tug_storage();

    registry.transform(
        STATION,
        Recipe::new(false).with_input(EC, 5.0).with_output(OXYGEN, 1.0),
    );
    registry.consume(TUG, &tug, EC, 1.0);
    registry.clear();

    assert!(registry.is_empty());

    // Re-created caches start from storage truth, not stale deltas.
    assert_close(registry.info(STATION, &station, EC).amount(), 500.0);
    assert_close(registry.info(STATION, &station, EC).deferred(), 0.0);
}
