//! Shared test helpers for unit, integration, and benchmark code.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so the
//! helpers are available to this crate's unit tests, to dependent
//! crates' integration tests (via the `test-utils` feature), and to
//! benchmarks.

use crate::storage::{Part, PartStorage};

// ===========================================================================
// Resource names
// ===========================================================================

pub const EC: &str = "ElectricCharge";
pub const OXYGEN: &str = "Oxygen";
pub const WATER: &str = "Water";
pub const FOOD: &str = "Food";
pub const WASTE: &str = "Waste";
pub const WASTE_WATER: &str = "WasteWater";
pub const CO2: &str = "CarbonDioxide";
pub const ORE: &str = "Ore";
pub const SHIELDING: &str = "Shielding";

// ===========================================================================
// Storage builders
// ===========================================================================

/// Storage with one single-container part per entry:
/// `(resource, amount, capacity)`.
pub fn storage_with(entries: &[(&str, f64, f64)]) -> PartStorage {
    let mut storage = PartStorage::new();
    for (i, (resource, amount, capacity)) in entries.iter().enumerate() {
        storage.push_part(
            Part::new(&format!("part-{i}")).with_container(resource, *amount, *capacity),
        );
    }
    storage
}

/// A small crewed station: pod, life-support tankage, and batteries.
pub fn station_storage() -> PartStorage {
    let mut storage = PartStorage::new();
    storage.push_part(
        Part::new("pod")
            .with_container(EC, 150.0, 150.0)
            .with_container(OXYGEN, 120.0, 120.0)
            .with_container(FOOD, 110.0, 110.0)
            .with_container(WATER, 40.0, 40.0),
    );
    storage.push_part(
        Part::new("tankage")
            .with_container(OXYGEN, 500.0, 500.0)
            .with_container(WATER, 200.0, 200.0)
            .with_container(WASTE_WATER, 0.0, 200.0)
            .with_container(CO2, 0.0, 300.0)
            .with_container(WASTE, 0.0, 150.0),
    );
    storage.push_part(Part::new("battery").with_container(EC, 1000.0, 1000.0));
    storage
}

// ===========================================================================
// Assertions
// ===========================================================================

/// Absolute-tolerance float comparison for test assertions.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
