//! Environment scaling factors for rules.
//!
//! A rule's nominal rate rarely applies as-is: oxygen consumption stops
//! inside a breathable atmosphere, radiation poisoning scales with the
//! local field, climate control draw scales with habitat volume. Each
//! factor is one [`Modifier`]; a rule carries a list of them, folded
//! left to right into a single multiplier.

use serde::{Deserialize, Serialize};

use crate::cache::VesselResources;
use crate::storage::Storage;

/// Rate penalty applied while the habitat is unpressurized.
const PRESSURE_FACTOR: f64 = 10.0;
/// Rate penalty applied while cabin CO2 is not being scrubbed.
const POISONING_FACTOR: f64 = 5.0;

// ---------------------------------------------------------------------------
// Environment snapshot
// ---------------------------------------------------------------------------

/// Per-vessel environment readings, supplied by the host each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Inside an atmosphere crew can breathe directly.
    pub breathable: bool,
    /// Ambient radiation field, rad/s.
    pub radiation: f64,
    /// Fraction of radiation stopped by shielding, 0 to 1.
    pub shielding: f64,
    pub pressurized: bool,
    /// Cabin CO2 is being kept below the poisoning threshold.
    pub scrubbed: bool,
    /// Habitat volume, m^3.
    pub volume: f64,
    /// Habitat surface, m^2.
    pub surface: f64,
    /// Living space per crew member, normalized around 1.
    pub living_space: f64,
    /// Comfort factor, normalized around 1.
    pub comfort: f64,
    pub crew_count: u32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            breathable: false,
            radiation: 0.0,
            shielding: 0.0,
            pressurized: true,
            scrubbed: true,
            volume: 1.0,
            surface: 1.0,
            living_space: 1.0,
            comfort: 1.0,
            crew_count: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// A single scaling factor. Dispatches via enum match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Zero inside a breathable atmosphere, one outside.
    Breathable,
    /// Multiplies by the ambient radiation field.
    Radiation,
    /// Multiplies by the fraction of radiation passing the shielding.
    Shielding,
    /// Multiplies by habitat volume.
    Volume,
    /// Multiplies by habitat surface.
    Surface,
    /// Divides by living space per crew member.
    LivingSpace,
    /// Divides by the comfort factor.
    Comfort,
    /// Penalty factor while unpressurized.
    Pressure,
    /// Penalty factor while cabin CO2 is unscrubbed.
    Poisoning,
    /// Divides by the crew count (at least one).
    PerCapita,
    /// Multiplies by the crew count.
    CrewCount,
    /// Replaces the factor accumulated so far with its reciprocal.
    Inverse,
    /// Multiplies by the current amount of the named resource.
    Resource(String),
}

/// Fold a modifier list into a single rate multiplier.
pub fn evaluate<S: Storage>(
    modifiers: &[Modifier],
    env: &Environment,
    resources: &mut VesselResources,
    storage: &S,
) -> f64 {
    let mut k = 1.0;
    for modifier in modifiers {
        match modifier {
            Modifier::Breathable => k *= if env.breathable { 0.0 } else { 1.0 },
            Modifier::Radiation => k *= env.radiation,
            Modifier::Shielding => k *= 1.0 - env.shielding,
            Modifier::Volume => k *= env.volume,
            Modifier::Surface => k *= env.surface,
            Modifier::LivingSpace => k /= env.living_space,
            Modifier::Comfort => k /= env.comfort,
            Modifier::Pressure => k *= if env.pressurized { 1.0 } else { PRESSURE_FACTOR },
            Modifier::Poisoning => k *= if env.scrubbed { 1.0 } else { POISONING_FACTOR },
            Modifier::PerCapita => k /= f64::from(env.crew_count.max(1)),
            Modifier::CrewCount => k *= f64::from(env.crew_count),
            Modifier::Inverse => k = if k > f64::EPSILON { 1.0 / k } else { 0.0 },
            Modifier::Resource(name) => k *= resources.info(storage, name).amount(),
        }
    }
    k
}

// ===========================================================================
// Tests
// ===========================================================================
