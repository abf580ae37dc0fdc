//! Life-support converters: scrubbers, recyclers, greenhouses, drills.
//!
//! Each converter contributes one [`Recipe`] per tick; the cache
//! resolves them all together at the boundary, so a scrubber starved of
//! power degrades exactly like any other under-supplied recipe.
//! Dispatches via enum match (no trait objects).

use serde::{Deserialize, Serialize};

use crate::cache::VesselResources;
use crate::recipe::Recipe;
use crate::storage::Storage;

/// The power resource every converter draws from.
pub const ELECTRIC_CHARGE: &str = "ElectricCharge";

/// A resource conversion device. Rates are units per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Converter {
    /// Strips a waste gas from the cabin and reclaims a useful output
    /// (CO2 to oxygen). Throttled by output capacity.
    Scrubber {
        power: f64,
        input: String,
        input_rate: f64,
        output: String,
        /// Units of output per unit of input.
        efficiency: f64,
    },
    /// Reclaims a liquid waste stream (waste water to water).
    Recycler {
        power: f64,
        input: String,
        input_rate: f64,
        output: String,
        /// Units of output per unit of input.
        ratio: f64,
        /// Discard output beyond capacity instead of throttling.
        dump: bool,
    },
    /// Grows a crop from continuous inputs and harvests it in lumps.
    Greenhouse {
        power: f64,
        input: String,
        input_rate: f64,
        crop: String,
        /// Units of crop per harvest.
        harvest_size: f64,
        /// Seconds from sowing to harvest under full supply.
        growth_time: f64,
    },
    /// Extracts a raw resource from the ground. Excess is left behind,
    /// never throttled by tank space.
    Harvester {
        power: f64,
        output: String,
        output_rate: f64,
    },
}

/// Mutable per-device state. Only greenhouses use it today, but every
/// converter instance owns one so devices stay interchangeable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConverterState {
    /// Crop growth fraction: 0 at sowing, 1 at harvest.
    pub growth: f64,
}

impl Converter {
    /// Build this tick's recipe. Quantities are rates scaled by `elapsed`.
    pub fn recipe(&self, elapsed: f64) -> Recipe {
        match self {
            Converter::Scrubber {
                power,
                input,
                input_rate,
                output,
                efficiency,
            } => Recipe::new(false)
                .with_input(ELECTRIC_CHARGE, power * elapsed)
                .with_input(input, input_rate * elapsed)
                .with_output(output, input_rate * efficiency * elapsed),

            Converter::Recycler {
                power,
                input,
                input_rate,
                output,
                ratio,
                dump,
            } => Recipe::new(*dump)
                .with_input(ELECTRIC_CHARGE, power * elapsed)
                .with_input(input, input_rate * elapsed)
                .with_output(output, input_rate * ratio * elapsed),

            // Growth inputs only; the harvest lump is emitted by `run`.
            Converter::Greenhouse {
                power,
                input,
                input_rate,
                ..
            } => Recipe::new(false)
                .with_input(ELECTRIC_CHARGE, power * elapsed)
                .with_input(input, input_rate * elapsed),

            Converter::Harvester {
                power,
                output,
                output_rate,
            } => Recipe::new(true)
                .with_input(ELECTRIC_CHARGE, power * elapsed)
                .with_output(output, output_rate * elapsed),
        }
    }

    /// Queue this converter's work for the tick. Greenhouses also
    /// advance their growth and emit a harvest lump on maturity; the
    /// return value is the harvested quantity, if any.
    pub fn run<S: Storage>(
        &self,
        storage: &S,
        resources: &mut VesselResources,
        state: &mut ConverterState,
        elapsed: f64,
    ) -> Option<f64> {
        let Converter::Greenhouse {
            power,
            input,
            input_rate,
            crop,
            harvest_size,
            growth_time,
        } = self
        else {
            resources.transform(self.recipe(elapsed));
            return None;
        };

        // Growth advances in proportion to how much of the feed is on
        // hand right now; the queued recipe does the actual accounting.
        let satisfaction = [(ELECTRIC_CHARGE, *power), (input.as_str(), *input_rate)]
            .into_iter()
            .map(|(name, rate)| {
                let need = rate * elapsed;
                if need <= f64::EPSILON {
                    return 1.0;
                }
                let ledger = resources.info(storage, name);
                ((ledger.amount() + ledger.deferred()) / need).clamp(0.0, 1.0)
            })
            .fold(1.0, f64::min);

        resources.transform(self.recipe(elapsed));
        state.growth += elapsed / growth_time * satisfaction;

        if state.growth >= 1.0 {
            state.growth -= 1.0;
            resources.produce(storage, crop, *harvest_size);
            return Some(*harvest_size);
        }
        None
    }
}

// ===========================================================================
// Tests
// ===========================================================================
