//! Crew consumption and production rules.

use serde::{Deserialize, Serialize};

use crate::cache::VesselResources;
use crate::modifier::{Environment, Modifier, evaluate};
use crate::storage::Storage;

/// A per-crew-member resource draw, continuous or periodic.
///
/// Continuous rules (`interval == 0`) drain `rate` units of the input
/// per crew member per second, every tick. Interval rules fire a whole
/// lump of `rate` per crew member every `interval` simulated seconds --
/// meals, periodic filter swaps -- and mark the affected ledgers so the
/// lump does not distort the observed rate readout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub input: String,
    /// Byproduct resource, if any (water drunk becomes waste water).
    #[serde(default)]
    pub output: Option<String>,
    /// Units of output produced per unit of input consumed.
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    /// Units per crew member: per second when continuous, per firing
    /// when periodic.
    pub rate: f64,
    /// Seconds between firings; zero means continuous.
    #[serde(default)]
    pub interval: f64,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

fn default_ratio() -> f64 {
    1.0
}

/// Per-vessel progress of a periodic rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleState {
    /// Seconds accumulated toward the next firing.
    pub accumulated: f64,
}

impl Rule {
    pub fn continuous(&self) -> bool {
        self.interval <= 0.0
    }

    /// Signed per-second, per-crew-member contribution to `resource`
    /// used by depletion estimates. Continuous rules contribute zero
    /// here: their draw is already visible in the observed ledger rate.
    pub fn depletion_rate(&self, resource: &str) -> f64 {
        if self.continuous() {
            return 0.0;
        }
        let mut rate = 0.0;
        if self.input == resource {
            rate -= self.rate / self.interval;
        }
        if self.output.as_deref() == Some(resource) {
            rate += self.rate * self.ratio / self.interval;
        }
        rate
    }

    /// Apply the rule for one tick. Long ticks (time warp) can fire a
    /// periodic rule several times.
    pub fn apply<S: Storage>(
        &self,
        storage: &S,
        resources: &mut VesselResources,
        env: &Environment,
        state: &mut RuleState,
        elapsed: f64,
    ) {
        let k = evaluate(&self.modifiers, env, resources, storage) * f64::from(env.crew_count);

        if self.continuous() {
            let quantity = self.rate * k * elapsed;
            if quantity > 0.0 {
                resources.consume(storage, &self.input, quantity);
                if let Some(output) = &self.output {
                    resources.produce(storage, output, quantity * self.ratio);
                }
            }
            return;
        }

        state.accumulated += elapsed;
        while state.accumulated >= self.interval {
            state.accumulated -= self.interval;
            let quantity = self.rate * k;
            if quantity > 0.0 {
                resources.consume(storage, &self.input, quantity);
                resources.info(storage, &self.input).flag_meal();
                if let Some(output) = &self.output {
                    resources.produce(storage, output, quantity * self.ratio);
                    resources.info(storage, output).flag_meal();
                }
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
