//! Per-resource ledger: deferred accumulation and tick-boundary commit.

use crate::rule::Rule;
use crate::storage::{SYNC_EPSILON, Storage};

/// Amount, capacity, and rate state for one resource on one vessel.
///
/// Created lazily on first reference and kept for the life of the
/// vessel's cache. During a tick, every request lands in `deferred`;
/// nothing is validated until [`ResourceLedger::sync`] commits the
/// accumulated delta to storage at the tick boundary.
#[derive(Debug, Clone)]
pub struct ResourceLedger {
    name: String,
    amount: f64,
    capacity: f64,
    level: f64,
    rate: f64,
    deferred: f64,
    meal_happened: bool,
}

impl ResourceLedger {
    /// Build the ledger by scanning `storage` for the resource.
    pub fn new<S: Storage>(storage: &S, name: &str) -> Self {
        let (amount, capacity) = storage.scan(name);
        let level = if capacity > f64::EPSILON { amount / capacity } else { 0.0 };
        Self {
            name: name.to_string(),
            amount,
            capacity,
            level,
            rate: 0.0,
            deferred: 0.0,
            meal_happened: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current quantity. Authoritative as of the last sync.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Storage ceiling as of the last sync. Changes at runtime as parts
    /// are added, removed, or flow-toggled.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Amount over capacity, or zero when there is no capacity.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Observed change per second, recomputed at each sync.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Signed delta accumulated since the last sync.
    pub fn deferred(&self) -> f64 {
        self.deferred
    }

    /// Record a deferred production. Zero is a no-op.
    pub fn produce(&mut self, quantity: f64) {
        self.deferred += quantity;
    }

    /// Record a deferred consumption. Zero is a no-op.
    pub fn consume(&mut self, quantity: f64) {
        self.deferred -= quantity;
    }

    /// Mark that an interval rule fired against this resource during the
    /// current tick. The next sync keeps the previously observed rate, so
    /// a single meal-sized lump does not show up as a huge readout spike.
    pub fn flag_meal(&mut self) {
        self.meal_happened = true;
    }

    /// Commit the deferred delta to storage and refresh observed state.
    ///
    /// Capacity is re-derived from a full container scan every time:
    /// parts appear, vanish, and flow-toggle between ticks, and a stale
    /// ceiling would corrupt every downstream throttling decision. If
    /// capacity collapsed to zero while amount was positive, the amount
    /// truncates to zero with it -- the resource went away with its tanks.
    pub fn sync<S: Storage>(&mut self, storage: &mut S, elapsed: f64) {
        assert!(elapsed > 0.0, "elapsed seconds must be positive");

        let (scanned, capacity) = storage.scan(&self.name);
        self.capacity = capacity;

        // Distribute the deferred delta over the containers. Whatever the
        // containers cannot absorb is lost: bounds win over requests.
        let mut new_amount = scanned;
        if self.deferred.abs() > SYNC_EPSILON {
            let remainder = storage.apply(&self.name, self.deferred);
            new_amount += self.deferred - remainder;
        }
        if new_amount < SYNC_EPSILON {
            new_amount = 0.0;
        }

        if !self.meal_happened {
            self.rate = (new_amount - self.amount) / elapsed;
        }

        self.amount = new_amount;
        self.level = if capacity > f64::EPSILON { new_amount / capacity } else { 0.0 };
        self.deferred = 0.0;
        self.meal_happened = false;
    }

    /// Estimated seconds until this resource runs out, given the observed
    /// rate plus the draw of every interval rule that touches it, scaled
    /// by `crew_count`. Returns `0.0` when already empty and NaN when the
    /// net rate is non-depleting.
    pub fn depletion(&self, crew_count: u32, rules: &[Rule]) -> f64 {
        let mut meal_rate = 0.0;
        if crew_count > 0 {
            for rule in rules {
                meal_rate += rule.depletion_rate(&self.name);
            }
            meal_rate *= f64::from(crew_count);
        }

        let delta = self.rate + meal_rate;

        if self.amount <= f64::EPSILON {
            0.0
        } else if delta >= -SYNC_EPSILON {
            f64::NAN
        } else {
            self.amount / -delta
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
