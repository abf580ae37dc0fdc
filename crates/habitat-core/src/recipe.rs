//! Transactional conversions with proportional-shortfall execution.

use crate::cache::VesselResources;
use crate::storage::Storage;

/// Execution fractions below this count as "no progress".
pub const EXEC_EPSILON: f64 = 1e-10;

/// A weighted input or output of a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub quantity: f64,
    /// Reciprocal of `quantity`, precomputed at insertion. Non-positive
    /// quantities are rejected before this is ever formed.
    pub inv_quantity: f64,
}

impl Entry {
    fn new(name: &str, quantity: f64) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            inv_quantity: 1.0 / quantity,
        }
    }
}

/// One conversion process (N inputs, M outputs) queued against a
/// vessel's ledgers for a single tick.
///
/// Execution throttles proportionally when supply or capacity falls
/// short, with two asymmetries: a recipe with no outputs is a pure sink
/// and always runs (the ledger clamp at sync absorbs the underflow),
/// and a recipe with no inputs -- or one marked `dump` -- is never
/// throttled by downstream capacity.
#[derive(Debug, Clone)]
pub struct Recipe {
    inputs: Vec<Entry>,
    outputs: Vec<Entry>,
    dump: bool,
    left: f64,
}

impl Recipe {
    pub fn new(dump: bool) -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
            dump,
            left: 1.0,
        }
    }

    /// Register an input. Non-positive quantities are dropped without
    /// error; the reciprocal used during execution must stay finite.
    pub fn input(&mut self, resource: &str, quantity: f64) {
        if quantity > f64::EPSILON {
            self.inputs.push(Entry::new(resource, quantity));
        } else {
            log::debug!("dropping recipe input '{resource}' with quantity {quantity}");
        }
    }

    /// Register an output. Same non-positive policy as [`Recipe::input`].
    pub fn output(&mut self, resource: &str, quantity: f64) {
        if quantity > f64::EPSILON {
            self.outputs.push(Entry::new(resource, quantity));
        } else {
            log::debug!("dropping recipe output '{resource}' with quantity {quantity}");
        }
    }

    /// Builder-style [`Recipe::input`].
    pub fn with_input(mut self, resource: &str, quantity: f64) -> Self {
        self.input(resource, quantity);
        self
    }

    /// Builder-style [`Recipe::output`].
    pub fn with_output(mut self, resource: &str, quantity: f64) -> Self {
        self.output(resource, quantity);
        self
    }

    pub fn inputs(&self) -> &[Entry] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Entry] {
        &self.outputs
    }

    pub fn dump(&self) -> bool {
        self.dump
    }

    /// Fraction of the nominal throughput not yet executed this tick.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// One resolution pass against the vessel's ledgers. Returns whether
    /// any nonzero fraction of the recipe ran.
    ///
    /// The pass consumes `fraction * quantity` of every input and
    /// produces `fraction * quantity` of every output, where `fraction`
    /// is the worst ratio of availability (inputs) and free capacity
    /// (outputs) across all entries, never exceeding what is `left`.
    pub fn execute<S: Storage>(&mut self, storage: &S, resources: &mut VesselResources) -> bool {
        // Worst input ratio. Pure sinks skip the check and underflow;
        // the ledger clamp at sync catches them.
        let mut worst_input = self.left;
        if !self.outputs.is_empty() {
            for e in &self.inputs {
                let res = resources.info(storage, &e.name);
                let available = res.amount() + res.deferred();
                worst_input = (available * e.inv_quantity).clamp(0.0, worst_input);
            }
        }

        // Worst output ratio. Pure producers and dumping recipes
        // overflow instead; the ledger clamp discards the excess.
        let mut worst_output = self.left;
        if !self.inputs.is_empty() && !self.dump {
            for e in &self.outputs {
                let res = resources.info(storage, &e.name);
                let free = res.capacity() - (res.amount() + res.deferred());
                worst_output = (free * e.inv_quantity).clamp(0.0, worst_output);
            }
        }

        let worst_io = worst_input.min(worst_output);

        for e in &self.inputs {
            resources.consume(storage, &e.name, e.quantity * worst_io);
        }
        for e in &self.outputs {
            resources.produce(storage, &e.name, e.quantity * worst_io);
        }

        self.left -= worst_io;

        worst_io > EXEC_EPSILON
    }
}

// ===========================================================================
// Tests
// ===========================================================================
