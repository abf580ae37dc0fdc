//! The storage collaborator: per-part resource containers.
//!
//! Ledgers never own the authoritative container state -- the host does.
//! They read it through [`Storage::scan`] and write it back through
//! [`Storage::apply`], which distributes a signed delta container by
//! container so that no single container ever leaves its own bounds.

use serde::{Deserialize, Serialize};

/// Residue below this magnitude is rounding noise and snaps to zero.
pub const SYNC_EPSILON: f64 = 1e-7;

// ---------------------------------------------------------------------------
// Containers and parts
// ---------------------------------------------------------------------------

/// One resource container on a vessel part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub resource: String,
    pub amount: f64,
    pub max_amount: f64,
    /// Containers with flow disabled are invisible to the simulation:
    /// they contribute neither amount nor capacity.
    pub flow_enabled: bool,
}

impl Container {
    pub fn new(resource: &str, amount: f64, max_amount: f64) -> Self {
        Self {
            resource: resource.to_string(),
            amount,
            max_amount,
            flow_enabled: true,
        }
    }
}

/// A part: a named group of containers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub containers: Vec<Container>,
}

impl Part {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            containers: Vec::new(),
        }
    }

    /// Add a flow-enabled container, builder style.
    pub fn with_container(mut self, resource: &str, amount: f64, max_amount: f64) -> Self {
        self.containers.push(Container::new(resource, amount, max_amount));
        self
    }
}

// ---------------------------------------------------------------------------
// Storage trait
// ---------------------------------------------------------------------------

/// Boundary to the host's container state for one vessel.
pub trait Storage {
    /// Sum of (amount, capacity) over the flow-enabled containers of
    /// `resource`.
    fn scan(&self, resource: &str) -> (f64, f64);

    /// Distribute a signed `delta` across the flow-enabled containers of
    /// `resource`. Each container is clamped to its own `[0, max_amount]`;
    /// whatever one container cannot absorb carries to the next in
    /// iteration order. Returns the remainder no container could absorb.
    fn apply(&mut self, resource: &str, delta: f64) -> f64;
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// The parts of one vessel, held in memory. Hosts that keep container
/// state in their own object model implement [`Storage`] directly
/// instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartStorage {
    pub parts: Vec<Part>,
}

impl PartStorage {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn push_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Remove a part by name (staging, destruction). Containers go with it.
    pub fn remove_part(&mut self, name: &str) {
        self.parts.retain(|p| p.name != name);
    }
}

impl Storage for PartStorage {
    fn scan(&self, resource: &str) -> (f64, f64) {
        let mut amount = 0.0;
        let mut capacity = 0.0;
        for part in &self.parts {
            for c in &part.containers {
                if c.flow_enabled && c.resource == resource {
                    amount += c.amount;
                    capacity += c.max_amount;
                }
            }
        }
        (amount, capacity)
    }

    fn apply(&mut self, resource: &str, delta: f64) -> f64 {
        let mut remaining = delta;
        for part in &mut self.parts {
            for c in &mut part.containers {
                if !c.flow_enabled || c.resource != resource {
                    continue;
                }
                let moved = (c.amount + remaining).clamp(0.0, c.max_amount) - c.amount;
                c.amount += moved;
                if c.amount < SYNC_EPSILON {
                    c.amount = 0.0;
                }
                remaining -= moved;
                if remaining.abs() < SYNC_EPSILON {
                    return 0.0;
                }
            }
        }
        remaining
    }
}

// ===========================================================================
// Tests
// ===========================================================================
