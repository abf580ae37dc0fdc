use serde::{Deserialize, Serialize};

/// Identifies a vessel. Minted by the host game and opaque to this
/// crate; survives docking, scene loads, and background simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VesselId(pub u64);
