//! Fundamental identifier and time types.

use serde::{Deserialize, Serialize};

/// Stable identifier of an entity in the world.
///
/// Pilots hold these instead of references: the referent may be destroyed
/// at any time, and lookups through [`crate::world::WorldView::ship`] return
/// `None` from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Company (faction) identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current frame number (increments by 1 each frame).
    pub frame: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.frame += 1;
        self.elapsed_secs += dt;
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
