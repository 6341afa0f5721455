//! Events emitted by pilots for logging and simulation reports.

use serde::{Deserialize, Serialize};

use crate::enums::AttackPhase;
use crate::types::EntityId;

/// Something a pilot decided, tagged with the ship that decided it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotEvent {
    pub ship: EntityId,
    pub kind: PilotEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PilotEventKind {
    /// A new combat target was selected.
    TargetAcquired { target: EntityId },
    /// The previous combat target was dropped (dead, out of range or disarmed).
    TargetLost { target: EntityId },
    PhaseChanged { from: AttackPhase, to: AttackPhase },
    /// Weapons are down; heading to a station for repair.
    ReturningForRepair { station: EntityId },
    DockRequested { station: EntityId, accepted: bool },
    Undocked { station: Option<EntityId> },
    /// A cargo route destination was picked.
    StationChosen { station: EntityId },
    /// A cargo ship broke off to run from a hostile.
    Fleeing { threat: EntityId, distance: f64 },
}

impl PilotEvent {
    pub fn new(ship: EntityId, kind: PilotEventKind) -> Self {
        Self { ship, kind }
    }
}

impl PilotEventKind {
    /// Short label, matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TargetAcquired { .. } => "TargetAcquired",
            Self::TargetLost { .. } => "TargetLost",
            Self::PhaseChanged { .. } => "PhaseChanged",
            Self::ReturningForRepair { .. } => "ReturningForRepair",
            Self::DockRequested { .. } => "DockRequested",
            Self::Undocked { .. } => "Undocked",
            Self::StationChosen { .. } => "StationChosen",
            Self::Fleeing { .. } => "Fleeing",
        }
    }
}
