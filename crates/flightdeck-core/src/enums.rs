//! Enumeration types used throughout the pilot system.

use serde::{Deserialize, Serialize};

/// Combat attack phase. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Closing in on the target along the predicted firing axis.
    #[default]
    Approach,
    /// Target is closing or within the security distance: strafe it.
    Engage,
    /// Target has been passed: open range back to the security distance.
    Withdraw,
}

/// Diplomatic stance between two companies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hostility {
    Hostile,
    #[default]
    Neutral,
    Friendly,
}

/// Navigation status of a ship, owned by the navigation collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationStatus {
    /// Pilot-controlled flight.
    #[default]
    Free,
    /// An external maneuver (docking approach) owns the motion.
    AutoPilot,
    /// Attached to a station dock.
    Docked,
}

/// Hull size class, used to match dock slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipSize {
    #[default]
    Small,
    Large,
}

/// Which controller a ship's pilot runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilotRole {
    Combat,
    Cargo,
}

/// Built-in scenarios of the reference simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Two fighter wings meet head on.
    #[default]
    Skirmish,
    /// Freighters shuttle between three friendly stations.
    TradeRoute,
    /// Raiders jump a trade route guarded by an escort.
    Ambush,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 3] = [
        ScenarioId::Skirmish,
        ScenarioId::TradeRoute,
        ScenarioId::Ambush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenarioId::Skirmish => "skirmish",
            ScenarioId::TradeRoute => "trade-route",
            ScenarioId::Ambush => "ambush",
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = crate::error::FlightdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::error::FlightdeckError::UnknownScenario(s.to_string()))
    }
}
