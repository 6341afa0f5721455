//! Per-ship pilot and its tick orchestration.

use glam::DVec3;
use rand::{Rng, RngCore};
use tracing::{trace, warn};

use flightdeck_core::components::{PilotOutput, PilotState, ShipSnapshot};
use flightdeck_core::config::PilotConfig;
use flightdeck_core::enums::PilotRole;
use flightdeck_core::events::{PilotEvent, PilotEventKind};
use flightdeck_core::types::EntityId;
use flightdeck_core::world::{CompanyRelations, Navigation, WorldView};

use crate::{cargo, combat};

/// Everything a pilot may read or touch during one tick.
pub struct PilotContext<'a> {
    pub world: &'a dyn WorldView,
    pub relations: &'a dyn CompanyRelations,
    /// Navigation of the piloted ship only.
    pub navigation: &'a mut dyn Navigation,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut Vec<PilotEvent>,
}

impl<'a> PilotContext<'a> {
    pub fn emit(&mut self, ship: EntityId, kind: PilotEventKind) {
        self.events.push(PilotEvent::new(ship, kind));
    }
}

/// Controller a ship runs, from its hull class.
pub fn role(ship: &ShipSnapshot) -> PilotRole {
    if ship.is_military {
        PilotRole::Combat
    } else {
        PilotRole::Cargo
    }
}

/// Autonomous pilot of a single ship.
///
/// Decides at most once per reaction time and publishes a [`PilotOutput`]
/// that stays unchanged between decisions.
#[derive(Debug, Clone)]
pub struct ShipPilot {
    ship: EntityId,
    state: PilotState,
    output: PilotOutput,
    config: PilotConfig,
}

impl ShipPilot {
    /// Fresh pilot with a randomized reaction time and preferred attack angle.
    pub fn new(ship: EntityId, config: PilotConfig, rng: &mut dyn RngCore) -> Self {
        let reaction_time = rng.gen_range(config.reaction_time_min..config.reaction_time_max);
        let attack_angle = rng.gen_range(0.0..360.0);
        Self::restore(ship, PilotState::new(reaction_time, attack_angle), config)
    }

    /// Rebuild a pilot from saved state.
    pub fn restore(ship: EntityId, state: PilotState, config: PilotConfig) -> Self {
        Self {
            ship,
            state,
            output: PilotOutput::default(),
            config,
        }
    }

    pub fn ship(&self) -> EntityId {
        self.ship
    }

    pub fn state(&self) -> &PilotState {
        &self.state
    }

    pub fn output(&self) -> &PilotOutput {
        &self.output
    }

    pub fn config(&self) -> &PilotConfig {
        &self.config
    }

    /// Advance by `delta_seconds`. Returns `true` if a decision was made.
    pub fn tick(&mut self, delta_seconds: f64, ctx: &mut PilotContext<'_>) -> bool {
        let world = ctx.world;
        let Some(ship) = world.ship(self.ship) else {
            warn!(ship = %self.ship, "piloted ship missing from snapshot");
            return false;
        };

        if ship.is_station || ship.player_controlled || !ship.alive {
            return false;
        }

        self.state.time_until_next_reaction -= delta_seconds;
        if self.state.time_until_next_reaction > 0.0 {
            return false;
        }
        self.state.time_until_next_reaction = self.state.reaction_time;

        let output = match role(ship) {
            PilotRole::Combat => combat::run(ship, &mut self.state, &self.config, delta_seconds, ctx),
            PilotRole::Cargo => cargo::run(ship, &mut self.state, &self.config, ctx),
        };
        self.output = sanitize(self.ship, output);

        trace!(
            ship = %self.ship,
            linear = ?self.output.linear_target_velocity,
            angular = ?self.output.angular_target_velocity,
            fire = self.output.want_fire,
            boost = self.output.use_orbital_boost,
            "pilot decision"
        );
        true
    }
}

fn sanitize(ship: EntityId, mut output: PilotOutput) -> PilotOutput {
    if !output.linear_target_velocity.is_finite() {
        warn!(ship = %ship, value = ?output.linear_target_velocity, "non-finite linear command dropped");
        output.linear_target_velocity = DVec3::ZERO;
    }
    if !output.angular_target_velocity.is_finite() {
        warn!(ship = %ship, value = ?output.angular_target_velocity, "non-finite angular command dropped");
        output.angular_target_velocity = DVec3::ZERO;
    }
    output
}
