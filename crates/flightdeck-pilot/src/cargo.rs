//! Cargo controller for civilian hulls.
//!
//! Shuttles between friendly stations, dwelling at each one before picking
//! another, and breaks off to run from any dangerous hostile in range.

use glam::DVec3;
use rand::Rng;
use tracing::{debug, info};

use flightdeck_core::components::{PilotOutput, PilotState, ShipSnapshot};
use flightdeck_core::config::PilotConfig;
use flightdeck_core::enums::NavigationStatus;
use flightdeck_core::events::PilotEventKind;

use crate::acquisition::{friendly_stations, nearest_hostile_ship};
use crate::alignment::{align_axis, AlignRequest};
use crate::avoidance::avoid;
use crate::pilot::PilotContext;

/// Dwell comparisons absorb accumulated reaction-time rounding.
const DWELL_EPSILON: f64 = 1e-6;

/// One cargo decision.
pub(crate) fn run(
    ship: &ShipSnapshot,
    state: &mut PilotState,
    config: &PilotConfig,
    ctx: &mut PilotContext<'_>,
) -> PilotOutput {
    let mut output = PilotOutput::default();

    match ctx.navigation.status() {
        NavigationStatus::Docked => {
            dwell(ship, state, config, ctx);
            return output;
        }
        // Autopilot owns motion, but a threat can still take it back.
        NavigationStatus::AutoPilot => {}
        NavigationStatus::Free => route(ship, state, config, ctx, &mut output),
    }

    flee(ship, config, ctx, &mut output);

    output.linear_target_velocity = avoid(
        ctx.world,
        ship,
        config,
        output.linear_target_velocity,
        state.attack_angle,
    );

    if output.linear_target_velocity != DVec3::ZERO {
        output.angular_target_velocity = align_axis(
            ship,
            &AlignRequest {
                local_axis: DVec3::X,
                target_axis: output.linear_target_velocity.normalize(),
                target_angular_velocity: DVec3::ZERO,
            },
            state.reaction_time,
            config.align_brake_factor,
        );
    }

    output
}

fn dwell(
    ship: &ShipSnapshot,
    state: &mut PilotState,
    config: &PilotConfig,
    ctx: &mut PilotContext<'_>,
) {
    state.wait_time += state.reaction_time;
    if state.wait_time + DWELL_EPSILON < config.dock_wait_secs {
        return;
    }

    ctx.navigation.undock();
    info!(ship = %ship.id, station = ?state.station_target, waited = state.wait_time, "undocking");
    ctx.emit(
        ship.id,
        PilotEventKind::Undocked {
            station: state.station_target,
        },
    );
    state.last_station_target = state.station_target.take();
    state.wait_time = 0.0;
}

fn route(
    ship: &ShipSnapshot,
    state: &mut PilotState,
    config: &PilotConfig,
    ctx: &mut PilotContext<'_>,
    output: &mut PilotOutput,
) {
    let world = ctx.world;

    // Destroyed destinations are forgotten
    if let Some(id) = state.station_target {
        if world.ship(id).is_none() {
            state.station_target = None;
        }
    }

    if state.station_target.is_none() {
        let candidates: Vec<_> = friendly_stations(world, ship)
            .into_iter()
            .filter(|id| Some(*id) != state.last_station_target)
            .collect();
        if !candidates.is_empty() {
            let station = candidates[ctx.rng.gen_range(0..candidates.len())];
            debug!(ship = %ship.id, %station, "station chosen");
            state.station_target = Some(station);
            ctx.emit(ship.id, PilotEventKind::StationChosen { station });
        }
    }

    let Some(station) = state.station_target.and_then(|id| world.ship(id)) else {
        return;
    };

    let delta = station.position - ship.position;
    let axis = delta.normalize_or_zero();
    let max_speed = ship.propulsion.max_linear_speed;

    if delta.length() < config.dock_approach_distance {
        let accepted = ctx.navigation.dock_at(station.id);
        info!(ship = %ship.id, station = %station.id, accepted, "requesting dock");
        ctx.emit(
            ship.id,
            PilotEventKind::DockRequested {
                station: station.id,
                accepted,
            },
        );
        if !accepted {
            // Back off and retry next decision
            output.linear_target_velocity = -axis * max_speed;
        }
    } else {
        output.linear_target_velocity = axis * max_speed;
    }
}

fn flee(
    ship: &ShipSnapshot,
    config: &PilotConfig,
    ctx: &mut PilotContext<'_>,
    output: &mut PilotOutput,
) {
    let Some(threat) = nearest_hostile_ship(ctx.world, ctx.relations, ship, true) else {
        return;
    };

    let delta = threat.position - ship.position;
    let distance = delta.length();

    if distance < config.flee_distance {
        ctx.navigation.force_manual();
        output.linear_target_velocity = -delta.normalize_or_zero() * ship.propulsion.max_linear_speed;
        output.use_orbital_boost = true;
        debug!(ship = %ship.id, threat = %threat.id, distance, "fleeing");
        ctx.emit(
            ship.id,
            PilotEventKind::Fleeing {
                threat: threat.id,
                distance,
            },
        );
    }

    // Save the engines unless the threat is on top of us
    if distance > config.imminent_danger_distance && ship.is_hotter_than(config.cargo_boost_overheat) {
        output.use_orbital_boost = false;
    }
}
