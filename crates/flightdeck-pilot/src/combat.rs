//! Combat controller for military hulls.
//!
//! Runs once per reaction: leave the dock, return for repair when disarmed,
//! keep or replace the combat target, aim the weapon axis at the predicted
//! intercept, run the attack phase machine, then decide whether to fire.

use glam::DVec3;
use rand::Rng;
use tracing::{debug, info};

use flightdeck_core::components::{PilotOutput, PilotState, ShipSnapshot};
use flightdeck_core::config::PilotConfig;
use flightdeck_core::constants::MIN_DISTANCE;
use flightdeck_core::enums::{AttackPhase, NavigationStatus};
use flightdeck_core::events::PilotEventKind;

use crate::acquisition::{nearest_available_station, nearest_hostile_ship};
use crate::alignment::{align_axis, AlignRequest};
use crate::attack::{self, AttackContext};
use crate::avoidance::avoid;
use crate::ballistics::{intercept, launch_direction, los_angular_velocity};
use crate::pilot::PilotContext;

/// Inputs to the fire decision.
#[derive(Debug, Clone, Copy)]
pub struct FireSolution {
    /// Projectile flight time to the intercept, if one exists (seconds).
    pub intercept_time: Option<f64>,
    /// Angle between the fire axis and the projectile direction (radians).
    pub misalignment: f64,
    pub target_radius: f64,
    pub target_distance: f64,
    pub dangerous: bool,
    pub temperature: f64,
    pub overheat_temperature: f64,
}

/// Fire when the intercept is close in time, the weapon points inside the
/// target's angular size scaled by the tolerance, and heat allows it.
pub fn fire_decision(solution: &FireSolution, config: &PilotConfig) -> bool {
    let in_window = matches!(
        solution.intercept_time,
        Some(time) if time > 0.0 && time <= config.fire_window_secs
    );
    if !in_window {
        return false;
    }

    let (tolerance, overheat_factor) = if solution.dangerous {
        (config.fire_tolerance_dangerous, config.fire_overheat_dangerous)
    } else {
        (config.fire_tolerance_weak, config.fire_overheat_weak)
    };

    let angular_size = (solution.target_radius / solution.target_distance.max(MIN_DISTANCE)).atan();
    if solution.misalignment >= tolerance * angular_size {
        return false;
    }

    solution.temperature <= solution.overheat_temperature * overheat_factor
}

/// One combat decision.
pub(crate) fn run(
    ship: &ShipSnapshot,
    state: &mut PilotState,
    config: &PilotConfig,
    delta_seconds: f64,
    ctx: &mut PilotContext<'_>,
) -> PilotOutput {
    let mut output = PilotOutput::default();
    let world = ctx.world;

    match ctx.navigation.status() {
        NavigationStatus::Docked => {
            ctx.navigation.undock();
            info!(ship = %ship.id, "combat pilot undocking");
            ctx.emit(ship.id, PilotEventKind::Undocked { station: None });
            return output;
        }
        NavigationStatus::AutoPilot => return output,
        NavigationStatus::Free => {}
    }

    let ammo_velocity = ship.ammo_velocity.unwrap_or(config.default_ammo_velocity);

    if ship.weapon_health <= 0.0 {
        if let Some(station) = nearest_available_station(world, ship) {
            let accepted = ctx.navigation.dock_at(station.id);
            info!(ship = %ship.id, station = %station.id, accepted, "disarmed, requesting repair dock");
            ctx.emit(
                ship.id,
                PilotEventKind::DockRequested {
                    station: station.id,
                    accepted,
                },
            );
            if accepted {
                ctx.emit(ship.id, PilotEventKind::ReturningForRepair { station: station.id });
                return output;
            }
        }
    }

    // Keep the current target only while it stays a worthwhile threat
    let previous = state.combat_target;
    let mut target = previous.and_then(|id| world.ship(id)).filter(|candidate| {
        candidate.alive
            && candidate.position.distance(ship.position) <= config.target_drop_distance
            && candidate.weapon_health > 0.0
    });
    if target.is_none() {
        target = nearest_hostile_ship(world, ctx.relations, ship, true)
            .or_else(|| nearest_hostile_ship(world, ctx.relations, ship, false));
    }

    let target_id = target.map(|candidate| candidate.id);
    if target_id != previous {
        if let Some(lost) = previous {
            debug!(ship = %ship.id, target = %lost, "target lost");
            ctx.emit(ship.id, PilotEventKind::TargetLost { target: lost });
        }
        if let Some(acquired) = target {
            state.attack_phase = AttackPhase::Approach;
            state.attack_angle = ctx.rng.gen_range(0.0..360.0);
            state.attack_distance = ctx
                .rng
                .gen_range(config.attack_distance_min..=config.attack_distance_max)
                + acquired.radius;
            info!(ship = %ship.id, target = %acquired.id, "target acquired");
            ctx.emit(ship.id, PilotEventKind::TargetAcquired { target: acquired.id });
        }
    }
    state.combat_target = target_id;

    match target {
        Some(target) => {
            engage(ship, target, state, config, delta_seconds, ammo_velocity, ctx, &mut output);
        }
        None => {
            // Nothing to fight: drift back toward the origin
            output.linear_target_velocity =
                -ship.position.clamp_length_max(ship.propulsion.max_linear_speed);
        }
    }

    output.linear_target_velocity = avoid(
        world,
        ship,
        config,
        output.linear_target_velocity,
        state.attack_angle,
    );

    if ship.is_hotter_than(config.combat_boost_overheat) {
        output.use_orbital_boost = false;
    }

    output
}

#[allow(clippy::too_many_arguments)]
fn engage(
    ship: &ShipSnapshot,
    target: &ShipSnapshot,
    state: &mut PilotState,
    config: &PilotConfig,
    delta_seconds: f64,
    ammo_velocity: f64,
    ctx: &mut PilotContext<'_>,
    output: &mut PilotOutput,
) {
    let dangerous = target.is_dangerous();
    let delta = target.position - ship.position;
    let distance = delta.length();
    let target_axis = delta.normalize_or_zero();

    // Where both will be when the next reaction starts
    let prediction_delay = state.reaction_time - delta_seconds;
    let predicted_ship = ship.position + ship.velocity * prediction_delay;
    let predicted_target = target.position + target.velocity * prediction_delay;
    let predicted_delta = predicted_target - predicted_ship;
    let predicted_distance = predicted_delta.length();
    let predicted_axis = predicted_delta.normalize_or_zero();

    let aim = intercept(
        ship.position,
        ship.velocity,
        target.position,
        target.velocity,
        ammo_velocity,
        0.0,
    );
    let fire_axis = aim
        .map(|hit| (hit.location - ship.position).normalize_or_zero())
        .unwrap_or(target_axis);

    let predicted_aim = intercept(
        ship.position,
        ship.velocity,
        target.position,
        target.velocity,
        ammo_velocity,
        prediction_delay,
    );
    let predicted_fire_axis = predicted_aim
        .map(|hit| (hit.location - predicted_ship).normalize_or_zero())
        .unwrap_or(predicted_axis);

    let bullet_direction = launch_direction(ship, ammo_velocity);
    let relative_velocity = target.velocity - ship.velocity;
    let target_angular_velocity =
        los_angular_velocity(relative_velocity, predicted_axis, predicted_distance);

    output.angular_target_velocity = align_axis(
        ship,
        &AlignRequest {
            local_axis: bullet_direction,
            target_axis: predicted_fire_axis,
            target_angular_velocity,
        },
        state.reaction_time,
        config.align_brake_factor,
    );

    let update = attack::evaluate(&AttackContext {
        phase: state.attack_phase,
        last_target_distance: state.last_target_distance,
        delta,
        relative_velocity,
        target_velocity: target.velocity,
        predicted_fire_axis,
        ship_up: ship.up(),
        max_speed: ship.propulsion.max_linear_speed,
        attack_angle: state.attack_angle,
        attack_distance: state.attack_distance,
        security_distance: config.security_distance(dangerous, target.radius),
        dangerous,
    });

    for &(from, to) in &update.transitions {
        debug!(ship = %ship.id, target = %target.id, ?from, ?to, distance, "attack phase change");
        ctx.emit(ship.id, PilotEventKind::PhaseChanged { from, to });
    }
    state.attack_phase = update.phase;
    state.last_target_distance = update.last_target_distance;
    output.linear_target_velocity = update.linear_velocity;
    output.use_orbital_boost = update.use_boost;

    let world_bullet_axis = ship.orientation * bullet_direction;
    let misalignment = if fire_axis == DVec3::ZERO {
        std::f64::consts::PI
    } else {
        fire_axis.dot(world_bullet_axis).clamp(-1.0, 1.0).acos()
    };

    output.want_fire = fire_decision(
        &FireSolution {
            intercept_time: aim.map(|hit| hit.time),
            misalignment,
            target_radius: target.radius,
            target_distance: distance,
            dangerous,
            temperature: ship.temperature,
            overheat_temperature: ship.overheat_temperature,
        },
        config,
    );
}
