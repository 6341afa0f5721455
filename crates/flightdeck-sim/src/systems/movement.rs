//! Movement system: the actuation stand-in.
//!
//! Free ships slew their velocities toward the pilot's commands with bounded
//! linear and angular acceleration. Autopilot ships fly to their granted
//! station and dock on arrival. Docked ships hold still.

use std::collections::HashMap;

use glam::{DQuat, DVec3};
use hecs::World;
use tracing::info;

use flightdeck_core::constants::{
    AUTOPILOT_SPEED_FACTOR, BOOST_ACCELERATION_FACTOR, DOCKING_RANGE, LINEAR_ACCELERATION,
};
use flightdeck_core::enums::NavigationStatus;
use flightdeck_core::types::EntityId;
use flightdeck_pilot::ShipPilot;

use crate::components::{entity_id, Body, Docks, Hull, Nav};
use crate::systems::navigation::DockBook;

/// Commanded motion for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    pub linear_velocity: DVec3,
    /// deg/s
    pub angular_velocity: DVec3,
    pub boost: bool,
}

/// Integrate every ship with a [`Nav`] component by `dt` seconds.
pub fn run(world: &mut World, book: &mut DockBook, dt: f64) {
    let stations: HashMap<EntityId, (DVec3, f64)> = world
        .query::<(&Body, &Hull, &Docks)>()
        .iter()
        .map(|(entity, (body, hull, _))| (entity_id(entity), (body.position, hull.radius)))
        .collect();

    for (entity, (body, hull, nav, pilot)) in
        world.query_mut::<(&mut Body, &Hull, &mut Nav, Option<&ShipPilot>)>()
    {
        let ship = entity_id(entity);
        let command = match nav.status {
            NavigationStatus::Docked => {
                body.velocity = DVec3::ZERO;
                body.angular_velocity = DVec3::ZERO;
                continue;
            }
            NavigationStatus::AutoPilot => {
                match nav.station.and_then(|id| stations.get(&id).map(|s| (id, *s))) {
                    Some((station, (position, radius))) => {
                        let delta = position - body.position;
                        let surface = delta.length() - radius - hull.radius;
                        if surface <= DOCKING_RANGE && book.occupy(station, ship) {
                            info!(ship = %ship, %station, "docked");
                            nav.status = NavigationStatus::Docked;
                            body.velocity = DVec3::ZERO;
                            body.angular_velocity = DVec3::ZERO;
                            continue;
                        }
                        let speed = (hull.propulsion.max_linear_speed * AUTOPILOT_SPEED_FACTOR)
                            .min(surface.max(0.0));
                        MotionCommand {
                            linear_velocity: delta.normalize_or_zero() * speed,
                            angular_velocity: DVec3::ZERO,
                            boost: false,
                        }
                    }
                    None => {
                        // Station gone: hand control back to the pilot
                        nav.status = NavigationStatus::Free;
                        nav.station = None;
                        coast(body)
                    }
                }
            }
            NavigationStatus::Free => match pilot {
                Some(pilot) => MotionCommand {
                    linear_velocity: pilot.output().linear_target_velocity,
                    angular_velocity: pilot.output().angular_target_velocity,
                    boost: pilot.output().use_orbital_boost,
                },
                None => coast(body),
            },
        };

        integrate(body, hull, &command, dt);
    }
}

/// Hold the current motion.
fn coast(body: &Body) -> MotionCommand {
    MotionCommand {
        linear_velocity: body.velocity,
        angular_velocity: body.angular_velocity,
        boost: false,
    }
}

/// Advance one body under a motion command.
pub fn integrate(body: &mut Body, hull: &Hull, command: &MotionCommand, dt: f64) {
    let propulsion = &hull.propulsion;

    let target_velocity = command
        .linear_velocity
        .clamp_length_max(propulsion.max_linear_speed);
    let mut acceleration = LINEAR_ACCELERATION;
    if command.boost {
        acceleration *= BOOST_ACCELERATION_FACTOR;
    }
    body.velocity += (target_velocity - body.velocity).clamp_length_max(acceleration * dt);

    let target_rate = command
        .angular_velocity
        .clamp_length_max(propulsion.max_angular_speed);
    body.angular_velocity += (target_rate - body.angular_velocity)
        .clamp_length_max(propulsion.angular_acceleration * dt);

    body.position += body.velocity * dt;
    let turn = DQuat::from_scaled_axis(body.angular_velocity * (std::f64::consts::PI / 180.0) * dt);
    body.orientation = (turn * body.orientation).normalize();
}
