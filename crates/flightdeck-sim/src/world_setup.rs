//! Entity spawn factories for setting up the simulation world.
//!
//! Creates stations, fighters and freighters with the component bundles the
//! systems expect. Piloted hulls get a [`ShipPilot`] keyed by their entity id.

use glam::{DQuat, DVec3};
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use flightdeck_core::components::{DockSlot, Propulsion};
use flightdeck_core::config::PilotConfig;
use flightdeck_core::constants::FIGHTER_AMMO_VELOCITY;
use flightdeck_core::enums::ShipSize;
use flightdeck_core::types::CompanyId;
use flightdeck_pilot::ShipPilot;

use crate::components::{entity_id, Body, Condition, Docks, Hull, Nav, Weapon};

const STATION_RADIUS: f64 = 150.0;
const FIGHTER_RADIUS: f64 = 8.0;
const FREIGHTER_RADIUS: f64 = 25.0;
const OVERHEAT_TEMPERATURE: f64 = 1000.0;

/// Spawn a station with one dock slot per entry of `slots`.
pub fn spawn_station(
    world: &mut World,
    company: CompanyId,
    position: DVec3,
    slots: &[ShipSize],
) -> Entity {
    let hull = Hull {
        company,
        radius: STATION_RADIUS,
        size: ShipSize::Large,
        is_station: true,
        is_military: false,
        player_controlled: false,
        overheat_temperature: OVERHEAT_TEMPERATURE,
        propulsion: Propulsion {
            max_linear_speed: 0.0,
            max_angular_speed: 0.0,
            ..Propulsion::default()
        },
    };
    let docks = Docks(slots.iter().map(|&size| DockSlot::free(size)).collect());

    world.spawn((Body::at(position), hull, Condition::default(), docks))
}

/// Spawn an armed, piloted fighter facing along its velocity.
pub fn spawn_fighter(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &PilotConfig,
    company: CompanyId,
    position: DVec3,
    velocity: DVec3,
) -> Entity {
    let hull = Hull {
        company,
        radius: FIGHTER_RADIUS,
        size: ShipSize::Small,
        is_station: false,
        is_military: true,
        player_controlled: false,
        overheat_temperature: OVERHEAT_TEMPERATURE,
        propulsion: Propulsion {
            max_linear_speed: 150.0,
            max_angular_speed: 90.0,
            angular_acceleration: 180.0,
            ..Propulsion::default()
        },
    };
    let weapon = Weapon {
        ammo_velocity: FIGHTER_AMMO_VELOCITY,
        cooldown: 0.0,
    };

    let entity = world.spawn((
        heading_body(position, velocity),
        hull,
        Condition::default(),
        weapon,
        Nav::default(),
    ));
    attach_pilot(world, entity, rng, config);
    entity
}

/// Spawn an unarmed, piloted freighter at rest.
pub fn spawn_freighter(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &PilotConfig,
    company: CompanyId,
    position: DVec3,
) -> Entity {
    let hull = Hull {
        company,
        radius: FREIGHTER_RADIUS,
        size: ShipSize::Small,
        is_station: false,
        is_military: false,
        player_controlled: false,
        overheat_temperature: OVERHEAT_TEMPERATURE,
        propulsion: Propulsion {
            max_linear_speed: 80.0,
            max_angular_speed: 40.0,
            angular_acceleration: 60.0,
            ..Propulsion::default()
        },
    };

    let entity = world.spawn((Body::at(position), hull, Condition::default(), Nav::default()));
    attach_pilot(world, entity, rng, config);
    entity
}

fn heading_body(position: DVec3, velocity: DVec3) -> Body {
    let mut body = Body::at(position);
    body.velocity = velocity;
    if let Some(direction) = velocity.try_normalize() {
        body.orientation = DQuat::from_rotation_arc(DVec3::X, direction);
    }
    body
}

fn attach_pilot(world: &mut World, entity: Entity, rng: &mut ChaCha8Rng, config: &PilotConfig) {
    let pilot = ShipPilot::new(entity_id(entity), config.clone(), rng);
    let _ = world.insert_one(entity, pilot);
}
