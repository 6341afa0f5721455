//! Snapshot system: flattens the ECS world into the frame-stable view pilots scan.
//!
//! Built once at the start of every frame, before any pilot runs, so every
//! pilot in a frame sees the same world regardless of update order.

use hecs::World;

use flightdeck_core::components::ShipSnapshot;
use flightdeck_core::world::{RelationTable, WorldSnapshot};

use crate::components::{entity_id, Body, Condition, Docks, Hull, Nav, Weapon};

/// Build the frame snapshot. Entities are ordered by id.
pub fn build(world: &World, relations: &RelationTable) -> WorldSnapshot {
    let mut ships = Vec::new();

    let mut query = world.query::<(
        &Body,
        &Hull,
        &Condition,
        Option<&Weapon>,
        Option<&Docks>,
        Option<&Nav>,
    )>();
    for (entity, (body, hull, condition, weapon, docks, nav)) in query.iter() {
        let mut ship = ShipSnapshot::new(entity_id(entity), hull.company);
        ship.position = body.position;
        ship.velocity = body.velocity;
        ship.orientation = body.orientation;
        ship.angular_velocity = body.angular_velocity;
        ship.radius = hull.radius;
        ship.size = hull.size;
        ship.is_station = hull.is_station;
        ship.is_military = hull.is_military;
        ship.player_controlled = hull.player_controlled;
        ship.alive = condition.alive;
        ship.powered = condition.powered;
        ship.weapon_health = if weapon.is_some() {
            condition.weapon_health
        } else {
            0.0
        };
        ship.temperature = condition.temperature;
        ship.overheat_temperature = hull.overheat_temperature;
        ship.ammo_velocity = weapon.map(|w| w.ammo_velocity);
        ship.propulsion = hull.propulsion;
        ship.docks = docks.map(|d| d.0.clone()).unwrap_or_default();
        ship.nav_status = nav.map(|n| n.status).unwrap_or_default();
        ships.push(ship);
    }

    ships.sort_by_key(|ship| ship.id);
    WorldSnapshot::new(ships, relations.clone())
}
