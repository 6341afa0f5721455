//! Weapons system: turns fire intent into counted shots.
//!
//! Projectiles are not simulated. A shot only costs heat and starts the
//! weapon cooldown.

use hecs::World;
use tracing::trace;

use flightdeck_core::constants::{FIRE_INTERVAL_SECS, SHOT_HEAT};
use flightdeck_core::enums::NavigationStatus;
use flightdeck_pilot::ShipPilot;

use crate::components::{Condition, Nav, Weapon};

/// Fire every ready weapon whose pilot wants to. Returns the shot count.
pub fn run(world: &mut World, dt: f64) -> u32 {
    let mut shots = 0;

    for (_entity, (pilot, nav, weapon, condition)) in
        world.query_mut::<(&ShipPilot, &Nav, &mut Weapon, &mut Condition)>()
    {
        weapon.cooldown = (weapon.cooldown - dt).max(0.0);

        let ready = weapon.cooldown <= 0.0
            && condition.weapon_health > 0.0
            && nav.status == NavigationStatus::Free;
        if ready && pilot.output().want_fire {
            weapon.cooldown = FIRE_INTERVAL_SECS;
            condition.temperature += SHOT_HEAT;
            shots += 1;
            trace!(ship = %pilot.ship(), "shot fired");
        }
    }

    shots
}
