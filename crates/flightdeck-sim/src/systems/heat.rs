//! Heat system: boost heating and passive cooling.

use hecs::World;

use flightdeck_core::constants::{BOOST_HEAT_RATE, COOLING_RATE};
use flightdeck_core::enums::NavigationStatus;
use flightdeck_pilot::ShipPilot;

use crate::components::{Condition, Nav};

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (condition, nav, pilot)) in
        world.query_mut::<(&mut Condition, Option<&Nav>, Option<&ShipPilot>)>()
    {
        let boosting = matches!(
            (nav, pilot),
            (Some(nav), Some(pilot))
                if nav.status == NavigationStatus::Free && pilot.output().use_orbital_boost
        );
        if boosting {
            condition.temperature += BOOST_HEAT_RATE * dt;
        }
        condition.temperature = (condition.temperature * (1.0 - COOLING_RATE * dt)).max(0.0);
    }
}
