//! Pilot system: ticks every ship pilot against the frame snapshot.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use flightdeck_core::events::PilotEvent;
use flightdeck_core::types::EntityId;
use flightdeck_core::world::WorldSnapshot;
use flightdeck_pilot::{PilotContext, ShipPilot};

use crate::components::Nav;
use crate::systems::navigation::{DockBook, NavCommand, NavigationPort};

/// Tick all pilots. Returns the navigation commands each pilot issued.
pub fn run(
    world: &mut World,
    snapshot: &WorldSnapshot,
    book: &mut DockBook,
    rng: &mut ChaCha8Rng,
    delta_seconds: f64,
    events: &mut Vec<PilotEvent>,
) -> Vec<(EntityId, Vec<NavCommand>)> {
    let mut issued = Vec::new();

    for (_entity, (pilot, nav)) in world.query_mut::<(&mut ShipPilot, &Nav)>() {
        let ship = pilot.ship();
        let mut port = NavigationPort::new(ship, nav.status, snapshot, &mut *book);
        let mut ctx = PilotContext {
            world: snapshot,
            relations: snapshot,
            navigation: &mut port,
            rng: &mut *rng,
            events: &mut *events,
        };
        pilot.tick(delta_seconds, &mut ctx);

        let commands = port.into_commands();
        if !commands.is_empty() {
            issued.push((ship, commands));
        }
    }

    issued
}
