//! Target acquisition queries over a frame snapshot.
//!
//! All scans walk the world in its enumeration order and keep the first
//! candidate on exact distance ties.

use flightdeck_core::components::ShipSnapshot;
use flightdeck_core::enums::Hostility;
use flightdeck_core::types::EntityId;
use flightdeck_core::world::{CompanyRelations, WorldView};

/// Nearest alive entity of a hostile company. With `dangerous_only`, only
/// armed military hulls qualify.
pub fn nearest_hostile_ship<'w>(
    world: &'w dyn WorldView,
    relations: &dyn CompanyRelations,
    ship: &ShipSnapshot,
    dangerous_only: bool,
) -> Option<&'w ShipSnapshot> {
    nearest(world, ship, |candidate| {
        candidate.alive
            && (!dangerous_only || candidate.is_dangerous())
            && relations.hostility(ship.company, candidate.company) == Hostility::Hostile
    })
}

/// Nearest other entity, for collision avoidance.
///
/// With `ignore_docking_ship`, entities docked to `ship` and alive, powered
/// entities `ship` has cleared to dock are skipped: they are not threats.
pub fn nearest_ship<'w>(
    world: &'w dyn WorldView,
    ship: &ShipSnapshot,
    ignore_docking_ship: bool,
) -> Option<&'w ShipSnapshot> {
    nearest(world, ship, |candidate| {
        if candidate.id == ship.id {
            return false;
        }
        if ignore_docking_ship {
            if ship.is_granted(candidate.id) && candidate.alive && candidate.powered {
                return false;
            }
            if ship.is_docked(candidate.id) {
                return false;
            }
        }
        true
    })
}

/// Nearest station of our company with a free dock for our hull size.
pub fn nearest_available_station<'w>(
    world: &'w dyn WorldView,
    ship: &ShipSnapshot,
) -> Option<&'w ShipSnapshot> {
    nearest(world, ship, |candidate| {
        candidate.is_station
            && candidate.company == ship.company
            && candidate.has_available_dock(ship.size)
    })
}

/// Every entity of our company with at least one dock, in enumeration order.
pub fn friendly_stations(world: &dyn WorldView, ship: &ShipSnapshot) -> Vec<EntityId> {
    world
        .ships()
        .iter()
        .filter(|candidate| candidate.dock_count() > 0 && candidate.company == ship.company)
        .map(|candidate| candidate.id)
        .collect()
}

/// Minimum squared distance scan; strict comparison keeps the first of equals.
fn nearest<'w>(
    world: &'w dyn WorldView,
    ship: &ShipSnapshot,
    mut accept: impl FnMut(&ShipSnapshot) -> bool,
) -> Option<&'w ShipSnapshot> {
    let mut best: Option<(&ShipSnapshot, f64)> = None;
    for candidate in world.ships() {
        if !accept(candidate) {
            continue;
        }
        let distance_sq = candidate.position.distance_squared(ship.position);
        match best {
            Some((_, min)) if distance_sq >= min => {}
            _ => best = Some((candidate, distance_sq)),
        }
    }
    best.map(|(candidate, _)| candidate)
}
