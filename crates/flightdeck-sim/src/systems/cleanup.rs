//! Cleanup system: removes destroyed entities.

use hecs::{Entity, World};
use tracing::info;

use crate::components::{entity_id, Condition, Docks, Nav};

/// Despawn every entity that is no longer alive and free the dock slots it held.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, condition) in world.query_mut::<&Condition>() {
        if !condition.alive {
            despawn_buffer.push(entity);
        }
    }

    if despawn_buffer.is_empty() {
        return;
    }

    let gone: Vec<_> = despawn_buffer.iter().map(|&entity| entity_id(entity)).collect();

    for (_entity, docks) in world.query_mut::<&mut Docks>() {
        for slot in docks.0.iter_mut() {
            if slot.granted.is_some_and(|ship| gone.contains(&ship)) {
                slot.granted = None;
            }
            if slot.occupant.is_some_and(|ship| gone.contains(&ship)) {
                slot.occupant = None;
            }
        }
    }

    // Ships docked at a destroyed station are cast loose
    for (_entity, nav) in world.query_mut::<&mut Nav>() {
        if nav.station.is_some_and(|station| gone.contains(&station)) {
            nav.station = None;
            nav.status = Default::default();
        }
    }

    for entity in despawn_buffer.drain(..) {
        info!(entity = %entity_id(entity), "despawned");
        let _ = world.despawn(entity);
    }
}
