//! Navigation system: docking clearances and the per-ship command port.
//!
//! Pilots talk to navigation through a [`NavigationPort`]. Ports share one
//! [`DockBook`] per frame so two ships can never be granted the same slot,
//! even though every pilot reads the same frozen snapshot.

use std::collections::HashMap;

use hecs::World;
use tracing::{debug, info};

use flightdeck_core::components::DockSlot;
use flightdeck_core::enums::{Hostility, NavigationStatus, ShipSize};
use flightdeck_core::types::{CompanyId, EntityId};
use flightdeck_core::world::{CompanyRelations, Navigation, WorldSnapshot, WorldView};

use crate::components::{entity_id, entity_of, Docks, Nav};

/// A navigation command issued by a pilot during the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Undock,
    DockAt { station: EntityId, slot: usize },
    ForceManual,
}

/// Working copy of every station's dock slots for the current frame.
#[derive(Debug, Clone, Default)]
pub struct DockBook {
    slots: HashMap<EntityId, Vec<DockSlot>>,
}

impl DockBook {
    pub fn from_snapshot(snapshot: &WorldSnapshot) -> Self {
        let slots = snapshot
            .ships()
            .iter()
            .filter(|ship| ship.dock_count() > 0)
            .map(|ship| (ship.id, ship.docks.clone()))
            .collect();
        Self { slots }
    }

    /// Grant `ship` a free slot of its size. An existing grant is returned as is.
    pub fn reserve(&mut self, station: EntityId, ship: EntityId, size: ShipSize) -> Option<usize> {
        let slots = self.slots.get_mut(&station)?;
        if let Some(index) = slots.iter().position(|slot| slot.granted == Some(ship)) {
            return Some(index);
        }
        let index = slots.iter().position(|slot| slot.is_available(size))?;
        slots[index].granted = Some(ship);
        Some(index)
    }

    /// Turn the grant held by `ship` at `station` into an occupied slot.
    pub fn occupy(&mut self, station: EntityId, ship: EntityId) -> bool {
        let Some(slots) = self.slots.get_mut(&station) else {
            return false;
        };
        match slots.iter_mut().find(|slot| slot.granted == Some(ship)) {
            Some(slot) => {
                slot.granted = None;
                slot.occupant = Some(ship);
                true
            }
            None => false,
        }
    }

    /// Drop every grant and occupancy held by `ship`.
    pub fn release(&mut self, ship: EntityId) {
        for slot in self.slots.values_mut().flat_map(|slots| slots.iter_mut()) {
            if slot.granted == Some(ship) {
                slot.granted = None;
            }
            if slot.occupant == Some(ship) {
                slot.occupant = None;
            }
        }
    }

    pub fn slots(&self, station: EntityId) -> Option<&[DockSlot]> {
        self.slots.get(&station).map(Vec::as_slice)
    }
}

/// Navigation collaborator handed to one pilot for one tick.
pub struct NavigationPort<'a> {
    ship: EntityId,
    company: CompanyId,
    size: ShipSize,
    status: NavigationStatus,
    snapshot: &'a WorldSnapshot,
    book: &'a mut DockBook,
    commands: Vec<NavCommand>,
}

impl<'a> NavigationPort<'a> {
    pub fn new(
        ship: EntityId,
        status: NavigationStatus,
        snapshot: &'a WorldSnapshot,
        book: &'a mut DockBook,
    ) -> Self {
        let (company, size) = snapshot
            .ship(ship)
            .map(|s| (s.company, s.size))
            .unwrap_or_default();
        Self {
            ship,
            company,
            size,
            status,
            snapshot,
            book,
            commands: Vec::new(),
        }
    }

    pub fn into_commands(self) -> Vec<NavCommand> {
        self.commands
    }
}

impl Navigation for NavigationPort<'_> {
    fn status(&self) -> NavigationStatus {
        self.status
    }

    fn undock(&mut self) {
        if self.status != NavigationStatus::Docked {
            return;
        }
        self.book.release(self.ship);
        self.status = NavigationStatus::Free;
        self.commands.push(NavCommand::Undock);
    }

    fn dock_at(&mut self, station: EntityId) -> bool {
        if self.status == NavigationStatus::Docked {
            return false;
        }
        let Some(target) = self.snapshot.ship(station) else {
            return false;
        };
        if !target.alive
            || self.snapshot.hostility(self.company, target.company) == Hostility::Hostile
        {
            return false;
        }
        match self.book.reserve(station, self.ship, self.size) {
            Some(slot) => {
                self.status = NavigationStatus::AutoPilot;
                self.commands.push(NavCommand::DockAt { station, slot });
                true
            }
            None => false,
        }
    }

    fn force_manual(&mut self) {
        if self.status != NavigationStatus::AutoPilot {
            return;
        }
        self.book.release(self.ship);
        self.status = NavigationStatus::Free;
        self.commands.push(NavCommand::ForceManual);
    }
}

/// Apply the commands issued by pilots to their ships' navigation state.
pub fn apply(world: &mut World, commands: &[(EntityId, Vec<NavCommand>)]) {
    for (ship, issued) in commands {
        let Some(entity) = entity_of(*ship) else {
            continue;
        };
        let Ok(mut nav) = world.get::<&mut Nav>(entity) else {
            continue;
        };
        for command in issued {
            match *command {
                NavCommand::Undock => {
                    info!(ship = %ship, station = ?nav.station, "undocked");
                    nav.status = NavigationStatus::Free;
                    nav.station = None;
                }
                NavCommand::DockAt { station, slot } => {
                    debug!(ship = %ship, %station, slot, "docking clearance granted");
                    nav.status = NavigationStatus::AutoPilot;
                    nav.station = Some(station);
                }
                NavCommand::ForceManual => {
                    debug!(ship = %ship, "docking maneuver aborted");
                    nav.status = NavigationStatus::Free;
                    nav.station = None;
                }
            }
        }
    }
}

/// Write the frame's dock book back into the station components.
pub fn commit(world: &mut World, book: &DockBook) {
    for (entity, docks) in world.query_mut::<&mut Docks>() {
        if let Some(slots) = book.slots(entity_id(entity)) {
            docks.0.clear();
            docks.0.extend_from_slice(slots);
        }
    }
}
