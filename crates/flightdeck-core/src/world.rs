//! Collaborator seams between the pilot core and the surrounding simulation.
//!
//! Pilots only read the world through [`WorldView`] and [`CompanyRelations`],
//! and only act on it through [`Navigation`]. [`WorldSnapshot`] is the
//! frame-stable implementation built once per frame before any pilot runs.

use std::collections::HashMap;

use crate::components::ShipSnapshot;
use crate::enums::{Hostility, NavigationStatus};
use crate::types::{CompanyId, EntityId};

/// Read-only enumeration of live entities.
pub trait WorldView {
    /// All entities, in a stable order for the frame.
    fn ships(&self) -> &[ShipSnapshot];

    /// Resolve an identifier. `None` once the entity is gone.
    fn ship(&self, id: EntityId) -> Option<&ShipSnapshot> {
        self.ships().iter().find(|ship| ship.id == id)
    }
}

/// Diplomatic lookup between companies.
pub trait CompanyRelations {
    fn hostility(&self, a: CompanyId, b: CompanyId) -> Hostility;
}

/// Command channel to the navigation system of the piloted ship.
pub trait Navigation {
    fn status(&self) -> NavigationStatus;

    fn undock(&mut self);

    /// Request a docking maneuver. `true` if the station accepted.
    fn dock_at(&mut self, station: EntityId) -> bool;

    /// Abort any autopilot maneuver and hand motion back to the pilot.
    fn force_manual(&mut self);
}

/// Symmetric hostility table. Pairs not listed are neutral.
#[derive(Debug, Clone, Default)]
pub struct RelationTable {
    entries: HashMap<(CompanyId, CompanyId), Hostility>,
}

impl RelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, a: CompanyId, b: CompanyId, hostility: Hostility) {
        self.entries.insert(Self::key(a, b), hostility);
    }

    /// Builder form of [`RelationTable::set`] for hostile pairs.
    pub fn with_hostile(mut self, a: CompanyId, b: CompanyId) -> Self {
        self.set(a, b, Hostility::Hostile);
        self
    }

    fn key(a: CompanyId, b: CompanyId) -> (CompanyId, CompanyId) {
        if a.0 <= b.0 {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl CompanyRelations for RelationTable {
    fn hostility(&self, a: CompanyId, b: CompanyId) -> Hostility {
        if a == b {
            return Hostility::Friendly;
        }
        self.entries
            .get(&Self::key(a, b))
            .copied()
            .unwrap_or_default()
    }
}

/// Entity list plus relations, captured once per frame.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    pub ships: Vec<ShipSnapshot>,
    pub relations: RelationTable,
    index: HashMap<EntityId, usize>,
}

impl WorldSnapshot {
    pub fn new(ships: Vec<ShipSnapshot>, relations: RelationTable) -> Self {
        let index = ships
            .iter()
            .enumerate()
            .map(|(i, ship)| (ship.id, i))
            .collect();
        Self {
            ships,
            relations,
            index,
        }
    }
}

impl WorldView for WorldSnapshot {
    fn ships(&self) -> &[ShipSnapshot] {
        &self.ships
    }

    fn ship(&self, id: EntityId) -> Option<&ShipSnapshot> {
        self.index.get(&id).and_then(|&i| self.ships.get(i))
    }
}

impl CompanyRelations for WorldSnapshot {
    fn hostility(&self, a: CompanyId, b: CompanyId) -> Hostility {
        self.relations.hostility(a, b)
    }
}
