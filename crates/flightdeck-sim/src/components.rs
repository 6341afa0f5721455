//! ECS components owned by the reference simulation.
//!
//! Pilots never see these directly: the snapshot system flattens them into
//! [`ShipSnapshot`](flightdeck_core::components::ShipSnapshot)s once per frame.

use glam::{DQuat, DVec3};
use hecs::Entity;

use flightdeck_core::components::{DockSlot, Propulsion};
use flightdeck_core::enums::{NavigationStatus, ShipSize};
use flightdeck_core::types::{CompanyId, EntityId};

/// Kinematic state, world frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: DVec3,
    pub velocity: DVec3,
    pub orientation: DQuat,
    /// deg/s
    pub angular_velocity: DVec3,
}

impl Body {
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            angular_velocity: DVec3::ZERO,
        }
    }
}

/// Static description of a hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hull {
    pub company: CompanyId,
    pub radius: f64,
    pub size: ShipSize,
    pub is_station: bool,
    pub is_military: bool,
    pub player_controlled: bool,
    pub overheat_temperature: f64,
    pub propulsion: Propulsion,
}

/// Mutable health and heat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition {
    pub alive: bool,
    pub powered: bool,
    pub weapon_health: f64,
    pub temperature: f64,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            alive: true,
            powered: true,
            weapon_health: 1.0,
            temperature: 0.0,
        }
    }
}

/// Forward gun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub ammo_velocity: f64,
    /// Seconds until the next shot is possible.
    pub cooldown: f64,
}

/// Docking ports of a station.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Docks(pub Vec<DockSlot>);

/// Navigation state of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Nav {
    pub status: NavigationStatus,
    /// Station granted or docked at.
    pub station: Option<EntityId>,
}

/// Identifier pilots use for an ECS entity.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// ECS entity behind an identifier, if the bits are valid.
pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
