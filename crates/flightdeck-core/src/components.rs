//! Plain data carried by pilots and read from the world.
//!
//! `PilotState` and `PilotOutput` belong to one ship's pilot. `ShipSnapshot`
//! is the frame-stable, read-only view of any entity that pilots scan.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::{AttackPhase, NavigationStatus, ShipSize};
use crate::types::{CompanyId, EntityId};

/// Persistent decision state of one ship's pilot.
///
/// Serializable so an external save system can round-trip it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotState {
    /// Seconds between decisions, fixed per pilot.
    pub reaction_time: f64,
    /// Countdown to the next decision.
    pub time_until_next_reaction: f64,
    pub attack_phase: AttackPhase,
    /// Offset angle (degrees) biasing the attack and dodge directions.
    pub attack_angle: f64,
    /// Standoff distance (meters), valid only for `combat_target`.
    pub attack_distance: f64,
    /// Distance to the combat target at the previous decision.
    pub last_target_distance: f64,
    /// Time spent docked, for cargo dwell.
    pub wait_time: f64,
    pub combat_target: Option<EntityId>,
    pub station_target: Option<EntityId>,
    /// Last visited station, never picked twice in a row.
    pub last_station_target: Option<EntityId>,
}

impl PilotState {
    pub fn new(reaction_time: f64, attack_angle: f64) -> Self {
        Self {
            reaction_time,
            time_until_next_reaction: 0.0,
            attack_phase: AttackPhase::default(),
            attack_angle,
            attack_distance: 0.0,
            last_target_distance: 0.0,
            wait_time: 0.0,
            combat_target: None,
            station_target: None,
            last_station_target: None,
        }
    }
}

/// Commands published to the actuation layer once per reaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotOutput {
    /// Desired linear velocity (m/s, world frame).
    pub linear_target_velocity: DVec3,
    /// Desired angular velocity (deg/s, world frame).
    pub angular_target_velocity: DVec3,
    pub want_fire: bool,
    pub use_orbital_boost: bool,
}

/// Motion limits of a hull.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Propulsion {
    /// m/s
    pub max_linear_speed: f64,
    /// deg/s
    pub max_angular_speed: f64,
    /// Undamaged angular acceleration rate (deg/s²).
    pub angular_acceleration: f64,
    /// Healthy maximum torque per world axis.
    pub max_torque: DVec3,
    /// Torque currently available per world axis, after damage.
    pub available_torque: DVec3,
}

impl Default for Propulsion {
    fn default() -> Self {
        Self {
            max_linear_speed: 100.0,
            max_angular_speed: 60.0,
            angular_acceleration: 90.0,
            max_torque: DVec3::ONE,
            available_torque: DVec3::ONE,
        }
    }
}

impl Propulsion {
    /// Ratio of damaged to healthy torque along a unit axis.
    pub fn damage_ratio(&self, axis: DVec3) -> f64 {
        let healthy = torque_in_axis(self.max_torque, axis);
        if healthy <= f64::EPSILON {
            return 0.0;
        }
        torque_in_axis(self.available_torque, axis) / healthy
    }
}

fn torque_in_axis(torque: DVec3, axis: DVec3) -> f64 {
    axis.abs().dot(torque)
}

/// One docking port of a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockSlot {
    pub size: ShipSize,
    /// Ship cleared to approach this slot.
    pub granted: Option<EntityId>,
    /// Ship currently attached.
    pub occupant: Option<EntityId>,
}

impl DockSlot {
    pub fn free(size: ShipSize) -> Self {
        Self {
            size,
            granted: None,
            occupant: None,
        }
    }

    pub fn is_available(&self, size: ShipSize) -> bool {
        self.size == size && self.granted.is_none() && self.occupant.is_none()
    }
}

/// Frame-stable view of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipSnapshot {
    pub id: EntityId,
    pub company: CompanyId,
    pub position: DVec3,
    pub velocity: DVec3,
    /// Local to world rotation. Nose is local +X, top is local +Z.
    pub orientation: DQuat,
    /// deg/s, world frame.
    pub angular_velocity: DVec3,
    /// Hull radius (meters).
    pub radius: f64,
    pub size: ShipSize,
    pub is_station: bool,
    pub is_military: bool,
    pub player_controlled: bool,
    pub alive: bool,
    pub powered: bool,
    /// Weapon subsystem health in `0.0..=1.0`.
    pub weapon_health: f64,
    pub temperature: f64,
    pub overheat_temperature: f64,
    /// Muzzle velocity of the first weapon, if armed (m/s).
    pub ammo_velocity: Option<f64>,
    pub propulsion: Propulsion,
    pub docks: Vec<DockSlot>,
    pub nav_status: NavigationStatus,
}

impl ShipSnapshot {
    /// Alive, powered, unarmed small hull at rest at the origin.
    pub fn new(id: EntityId, company: CompanyId) -> Self {
        Self {
            id,
            company,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            angular_velocity: DVec3::ZERO,
            radius: 10.0,
            size: ShipSize::Small,
            is_station: false,
            is_military: false,
            player_controlled: false,
            alive: true,
            powered: true,
            weapon_health: 1.0,
            temperature: 0.0,
            overheat_temperature: 1000.0,
            ammo_velocity: None,
            propulsion: Propulsion::default(),
            docks: Vec::new(),
            nav_status: NavigationStatus::Free,
        }
    }

    /// Military hull with a working weapon subsystem.
    pub fn is_dangerous(&self) -> bool {
        self.is_military && self.weapon_health > 0.0
    }

    /// Number of docking ports, free or not.
    pub fn dock_count(&self) -> usize {
        self.docks.len()
    }

    pub fn has_available_dock(&self, size: ShipSize) -> bool {
        self.docks.iter().any(|slot| slot.is_available(size))
    }

    /// Whether `ship` has been cleared to dock here.
    pub fn is_granted(&self, ship: EntityId) -> bool {
        self.docks.iter().any(|slot| slot.granted == Some(ship))
    }

    /// Whether `ship` is attached to one of our ports.
    pub fn is_docked(&self, ship: EntityId) -> bool {
        self.docks.iter().any(|slot| slot.occupant == Some(ship))
    }

    /// Nose direction in world space.
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::X
    }

    /// Top direction in world space.
    pub fn up(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Heat relative to the overheat threshold.
    pub fn is_hotter_than(&self, overheat_factor: f64) -> bool {
        self.temperature > self.overheat_temperature * overheat_factor
    }
}
