//! Pilot tuning configuration.
//!
//! Every field defaults to the matching value in [`crate::constants`], so a
//! TOML file only needs to list what it overrides:
//!
//! ```toml
//! target_drop_distance = 800.0
//! flee_distance = 5000.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{FlightdeckError, Result};

/// Tunable thresholds used by the combat and cargo controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    // === REACTION ===
    /// Lower bound of the randomized reaction time (seconds).
    pub reaction_time_min: f64,
    /// Upper bound of the randomized reaction time (seconds).
    pub reaction_time_max: f64,

    // === COMBAT ===
    /// Current target is dropped beyond this distance (meters).
    pub target_drop_distance: f64,
    pub security_distance_dangerous: f64,
    pub security_distance_weak: f64,
    /// Target radius multiplier added to the security distance.
    pub security_radius_factor: f64,
    /// Standoff band, added to the target radius (meters).
    pub attack_distance_min: f64,
    pub attack_distance_max: f64,
    /// Muzzle velocity used for unarmed hulls (m/s).
    pub default_ammo_velocity: f64,

    // === FIRE CONTROL ===
    pub fire_window_secs: f64,
    pub fire_tolerance_dangerous: f64,
    pub fire_tolerance_weak: f64,
    pub fire_overheat_dangerous: f64,
    pub fire_overheat_weak: f64,
    pub combat_boost_overheat: f64,

    // === AVOIDANCE ===
    /// Clearance under which the dodge blend begins (meters).
    pub avoidance_threshold: f64,
    pub obstacle_radius_factor: f64,

    // === ALIGNMENT ===
    /// Fraction of the reaction time used to close the remaining error.
    pub align_brake_factor: f64,

    // === CARGO ===
    pub dock_wait_secs: f64,
    pub dock_approach_distance: f64,
    pub flee_distance: f64,
    pub imminent_danger_distance: f64,
    pub cargo_boost_overheat: f64,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            reaction_time_min: REACTION_TIME_MIN,
            reaction_time_max: REACTION_TIME_MAX,
            target_drop_distance: TARGET_DROP_DISTANCE,
            security_distance_dangerous: SECURITY_DISTANCE_DANGEROUS,
            security_distance_weak: SECURITY_DISTANCE_WEAK,
            security_radius_factor: SECURITY_RADIUS_FACTOR,
            attack_distance_min: ATTACK_DISTANCE_MIN,
            attack_distance_max: ATTACK_DISTANCE_MAX,
            default_ammo_velocity: DEFAULT_AMMO_VELOCITY,
            fire_window_secs: FIRE_WINDOW_SECS,
            fire_tolerance_dangerous: FIRE_TOLERANCE_DANGEROUS,
            fire_tolerance_weak: FIRE_TOLERANCE_WEAK,
            fire_overheat_dangerous: FIRE_OVERHEAT_DANGEROUS,
            fire_overheat_weak: FIRE_OVERHEAT_WEAK,
            combat_boost_overheat: COMBAT_BOOST_OVERHEAT,
            avoidance_threshold: AVOIDANCE_THRESHOLD,
            obstacle_radius_factor: OBSTACLE_RADIUS_FACTOR,
            align_brake_factor: ALIGN_BRAKE_FACTOR,
            dock_wait_secs: DOCK_WAIT_SECS,
            dock_approach_distance: DOCK_APPROACH_DISTANCE,
            flee_distance: FLEE_DISTANCE,
            imminent_danger_distance: IMMINENT_DANGER_DISTANCE,
            cargo_boost_overheat: CARGO_BOOST_OVERHEAT,
        }
    }
}

impl PilotConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Security distance against a target of the given radius.
    pub fn security_distance(&self, dangerous: bool, target_radius: f64) -> f64 {
        let base = if dangerous {
            self.security_distance_dangerous
        } else {
            self.security_distance_weak
        };
        base + target_radius * self.security_radius_factor
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.reaction_time_min > 0.0) {
            return Err(invalid("reaction_time_min must be positive"));
        }
        if !(self.reaction_time_max > self.reaction_time_min) {
            return Err(invalid("reaction_time_max must be > reaction_time_min"));
        }
        if self.attack_distance_max < self.attack_distance_min {
            return Err(invalid("attack_distance_max must be >= attack_distance_min"));
        }
        if !(self.align_brake_factor > 0.0) {
            return Err(invalid("align_brake_factor must be positive"));
        }
        let distances = [
            ("target_drop_distance", self.target_drop_distance),
            ("avoidance_threshold", self.avoidance_threshold),
            ("dock_approach_distance", self.dock_approach_distance),
            ("flee_distance", self.flee_distance),
            ("default_ammo_velocity", self.default_ammo_velocity),
        ];
        for (name, value) in distances {
            if !(value > 0.0) {
                return Err(invalid(&format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}

fn invalid(message: &str) -> FlightdeckError {
    FlightdeckError::InvalidConfig(message.to_string())
}
