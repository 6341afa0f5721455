//! Pilot tuning constants and reference simulation parameters.
//!
//! The pilot values are the defaults behind [`crate::config::PilotConfig`].

// --- Reaction ---

/// Lower bound of the randomized reaction time (seconds).
pub const REACTION_TIME_MIN: f64 = 0.2;

/// Upper bound of the randomized reaction time (seconds).
pub const REACTION_TIME_MAX: f64 = 0.3;

// --- Combat targeting ---

/// A combat target farther than this is dropped (meters).
pub const TARGET_DROP_DISTANCE: f64 = 600.0;

/// Security distance against a dangerous target, before the size margin (meters).
pub const SECURITY_DISTANCE_DANGEROUS: f64 = 600.0;

/// Security distance against a harmless target, before the size margin (meters).
pub const SECURITY_DISTANCE_WEAK: f64 = 300.0;

/// Target radius multiplier added to the security distance.
pub const SECURITY_RADIUS_FACTOR: f64 = 4.0;

/// Random attack standoff band, added to the target radius (meters).
pub const ATTACK_DISTANCE_MIN: f64 = 50.0;
pub const ATTACK_DISTANCE_MAX: f64 = 100.0;

/// Muzzle velocity assumed when the ship reports no weapon (m/s).
pub const DEFAULT_AMMO_VELOCITY: f64 = 100.0;

// --- Fire control ---

/// Only fire when the projectile would reach the target within this window (seconds).
pub const FIRE_WINDOW_SECS: f64 = 1.5;

/// Allowed misalignment as a fraction of the target's angular size.
pub const FIRE_TOLERANCE_DANGEROUS: f64 = 0.25;
pub const FIRE_TOLERANCE_WEAK: f64 = 0.2;

/// Fire is suppressed above overheat temperature times this factor.
pub const FIRE_OVERHEAT_DANGEROUS: f64 = 1.1;
pub const FIRE_OVERHEAT_WEAK: f64 = 0.9;

/// Combat boost is cut above overheat temperature times this factor.
pub const COMBAT_BOOST_OVERHEAT: f64 = 0.75;

// --- Collision avoidance ---

/// Clearance under which the avoidance blend starts (meters).
pub const AVOIDANCE_THRESHOLD: f64 = 100.0;

/// Obstacle radius multiplier subtracted from center distance.
pub const OBSTACLE_RADIUS_FACTOR: f64 = 4.0;

/// Weight of the lateral dodge relative to the retreat direction.
pub const AVOIDANCE_LATERAL_GAIN: f64 = 4.0;

// --- Alignment ---

/// Fraction of the reaction time over which the remaining error is closed.
pub const ALIGN_BRAKE_FACTOR: f64 = 0.75;

/// Squared angular velocity delta under which rates are considered matched.
pub const ANGULAR_MATCH_EPSILON: f64 = 1e-8;

/// Acceleration (deg/s²) under which the time-to-match estimate short-circuits to zero.
pub const ANGULAR_ACCEL_EPSILON: f64 = 1e-6;

// --- Cargo ---

/// Dwell time at a station before undocking (seconds).
pub const DOCK_WAIT_SECS: f64 = 10.0;

/// Docking is requested inside this distance to the target station (meters).
pub const DOCK_APPROACH_DISTANCE: f64 = 1000.0;

/// Cargo ships flee dangerous hostiles inside this distance (meters).
pub const FLEE_DISTANCE: f64 = 4000.0;

/// Hostiles inside this distance count as imminent danger (meters).
pub const IMMINENT_DANGER_DISTANCE: f64 = 1000.0;

/// Cargo boost is cut above overheat temperature times this factor, unless in imminent danger.
pub const CARGO_BOOST_OVERHEAT: f64 = 0.95;

// --- Geometry guards ---

/// Distances below this are treated as coincident (meters).
pub const MIN_DISTANCE: f64 = 1e-3;

// --- Reference simulation ---

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default fixed frame rate (Hz).
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Linear acceleration toward the commanded velocity (m/s²).
pub const LINEAR_ACCELERATION: f64 = 40.0;

/// Acceleration multiplier while the orbital boost is on.
pub const BOOST_ACCELERATION_FACTOR: f64 = 2.0;

/// Ships closer than this to a station surface complete docking (meters).
pub const DOCKING_RANGE: f64 = 30.0;

/// Autopilot approach speed cap as a fraction of max speed.
pub const AUTOPILOT_SPEED_FACTOR: f64 = 0.5;

/// Heat added per second of boosting.
pub const BOOST_HEAT_RATE: f64 = 120.0;

/// Heat added per shot.
pub const SHOT_HEAT: f64 = 15.0;

/// Fraction of current temperature shed per second.
pub const COOLING_RATE: f64 = 0.1;

/// Minimum time between two shots of one weapon (seconds).
pub const FIRE_INTERVAL_SECS: f64 = 0.2;

/// Muzzle velocity of the standard fighter gun (m/s).
pub const FIGHTER_AMMO_VELOCITY: f64 = 600.0;
