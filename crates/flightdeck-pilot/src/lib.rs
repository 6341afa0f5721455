//! Ship pilot decision core for FLIGHTDECK.
//!
//! Turns a frame snapshot of the world into per-ship velocity, fire and
//! boost commands for combat and cargo hulls, once per reaction interval.

pub mod acquisition;
pub mod alignment;
pub mod attack;
pub mod avoidance;
pub mod ballistics;
pub mod cargo;
pub mod combat;
pub mod pilot;

pub use flightdeck_core as core;
pub use pilot::{PilotContext, ShipPilot};
