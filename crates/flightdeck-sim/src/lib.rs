//! Reference simulation for FLIGHTDECK pilots.
//!
//! Owns the hecs ECS world, snapshots it once per frame, ticks every ship
//! pilot against that snapshot and stands in for the navigation, actuation
//! and heat layers that consume pilot commands.

pub mod components;
pub mod engine;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use engine::{FrameReport, SimConfig, SimulationEngine};
pub use flightdeck_core as core;

#[cfg(test)]
mod tests;
