//! FLIGHTDECK headless runner.
//!
//! Drives the reference simulation on a game loop thread and logs what
//! the pilots decide.

pub mod game_loop;

pub use flightdeck_core as core;
