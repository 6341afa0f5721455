//! Core types and definitions for the FLIGHTDECK pilot system.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity snapshots, pilot state, collaborator traits, events, configuration
//! and constants. It has no dependency on any simulation runtime.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod types;
pub mod world;

pub use error::{FlightdeckError, Result};
