//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components or is passed in.

pub mod cleanup;
pub mod heat;
pub mod movement;
pub mod navigation;
pub mod pilots;
pub mod snapshot;
pub mod weapons;
