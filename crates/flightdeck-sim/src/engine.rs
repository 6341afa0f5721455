//! Simulation engine for the reference world.
//!
//! `SimulationEngine` owns the hecs ECS world, runs all systems at a fixed
//! frame rate and reports what the pilots decided. Completely headless and
//! deterministic: the same seed and scenario give the same reports.

use std::path::Path;

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use flightdeck_core::components::{PilotState, ShipSnapshot};
use flightdeck_core::config::PilotConfig;
use flightdeck_core::constants::{DEFAULT_FRAME_RATE, DEFAULT_SEED};
use flightdeck_core::enums::{Hostility, ScenarioId, ShipSize};
use flightdeck_core::error::{FlightdeckError, Result};
use flightdeck_core::events::PilotEvent;
use flightdeck_core::types::{CompanyId, EntityId, SimTime};
use flightdeck_core::world::{RelationTable, WorldSnapshot, WorldView};
use flightdeck_pilot::ShipPilot;

use crate::components::{entity_id, entity_of, Condition};
use crate::scenario;
use crate::systems;
use crate::systems::navigation::DockBook;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Fixed frames per second.
    pub frame_rate: u32,
    /// Tuning shared by every pilot.
    pub pilot: PilotConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frame_rate: DEFAULT_FRAME_RATE,
            pilot: PilotConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document. Pilot overrides go in a `[pilot]` table.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            return Err(FlightdeckError::InvalidConfig(
                "frame_rate must be positive".to_string(),
            ));
        }
        self.pilot.validate()
    }

    /// Seconds per frame.
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.frame_rate)
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Time at the end of the frame.
    pub time: SimTime,
    pub events: Vec<PilotEvent>,
    pub shots_fired: u32,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    relations: RelationTable,
    time: SimTime,
    rng: ChaCha8Rng,
    config: SimConfig,
    despawn_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create an empty world with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            relations: RelationTable::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            despawn_buffer: Vec::new(),
        }
    }

    /// Create a world populated with a built-in scenario.
    pub fn with_scenario(config: SimConfig, scenario: ScenarioId) -> Self {
        let mut engine = Self::new(config);
        scenario::populate(&mut engine, scenario);
        info!(%scenario, entities = engine.world.len(), "scenario loaded");
        engine
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self) -> FrameReport {
        let dt = self.config.dt();
        let mut events = Vec::new();

        // 1. Freeze the world for this frame
        let snapshot = systems::snapshot::build(&self.world, &self.relations);
        let mut book = DockBook::from_snapshot(&snapshot);
        // 2. Pilot decisions
        let commands = systems::pilots::run(
            &mut self.world,
            &snapshot,
            &mut book,
            &mut self.rng,
            dt,
            &mut events,
        );
        // 3. Navigation commands
        systems::navigation::apply(&mut self.world, &commands);
        // 4. Movement, autopilot and docking
        systems::movement::run(&mut self.world, &mut book, dt);
        systems::navigation::commit(&mut self.world, &book);
        // 5. Weapons and heat
        let shots_fired = systems::weapons::run(&mut self.world, dt);
        systems::heat::run(&mut self.world, dt);
        // 6. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        self.time.advance(dt);
        if !events.is_empty() {
            debug!(frame = self.time.frame, count = events.len(), "pilot events");
        }

        FrameReport {
            time: self.time,
            events,
            shots_fired,
        }
    }

    /// Run `seconds` of simulated time and collect every frame report.
    pub fn run_for(&mut self, seconds: f64) -> Vec<FrameReport> {
        let frames = (seconds * f64::from(self.config.frame_rate)).round() as u64;
        (0..frames).map(|_| self.tick()).collect()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn relations(&self) -> &RelationTable {
        &self.relations
    }

    pub fn set_hostility(&mut self, a: CompanyId, b: CompanyId, hostility: Hostility) {
        self.relations.set(a, b, hostility);
    }

    /// Snapshot of the world as pilots would see it right now.
    pub fn snapshot(&self) -> WorldSnapshot {
        systems::snapshot::build(&self.world, &self.relations)
    }

    /// Current view of one entity.
    pub fn ship(&self, id: EntityId) -> Option<ShipSnapshot> {
        self.snapshot().ship(id).cloned()
    }

    /// Saved decision state of a ship's pilot.
    pub fn pilot_state(&self, id: EntityId) -> Option<PilotState> {
        let entity = entity_of(id)?;
        let pilot = self.world.get::<&ShipPilot>(entity).ok()?;
        Some(pilot.state().clone())
    }

    /// Replace a ship's pilot with one rebuilt from saved state.
    pub fn restore_pilot(&mut self, id: EntityId, state: PilotState) -> bool {
        let Some(entity) = entity_of(id) else {
            return false;
        };
        let Ok(mut pilot) = self.world.get::<&mut ShipPilot>(entity) else {
            return false;
        };
        *pilot = ShipPilot::restore(id, state, pilot.config().clone());
        true
    }

    /// Mark an entity destroyed. It is despawned at the end of the next frame.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Some(entity) = entity_of(id) else {
            return false;
        };
        match self.world.get::<&mut Condition>(entity) {
            Ok(mut condition) => {
                condition.alive = false;
                true
            }
            Err(_) => false,
        }
    }

    pub fn spawn_station(
        &mut self,
        company: CompanyId,
        position: DVec3,
        slots: &[ShipSize],
    ) -> EntityId {
        entity_id(world_setup::spawn_station(
            &mut self.world,
            company,
            position,
            slots,
        ))
    }

    pub fn spawn_fighter(&mut self, company: CompanyId, position: DVec3, velocity: DVec3) -> EntityId {
        entity_id(world_setup::spawn_fighter(
            &mut self.world,
            &mut self.rng,
            &self.config.pilot,
            company,
            position,
            velocity,
        ))
    }

    pub fn spawn_freighter(&mut self, company: CompanyId, position: DVec3) -> EntityId {
        entity_id(world_setup::spawn_freighter(
            &mut self.world,
            &mut self.rng,
            &self.config.pilot,
            company,
            position,
        ))
    }
}
