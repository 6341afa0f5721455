//! Scenario definitions: hardcoded starting worlds.
//!
//! Each scenario places stations and ships and sets company relations.

use glam::DVec3;

use flightdeck_core::enums::{Hostility, ScenarioId, ShipSize};
use flightdeck_core::types::CompanyId;

use crate::engine::SimulationEngine;

/// Home company in every scenario.
pub const BLUE: CompanyId = CompanyId(1);
/// Opposing military.
pub const RED: CompanyId = CompanyId(2);
/// Pirates, hostile to everyone else.
pub const RAIDERS: CompanyId = CompanyId(3);

const STATION_SLOTS: [ShipSize; 3] = [ShipSize::Small, ShipSize::Small, ShipSize::Large];

/// Populate an empty engine with a built-in scenario.
pub fn populate(engine: &mut SimulationEngine, scenario: ScenarioId) {
    match scenario {
        ScenarioId::Skirmish => build_skirmish(engine),
        ScenarioId::TradeRoute => build_trade_route(engine),
        ScenarioId::Ambush => build_ambush(engine),
    }
}

/// Skirmish: three fighters a side, 3 km apart, closing head on.
/// Blue has a repair station behind its line.
fn build_skirmish(engine: &mut SimulationEngine) {
    engine.set_hostility(BLUE, RED, Hostility::Hostile);
    engine.spawn_station(BLUE, DVec3::new(-5000.0, 0.0, 0.0), &STATION_SLOTS);

    for i in 0..3 {
        let lateral = (i as f64 - 1.0) * 200.0;
        engine.spawn_fighter(
            BLUE,
            DVec3::new(-1500.0, lateral, 0.0),
            DVec3::new(40.0, 0.0, 0.0),
        );
        engine.spawn_fighter(
            RED,
            DVec3::new(1500.0, lateral, 50.0),
            DVec3::new(-40.0, 0.0, 0.0),
        );
    }
}

/// Trade route: three blue stations in a triangle, four freighters.
fn build_trade_route(engine: &mut SimulationEngine) {
    let stations = trade_stations(engine);
    for (i, station) in stations.iter().enumerate() {
        // Start beside a station, off its avoidance margin
        let offset = DVec3::new(0.0, 900.0 + 100.0 * i as f64, 0.0);
        engine.spawn_freighter(BLUE, *station + offset);
    }
    engine.spawn_freighter(BLUE, DVec3::new(3000.0, 3000.0, 0.0));
}

/// Ambush: the trade route, one escort pair, and raiders waiting mid-route.
fn build_ambush(engine: &mut SimulationEngine) {
    engine.set_hostility(BLUE, RAIDERS, Hostility::Hostile);
    engine.set_hostility(RED, RAIDERS, Hostility::Hostile);

    build_trade_route(engine);

    for i in 0..2 {
        engine.spawn_fighter(
            BLUE,
            DVec3::new(500.0, 200.0 * i as f64, 0.0),
            DVec3::new(30.0, 30.0, 0.0),
        );
    }
    for i in 0..3 {
        engine.spawn_fighter(
            RAIDERS,
            DVec3::new(4500.0, 2500.0 + 150.0 * i as f64, 100.0),
            DVec3::ZERO,
        );
    }
}

fn trade_stations(engine: &mut SimulationEngine) -> [DVec3; 3] {
    let positions = [
        DVec3::ZERO,
        DVec3::new(8000.0, 0.0, 0.0),
        DVec3::new(4000.0, 7000.0, 0.0),
    ];
    for position in positions {
        engine.spawn_station(BLUE, position, &STATION_SLOTS);
    }
    positions
}
