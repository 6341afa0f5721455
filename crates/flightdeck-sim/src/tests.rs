//! Tests for the simulation engine, navigation port and scenarios.

use glam::DVec3;

use flightdeck_core::components::PilotState;
use flightdeck_core::enums::{AttackPhase, Hostility, NavigationStatus, ScenarioId, ShipSize};
use flightdeck_core::error::FlightdeckError;
use flightdeck_core::events::{PilotEvent, PilotEventKind};
use flightdeck_core::types::{CompanyId, EntityId};
use flightdeck_core::world::WorldView;

use crate::components::{Body, Hull};
use crate::engine::{FrameReport, SimConfig, SimulationEngine};
use crate::scenario::{BLUE, RAIDERS, RED};
use crate::systems::movement::{integrate, MotionCommand};

fn events_of(reports: &[FrameReport]) -> Vec<PilotEvent> {
    reports.iter().flat_map(|r| r.events.iter().cloned()).collect()
}

fn ships_json(engine: &SimulationEngine) -> String {
    serde_json::to_string(&engine.snapshot().ships).unwrap()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::with_scenario(
        SimConfig {
            seed: 12345,
            ..Default::default()
        },
        ScenarioId::Ambush,
    );
    let mut engine_b = SimulationEngine::with_scenario(
        SimConfig {
            seed: 12345,
            ..Default::default()
        },
        ScenarioId::Ambush,
    );

    for _ in 0..600 {
        let report_a = engine_a.tick();
        let report_b = engine_b.tick();
        assert_eq!(
            serde_json::to_string(&report_a).unwrap(),
            serde_json::to_string(&report_b).unwrap(),
            "Reports diverged with same seed"
        );
    }
    assert_eq!(ships_json(&engine_a), ships_json(&engine_b));
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::with_scenario(
        SimConfig {
            seed: 111,
            ..Default::default()
        },
        ScenarioId::Skirmish,
    );
    let mut engine_b = SimulationEngine::with_scenario(
        SimConfig {
            seed: 222,
            ..Default::default()
        },
        ScenarioId::Skirmish,
    );

    engine_a.run_for(5.0);
    engine_b.run_for(5.0);
    assert_ne!(
        ships_json(&engine_a),
        ships_json(&engine_b),
        "Different seeds should produce divergent worlds"
    );
}

// ---- Config ----

#[test]
fn test_sim_config_from_toml() {
    let config = SimConfig::from_toml_str(
        "seed = 7\nframe_rate = 30\n\n[pilot]\nflee_distance = 5000.0\n",
    )
    .unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.frame_rate, 30);
    assert_eq!(config.pilot.flee_distance, 5000.0);
    assert_eq!(config.pilot.dock_wait_secs, 10.0);
    assert!((config.dt() - 1.0 / 30.0).abs() < 1e-12);

    let result = SimConfig::from_toml_str("frame_rate = 0\n");
    assert!(matches!(result, Err(FlightdeckError::InvalidConfig(_))));
}

#[test]
fn test_run_for_counts_frames() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let reports = engine.run_for(2.0);
    assert_eq!(reports.len(), 120);
    assert_eq!(engine.time().frame, 120);
    assert!((engine.time().elapsed_secs - 2.0).abs() < 1e-9);
}

// ---- Movement ----

#[test]
fn test_integrate_bounds_acceleration_and_boost_doubles_it() {
    let hull = Hull {
        company: BLUE,
        radius: 10.0,
        size: ShipSize::Small,
        is_station: false,
        is_military: false,
        player_controlled: false,
        overheat_temperature: 1000.0,
        propulsion: Default::default(),
    };
    let command = MotionCommand {
        linear_velocity: DVec3::new(100.0, 0.0, 0.0),
        angular_velocity: DVec3::ZERO,
        boost: false,
    };

    let mut body = Body::at(DVec3::ZERO);
    integrate(&mut body, &hull, &command, 0.5);
    assert!((body.velocity.x - 20.0).abs() < 1e-9);
    assert!((body.position.x - 10.0).abs() < 1e-9);

    let mut boosted = Body::at(DVec3::ZERO);
    integrate(
        &mut boosted,
        &hull,
        &MotionCommand {
            boost: true,
            ..command
        },
        0.5,
    );
    assert!((boosted.velocity.x - 40.0).abs() < 1e-9);
}

#[test]
fn test_integrate_turns_nose_with_angular_velocity() {
    let hull = Hull {
        company: BLUE,
        radius: 10.0,
        size: ShipSize::Small,
        is_station: false,
        is_military: false,
        player_controlled: false,
        overheat_temperature: 1000.0,
        propulsion: Default::default(),
    };
    let mut body = Body::at(DVec3::ZERO);
    body.angular_velocity = DVec3::new(0.0, 0.0, 45.0);
    let command = MotionCommand {
        linear_velocity: DVec3::ZERO,
        angular_velocity: DVec3::new(0.0, 0.0, 45.0),
        boost: false,
    };
    integrate(&mut body, &hull, &command, 1.0);
    let nose = body.orientation * DVec3::X;
    let expected = DVec3::new(1.0, 1.0, 0.0).normalize();
    assert!((nose - expected).length() < 1e-9, "nose {nose:?}");
}

// ---- Combat ----

#[test]
fn test_skirmish_fighters_acquire_and_engage() {
    let mut engine = SimulationEngine::with_scenario(SimConfig::default(), ScenarioId::Skirmish);
    let events = events_of(&engine.run_for(30.0));

    let acquirers: std::collections::HashSet<EntityId> = events
        .iter()
        .filter(|e| matches!(e.kind, PilotEventKind::TargetAcquired { .. }))
        .map(|e| e.ship)
        .collect();
    assert_eq!(acquirers.len(), 6, "every fighter should pick a target");

    assert!(events.iter().any(|e| matches!(
        e.kind,
        PilotEventKind::PhaseChanged {
            to: AttackPhase::Engage,
            ..
        }
    )));
}

#[test]
fn test_destroyed_target_is_dropped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.set_hostility(BLUE, RED, Hostility::Hostile);
    let hunter = engine.spawn_fighter(BLUE, DVec3::ZERO, DVec3::ZERO);
    let prey = engine.spawn_fighter(RED, DVec3::new(400.0, 0.0, 0.0), DVec3::ZERO);

    engine.tick();
    assert_eq!(
        engine.pilot_state(hunter).unwrap().combat_target,
        Some(prey)
    );

    assert!(engine.destroy(prey));
    let events = events_of(&engine.run_for(1.0));
    assert!(engine.ship(prey).is_none(), "destroyed entity should be despawned");
    assert_eq!(engine.pilot_state(hunter).unwrap().combat_target, None);
    assert!(events.contains(&PilotEvent::new(
        hunter,
        PilotEventKind::TargetLost { target: prey }
    )));
}

#[test]
fn test_restore_pilot_from_saved_state() {
    let mut engine = SimulationEngine::with_scenario(SimConfig::default(), ScenarioId::Skirmish);
    engine.run_for(3.0);
    let id = engine.snapshot().ships.iter().find(|s| s.is_military).unwrap().id;

    let saved = serde_json::to_string(&engine.pilot_state(id).unwrap()).unwrap();
    let state = serde_json::from_str(&saved).unwrap();
    assert!(engine.restore_pilot(id, state));
    assert_eq!(
        serde_json::to_string(&engine.pilot_state(id).unwrap()).unwrap(),
        saved
    );
    assert!(!engine.restore_pilot(EntityId(u64::MAX), PilotState::new(1.0, 0.0)));
}

// ---- Docking ----

#[test]
fn test_single_slot_is_granted_once() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let station = engine.spawn_station(BLUE, DVec3::ZERO, &[ShipSize::Small]);
    engine.spawn_freighter(BLUE, DVec3::new(0.0, 900.0, 0.0));
    engine.spawn_freighter(BLUE, DVec3::new(0.0, -900.0, 0.0));

    let report = engine.tick();
    let answers: Vec<bool> = report
        .events
        .iter()
        .filter_map(|e| match e.kind {
            PilotEventKind::DockRequested { station: s, accepted } if s == station => Some(accepted),
            _ => None,
        })
        .collect();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers.iter().filter(|&&accepted| accepted).count(), 1);

    let docks = engine.ship(station).unwrap().docks;
    assert!(docks[0].granted.is_some());
}

#[test]
fn test_freighter_docks_dwells_and_undocks() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let station = engine.spawn_station(BLUE, DVec3::ZERO, &[ShipSize::Small]);
    let freighter = engine.spawn_freighter(BLUE, DVec3::new(900.0, 0.0, 0.0));

    let mut docked_at = None;
    let mut undocked_at = None;
    for _ in 0..(90 * 60) {
        let report = engine.tick();
        if docked_at.is_none()
            && engine.ship(freighter).map(|s| s.nav_status) == Some(NavigationStatus::Docked)
        {
            docked_at = Some(report.time.elapsed_secs);
            assert!(engine.ship(station).unwrap().is_docked(freighter));
        }
        if report.events.iter().any(|e| {
            e.ship == freighter && matches!(e.kind, PilotEventKind::Undocked { .. })
        }) {
            undocked_at = Some(report.time.elapsed_secs);
            break;
        }
    }

    let docked_at = docked_at.expect("freighter never docked");
    let undocked_at = undocked_at.expect("freighter never undocked");
    let dwell = undocked_at - docked_at;
    assert!((9.5..=11.0).contains(&dwell), "dwell {dwell}");

    let state = engine.pilot_state(freighter).unwrap();
    assert_eq!(state.station_target, None);
    assert_eq!(state.last_station_target, Some(station));
    assert!(!engine.ship(station).unwrap().is_docked(freighter));
}

#[test]
fn test_trade_route_freighters_dock() {
    let mut engine = SimulationEngine::with_scenario(SimConfig::default(), ScenarioId::TradeRoute);
    let events = events_of(&engine.run_for(300.0));
    assert!(events.iter().any(|e| matches!(
        e.kind,
        PilotEventKind::DockRequested { accepted: true, .. }
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, PilotEventKind::Undocked { station: Some(_) })));
}

// ---- Ambush ----

#[test]
fn test_ambush_freighters_flee_raiders() {
    let mut engine = SimulationEngine::with_scenario(SimConfig::default(), ScenarioId::Ambush);
    let snapshot = engine.snapshot();
    let raiders: Vec<EntityId> = snapshot
        .ships
        .iter()
        .filter(|s| s.company == RAIDERS)
        .map(|s| s.id)
        .collect();
    assert_eq!(raiders.len(), 3);

    let events = events_of(&engine.run_for(5.0));
    assert!(events.iter().any(|e| matches!(
        e.kind,
        PilotEventKind::Fleeing { threat, .. } if raiders.contains(&threat)
    )));
}

#[test]
fn test_relations_are_symmetric_in_scenarios() {
    let engine = SimulationEngine::with_scenario(SimConfig::default(), ScenarioId::Ambush);
    use flightdeck_core::world::CompanyRelations;
    assert_eq!(engine.relations().hostility(RAIDERS, BLUE), Hostility::Hostile);
    assert_eq!(engine.relations().hostility(BLUE, RAIDERS), Hostility::Hostile);
    assert_eq!(engine.relations().hostility(BLUE, RED), Hostility::Neutral);
    assert_eq!(
        engine.relations().hostility(CompanyId(9), CompanyId(9)),
        Hostility::Friendly
    );
}

// ---- Systems ----

#[test]
fn test_snapshot_orders_by_id_and_disarms_unarmed_hulls() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let freighter = engine.spawn_freighter(BLUE, DVec3::new(100.0, 0.0, 0.0));
    let fighter = engine.spawn_fighter(RED, DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0));

    let snapshot = engine.snapshot();
    let ids: Vec<EntityId> = snapshot.ships.iter().map(|s| s.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);

    let freighter = snapshot.ship(freighter).unwrap();
    assert_eq!(freighter.weapon_health, 0.0);
    assert!(!freighter.is_dangerous());
    assert_eq!(freighter.ammo_velocity, None);

    let fighter = snapshot.ship(fighter).unwrap();
    assert!(fighter.is_dangerous());
    assert!((fighter.forward() - DVec3::X).length() < 1e-9);
}

#[test]
fn test_heat_cools_passively() {
    let mut world = hecs::World::new();
    let entity = world.spawn((crate::components::Condition {
        temperature: 100.0,
        ..Default::default()
    },));
    crate::systems::heat::run(&mut world, 1.0);
    let condition = world.get::<&crate::components::Condition>(entity).unwrap();
    assert!((condition.temperature - 90.0).abs() < 1e-9);
}

#[test]
fn test_dock_book_reserve_occupy_release() {
    use crate::systems::navigation::DockBook;
    use flightdeck_core::world::{RelationTable, WorldSnapshot};

    let mut station = flightdeck_core::components::ShipSnapshot::new(EntityId(1), BLUE);
    station.is_station = true;
    station.docks = vec![
        flightdeck_core::components::DockSlot::free(ShipSize::Large),
        flightdeck_core::components::DockSlot::free(ShipSize::Small),
    ];
    let snapshot = WorldSnapshot::new(vec![station], RelationTable::new());
    let mut book = DockBook::from_snapshot(&snapshot);

    assert_eq!(book.reserve(EntityId(1), EntityId(7), ShipSize::Small), Some(1));
    // Asking again returns the same grant
    assert_eq!(book.reserve(EntityId(1), EntityId(7), ShipSize::Small), Some(1));
    assert_eq!(book.reserve(EntityId(1), EntityId(8), ShipSize::Small), None);
    assert_eq!(book.reserve(EntityId(9), EntityId(8), ShipSize::Small), None);

    assert!(book.occupy(EntityId(1), EntityId(7)));
    assert!(!book.occupy(EntityId(1), EntityId(8)));
    assert_eq!(book.slots(EntityId(1)).unwrap()[1].occupant, Some(EntityId(7)));

    book.release(EntityId(7));
    assert!(book.slots(EntityId(1)).unwrap()[1].is_available(ShipSize::Small));
}

#[test]
fn test_navigation_port_refuses_hostile_station() {
    use crate::systems::navigation::{DockBook, NavCommand, NavigationPort};
    use flightdeck_core::world::{Navigation, RelationTable, WorldSnapshot};

    let mut station = flightdeck_core::components::ShipSnapshot::new(EntityId(1), RED);
    station.is_station = true;
    station.docks = vec![flightdeck_core::components::DockSlot::free(ShipSize::Small)];
    let ship = flightdeck_core::components::ShipSnapshot::new(EntityId(2), BLUE);

    let hostile = WorldSnapshot::new(
        vec![station.clone(), ship.clone()],
        RelationTable::new().with_hostile(BLUE, RED),
    );
    let mut book = DockBook::from_snapshot(&hostile);
    let mut port = NavigationPort::new(EntityId(2), NavigationStatus::Free, &hostile, &mut book);
    assert!(!port.dock_at(EntityId(1)));
    assert!(port.into_commands().is_empty());

    let neutral = WorldSnapshot::new(vec![station, ship], RelationTable::new());
    let mut book = DockBook::from_snapshot(&neutral);
    let mut port = NavigationPort::new(EntityId(2), NavigationStatus::Free, &neutral, &mut book);
    assert!(port.dock_at(EntityId(1)));
    assert_eq!(port.status(), NavigationStatus::AutoPilot);
    assert_eq!(
        port.into_commands(),
        vec![NavCommand::DockAt {
            station: EntityId(1),
            slot: 0
        }]
    );
}
