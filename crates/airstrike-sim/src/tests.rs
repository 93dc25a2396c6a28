//! Tests for the simulation engine, bomber systems, and scenarios.

use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use airstrike_core::commands::{AttackOrder, BomberSpawn, ScriptCommand};
use airstrike_core::components::{Munition, WeaponSpec};
use airstrike_core::events::SimEvent;
use airstrike_core::terrain::TerrainHeight;
use airstrike_core::types::{ActorId, Position};
use airstrike_terrain::{HeightMap, HeightMapHeader};

use crate::engine::{SimConfig, SimulationEngine};
use crate::error::SimError;
use crate::scenario::{AirstrikeScenario, TerrainSpec};
use crate::systems::schedule::{self, CommandSchedule, ScheduledCommand};
use crate::world_setup::actor_id;

/// ±5 km of level ground.
fn flat_terrain() -> HeightMap {
    HeightMap::flat(HeightMapHeader::centered(100.0, 101, 101), 0.0).unwrap()
}

fn small_config() -> SimConfig {
    SimConfig {
        world_radius: 3000.0,
        ..Default::default()
    }
}

/// One bomber, 2 km out, heading north over the origin.
fn short_strike() -> AirstrikeScenario {
    AirstrikeScenario {
        spawn_distance: 2000.0,
        terrain: TerrainSpec::Flat {
            elevation: 0.0,
            size: 101,
            cell_size: 100.0,
        },
        ..Default::default()
    }
}

fn bomber_at(y: f64, weapons: Vec<WeaponSpec>, facing_tolerance: f64) -> BomberSpawn {
    BomberSpawn {
        position: Position::new(0.0, y, 600.0),
        heading: 0.0,
        speed: 180.0,
        facing_tolerance,
        weapons,
        target: Some(Position::default()),
        in_world: true,
    }
}

/// Tick until nothing is left flying, collecting every event with the
/// tick it was raised on.
fn run_to_completion(engine: &mut SimulationEngine, max_ticks: u64) -> Vec<(u64, SimEvent)> {
    let mut log = Vec::new();
    for _ in 0..max_ticks {
        let snap = engine.tick();
        log.extend(snap.events.into_iter().map(|e| (snap.time.tick, e)));
        if snap.bombers.is_empty() && snap.munitions.is_empty() {
            break;
        }
    }
    log
}

fn ticks_of(log: &[(u64, SimEvent)], pred: impl Fn(&SimEvent) -> bool) -> Vec<u64> {
    log.iter().filter(|(_, e)| pred(e)).map(|(t, _)| *t).collect()
}

fn first_munition(engine: &SimulationEngine) -> Option<ActorId> {
    let mut query = engine.world().query::<&Munition>();
    let found = query.iter().next().map(|(e, _)| actor_id(e));
    found
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let scenario = AirstrikeScenario {
        squad_size: 3,
        stagger: 50.0,
        ..short_strike()
    };
    let config = SimConfig {
        seed: 12345,
        ..small_config()
    };
    let mut engine_a = SimulationEngine::from_scenario(config.clone(), &scenario).unwrap();
    let mut engine_b = SimulationEngine::from_scenario(config, &scenario).unwrap();

    for _ in 0..400 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        assert_eq!(snap_a.sync_hash, snap_b.sync_hash);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let scenario = AirstrikeScenario {
        squad_size: 3,
        stagger: 50.0,
        ..short_strike()
    };
    let mut engine_a = SimulationEngine::from_scenario(
        SimConfig {
            seed: 111,
            ..small_config()
        },
        &scenario,
    )
    .unwrap();
    let mut engine_b = SimulationEngine::from_scenario(
        SimConfig {
            seed: 222,
            ..small_config()
        },
        &scenario,
    )
    .unwrap();

    let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Staggered squads should differ between seeds");
}

#[test]
fn test_snapshot_hash_matches_engine_hash() {
    let mut engine = SimulationEngine::from_scenario(small_config(), &short_strike()).unwrap();
    for _ in 0..10 {
        let snap = engine.tick();
        assert_eq!(snap.sync_hash, engine.sync_hash());
    }
}

#[test]
fn test_sync_hash_tracks_target() {
    let mut engine_a = SimulationEngine::new(small_config(), flat_terrain());
    let mut engine_b = SimulationEngine::new(small_config(), flat_terrain());
    let a = engine_a.spawn_bomber(&bomber_at(-2500.0, vec![], PI));
    let b = engine_b.spawn_bomber(&bomber_at(-2500.0, vec![], PI));
    assert_eq!(engine_a.tick().sync_hash, engine_b.tick().sync_hash);

    engine_a.set_target(a, Position::new(10.0, 0.0, 0.0)).unwrap();
    engine_b.set_target(b, Position::new(0.0, 0.0, 0.0)).unwrap();
    assert_ne!(engine_a.tick().sync_hash, engine_b.tick().sync_hash);
}

// ---- Bomber run ----

#[test]
fn test_flyover_event_sequence() {
    let mut engine = SimulationEngine::from_scenario(small_config(), &short_strike()).unwrap();
    let log = run_to_completion(&mut engine, 2000);

    let entered = ticks_of(&log, |e| matches!(e, SimEvent::EnteredAttackRange { .. }));
    let exited = ticks_of(&log, |e| matches!(e, SimEvent::ExitedAttackRange { .. }));
    let fired = ticks_of(&log, |e| matches!(e, SimEvent::WeaponFired { .. }));
    let impacts = ticks_of(&log, |e| matches!(e, SimEvent::Impact { .. }));
    let removed = ticks_of(&log, |e| matches!(e, SimEvent::RemovedFromWorld { .. }));

    assert_eq!(entered.len(), 1, "one pass, one entry: {log:?}");
    assert_eq!(exited.len(), 1);
    assert_eq!(removed.len(), 1, "removal must be reported exactly once");
    assert_eq!(fired.len(), 8, "the whole bombload is dropped");
    assert_eq!(impacts.len(), 8);

    assert_eq!(fired[0], entered[0], "first bomb leaves on the entry tick");
    assert!(fired.iter().all(|t| *t < exited[0]));
    assert!(exited[0] < removed[0]);
    assert!(impacts.iter().all(|t| *t < removed[0]));
}

#[test]
fn test_reload_spaces_releases() {
    let mut engine = SimulationEngine::from_scenario(small_config(), &short_strike()).unwrap();
    let log = run_to_completion(&mut engine, 2000);
    let fired = ticks_of(&log, |e| matches!(e, SimEvent::WeaponFired { .. }));
    for pair in fired.windows(2) {
        assert_eq!(pair[1] - pair[0], 5);
    }
}

#[test]
fn test_bomber_leaves_world_at_radius() {
    let mut engine = SimulationEngine::from_scenario(small_config(), &short_strike()).unwrap();
    let mut last_y = f64::MIN;
    for _ in 0..2000 {
        let snap = engine.tick();
        match snap.bombers.first() {
            Some(b) => last_y = b.position.y,
            None => break,
        }
    }
    assert!(last_y <= 3000.0 && last_y > 2900.0, "last seen at y={last_y}");
    assert_eq!(engine.world().len(), 0, "bomber and bombs are gone");
}

#[test]
fn test_queued_bomber_is_frozen() {
    let mut engine = SimulationEngine::new(small_config(), flat_terrain());
    let spawn = BomberSpawn {
        in_world: false,
        ..bomber_at(-200.0, vec![WeaponSpec::default()], PI)
    };
    let actor = engine.spawn_bomber(&spawn);

    for _ in 0..50 {
        let snap = engine.tick();
        assert!(snap.events.is_empty());
        let bomber = &snap.bombers[0];
        assert!(!bomber.in_world);
        assert!(!bomber.in_attack_range);
        assert_eq!(bomber.position, spawn.position);
        assert_eq!(bomber.ammo, vec![Some(8)]);
    }

    assert!(engine.add_to_world(actor).unwrap());
    assert!(!engine.add_to_world(actor).unwrap());

    let snap = engine.tick();
    assert!(snap.bombers[0].in_attack_range);
    assert_eq!(
        snap.events,
        vec![
            SimEvent::EnteredAttackRange { actor },
            SimEvent::WeaponFired {
                actor,
                weapon: "bomb".to_string()
            },
        ]
    );
}

#[test]
fn test_weaponless_bomber_pulses_when_target_leaves_arc() {
    let mut engine = SimulationEngine::new(small_config(), flat_terrain());
    engine.spawn_bomber(&bomber_at(-500.0, vec![], 0.3));

    let mut log = Vec::new();
    let mut y_at = Vec::new();
    for _ in 0..150 {
        let snap = engine.tick();
        y_at.push(snap.bombers[0].position.y);
        log.extend(snap.events.into_iter().map(|e| (snap.time.tick, e)));
    }

    assert_eq!(log.len(), 2, "{log:?}");
    let (entered_at, entered) = &log[0];
    let (exited_at, exited) = &log[1];
    assert!(matches!(entered, SimEvent::EnteredAttackRange { .. }));
    assert!(matches!(exited, SimEvent::ExitedAttackRange { .. }));
    assert_eq!(*exited_at, entered_at + 1);

    // The pulse comes right after the bomber passes over the target.
    let y = y_at[(*entered_at - 1) as usize];
    assert!(y > 0.0 && y < 10.0, "pulse at y={y}");
}

#[test]
fn test_target_height_follows_terrain_edits() {
    let mut engine = SimulationEngine::new(small_config(), flat_terrain());
    let spawn = BomberSpawn {
        target: Some(Position::new(0.0, 0.0, 50.0)),
        ..bomber_at(-2500.0, vec![], PI)
    };
    engine.spawn_bomber(&spawn);

    let snap = engine.tick();
    assert!((snap.bombers[0].target.z - 50.0).abs() < 1e-9);

    engine.queue_command(ScriptCommand::Deform {
        x: 0.0,
        y: 0.0,
        radius: 200.0,
        delta: -20.0,
    });
    let snap = engine.tick();
    assert!((engine.terrain().height_at(0.0, 0.0) + 20.0).abs() < 1e-6);
    assert!((snap.bombers[0].target.z - 30.0).abs() < 1e-6);

    engine.queue_command(ScriptCommand::Deform {
        x: 0.0,
        y: 0.0,
        radius: 200.0,
        delta: 5.0,
    });
    let snap = engine.tick();
    assert!((snap.bombers[0].target.z - 35.0).abs() < 1e-6);
}

// ---- Host boundary ----

#[test]
fn test_attack_orders_are_refused() {
    let mut engine = SimulationEngine::new(small_config(), flat_terrain());
    let bomber = engine.spawn_bomber(&bomber_at(-200.0, vec![WeaponSpec::default()], PI));
    let order = AttackOrder::new(Position::new(100.0, 100.0, 0.0));

    assert!(matches!(
        engine.issue_attack_order(bomber, order),
        Err(SimError::ScriptedTargetOnly(a)) if a == bomber
    ));

    engine.tick();
    let munition = first_munition(&engine).expect("a bomb is in flight");
    assert!(matches!(
        engine.issue_attack_order(munition, order),
        Err(SimError::NoAttackCapability(_))
    ));
    assert!(matches!(
        engine.with_bomber(munition, |_| ()),
        Err(SimError::NotABomber(_))
    ));

    assert!(engine.remove_from_world(bomber));
    assert!(matches!(
        engine.issue_attack_order(bomber, order),
        Err(SimError::UnknownActor(_))
    ));
}

#[test]
fn test_removal_listeners_fire_once() {
    let mut engine = SimulationEngine::new(small_config(), flat_terrain());
    let actor = engine.spawn_bomber(&bomber_at(-2500.0, vec![], PI));

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    engine
        .with_bomber(actor, |attack| {
            attack.on_removed_from_world(move |removed| {
                assert_eq!(removed, actor);
                seen.fetch_add(1, Ordering::SeqCst);
            });
        })
        .unwrap();

    engine.tick();
    assert!(engine.remove_from_world(actor));
    assert!(!engine.remove_from_world(actor));
    engine.queue_command(ScriptCommand::RemoveFromWorld { actor });

    let snap = engine.tick();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(snap.events, vec![SimEvent::RemovedFromWorld { actor }]);
    assert!(snap.bombers.is_empty());
    assert!(matches!(
        engine.set_target(actor, Position::default()),
        Err(SimError::UnknownActor(_))
    ));
}

#[test]
fn test_range_listeners_run_during_tick() {
    let mut engine = SimulationEngine::new(small_config(), flat_terrain());
    let actor = engine.spawn_bomber(&bomber_at(-800.0, vec![WeaponSpec::default()], PI));

    let entered = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&entered);
    engine
        .with_bomber(actor, |attack| {
            attack.on_entered_attack_range(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
        .unwrap();

    for _ in 0..30 {
        let snap = engine.tick();
        let raised = snap
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::EnteredAttackRange { .. }));
        if raised {
            assert_eq!(entered.load(Ordering::SeqCst), 1);
        }
    }
    assert_eq!(entered.load(Ordering::SeqCst), 1);
}

#[test]
fn test_bad_commands_are_ignored() {
    let mut engine = SimulationEngine::new(small_config(), flat_terrain());
    let ghost = ActorId(u64::MAX);
    engine.queue_commands([
        ScriptCommand::SetTarget {
            actor: ghost,
            position: Position::default(),
        },
        ScriptCommand::AddToWorld { actor: ghost },
        ScriptCommand::RemoveFromWorld { actor: ghost },
    ]);
    let snap = engine.tick();
    assert!(snap.events.is_empty());
    assert_eq!(snap.time.tick, 1);
}

// ---- Scenarios ----

#[test]
fn test_formation_lanes() {
    let scenario = AirstrikeScenario {
        target: Position::new(1000.0, 0.0, 20.0),
        approach_bearing: FRAC_PI_2,
        squad_size: 3,
        spacing: 100.0,
        spawn_distance: 2000.0,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let squad = scenario.formation(&mut rng);

    assert_eq!(squad.len(), 3);
    for (spawn, lane_y) in squad.iter().zip([100.0, 0.0, -100.0]) {
        let target = spawn.target.unwrap();
        assert!((target.x - 1000.0).abs() < 1e-6);
        assert!((target.y - lane_y).abs() < 1e-6);
        assert_eq!(target.z, 20.0);

        assert!((spawn.position.x + 1000.0).abs() < 1e-6);
        assert!((spawn.position.y - lane_y).abs() < 1e-6);
        assert_eq!(spawn.position.z, 620.0);
        assert_eq!(spawn.heading, FRAC_PI_2);
        assert!(spawn.in_world);
    }
}

#[test]
fn test_scenario_from_json_with_schedule() {
    let json = r#"{
        "name": "Crater run",
        "target": {"x": 0.0, "y": 0.0, "z": 0.0},
        "squad_size": 2,
        "spawn_distance": 2500.0,
        "terrain": {"kind": "Flat", "size": 101, "cell_size": 100.0},
        "schedule": [
            {"at_tick": 3, "command": {"type": "Deform", "x": 0.0, "y": 0.0, "radius": 300.0, "delta": -10.0}}
        ]
    }"#;
    let scenario = AirstrikeScenario::from_json(json).unwrap();
    assert_eq!(scenario.weapons, vec![WeaponSpec::default()]);
    assert_eq!(scenario.schedule.len(), 1);

    let mut engine = SimulationEngine::from_scenario(small_config(), &scenario).unwrap();
    for _ in 0..3 {
        assert_eq!(engine.tick().bombers.len(), 2);
    }
    assert_eq!(engine.terrain().height_at(0.0, 0.0), 0.0);
    engine.tick();
    assert!((engine.terrain().height_at(0.0, 0.0) + 10.0).abs() < 1e-6);
}

#[test]
fn test_scenario_rejects_bad_json() {
    let err = AirstrikeScenario::from_json(r#"{"squad_size": "many"}"#).unwrap_err();
    assert!(matches!(err, SimError::Scenario(_)));
}

#[test]
fn test_ridge_terrain_spec() {
    let spec = TerrainSpec::Ridge {
        size: 65,
        cell_size: 50.0,
        ridge_y: 0.0,
        peak: 300.0,
    };
    let terrain = spec.build().unwrap();
    assert!(terrain.height_at(0.0, 0.0) > terrain.height_at(0.0, 1500.0));
}

#[test]
fn test_schedule_issues_each_command_once() {
    let deform = ScriptCommand::Deform {
        x: 0.0,
        y: 0.0,
        radius: 10.0,
        delta: 1.0,
    };
    let mut sched = CommandSchedule::new(vec![
        ScheduledCommand {
            at_tick: 0,
            command: deform.clone(),
            issued: false,
        },
        ScheduledCommand {
            at_tick: 5,
            command: deform,
            issued: false,
        },
    ]);

    let mut out = Vec::new();
    schedule::run(&mut sched, 0, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(sched.pending(), 1);

    schedule::run(&mut sched, 0, &mut out);
    assert_eq!(out.len(), 1);

    schedule::run(&mut sched, 7, &mut out);
    assert_eq!(out.len(), 2);
    assert_eq!(sched.pending(), 0);
}
