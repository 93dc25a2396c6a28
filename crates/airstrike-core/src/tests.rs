#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::commands::{BomberSpawn, ScriptCommand};
    use crate::components::WeaponSpec;
    use crate::events::SimEvent;
    use crate::sync::{SyncField, SyncHasher, SyncState, SyncValue};
    use crate::terrain::{FlatTerrain, TerrainHeight};
    use crate::types::{ActorId, Position, SimTime, Target, Velocity};

    #[test]
    fn test_position_range() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3000.0, 4000.0, 0.0);
        assert!((a.range_to(&b) - 5000.0).abs() < 0.01);
    }

    #[test]
    fn test_horizontal_range_ignores_altitude() {
        let a = Position::new(0.0, 0.0, 500.0);
        let b = Position::new(300.0, 400.0, 0.0);
        assert!((a.horizontal_range_to(&b) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_north_and_east() {
        let origin = Position::default();
        let north = Position::new(0.0, 1000.0, 0.0);
        let east = Position::new(1000.0, 0.0, 0.0);
        assert!(origin.bearing_to(&north).abs() < 1e-9);
        assert!((origin.bearing_to(&east) - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_from_heading_round_trips() {
        let vel = Velocity::from_heading(200.0, PI);
        assert!((vel.speed() - 200.0).abs() < 1e-9);
        assert!((vel.heading() - PI).abs() < 1e-9);
        assert_eq!(vel.z, 0.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..25 {
            time.advance();
        }
        assert_eq!(time.tick, 25);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_range_is_horizontal() {
        let target = Target::from_pos(Position::new(0.0, 0.0, 0.0));
        let overhead = Position::new(0.0, 0.0, 5000.0);
        assert!(target.is_in_range(&overhead, 10.0));

        let beside = Position::new(600.0, 0.0, 0.0);
        assert!(!target.is_in_range(&beside, 599.0));
        assert!(target.is_in_range(&beside, 600.0));
    }

    #[test]
    fn test_flat_terrain() {
        let terrain = FlatTerrain(42.0);
        assert_eq!(terrain.height_at(-1e6, 3.0), 42.0);
        assert_eq!((&terrain).height_at(0.0, 0.0), 42.0);
    }

    struct Pair(bool, f64);

    impl SyncState for Pair {
        fn sync_fields(&self) -> Vec<SyncField> {
            vec![
                SyncField::new("flag", self.0.into()),
                SyncField::new("value", self.1.into()),
            ]
        }
    }

    #[test]
    fn test_sync_hash_is_stable_and_sensitive() {
        let hash = |p: &Pair| {
            let mut h = SyncHasher::new();
            h.write_state(p);
            h.finish()
        };
        assert_eq!(hash(&Pair(true, 1.5)), hash(&Pair(true, 1.5)));
        assert_ne!(hash(&Pair(true, 1.5)), hash(&Pair(false, 1.5)));
        assert_ne!(hash(&Pair(true, 1.5)), hash(&Pair(true, 1.25)));
    }

    #[test]
    fn test_fnv_known_vector() {
        // FNV-1a 64 of "a".
        let mut h = SyncHasher::new();
        h.write_bytes(b"a");
        assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_sync_field_serializes_flat() {
        let field = SyncField::new("in_attack_range", SyncValue::Bool(true));
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"name":"in_attack_range","value":true}"#);
    }

    #[test]
    fn test_spawn_command_defaults() {
        let json = r#"{
            "type": "SpawnBomber",
            "position": {"x": 0.0, "y": -5000.0, "z": 600.0},
            "heading": 0.0,
            "speed": 180.0,
            "facing_tolerance": 0.5
        }"#;
        let cmd: ScriptCommand = serde_json::from_str(json).unwrap();
        match cmd {
            ScriptCommand::SpawnBomber(BomberSpawn {
                weapons,
                target,
                in_world,
                ..
            }) => {
                assert!(weapons.is_empty());
                assert!(target.is_none());
                assert!(in_world);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_weapon_spec_defaults_from_json() {
        let json = r#"{"name": "flare", "max_range": 50.0, "reload_ticks": 1}"#;
        let spec: WeaponSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.ammo, None);
        assert_eq!(spec.crater_depth, 0.0);
    }

    #[test]
    fn test_event_tagging() {
        let event = SimEvent::EnteredAttackRange { actor: ActorId(7) };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"EnteredAttackRange","actor":7}"#);
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
