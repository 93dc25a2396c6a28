//! Airstrike scenarios: a squad of bombers sent over a target point.
//!
//! A scenario is loaded from JSON. Launching it spawns the squad in line
//! abreast on the approach bearing, aims every bomber at its own lane over
//! the target, and puts the squad straight into the world. The bombers
//! keep flying past the target until they leave the world radius.

use glam::DVec2;
use hecs::{Entity, World};
use log::info;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use airstrike_core::commands::BomberSpawn;
use airstrike_core::components::WeaponSpec;
use airstrike_core::constants::*;
use airstrike_core::types::Position;
use airstrike_terrain::{synthetic_ridge, HeightMap, HeightMapHeader, TerrainError};

use crate::error::SimError;
use crate::systems::schedule::ScheduledCommand;
use crate::world_setup;

/// Terrain a scenario is played on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TerrainSpec {
    /// Level ground at a single elevation.
    Flat {
        #[serde(default)]
        elevation: f32,
        size: u32,
        cell_size: f64,
    },
    /// East-west ridge, see [`synthetic_ridge`].
    Ridge {
        size: u32,
        cell_size: f64,
        ridge_y: f64,
        peak: f64,
    },
}

impl Default for TerrainSpec {
    fn default() -> Self {
        Self::Flat {
            elevation: 0.0,
            size: 601,
            cell_size: 100.0,
        }
    }
}

impl TerrainSpec {
    pub fn build(&self) -> Result<HeightMap, TerrainError> {
        match *self {
            TerrainSpec::Flat {
                elevation,
                size,
                cell_size,
            } => HeightMap::flat(HeightMapHeader::centered(cell_size, size, size), elevation),
            TerrainSpec::Ridge {
                size,
                cell_size,
                ridge_y,
                peak,
            } => synthetic_ridge(size, cell_size, ridge_y, peak),
        }
    }
}

/// A scripted airstrike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirstrikeScenario {
    pub name: String,
    /// Point the squad is sent to bomb.
    pub target: Position,
    /// Direction the squad flies in over the target (radians, 0 = North).
    pub approach_bearing: f64,
    pub squad_size: u32,
    /// Lateral distance between neighbouring bombers (meters).
    pub spacing: f64,
    /// Cruise height above the target (meters).
    pub altitude: f64,
    pub speed: f64,
    /// How far before the target the squad appears (meters).
    pub spawn_distance: f64,
    pub facing_tolerance: f64,
    pub weapons: Vec<WeaponSpec>,
    /// Maximum random along-track offset per bomber (meters).
    /// Zero keeps the squad in a perfect line.
    pub stagger: f64,
    pub terrain: TerrainSpec,
    /// Extra commands to issue during the run.
    pub schedule: Vec<ScheduledCommand>,
}

impl Default for AirstrikeScenario {
    fn default() -> Self {
        Self {
            name: "Airstrike".to_string(),
            target: Position::default(),
            approach_bearing: 0.0,
            squad_size: 1,
            spacing: SQUAD_SPACING,
            altitude: BOMBER_ALTITUDE,
            speed: BOMBER_SPEED,
            spawn_distance: BOMBER_SPAWN_DISTANCE,
            facing_tolerance: DEFAULT_FACING_TOLERANCE,
            weapons: vec![WeaponSpec::default()],
            stagger: 0.0,
            terrain: TerrainSpec::default(),
            schedule: Vec::new(),
        }
    }
}

impl AirstrikeScenario {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Spawn parameters for every bomber in the squad, left to right.
    pub fn formation(&self, rng: &mut ChaCha8Rng) -> Vec<BomberSpawn> {
        let (sin, cos) = self.approach_bearing.sin_cos();
        let forward = DVec2::new(sin, cos);
        let right = DVec2::new(cos, -sin);
        let center = (self.squad_size.max(1) - 1) as f64 / 2.0;

        (0..self.squad_size)
            .map(|i| {
                let lateral = (i as f64 - center) * self.spacing;
                let jitter = if self.stagger > 0.0 {
                    rng.gen_range(-self.stagger..=self.stagger)
                } else {
                    0.0
                };

                let aim = self.target.horizontal() + right * lateral;
                let start = aim - forward * (self.spawn_distance + jitter);

                BomberSpawn {
                    position: Position::new(start.x, start.y, self.target.z + self.altitude),
                    heading: self.approach_bearing,
                    speed: self.speed,
                    facing_tolerance: self.facing_tolerance,
                    weapons: self.weapons.clone(),
                    target: Some(Position::new(aim.x, aim.y, self.target.z)),
                    in_world: true,
                }
            })
            .collect()
    }
}

/// Spawn the scenario's squad into the world.
pub fn launch(world: &mut World, rng: &mut ChaCha8Rng, scenario: &AirstrikeScenario) -> Vec<Entity> {
    let squad: Vec<Entity> = scenario
        .formation(rng)
        .iter()
        .map(|spawn| world_setup::spawn_bomber(world, spawn))
        .collect();

    info!(
        "{}: {} bomber(s) inbound on bearing {:.0} deg",
        scenario.name,
        squad.len(),
        scenario.approach_bearing.to_degrees()
    );
    squad
}
