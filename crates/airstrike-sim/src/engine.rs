//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world and the terrain, applies
//! script commands, runs all systems, and produces `SimSnapshot`s.
//! Completely headless, so every run is reproducible from its seed and
//! command stream.

use std::collections::VecDeque;

use hecs::{ComponentError, World};
use log::{debug, error, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use airstrike_attack::AttackBomber;
use airstrike_core::commands::{AttackOrder, BomberSpawn, ScriptCommand};
use airstrike_core::components::InWorld;
use airstrike_core::constants::{GRAVITY, WORLD_RADIUS};
use airstrike_core::events::SimEvent;
use airstrike_core::state::SimSnapshot;
use airstrike_core::types::{ActorId, Position, SimTime};
use airstrike_terrain::HeightMap;

use crate::armament::Release;
use crate::error::SimError;
use crate::scenario::{self, AirstrikeScenario};
use crate::systems;
use crate::systems::schedule::CommandSchedule;
use crate::world_setup::{self, actor_id, entity_of};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Bombers beyond this distance from the origin leave the world (meters).
    pub world_radius: f64,
    /// Acceleration applied to falling munitions (m/s²).
    pub gravity: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_radius: WORLD_RADIUS,
            gravity: GRAVITY,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    terrain: HeightMap,
    config: SimConfig,
    command_queue: VecDeque<ScriptCommand>,
    schedule: CommandSchedule,
    due_commands: Vec<ScriptCommand>,
    events: Vec<SimEvent>,
    releases: Vec<Release>,
    despawn_buffer: Vec<hecs::Entity>,
}

impl SimulationEngine {
    /// Create a new simulation engine on the given terrain.
    pub fn new(config: SimConfig, terrain: HeightMap) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            terrain,
            config,
            command_queue: VecDeque::new(),
            schedule: CommandSchedule::default(),
            due_commands: Vec::new(),
            events: Vec::new(),
            releases: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Build the scenario's terrain, load its schedule, and launch its squad.
    pub fn from_scenario(config: SimConfig, scenario: &AirstrikeScenario) -> Result<Self, SimError> {
        let terrain = scenario.terrain.build()?;
        let mut engine = Self::new(config, terrain);
        engine.schedule = CommandSchedule::new(scenario.schedule.clone());
        engine.launch_scenario(scenario);
        Ok(engine)
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ScriptCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ScriptCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        systems::schedule::run(&mut self.schedule, self.time.tick, &mut self.due_commands);
        self.command_queue.extend(self.due_commands.drain(..));
        self.process_commands();

        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, events)
    }

    /// Spawn a bomber immediately.
    pub fn spawn_bomber(&mut self, spawn: &BomberSpawn) -> ActorId {
        actor_id(world_setup::spawn_bomber(&mut self.world, spawn))
    }

    /// Spawn a scenario's squad into the running simulation.
    pub fn launch_scenario(&mut self, scenario: &AirstrikeScenario) -> Vec<ActorId> {
        scenario::launch(&mut self.world, &mut self.rng, scenario)
            .into_iter()
            .map(actor_id)
            .collect()
    }

    /// Aim a bomber at a world point.
    pub fn set_target(&mut self, actor: ActorId, position: Position) -> Result<(), SimError> {
        self.with_bomber(actor, |attack| attack.set_target(position))
    }

    /// Bring a queued bomber into the active world.
    /// Returns false if it was already there.
    pub fn add_to_world(&mut self, actor: ActorId) -> Result<bool, SimError> {
        self.with_bomber(actor, |_| ())?;
        let entity = entity_of(actor).ok_or(SimError::UnknownActor(actor))?;
        if self.world.get::<&InWorld>(entity).is_ok() {
            return Ok(false);
        }
        self.world
            .insert_one(entity, InWorld)
            .map_err(|_| SimError::UnknownActor(actor))?;
        debug!("{actor:?} added to world");
        Ok(true)
    }

    /// Take an actor out of the simulation. Removal listeners fire once;
    /// calls for actors that are already gone do nothing and return false.
    pub fn remove_from_world(&mut self, actor: ActorId) -> bool {
        match entity_of(actor) {
            Some(entity) if self.world.contains(entity) => {
                systems::cleanup::remove_from_world(&mut self.world, entity, &mut self.events)
            }
            _ => false,
        }
    }

    /// Route a generic attack order to an actor.
    ///
    /// Scripted bombers only take targets from scripts, so this never
    /// succeeds for them. An order reaching one is logged as an error.
    pub fn issue_attack_order(&self, actor: ActorId, order: AttackOrder) -> Result<(), SimError> {
        let entity = entity_of(actor)
            .filter(|e| self.world.contains(*e))
            .ok_or(SimError::UnknownActor(actor))?;

        if self.world.get::<&AttackBomber>(entity).is_ok() {
            error!(
                "{actor:?} got a {:?} attack order on ({:.0}, {:.0}) but only takes scripted targets",
                order.source, order.target.x, order.target.y
            );
            return Err(SimError::ScriptedTargetOnly(actor));
        }
        Err(SimError::NoAttackCapability(actor))
    }

    /// Run `f` against a bomber's attack state, e.g. to subscribe listeners.
    pub fn with_bomber<R>(
        &mut self,
        actor: ActorId,
        f: impl FnOnce(&mut AttackBomber) -> R,
    ) -> Result<R, SimError> {
        let entity = entity_of(actor).ok_or(SimError::UnknownActor(actor))?;
        match self.world.get::<&mut AttackBomber>(entity) {
            Ok(mut attack) => Ok(f(&mut attack)),
            Err(ComponentError::NoSuchEntity) => Err(SimError::UnknownActor(actor)),
            Err(ComponentError::MissingComponent(_)) => Err(SimError::NotABomber(actor)),
        }
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

    pub fn terrain(&self) -> &HeightMap {
        &self.terrain
    }

    pub fn terrain_mut(&mut self) -> &mut HeightMap {
        &mut self.terrain
    }

    /// Sync hash of the current state.
    pub fn sync_hash(&self) -> u64 {
        systems::sync::world_hash(&self.world, self.time.tick)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single script command.
    fn handle_command(&mut self, command: ScriptCommand) {
        match command {
            ScriptCommand::SpawnBomber(spawn) => {
                self.spawn_bomber(&spawn);
            }
            ScriptCommand::SetTarget { actor, position } => {
                if let Err(err) = self.set_target(actor, position) {
                    warn!("SetTarget ignored: {err}");
                }
            }
            ScriptCommand::AddToWorld { actor } => match self.add_to_world(actor) {
                Ok(true) => {}
                Ok(false) => debug!("{actor:?} is already in the world"),
                Err(err) => warn!("AddToWorld ignored: {err}"),
            },
            ScriptCommand::RemoveFromWorld { actor } => {
                if !self.remove_from_world(actor) {
                    debug!("RemoveFromWorld for {actor:?} had no effect");
                }
            }
            ScriptCommand::Deform {
                x,
                y,
                radius,
                delta,
            } => {
                let touched = self.terrain.raise_area(x, y, radius, delta);
                debug!("Deformed {touched} terrain sample(s) around ({x:.0}, {y:.0}) by {delta:+.1} m");
            }
        }
    }

    /// Run all simulation systems in order.
    fn run_systems(&mut self) {
        systems::movement::run(&mut self.world);

        systems::bomber_attack::run(
            &mut self.world,
            &self.terrain,
            &mut self.releases,
            &mut self.events,
        );

        systems::munitions::spawn(&mut self.world, &mut self.releases, &mut self.events);
        systems::munitions::run(
            &mut self.world,
            &mut self.terrain,
            self.config.gravity,
            &mut self.events,
            &mut self.despawn_buffer,
        );

        systems::cleanup::run(
            &mut self.world,
            self.config.world_radius,
            &mut self.events,
            &mut self.despawn_buffer,
        );
    }
}
