//! Bomber attack state machine.
//!
//! A bomber is aimed at a fixed world point by a script, never by an
//! attack order. Each tick it re-evaluates whether the point is inside its
//! firing arc and inside the reach of any of its weapons, fires whatever
//! can reach, and raises edge-triggered range notifications.

use log::debug;

use airstrike_core::enums::RangeTransition;
use airstrike_core::sync::{SyncField, SyncState};
use airstrike_core::terrain::TerrainHeight;
use airstrike_core::types::{ActorId, Position, Target};

use crate::arc::target_in_firing_arc;
use crate::armament::Armament;
use crate::info::AttackBomberInfo;
use crate::listeners::{AttackListeners, ListenerId};

/// The attacking actor, as seen by its attack capability for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shooter {
    pub id: ActorId,
    pub position: Position,
    /// Body heading (radians, 0 = North, clockwise).
    pub facing: f64,
    /// Whether the actor is part of the active simulation.
    pub in_world: bool,
}

/// Outcome of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackUpdate<S> {
    /// Range edge crossed this tick, if any.
    pub transition: Option<RangeTransition>,
    /// Shots produced by weapons that fired this tick.
    pub shots: Vec<S>,
}

impl<S> AttackUpdate<S> {
    fn new() -> Self {
        Self {
            transition: None,
            shots: Vec::new(),
        }
    }
}

/// Per-actor attack state for a scripted bomber.
#[derive(Debug)]
pub struct AttackBomber {
    info: AttackBomberInfo,
    target: Target,
    has_target: bool,
    /// Target height above the terrain under it, captured on the first
    /// in-world tick after the target was set.
    terrain_offset: Option<f64>,
    in_attack_range: bool,
    facing_target: bool,
    removal_notified: bool,
    listeners: AttackListeners,
}

impl AttackBomber {
    pub fn new(info: AttackBomberInfo) -> Self {
        Self {
            info,
            target: Target::default(),
            has_target: false,
            terrain_offset: None,
            in_attack_range: false,
            facing_target: false,
            removal_notified: false,
            listeners: AttackListeners::default(),
        }
    }

    pub fn info(&self) -> &AttackBomberInfo {
        &self.info
    }

    /// Aim at a world point, replacing any previous target.
    /// Facing and range are not re-evaluated until the next tick.
    pub fn set_target(&mut self, position: Position) {
        self.target = Target::from_pos(position);
        self.has_target = true;
        self.terrain_offset = None;
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Whether a script has ever aimed this bomber.
    pub fn has_target(&self) -> bool {
        self.has_target
    }

    pub fn in_attack_range(&self) -> bool {
        self.in_attack_range
    }

    pub fn facing_target(&self) -> bool {
        self.facing_target
    }

    pub fn listeners_mut(&mut self) -> &mut AttackListeners {
        &mut self.listeners
    }

    pub fn on_entered_attack_range<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ActorId) + Send + Sync + 'static,
    {
        self.listeners.entered_attack_range.subscribe(listener)
    }

    pub fn on_exited_attack_range<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ActorId) + Send + Sync + 'static,
    {
        self.listeners.exited_attack_range.subscribe(listener)
    }

    pub fn on_removed_from_world<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ActorId) + Send + Sync + 'static,
    {
        self.listeners.removed_from_world.subscribe(listener)
    }

    /// Advance one simulation step.
    ///
    /// Outside the world nothing is recomputed and no notification fires.
    /// In the world the target is re-heighted against the current terrain,
    /// the firing arc is re-tested, and every weapon that reaches the
    /// target gets a fire-check. A bomber without weapons instead reports
    /// a one-tick "in range" pulse on the tick the target leaves its arc.
    pub fn tick<A, T>(
        &mut self,
        shooter: &Shooter,
        terrain: &T,
        armaments: &mut [A],
    ) -> AttackUpdate<A::Shot>
    where
        A: Armament,
        T: TerrainHeight + ?Sized,
    {
        let mut update = AttackUpdate::new();

        let was_in_attack_range = self.in_attack_range;
        self.in_attack_range = false;

        if shooter.in_world {
            self.track_terrain(terrain);

            let was_facing_target = self.facing_target;
            self.facing_target = target_in_firing_arc(
                &shooter.position,
                shooter.facing,
                &self.target,
                self.info.facing_tolerance,
            );

            for armament in armaments.iter_mut() {
                if !self.target.is_in_range(&shooter.position, armament.max_range()) {
                    continue;
                }

                self.in_attack_range = true;
                if let Some(shot) = armament.check_fire(shooter, shooter.facing, &self.target, false)
                {
                    update.shots.push(shot);
                }
            }

            // Weaponless bombers pulse once as the target slips out of the arc.
            if armaments.is_empty() {
                self.in_attack_range =
                    !was_in_attack_range && !self.facing_target && was_facing_target;
            }
        } else {
            self.in_attack_range = was_in_attack_range;
        }

        if self.in_attack_range && !was_in_attack_range {
            debug!("{:?} entered attack range", shooter.id);
            update.transition = Some(RangeTransition::Entered);
            self.listeners.entered_attack_range.notify(shooter.id);
        } else if !self.in_attack_range && was_in_attack_range {
            debug!("{:?} exited attack range", shooter.id);
            update.transition = Some(RangeTransition::Exited);
            self.listeners.exited_attack_range.notify(shooter.id);
        }

        update
    }

    /// Keep the target at its configured height above whatever terrain
    /// currently lies under it.
    fn track_terrain<T: TerrainHeight + ?Sized>(&mut self, terrain: &T) {
        let aim = self.target.center_position();
        let ground = terrain.height_at(aim.x, aim.y);
        let offset = *self.terrain_offset.get_or_insert(aim.z - ground);
        self.target = Target::from_pos(aim.with_z(ground + offset));
    }

    /// Raise the removal notification. Fires at most once per bomber;
    /// returns whether it fired.
    pub fn notify_removed_from_world(&mut self, actor: ActorId) -> bool {
        if self.removal_notified {
            return false;
        }
        self.removal_notified = true;
        self.listeners.removed_from_world.notify(actor);
        true
    }

    pub fn removal_notified(&self) -> bool {
        self.removal_notified
    }
}

impl Default for AttackBomber {
    fn default() -> Self {
        Self::new(AttackBomberInfo::default())
    }
}

impl SyncState for AttackBomber {
    fn sync_fields(&self) -> Vec<SyncField> {
        let aim = self.target.center_position();
        vec![
            SyncField::new("target.x", aim.x.into()),
            SyncField::new("target.y", aim.y.into()),
            SyncField::new("target.z", aim.z.into()),
            SyncField::new("in_attack_range", self.in_attack_range.into()),
            SyncField::new("facing_target", self.facing_target.into()),
        ]
    }
}
