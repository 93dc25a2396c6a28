//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 25;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Radius of the playable area around the origin (meters).
/// Actors crossing it leave the world.
pub const WORLD_RADIUS: f64 = 30_000.0;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

// --- Bomber defaults ---

/// Cruise speed of a strike bomber (m/s).
pub const BOMBER_SPEED: f64 = 180.0;

/// Cruise altitude above the target (meters).
pub const BOMBER_ALTITUDE: f64 = 600.0;

/// Distance from the target at which a strike squad is spawned (meters).
pub const BOMBER_SPAWN_DISTANCE: f64 = 12_000.0;

/// Lateral spacing between bombers in a squad (meters).
pub const SQUAD_SPACING: f64 = 120.0;

/// Default facing tolerance: half-width of the firing arc (radians).
/// A half-circle means every bearing counts as faced.
pub const DEFAULT_FACING_TOLERANCE: f64 = std::f64::consts::PI;

// --- Weapon defaults ---

/// Horizontal release range of a free-fall bomb (meters).
pub const BOMB_RELEASE_RANGE: f64 = 700.0;

/// Ticks between bomb releases.
pub const BOMB_RELOAD_TICKS: u32 = 5;

/// Bombs carried per bomber.
pub const BOMB_AMMO: u32 = 8;

/// Crater depth left by a bomb impact (meters).
pub const BOMB_CRATER_DEPTH: f64 = 2.0;

/// Crater radius (meters).
pub const BOMB_CRATER_RADIUS: f64 = 15.0;
