//! Firing-arc geometry.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use airstrike_core::types::{Position, Target};

/// Whether `desired` lies within `tolerance` radians either side of `facing`.
///
/// Angles are headings (0 = North, clockwise) and may be unnormalized.
pub fn facing_within_tolerance(facing: f64, desired: f64, tolerance: f64) -> bool {
    if tolerance >= PI {
        return true;
    }

    let delta = (desired - facing).rem_euclid(TAU);
    delta <= tolerance || delta >= TAU - tolerance
}

/// Whether an actor at `origin` with body heading `facing` has `target`
/// inside its firing arc. A target directly below or above counts as faced.
pub fn target_in_firing_arc(origin: &Position, facing: f64, target: &Target, tolerance: f64) -> bool {
    let aim = target.center_position();
    let delta: DVec2 = aim.horizontal() - origin.horizontal();
    if delta == DVec2::ZERO {
        return true;
    }

    facing_within_tolerance(facing, origin.bearing_to(&aim), tolerance)
}
