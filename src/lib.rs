//! Pod Racer - physics core for a turn-based 2D pod race
//!
//! Core modules:
//! - `sim`: Deterministic simulation (points, units, swept collisions, pod steering)
//! - `tuning`: Data-driven engine constants

pub mod sim;
pub mod tuning;

pub use sim::{Body, Collision, Decision, Pod, PointExt, Thrust, TurnInput, Unit};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Engine constants fixed by the steering contract
pub mod consts {
    /// Maximum heading change per turn (degrees)
    pub const MAX_ROTATION_DEG: f32 = 18.0;
    /// Velocity multiplier applied at the end of every turn
    pub const FRICTION: f32 = 0.85;
    /// Duration of one full turn
    pub const TURN_DURATION: f32 = 1.0;
}

/// Normalize an angle in degrees to [0, 360)
///
/// Only handles inputs within one revolution of the range, which is all a
/// clamped rotation can produce.
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    if angle >= 360.0 {
        angle - 360.0
    } else if angle < 0.0 {
        // -1e-9 + 360 rounds to 360 in f32
        let wrapped = angle + 360.0;
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    } else {
        angle
    }
}

/// Wrap any finite angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    normalize_degrees(angle.rem_euclid(360.0))
}

/// Bearing in degrees [0, 360) from `from` toward `to`
///
/// Returns `None` when the two points coincide.
#[inline]
pub fn bearing_degrees(from: Vec2, to: Vec2) -> Option<f32> {
    let d = PointExt::distance(from, to);
    if d == 0.0 {
        return None;
    }
    let dx = ((to.x - from.x) / d).clamp(-1.0, 1.0);
    let dy = (to.y - from.y) / d;

    let a = dx.acos().to_degrees();
    // Below the x axis: mirror into the upper half of the circle
    if dy < 0.0 {
        Some(normalize_degrees(360.0 - a))
    } else {
        Some(a)
    }
}

/// Unit heading vector for an angle in degrees
#[inline]
pub fn heading_vector(angle_deg: f32) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Vec2::new(cos, sin)
}
