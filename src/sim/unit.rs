//! Movable circular units
//!
//! A unit is a rigid circle translating at constant velocity for one turn.

use std::fmt::Debug;

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

use super::collision::{Collision, swept_collision};

/// Anything that moves like a circle: the capability the collision routine needs
pub trait Body: Debug {
    /// Center position
    fn position(&self) -> Vec2;
    /// Velocity per turn
    fn velocity(&self) -> Vec2;
    /// Circle radius (>= 0)
    fn radius(&self) -> f32;

    /// Predict the first impact with `other` within the current turn
    fn collision<'a>(&'a self, other: &'a dyn Body) -> Option<Collision<'a>>
    where
        Self: Sized,
    {
        swept_collision(self, other)
    }
}

/// A circle with position, velocity and radius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Unit {
    pub pos: Vec2,
    pub vel: Vec2,
    #[serde(deserialize_with = "non_negative")]
    pub radius: f32,
}

/// Negative radii load as zero
fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(f32::deserialize(deserializer)?.max(0.0))
}

impl Unit {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius: radius.max(0.0),
        }
    }

    /// Stationary unit at `pos`
    pub fn at(pos: Vec2, radius: f32) -> Self {
        Self::new(pos, Vec2::ZERO, radius)
    }

    /// Integrate position over `t` turns at the current velocity
    #[inline]
    pub fn advance(&mut self, t: f32) {
        self.pos += self.vel * t;
    }
}

impl Body for Unit {
    #[inline]
    fn position(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    fn velocity(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    fn radius(&self) -> f32 {
        self.radius
    }
}
