//! Per-turn values exchanged with the race driver
//!
//! The driver reads one `TurnInput` and writes one `Decision` each turn.
//! Reading and writing them is the driver's job; these are just the values.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pod::Pod;
use crate::tuning::Tuning;

/// Thrust value outside the engine's accepted range
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrustError {
    #[error("thrust {value} out of range 0..={max}")]
    OutOfRange { value: i32, max: u32 },
}

/// Thrust for one turn: an engine power, or the reserved shield command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Thrust {
    Power(u32),
    /// Raise the shield instead of accelerating
    Shield,
}

impl Thrust {
    /// Validated engine power
    pub fn new(value: i32, tuning: &Tuning) -> Result<Self, ThrustError> {
        match u32::try_from(value) {
            Ok(power) if power <= tuning.max_thrust => Ok(Thrust::Power(power)),
            _ => Err(ThrustError::OutOfRange {
                value,
                max: tuning.max_thrust,
            }),
        }
    }

    /// Numeric thrust fed to `Pod::boost` (zero for a shield turn)
    pub fn power(&self) -> f32 {
        match self {
            Thrust::Power(p) => *p as f32,
            Thrust::Shield => 0.0,
        }
    }

    pub fn is_shield(&self) -> bool {
        matches!(self, Thrust::Shield)
    }
}

impl fmt::Display for Thrust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thrust::Power(p) => write!(f, "{p}"),
            Thrust::Shield => f.write_str("SHIELD"),
        }
    }
}

/// Steering decision for one turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Point to rotate toward
    pub target: Vec2,
    pub thrust: Thrust,
}

impl Decision {
    pub fn new(target: Vec2, thrust: Thrust) -> Self {
        Self { target, thrust }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.target.x.round() as i32,
            self.target.y.round() as i32,
            self.thrust
        )
    }
}

/// Sensor values observed at the start of a turn
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TurnInput {
    pub position: Vec2,
    pub checkpoint: Vec2,
    pub checkpoint_distance: f32,
    /// Angle between the pod's heading and the checkpoint (degrees)
    pub checkpoint_angle: f32,
    pub opponent: Option<Vec2>,
}

impl TurnInput {
    /// Overwrite the pod's position with the observed one
    pub fn sync(&self, pod: &mut Pod) {
        pod.unit.pos = self.position;
    }
}
