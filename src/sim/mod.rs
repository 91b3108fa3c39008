//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Closed-form arithmetic only, no I/O
//! - Units are mutated in place by their owner, never shared across threads
//! - Turn input and shield/timeout bookkeeping come from an external driver

pub mod collision;
pub mod pod;
pub mod point;
pub mod turn;
pub mod unit;

pub use collision::{Collision, first_collision, swept_collision};
pub use pod::Pod;
pub use point::PointExt;
pub use turn::{Decision, Thrust, ThrustError, TurnInput};
pub use unit::{Body, Unit};
