//! Steerable pods
//!
//! A pod is a unit with a heading. Each turn it rotates toward a target,
//! thrusts along its heading, moves, then snaps to the integer grid and loses
//! speed to friction.

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

use super::turn::Decision;
use super::unit::{Body, Unit};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{bearing_degrees, heading_vector, normalize_degrees, wrap_degrees};

/// A racing pod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    pub unit: Unit,
    /// Heading in degrees, always in [0, 360)
    #[serde(deserialize_with = "heading")]
    pub angle: f32,
    /// Turns left before elimination (reset externally on checkpoints)
    pub timeout: i32,
    /// Shield up: thrust is ignored (set externally)
    pub shield: bool,
}

/// Loaded headings are wrapped into [0, 360)
fn heading<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(wrap_degrees(f32::deserialize(deserializer)?))
}

impl Pod {
    /// Spawn a stationary pod with a full timeout
    pub fn new(pos: Vec2, angle: f32, tuning: &Tuning) -> Self {
        Self {
            unit: Unit::at(pos, tuning.pod_radius),
            angle: wrap_degrees(angle),
            timeout: tuning.timeout_turns,
            shield: false,
        }
    }

    /// Bearing from the pod to `target`, in [0, 360)
    ///
    /// A target on top of the pod reads as straight ahead.
    pub fn bearing(&self, target: Vec2) -> f32 {
        bearing_degrees(self.unit.pos, target).unwrap_or(self.angle)
    }

    /// Shortest signed turn from the heading to `target` (negative = left)
    pub fn diff_angle(&self, target: Vec2) -> f32 {
        let a = self.bearing(target);

        let right = if self.angle <= a {
            a - self.angle
        } else {
            360.0 - self.angle + a
        };
        let left = if self.angle >= a {
            self.angle - a
        } else {
            self.angle + 360.0 - a
        };

        if right < left { right } else { -left }
    }

    /// Turn toward `target`, at most 18 degrees
    pub fn rotate(&mut self, target: Vec2) {
        let a = self
            .diff_angle(target)
            .clamp(-MAX_ROTATION_DEG, MAX_ROTATION_DEG);
        self.angle = normalize_degrees(self.angle + a);
    }

    /// Accelerate along the heading; no effect while shielded
    pub fn boost(&mut self, thrust: f32) {
        if self.shield {
            log::debug!("shield up, ignoring thrust {thrust}");
            return;
        }
        self.unit.vel += heading_vector(self.angle) * thrust;
    }

    /// Move for `t` turns at the current velocity
    #[inline]
    pub fn advance(&mut self, t: f32) {
        self.unit.advance(t);
    }

    /// End-of-turn discretization: round position, apply friction, tick timeout
    pub fn end(&mut self) {
        self.unit.pos = self.unit.pos.round();
        // Truncate toward zero, not round
        let vel = self.unit.vel * FRICTION;
        self.unit.vel = Vec2::new(vel.x.trunc(), vel.y.trunc());
        self.timeout -= 1;
    }

    /// One full turn: rotate, boost, move, end
    pub fn play(&mut self, target: Vec2, thrust: f32) {
        self.rotate(target);
        self.boost(thrust);
        self.advance(TURN_DURATION);
        self.end();
    }

    /// Play one turn from a driver decision
    pub fn apply(&mut self, decision: &Decision) {
        self.play(decision.target, decision.thrust.power());
    }

    /// Checkpoint reached: timeout back to full
    pub fn reset_timeout(&mut self, tuning: &Tuning) {
        self.timeout = tuning.timeout_turns;
    }

    pub fn set_shield(&mut self, shield: bool) {
        self.shield = shield;
    }

    pub fn is_timed_out(&self) -> bool {
        self.timeout <= 0
    }
}

impl Body for Pod {
    #[inline]
    fn position(&self) -> Vec2 {
        self.unit.pos
    }

    #[inline]
    fn velocity(&self) -> Vec2 {
        self.unit.vel
    }

    #[inline]
    fn radius(&self) -> f32 {
        self.unit.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Thrust;
    use proptest::prelude::*;

    fn pod_at(pos: Vec2, angle: f32) -> Pod {
        Pod::new(pos, angle, &Tuning::default())
    }

    /// Signed circular difference in (-180, 180]
    fn circular_delta(from: f32, to: f32) -> f32 {
        let mut d = to - from;
        if d > 180.0 {
            d -= 360.0;
        } else if d <= -180.0 {
            d += 360.0;
        }
        d
    }

    #[test]
    fn test_new_pod() {
        let tuning = Tuning::default();
        let pod = Pod::new(Vec2::new(1.0, 2.0), -90.0, &tuning);
        assert_eq!(pod.angle, 270.0);
        assert_eq!(pod.timeout, 100);
        assert_eq!(pod.unit.radius, 400.0);
        assert_eq!(pod.unit.vel, Vec2::ZERO);
        assert!(!pod.shield);
    }

    #[test]
    fn test_deserialize_wraps_heading() {
        let json = r#"{
            "unit": { "pos": [0.0, 0.0], "vel": [0.0, 0.0], "radius": 400.0 },
            "angle": 720.0,
            "timeout": 100,
            "shield": false
        }"#;
        let mut pod: Pod = serde_json::from_str(json).unwrap();
        assert_eq!(pod.angle, 0.0);

        pod.rotate(Vec2::new(0.0, -10.0));
        assert!((0.0..360.0).contains(&pod.angle));
        assert!((pod.angle - 342.0).abs() < 0.001);
    }

    #[test]
    fn test_rotate_clamped_to_18() {
        let mut pod = pod_at(Vec2::ZERO, 0.0);
        pod.rotate(Vec2::new(0.0, 10.0));
        assert!((pod.angle - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_rotate_wraps_through_zero() {
        let mut pod = pod_at(Vec2::ZERO, 350.0);
        pod.rotate(heading_vector(10.0) * 1000.0);
        assert!((pod.angle - 8.0).abs() < 0.01);
    }

    #[test]
    fn test_rotate_left_wraps_below_zero() {
        let mut pod = pod_at(Vec2::ZERO, 5.0);
        pod.rotate(heading_vector(300.0) * 1000.0);
        assert!((pod.angle - 347.0).abs() < 0.01);
    }

    #[test]
    fn test_rotate_small_turn_exact() {
        let mut pod = pod_at(Vec2::ZERO, 0.0);
        pod.rotate(heading_vector(10.0) * 1000.0);
        assert!((pod.angle - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_diff_angle_sign() {
        let pod = pod_at(Vec2::ZERO, 90.0);
        // Target straight along +x: 90 degrees to the left
        assert!((pod.diff_angle(Vec2::new(10.0, 0.0)) + 90.0).abs() < 0.001);
        // Target along -x: 90 degrees to the right
        assert!((pod.diff_angle(Vec2::new(-10.0, 0.0)) - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_target_on_pod_does_not_turn() {
        let mut pod = pod_at(Vec2::new(5.0, 5.0), 123.0);
        assert_eq!(pod.diff_angle(Vec2::new(5.0, 5.0)), 0.0);
        pod.rotate(Vec2::new(5.0, 5.0));
        assert_eq!(pod.angle, 123.0);
    }

    #[test]
    fn test_boost_along_heading() {
        let mut pod = pod_at(Vec2::ZERO, 90.0);
        pod.boost(100.0);
        assert!(pod.unit.vel.x.abs() < 0.001);
        assert!((pod.unit.vel.y - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_shield_blocks_boost() {
        let mut pod = pod_at(Vec2::ZERO, 0.0);
        pod.unit.vel = Vec2::new(3.0, -7.0);
        pod.set_shield(true);
        pod.boost(200.0);
        assert_eq!(pod.unit.vel, Vec2::new(3.0, -7.0));
    }

    #[test]
    fn test_end_friction_truncates() {
        let mut pod = pod_at(Vec2::ZERO, 0.0);
        pod.unit.vel = Vec2::new(10.0, -10.0);
        pod.end();
        assert_eq!(pod.unit.vel, Vec2::new(8.0, -8.0));

        pod.unit.vel = Vec2::new(3.0, 0.0);
        pod.end();
        assert_eq!(pod.unit.vel, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_end_rounds_position_and_ticks_timeout() {
        let mut pod = pod_at(Vec2::ZERO, 0.0);
        pod.unit.pos = Vec2::new(10.4, -3.6);
        pod.end();
        assert_eq!(pod.unit.pos, Vec2::new(10.0, -4.0));
        assert_eq!(pod.timeout, 99);
    }

    #[test]
    fn test_play_full_turn() {
        let mut pod = pod_at(Vec2::ZERO, 0.0);
        pod.play(Vec2::new(1000.0, 0.0), 100.0);
        assert_eq!(pod.angle, 0.0);
        assert_eq!(pod.unit.pos, Vec2::new(100.0, 0.0));
        assert_eq!(pod.unit.vel, Vec2::new(85.0, 0.0));
        assert_eq!(pod.timeout, 99);
    }

    #[test]
    fn test_apply_decision_and_timeout() {
        let tuning = Tuning {
            timeout_turns: 2,
            ..Default::default()
        };
        let mut pod = Pod::new(Vec2::ZERO, 0.0, &tuning);
        let decision = Decision::new(Vec2::new(1000.0, 0.0), Thrust::Power(50));
        pod.apply(&decision);
        assert_eq!(pod.unit.pos, Vec2::new(50.0, 0.0));
        assert!(!pod.is_timed_out());
        pod.apply(&decision);
        assert!(pod.is_timed_out());
        pod.reset_timeout(&tuning);
        assert_eq!(pod.timeout, 2);
    }

    #[test]
    fn test_pod_collides_with_unit() {
        let mut pod = pod_at(Vec2::ZERO, 0.0);
        pod.unit.vel = Vec2::new(1000.0, 0.0);
        let wall = Unit::at(Vec2::new(1300.0, 0.0), 400.0);
        let hit = pod.collision(&wall).expect("should collide");
        // Contact at 500 of 1000 travelled
        assert!((hit.dist - 0.5).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_rotate_bounded_and_normalized(
            angle in 0f32..360.0,
            tx in -20000f32..20000.0, ty in -20000f32..20000.0,
        ) {
            let mut pod = pod_at(Vec2::ZERO, angle);
            let before = pod.angle;
            pod.rotate(Vec2::new(tx, ty));
            prop_assert!((0.0..360.0).contains(&pod.angle), "angle {}", pod.angle);
            let delta = circular_delta(before, pod.angle);
            prop_assert!(delta.abs() <= 18.001, "turned {}", delta);
        }

        #[test]
        fn prop_diff_angle_at_most_half_turn(
            angle in 0f32..360.0,
            px in -5000f32..5000.0, py in -5000f32..5000.0,
            tx in -5000f32..5000.0, ty in -5000f32..5000.0,
        ) {
            let pod = pod_at(Vec2::new(px, py), angle);
            let d = pod.diff_angle(Vec2::new(tx, ty));
            prop_assert!(d.abs() <= 180.001, "diff {}", d);
        }

        #[test]
        fn prop_shield_freezes_velocity(
            angle in 0f32..360.0,
            vx in -500f32..500.0, vy in -500f32..500.0,
            thrust in 0f32..200.0,
        ) {
            let mut pod = pod_at(Vec2::ZERO, angle);
            pod.unit.vel = Vec2::new(vx, vy);
            pod.shield = true;
            pod.boost(thrust);
            prop_assert_eq!(pod.unit.vel, Vec2::new(vx, vy));
        }

        #[test]
        fn prop_end_truncates_toward_zero(vx in -1000i32..1000, vy in -1000i32..1000) {
            let mut pod = pod_at(Vec2::ZERO, 0.0);
            pod.unit.vel = Vec2::new(vx as f32, vy as f32);
            pod.end();
            prop_assert_eq!(pod.unit.vel.x, (vx as f32 * 0.85).trunc());
            prop_assert_eq!(pod.unit.vel.y, (vy as f32 * 0.85).trunc());
            prop_assert!(pod.unit.vel.x.abs() <= (vx as f32).abs());
        }
    }
}
