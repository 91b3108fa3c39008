//! Continuous collision detection between moving circles
//!
//! The tricky part of the race physics: two circles moving at constant
//! velocity during one turn, and whether (and when) they first touch.

use glam::Vec2;

use super::point::PointExt;
use super::unit::Body;

/// A predicted impact between two bodies within the current turn
///
/// Borrows both bodies, so it cannot outlive the turn it was computed for.
#[derive(Debug, Clone, Copy)]
pub struct Collision<'a> {
    pub u1: &'a dyn Body,
    pub u2: &'a dyn Body,
    /// Fraction of the turn elapsed before impact, in [0, 1]
    pub dist: f32,
}

impl<'a> Collision<'a> {
    pub fn new(u1: &'a dyn Body, u2: &'a dyn Body, dist: f32) -> Self {
        Self { u1, u2, dist }
    }

    /// Impact at the very start of the turn: already overlapping, or exactly
    /// touching and closing
    #[inline]
    pub fn is_immediate(&self) -> bool {
        self.dist == 0.0
    }
}

/// Swept-circle test: first contact of `a` and `b` within one turn
///
/// Steps run in a fixed order; each rejection is an early exit, so the
/// degenerate inputs are caught before the divisions that would trip on them.
pub fn swept_collision<'a>(a: &'a dyn Body, b: &'a dyn Body) -> Option<Collision<'a>> {
    let dist = a.position().distance2(b.position());
    let r = a.radius() + b.radius();
    let sr = r * r;

    // Already overlapping
    if dist < sr {
        log::trace!("immediate collision: dist2={dist} sr={sr}");
        return Some(Collision::new(a, b, 0.0));
    }

    // Same velocity: the gap never changes
    if a.velocity() == b.velocity() {
        return None;
    }

    // Frame of b: b sits still at the origin
    let myp = a.position() - b.position();
    let v = a.velocity() - b.velocity();
    let origin = Vec2::ZERO;

    let p = origin.closest(myp, myp + v);
    let pdist = origin.distance2(p);
    let mypdist = myp.distance2(p);

    // Closest approach never gets within range
    if pdist >= sr {
        return None;
    }

    let length = v.length();
    let backdist = (sr - pdist).sqrt();
    let contact = p - v / length * backdist;

    // Contact point lies behind us: moving away
    if myp.distance2(contact) > mypdist {
        return None;
    }

    let travel = PointExt::distance(contact, myp);

    // Impact after this turn ends
    if travel > length {
        return None;
    }

    let t = travel / length;
    log::trace!("collision in {t:.4} of the turn");
    Some(Collision::new(a, b, t))
}

/// Earliest collision among every unordered pair of `bodies`
///
/// Ties keep the first pair in index order.
pub fn first_collision<'a>(bodies: &[&'a dyn Body]) -> Option<Collision<'a>> {
    let mut best: Option<Collision<'a>> = None;

    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            if let Some(hit) = swept_collision(*a, *b) {
                if best.is_none_or(|c| hit.dist < c.dist) {
                    best = Some(hit);
                }
            }
        }
    }

    best
}
