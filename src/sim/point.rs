//! 2D point primitive
//!
//! Points are plain `glam::Vec2` values. This module adds the distance and
//! line-projection queries the collision routine is built on.

use glam::Vec2;

/// Distance and projection queries on a point
pub trait PointExt: Copy {
    /// Squared Euclidean distance (no square root)
    fn distance2(self, other: Self) -> f32;

    /// Euclidean distance
    ///
    /// `Vec2` has an inherent `distance` that shadows this one in method
    /// syntax; call it as `PointExt::distance(a, b)`.
    fn distance(self, other: Self) -> f32;

    /// Closest point to `self` on the infinite line through `a` and `b`
    ///
    /// When `a == b` the line is degenerate and `self` is returned unchanged.
    fn closest(self, a: Self, b: Self) -> Self;
}

impl PointExt for Vec2 {
    #[inline]
    fn distance2(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    fn distance(self, other: Vec2) -> f32 {
        self.distance2(other).sqrt()
    }

    fn closest(self, a: Vec2, b: Vec2) -> Vec2 {
        // Line in the form da*x + db*y = c1, with (da, db) its normal
        let da = b.y - a.y;
        let db = a.x - b.x;
        let c1 = da * a.x + db * a.y;
        let c2 = -db * self.x + da * self.y;
        let det = da * da + db * db;

        if det == 0.0 {
            return self;
        }

        Vec2::new((da * c1 - db * c2) / det, (da * c2 + db * c1) / det)
    }
}
