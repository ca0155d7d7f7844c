//! Ground height queries over the ribbon's top edge
//!
//! The top edge is treated as a piecewise-linear height function of `x`.
//! Lookups binary-search the ascending point list.

use super::path::PathStore;

/// Result of a ground query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ground height (meaningless unless `hit`)
    pub height: f32,
    /// Whether generated ground exists at the queried x
    pub hit: bool,
}

impl SurfaceHit {
    pub fn miss() -> Self {
        Self {
            height: 0.0,
            hit: false,
        }
    }

    pub fn at(height: f32) -> Self {
        Self { height, hit: true }
    }

    pub fn height(&self) -> Option<f32> {
        self.hit.then_some(self.height)
    }
}

/// Read access to generated ground
pub trait SurfaceQuery {
    /// Cast straight down at `x` and report the ground height
    fn ground_height(&self, x: f32) -> SurfaceHit;
}

impl SurfaceQuery for PathStore {
    fn ground_height(&self, x: f32) -> SurfaceHit {
        let count = self.point_count();
        if count < 2 || !x.is_finite() {
            return SurfaceHit::miss();
        }
        let (Some(first), Some(last)) = (self.front(), self.back()) else {
            return SurfaceHit::miss();
        };
        if x < first.x || x > last.x {
            return SurfaceHit::miss();
        }

        // Segment [i - 1, i] brackets x; the last point closes the final segment
        let i = self.upper_bound(x).clamp(1, count - 1);
        let (Some(a), Some(b)) = (self.point_at(i - 1), self.point_at(i)) else {
            return SurfaceHit::miss();
        };

        let span = b.x - a.x;
        let t = if span > 0.0 { (x - a.x) / span } else { 0.0 };
        SurfaceHit::at(crate::lerp(a.y_top, b.y_top, t))
    }
}
