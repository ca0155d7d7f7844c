//! Ground ribbon storage
//!
//! The ribbon is stored as its top edge only. Each top point implies a bottom
//! companion `bottom_depth` below it; the closed outline is built on demand so
//! the bottom corners always mirror the current first and last top points.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fewest top points the store will shrink to (one renderable segment)
pub const MIN_RETAINED_POINTS: usize = 2;

/// A vertex of the ribbon's top edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f32,
    pub y_top: f32,
    /// Horizontal tangent length for curve rendering (0 = sharp corner)
    #[serde(default)]
    pub tangent: f32,
}

impl PathPoint {
    pub fn new(x: f32, y_top: f32) -> Self {
        Self {
            x,
            y_top,
            tangent: 0.0,
        }
    }

    pub fn with_tangent(mut self, tangent: f32) -> Self {
        self.tangent = tangent;
        self
    }

    #[inline]
    pub fn top(&self) -> Vec2 {
        Vec2::new(self.x, self.y_top)
    }

    #[inline]
    pub fn bottom(&self, bottom_depth: f32) -> Vec2 {
        Vec2::new(self.x, self.y_top - bottom_depth)
    }
}

/// Ordered top-edge points, ascending in `x`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathStore {
    points: VecDeque<PathPoint>,
    bottom_depth: f32,
}

impl PathStore {
    pub fn new(bottom_depth: f32) -> Self {
        Self {
            points: VecDeque::new(),
            bottom_depth,
        }
    }

    pub fn bottom_depth(&self) -> f32 {
        self.bottom_depth
    }

    /// Insert a point. Callers keep `x` ascending.
    pub fn insert_point(&mut self, index: usize, point: PathPoint) {
        debug_assert!(
            index
                .checked_sub(1)
                .and_then(|i| self.points.get(i))
                .is_none_or(|prev| prev.x < point.x),
            "path points must stay ascending in x"
        );
        debug_assert!(
            self.points.get(index).is_none_or(|next| point.x < next.x),
            "path points must stay ascending in x"
        );
        self.points.insert(index, point);
    }

    /// Append a point past the current frontier
    pub fn push_point(&mut self, point: PathPoint) {
        self.insert_point(self.points.len(), point);
    }

    /// Replace the point at `index`. Returns false if out of range.
    pub fn set_point(&mut self, index: usize, point: PathPoint) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = point;
                true
            }
            None => false,
        }
    }

    /// Remove the leftmost point, unless that would leave too few to render
    pub fn remove_front_point(&mut self) -> Option<PathPoint> {
        if self.points.len() <= MIN_RETAINED_POINTS {
            return None;
        }
        self.points.pop_front()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn point_at(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    pub fn front(&self) -> Option<&PathPoint> {
        self.points.front()
    }

    /// The frontier point
    pub fn back(&self) -> Option<&PathPoint> {
        self.points.back()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathPoint> {
        self.points.iter()
    }

    /// Index of the first point with `x > target`
    pub(crate) fn upper_bound(&self, target: f32) -> usize {
        self.points.partition_point(|p| p.x <= target)
    }

    /// Closed outline: bottom-left, every top point, bottom-right
    pub fn ribbon(&self) -> Vec<Vec2> {
        let (Some(first), Some(last)) = (self.points.front(), self.points.back()) else {
            return Vec::new();
        };

        let mut outline = Vec::with_capacity(self.points.len() + 2);
        outline.push(first.bottom(self.bottom_depth));
        outline.extend(self.points.iter().map(PathPoint::top));
        outline.push(last.bottom(self.bottom_depth));
        outline
    }
}
