//! Trailing cleanup
//!
//! Keeps geometry and items bounded by dropping whatever has fallen too far
//! behind the reference point. Never touches the frontier.

use super::path::{PathPoint, PathStore};
use super::pickups::Pickup;

/// Evicts stale path points and pickups behind the reference point
#[derive(Debug, Clone, Copy)]
pub struct StreamingWindow {
    pub trailing_distance: f32,
    /// Extra distance pickups survive past the trailing distance
    pub item_clearance: f32,
}

impl StreamingWindow {
    pub fn new(trailing_distance: f32, item_clearance: f32) -> Self {
        Self {
            trailing_distance,
            item_clearance,
        }
    }

    /// Remove path points more than `trailing_distance` behind `reference_x`.
    /// Stops at the retained minimum; the ribbon's closing bottom corner
    /// follows the new front point.
    pub fn evict_behind(path: &mut PathStore, reference_x: f32, trailing_distance: f32) -> Vec<PathPoint> {
        let mut removed = Vec::new();
        while let Some(front) = path.front() {
            if reference_x - front.x <= trailing_distance {
                break;
            }
            match path.remove_front_point() {
                Some(point) => removed.push(point),
                None => break,
            }
        }
        removed
    }

    /// Evict path points using this window's trailing distance
    pub fn evict_path(&self, path: &mut PathStore, reference_x: f32) -> usize {
        let removed = Self::evict_behind(path, reference_x, self.trailing_distance);
        if !removed.is_empty() {
            log::debug!(
                "Evicted {} path point(s) behind x={:.1}",
                removed.len(),
                reference_x
            );
        }
        removed.len()
    }

    /// Remove pickups beyond the item horizon, returning them
    pub fn evict_pickups(&self, pickups: &mut Vec<Pickup>, reference_x: f32) -> Vec<Pickup> {
        let horizon = self.trailing_distance + self.item_clearance;
        let (stale, live): (Vec<_>, Vec<_>) = pickups
            .drain(..)
            .partition(|p| reference_x - p.pos.x > horizon);
        *pickups = live;
        stale
    }
}
