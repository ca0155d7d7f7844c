//! Forward path generation
//!
//! A height random walk with smoothing. The first stretch of every run is a
//! flat launch corridor; past it heights wander within `[min_height,
//! max_height]`, with an occasional widened draw as a difficulty spike.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::path::{PathPoint, PathStore};
use crate::consts::{EXTREME_VARIATION_FACTOR, TANGENT_FACTOR};
use crate::error::ConfigError;
use crate::lerp;
use crate::settings::TrackSettings;

/// Generator state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratorPhase {
    /// Frontier is far enough ahead of the reference point
    Idle,
    /// Frontier is within the lookahead distance
    Extending,
}

/// Generation cursor for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationState {
    /// X of the last generated point
    pub frontier_x: f32,
    /// Height of the last generated point
    pub last_height: f32,
    pub segment_length: f32,
    pub smoothness: f32,
    pub extreme_difficulty_chance: f32,
    /// Reference position when the run started
    pub initial_reference_x: f32,
    pub initial_ground_height: f32,
    /// Points at or before this x stay flat
    pub flat_end_x: f32,
}

/// Extends the path ahead of the reference point
#[derive(Debug, Clone)]
pub struct SegmentGenerator {
    state: GenerationState,
    phase: GeneratorPhase,
    min_height: f32,
    max_height: f32,
    height_variation: f32,
    lookahead_distance: f32,
    max_segments_per_tick: u32,
    rng: Pcg32,
}

impl SegmentGenerator {
    /// Seed the ribbon with a flat segment starting `backfill_distance` behind
    /// the reference point, then fill ahead until the frontier is a full
    /// lookahead past it, so there is ground under the vehicle at spawn.
    pub fn start(
        settings: &TrackSettings,
        path: &mut PathStore,
        reference_x: f32,
        rng: Pcg32,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        if !reference_x.is_finite() {
            return Err(ConfigError::invalid(
                "reference_x",
                format!("{reference_x} is not finite"),
            ));
        }

        let start_x = reference_x - settings.backfill_distance;
        let frontier_x = start_x + settings.segment_length;
        let ground = settings.initial_ground_height;
        let tangent = settings.segment_length * TANGENT_FACTOR;

        path.push_point(PathPoint::new(start_x, ground));
        path.push_point(PathPoint::new(frontier_x, ground).with_tangent(tangent));

        let mut generator = Self {
            state: GenerationState {
                frontier_x,
                last_height: ground,
                segment_length: settings.segment_length,
                smoothness: settings.smoothness,
                extreme_difficulty_chance: settings.extreme_difficulty_chance,
                initial_reference_x: reference_x,
                initial_ground_height: ground,
                flat_end_x: reference_x + settings.flat_start_distance,
            },
            phase: GeneratorPhase::Idle,
            min_height: settings.min_height,
            max_height: settings.max_height,
            height_variation: settings.height_variation,
            lookahead_distance: settings.lookahead_distance,
            max_segments_per_tick: settings.max_segments_per_tick,
            rng,
        };

        // Uncapped: the per-tick budget only applies once the run is live
        while generator.wants_extension(reference_x) {
            generator.extend(path);
        }
        Ok(generator)
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn phase(&self) -> GeneratorPhase {
        self.phase
    }

    pub fn frontier_x(&self) -> f32 {
        self.state.frontier_x
    }

    fn wants_extension(&self, reference_x: f32) -> bool {
        reference_x > self.state.frontier_x - self.lookahead_distance
    }

    /// Extend the path toward `reference_x + lookahead`. Returns segments added.
    pub fn update(&mut self, path: &mut PathStore, reference_x: f32) -> u32 {
        let mut added = 0;
        while self.wants_extension(reference_x) && added < self.max_segments_per_tick {
            self.phase = GeneratorPhase::Extending;
            self.extend(path);
            added += 1;
        }

        if !self.wants_extension(reference_x) {
            self.phase = GeneratorPhase::Idle;
        }
        if added > 0 {
            log::debug!(
                "Extended path by {} segment(s), frontier {:.1}, height {:.2}",
                added,
                self.state.frontier_x,
                self.state.last_height
            );
        }
        added
    }

    /// Generate exactly one segment past the frontier
    pub fn extend(&mut self, path: &mut PathStore) -> PathPoint {
        let new_x = self.state.frontier_x + self.state.segment_length;
        let next_height = if new_x <= self.state.flat_end_x {
            lerp(
                self.state.last_height,
                self.state.initial_ground_height,
                self.state.smoothness,
            )
        } else {
            let target = self.draw_target_height();
            // Rounding in the blend must not leak past the range
            lerp(self.state.last_height, target, self.state.smoothness)
                .clamp(self.min_height, self.max_height)
        };
        let point = PathPoint::new(new_x, next_height)
            .with_tangent(self.state.segment_length * TANGENT_FACTOR);
        path.push_point(point);

        self.state.frontier_x = new_x;
        self.state.last_height = next_height;
        point
    }

    fn draw_target_height(&mut self) -> f32 {
        let spike = self
            .rng
            .random_bool(f64::from(self.state.extreme_difficulty_chance));
        let variation = if spike {
            self.height_variation * EXTREME_VARIATION_FACTOR
        } else {
            self.height_variation
        };

        let offset = if variation > 0.0 {
            self.rng.random_range(-variation..=variation)
        } else {
            0.0
        };
        (self.state.last_height + offset).clamp(self.min_height, self.max_height)
    }
}
