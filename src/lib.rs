//! Endless Road - procedural track streaming for an endless 2D driving game
//!
//! Core modules:
//! - `sim`: Deterministic track pipeline (path, surface queries, generation, pickups, eviction)
//! - `run`: Per-run economy (fuel tank, coins, distance meter)
//! - `settings`: Data-driven track tuning
//! - `error`: Configuration errors

pub mod error;
pub mod run;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{DifficultyPreset, TrackSettings};

/// Track tuning defaults
pub mod consts {
    /// Fixed simulation timestep used by the headless driver
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Path geometry
    pub const SEGMENT_LENGTH: f32 = 4.0;
    pub const MIN_HEIGHT: f32 = -3.0;
    pub const MAX_HEIGHT: f32 = 10.0;
    pub const HEIGHT_VARIATION: f32 = 6.0;
    pub const BOTTOM_DEPTH: f32 = 15.0;
    pub const SMOOTHNESS: f32 = 0.3;
    pub const EXTREME_DIFFICULTY_CHANCE: f32 = 0.2;
    /// Multiplier applied to the variation on a difficulty spike
    pub const EXTREME_VARIATION_FACTOR: f32 = 1.5;
    /// Tangent hint length as a fraction of the segment length
    pub const TANGENT_FACTOR: f32 = 0.4;

    /// Run start
    pub const FLAT_START_DISTANCE: f32 = 20.0;
    pub const INITIAL_GROUND_HEIGHT: f32 = -2.0;
    /// Road begins this far behind the vehicle
    pub const BACKFILL_DISTANCE: f32 = 15.0;
    /// Back wall sits this far above the front of the road
    pub const BACK_WALL_LIFT: f32 = 10.0;

    /// Coins
    pub const COINS_PER_CLUSTER: u32 = 5;
    pub const COIN_SPACING: f32 = 1.5;
    pub const COIN_CLUSTER_DISTANCE: f32 = 100.0;
    pub const FIRST_COIN_OFFSET: f32 = 50.0;

    /// Fuel pacing
    pub const INITIAL_FUEL_GAP: f32 = 100.0;
    pub const FUEL_GAP_INCREMENT: f32 = 20.0;

    /// Streaming window
    pub const LOOKAHEAD_DISTANCE: f32 = 20.0;
    pub const TRAILING_DISTANCE: f32 = 100.0;
    pub const SAFETY_BUFFER: f32 = 18.0;
    pub const ITEM_CLEARANCE: f32 = 10.0;

    /// Pickup placement above the ground
    pub const PICKUP_HEIGHT_OFFSET: f32 = 1.5;
    pub const FUEL_VISUAL_CORRECTION: f32 = 0.0;

    /// Run economy
    pub const MAX_FUEL: f32 = 100.0;
    pub const FUEL_CONSUMPTION_RATE: f32 = 0.2;
    pub const COINS_PER_COLLECTIBLE: u32 = 5;
    /// Movement below this is ignored by the distance meter
    pub const DISTANCE_EPSILON: f32 = 0.01;
}

/// Linear interpolation from `a` to `b` by `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
