//! Track state and core simulation types
//!
//! Everything one run owns lives here. A new run is a new `TrackState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::generator::SegmentGenerator;
use super::path::PathStore;
use super::pickups::{Pickup, PickupKind, PickupScheduler};
use super::surface::{SurfaceHit, SurfaceQuery};
use super::window::StreamingWindow;
use crate::consts::BACK_WALL_LIFT;
use crate::error::ConfigError;
use crate::run::RunStats;
use crate::settings::TrackSettings;

/// Notifications produced by a tick, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackEvent {
    /// A pickup now exists in the world
    PickupSpawned { id: u32, kind: PickupKind, pos: Vec2 },
    /// A pickup was reported collected and removed
    PickupCollected { id: u32, kind: PickupKind },
    /// A pickup fell behind the window without being collected
    PickupEvicted { id: u32, kind: PickupKind },
    /// Ribbon geometry changed and should be rebaked
    GeometryChanged { added: u32, removed: usize },
    /// The fuel tank just ran dry
    FuelEmpty,
}

/// Complete run state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct TrackState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: TrackSettings,
    /// Ground ribbon
    pub path: PathStore,
    pub generator: SegmentGenerator,
    pub scheduler: PickupScheduler,
    pub window: StreamingWindow,
    /// Live pickups (ascending id)
    pub pickups: Vec<Pickup>,
    pub stats: RunStats,
    /// Last polled reference position
    pub reference_x: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl TrackState {
    /// Start a run with the reference point at `reference_x`
    pub fn new(settings: TrackSettings, seed: u64, reference_x: f32) -> Result<Self, ConfigError> {
        let mut path = PathStore::new(settings.bottom_depth);
        let generator = SegmentGenerator::start(
            &settings,
            &mut path,
            reference_x,
            Pcg32::seed_from_u64(seed),
        )?;
        let scheduler = PickupScheduler::new(&settings, reference_x);
        let window = StreamingWindow::new(settings.trailing_distance, settings.item_clearance);
        let stats = RunStats::new(&settings, reference_x);

        log::info!(
            "Track started at x={:.1} with seed {} (frontier {:.1})",
            reference_x,
            seed,
            generator.frontier_x()
        );

        Ok(Self {
            seed,
            settings,
            path,
            generator,
            scheduler,
            window,
            pickups: Vec::new(),
            stats,
            reference_x,
            time_ticks: 0,
            next_id: 1,
        })
    }

    /// Throw the run away and start a fresh one with the same settings
    pub fn restart(&mut self, seed: u64, reference_x: f32) -> Result<(), ConfigError> {
        *self = Self::new(self.settings.clone(), seed, reference_x)?;
        log::info!("Track restarted");
        Ok(())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn frontier_x(&self) -> f32 {
        self.generator.frontier_x()
    }

    /// Live extent `[reference - trailing, frontier]`
    pub fn window_bounds(&self) -> (f32, f32) {
        (
            self.reference_x - self.settings.trailing_distance,
            self.frontier_x(),
        )
    }

    /// Anchor for the invisible wall that stops the vehicle reversing off the ribbon
    pub fn back_wall(&self) -> Option<Vec2> {
        self.path
            .front()
            .map(|p| Vec2::new(p.x, p.y_top + BACK_WALL_LIFT))
    }

    pub fn pickup(&self, id: u32) -> Option<&Pickup> {
        self.pickups
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.pickups[i])
    }

    /// Mark a pickup collected and remove it. Returns its kind, or None if it
    /// is no longer live.
    pub fn collect(&mut self, id: u32) -> Option<PickupKind> {
        let index = self.pickups.binary_search_by_key(&id, |p| p.id).ok()?;
        let mut pickup = self.pickups.remove(index);
        pickup.collected = true;

        match pickup.kind {
            PickupKind::Coin => self.stats.collect_coin(),
            PickupKind::Fuel => self.stats.fuel.refill(),
        }
        log::debug!("Collected {:?} #{}", pickup.kind, pickup.id);
        Some(pickup.kind)
    }

    /// Ensure pickups are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.pickups.sort_by_key(|p| p.id);
    }
}

impl SurfaceQuery for TrackState {
    fn ground_height(&self, x: f32) -> SurfaceHit {
        self.path.ground_height(x)
    }
}
