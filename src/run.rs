//! Per-run economy
//!
//! Fuel, coins collected this run, and distance driven. Reset on every new
//! run; long-term currency storage belongs to the host.

use serde::{Deserialize, Serialize};

use crate::consts::DISTANCE_EPSILON;
use crate::settings::TrackSettings;

/// Vehicle fuel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelTank {
    pub current: f32,
    pub max: f32,
    /// Burned per second while throttling
    pub consumption_rate: f32,
    /// Set once the tank hits zero, cleared on refill
    empty_reported: bool,
}

impl FuelTank {
    pub fn new(max: f32, consumption_rate: f32) -> Self {
        Self {
            current: max,
            max,
            consumption_rate,
            empty_reported: false,
        }
    }

    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 { self.current / self.max } else { 0.0 }
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// Burn fuel for `dt` seconds of throttle. Returns true the first time
    /// the tank runs dry.
    pub fn burn(&mut self, dt: f32) -> bool {
        self.consume(self.consumption_rate * dt)
    }

    /// Remove `amount`, clamped to the tank. Returns true the first time the
    /// tank runs dry.
    pub fn consume(&mut self, amount: f32) -> bool {
        self.current = (self.current - amount).clamp(0.0, self.max);
        if self.is_empty() && !self.empty_reported {
            self.empty_reported = true;
            return true;
        }
        false
    }

    pub fn add(&mut self, amount: f32) {
        self.current = (self.current + amount).clamp(0.0, self.max);
        if !self.is_empty() {
            self.empty_reported = false;
        }
    }

    /// Fuel pickups fill the tank
    pub fn refill(&mut self) {
        self.current = self.max;
        self.empty_reported = false;
    }
}

/// Run statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub fuel: FuelTank,
    pub coins: u32,
    pub coins_per_collectible: u32,
    /// Total horizontal distance driven
    pub distance: f32,
    last_x: f32,
}

impl RunStats {
    pub fn new(settings: &TrackSettings, start_x: f32) -> Self {
        Self {
            fuel: FuelTank::new(settings.max_fuel, settings.fuel_consumption_rate),
            coins: 0,
            coins_per_collectible: settings.coins_per_collectible,
            distance: 0.0,
            last_x: start_x,
        }
    }

    pub fn collect_coin(&mut self) {
        self.coins += self.coins_per_collectible;
    }

    /// Spend coins if affordable
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if self.coins >= amount {
            self.coins -= amount;
            true
        } else {
            false
        }
    }

    /// Accumulate movement in either direction, ignoring jitter
    pub fn track_distance(&mut self, x: f32) {
        let delta = (x - self.last_x).abs();
        if delta > DISTANCE_EPSILON {
            self.distance += delta;
            self.last_x = x;
        }
    }
}
