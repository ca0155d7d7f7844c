//! Pickup placement
//!
//! Coin clusters and fuel canisters are scheduled purely from the frontier
//! position. A cursor only advances after its placement succeeded, so a
//! surface miss delays an item by a tick instead of losing it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::surface::SurfaceQuery;
use crate::settings::TrackSettings;

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Coin,
    Fuel,
}

/// A placed item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub collected: bool,
}

/// A placement decision, before an id is assigned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub kind: PickupKind,
    pub pos: Vec2,
}

/// Spawn cursors for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupSchedule {
    /// Start of the next coin cluster
    pub next_coin_x: f32,
    pub next_fuel_x: f32,
    /// Distance from the next fuel spawn to the one after it
    pub current_fuel_gap: f32,
    /// Fuel canisters placed so far
    pub fuel_placed: u32,
    /// Coin clusters placed so far
    pub clusters_placed: u32,
}

/// Decides when and where pickups appear
#[derive(Debug, Clone)]
pub struct PickupScheduler {
    schedule: PickupSchedule,
    coins_per_cluster: u32,
    coin_spacing: f32,
    coin_cluster_distance: f32,
    fuel_gap_increment: f32,
    safety_buffer: f32,
    pickup_height_offset: f32,
    fuel_visual_correction: f32,
}

impl PickupScheduler {
    /// Cursors start relative to the run's start position.
    /// Settings are expected to be validated already.
    pub fn new(settings: &TrackSettings, start_x: f32) -> Self {
        Self {
            schedule: PickupSchedule {
                next_coin_x: start_x + settings.first_coin_offset,
                next_fuel_x: start_x + settings.initial_fuel_gap,
                current_fuel_gap: settings.initial_fuel_gap,
                fuel_placed: 0,
                clusters_placed: 0,
            },
            coins_per_cluster: settings.coins_per_cluster,
            coin_spacing: settings.coin_spacing,
            coin_cluster_distance: settings.coin_cluster_distance,
            fuel_gap_increment: settings.fuel_gap_increment,
            safety_buffer: settings.safety_buffer,
            pickup_height_offset: settings.pickup_height_offset,
            fuel_visual_correction: settings.fuel_visual_correction,
        }
    }

    pub fn schedule(&self) -> &PickupSchedule {
        &self.schedule
    }

    /// Horizontal extent of one coin cluster
    fn cluster_span(&self) -> f32 {
        self.coins_per_cluster as f32 * self.coin_spacing
    }

    /// Coin x positions for a cluster starting at `start_x`
    pub fn cluster_positions(&self, start_x: f32) -> impl Iterator<Item = f32> + use<> {
        let spacing = self.coin_spacing;
        (0..self.coins_per_cluster).map(move |i| start_x + i as f32 * spacing)
    }

    /// Emit every placement the frontier now supports
    pub fn update(&mut self, ground: &impl SurfaceQuery, frontier_x: f32, out: &mut Vec<Placement>) {
        self.place_fuel(ground, frontier_x, out);
        self.place_coins(ground, frontier_x, out);
    }

    fn place_fuel(&mut self, ground: &impl SurfaceQuery, frontier_x: f32, out: &mut Vec<Placement>) {
        while self.schedule.next_fuel_x < frontier_x - self.safety_buffer {
            let x = self.schedule.next_fuel_x;
            let Some(height) = ground.ground_height(x).height() else {
                log::warn!("No ground under fuel at x={:.1}, deferring", x);
                break;
            };

            out.push(Placement {
                kind: PickupKind::Fuel,
                pos: Vec2::new(
                    x,
                    height + self.pickup_height_offset + self.fuel_visual_correction,
                ),
            });
            self.schedule.fuel_placed += 1;
            self.schedule.current_fuel_gap += self.fuel_gap_increment;
            self.schedule.next_fuel_x += self.schedule.current_fuel_gap;
            log::debug!(
                "Fuel placed at x={:.1}, next at {:.1} (gap {:.1})",
                x,
                self.schedule.next_fuel_x,
                self.schedule.current_fuel_gap
            );
        }
    }

    fn place_coins(&mut self, ground: &impl SurfaceQuery, frontier_x: f32, out: &mut Vec<Placement>) {
        while self.schedule.next_coin_x < frontier_x - (self.cluster_span() + self.safety_buffer) {
            let start = self.schedule.next_coin_x;

            // All or nothing: the cluster waits until every coin has ground
            let mut cluster = Vec::with_capacity(self.coins_per_cluster as usize);
            for x in self.cluster_positions(start) {
                match ground.ground_height(x).height() {
                    Some(height) => cluster.push(Placement {
                        kind: PickupKind::Coin,
                        pos: Vec2::new(x, height + self.pickup_height_offset),
                    }),
                    None => break,
                }
            }
            if cluster.len() < self.coins_per_cluster as usize {
                log::warn!("No ground under coin cluster at x={:.1}, deferring", start);
                break;
            }

            out.extend(cluster);
            self.schedule.clusters_placed += 1;
            self.schedule.next_coin_x += self.coin_cluster_distance;
            log::debug!("Coin cluster placed at x={:.1}", start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::surface::SurfaceHit;

    /// Flat ground at height 0 between `start` and `end`
    struct FlatGround {
        start: f32,
        end: f32,
    }

    impl SurfaceQuery for FlatGround {
        fn ground_height(&self, x: f32) -> SurfaceHit {
            if x >= self.start && x <= self.end {
                SurfaceHit::at(0.0)
            } else {
                SurfaceHit::miss()
            }
        }
    }

    fn settings() -> TrackSettings {
        TrackSettings {
            initial_fuel_gap: 100.0,
            fuel_gap_increment: 20.0,
            coins_per_cluster: 5,
            coin_spacing: 1.5,
            first_coin_offset: 50.0,
            coin_cluster_distance: 100.0,
            safety_buffer: 18.0,
            pickup_height_offset: 1.5,
            fuel_visual_correction: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_fuel_gaps_grow_arithmetically() {
        let mut scheduler = PickupScheduler::new(&settings(), 0.0);
        let ground = FlatGround { start: -20.0, end: 1000.0 };
        let mut out = Vec::new();
        scheduler.update(&ground, 400.0, &mut out);

        let fuel: Vec<f32> = out
            .iter()
            .filter(|p| p.kind == PickupKind::Fuel)
            .map(|p| p.pos.x)
            .collect();
        assert_eq!(fuel, vec![100.0, 220.0, 360.0]);
        assert_eq!(scheduler.schedule().current_fuel_gap, 160.0);
        assert_eq!(scheduler.schedule().fuel_placed, 3);
        assert_eq!(scheduler.schedule().next_fuel_x, 520.0);
    }

    #[test]
    fn test_coin_cluster_positions() {
        let mut scheduler = PickupScheduler::new(&settings(), 0.0);
        let ground = FlatGround { start: -20.0, end: 1000.0 };
        let mut out = Vec::new();
        // Cluster at 50 needs frontier > 50 + 7.5 + 18
        scheduler.update(&ground, 75.5, &mut out);
        assert!(out.is_empty());

        scheduler.update(&ground, 76.0, &mut out);
        let coins: Vec<f32> = out.iter().map(|p| p.pos.x).collect();
        assert_eq!(coins, vec![50.0, 51.5, 53.0, 54.5, 56.0]);
        assert!(out.iter().all(|p| p.pos.y == 1.5));
        assert_eq!(scheduler.schedule().next_coin_x, 150.0);
        assert_eq!(scheduler.schedule().clusters_placed, 1);
    }

    #[test]
    fn test_miss_defers_without_advancing() {
        let mut scheduler = PickupScheduler::new(&settings(), 0.0);
        // Ground ends inside the coin cluster and before the fuel spot
        let ground = FlatGround { start: 0.0, end: 52.0 };
        let mut out = Vec::new();
        scheduler.update(&ground, 200.0, &mut out);
        assert!(out.is_empty());
        assert_eq!(scheduler.schedule().next_coin_x, 50.0);
        assert_eq!(scheduler.schedule().next_fuel_x, 100.0);
        assert_eq!(scheduler.schedule().clusters_placed, 0);
        assert_eq!(scheduler.schedule().fuel_placed, 0);

        // Ground catches up: nothing was lost
        let ground = FlatGround { start: 0.0, end: 200.0 };
        scheduler.update(&ground, 200.0, &mut out);
        assert_eq!(out.iter().filter(|p| p.kind == PickupKind::Coin).count(), 10);
        assert_eq!(out.iter().filter(|p| p.kind == PickupKind::Fuel).count(), 1);
        assert_eq!(scheduler.schedule().clusters_placed, 2);
        assert_eq!(scheduler.schedule().fuel_placed, 1);
    }

    #[test]
    fn test_offsets_relative_to_start() {
        let mut scheduler = PickupScheduler::new(&settings(), 1000.0);
        let ground = FlatGround { start: 900.0, end: 2000.0 };
        let mut out = Vec::new();
        scheduler.update(&ground, 1130.0, &mut out);
        assert_eq!(
            out.iter().find(|p| p.kind == PickupKind::Fuel).map(|p| p.pos.x),
            Some(1100.0)
        );
        assert_eq!(out.first().map(|p| p.kind), Some(PickupKind::Fuel));
    }
}
