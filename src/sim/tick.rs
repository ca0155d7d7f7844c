//! Per-frame track update
//!
//! One tick runs the pipeline in a fixed order: extend the path, place
//! pickups the new ground supports, apply collection reports, burn fuel,
//! evict trailing geometry and items. The caller rebakes geometry when a
//! `GeometryChanged` event comes back.

use super::pickups::{Pickup, Placement};
use super::state::{TrackEvent, TrackState};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current X of the tracked vehicle
    pub reference_x: f32,
    /// Seconds since the previous tick
    pub dt: f32,
    /// Vehicle is throttling (burns fuel)
    pub throttle: bool,
    /// Pickup IDs the world reported collected since the previous tick
    pub collected: Vec<u32>,
}

impl TickInput {
    pub fn at(reference_x: f32, dt: f32) -> Self {
        Self {
            reference_x,
            dt,
            ..Default::default()
        }
    }
}

/// Advance the track by one tick
pub fn tick(state: &mut TrackState, input: &TickInput) -> Vec<TrackEvent> {
    let mut events = Vec::new();

    if !input.reference_x.is_finite() {
        log::warn!("Ignoring tick with non-finite reference x");
        return events;
    }

    state.time_ticks += 1;
    state.reference_x = input.reference_x;
    state.stats.track_distance(input.reference_x);

    // Extend
    let added = state.generator.update(&mut state.path, input.reference_x);

    // Schedule
    let mut placements: Vec<Placement> = Vec::new();
    state
        .scheduler
        .update(&state.path, state.generator.frontier_x(), &mut placements);
    for placement in placements {
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            kind: placement.kind,
            pos: placement.pos,
            collected: false,
        });
        events.push(TrackEvent::PickupSpawned {
            id,
            kind: placement.kind,
            pos: placement.pos,
        });
    }

    // Collection reports
    for &id in &input.collected {
        if let Some(kind) = state.collect(id) {
            events.push(TrackEvent::PickupCollected { id, kind });
        }
    }

    // Fuel
    if input.throttle && input.dt > 0.0 && state.stats.fuel.burn(input.dt) {
        log::info!("Fuel empty at x={:.1}", input.reference_x);
        events.push(TrackEvent::FuelEmpty);
    }

    // Evict
    let removed = state.window.evict_path(&mut state.path, input.reference_x);
    for pickup in state.window.evict_pickups(&mut state.pickups, input.reference_x) {
        events.push(TrackEvent::PickupEvicted {
            id: pickup.id,
            kind: pickup.kind,
        });
    }

    if added > 0 || removed > 0 {
        events.push(TrackEvent::GeometryChanged { added, removed });
    }

    // Ensure deterministic ordering
    state.normalize_order();
    events
}
