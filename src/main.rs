//! Endless Road headless driver
//!
//! Streams a track under a vehicle moving at constant speed and logs what
//! the pipeline produced. Pass a settings JSON path as the first argument to
//! override the default tuning.

use endless_road::consts::SIM_DT;
use endless_road::sim::{PickupKind, SurfaceQuery, TickInput, TrackEvent, TrackState, tick};
use endless_road::{ConfigError, TrackSettings};

/// Vehicle speed in world units per second
const DRIVE_SPEED: f32 = 12.0;
/// Simulated run length in seconds
const RUN_SECONDS: f32 = 120.0;
/// Pickups within this horizontal distance of the vehicle are collected
const PICKUP_REACH: f32 = 0.75;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConfigError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => TrackSettings::load(path)?,
        None => TrackSettings::default(),
    };
    let seed = 0x5EED_u64;
    let mut state = TrackState::new(settings, seed, 0.0)?;
    log::info!("Endless Road (headless) starting...");

    let total_ticks = (RUN_SECONDS / SIM_DT) as u64;
    let mut x = 0.0_f32;
    let mut spawned = 0usize;
    let mut evicted = 0usize;
    let mut rebakes = 0usize;
    let mut collected = Vec::new();

    for _ in 0..total_ticks {
        if state.stats.fuel.is_empty() {
            break;
        }
        x += DRIVE_SPEED * SIM_DT;

        let input = TickInput {
            reference_x: x,
            dt: SIM_DT,
            throttle: true,
            collected: std::mem::take(&mut collected),
        };
        for event in tick(&mut state, &input) {
            match event {
                TrackEvent::PickupSpawned { .. } => spawned += 1,
                TrackEvent::PickupEvicted { .. } => evicted += 1,
                TrackEvent::GeometryChanged { .. } => rebakes += 1,
                TrackEvent::PickupCollected { kind: PickupKind::Fuel, .. } => {
                    log::info!("Refueled at x={:.1}", x);
                }
                TrackEvent::PickupCollected { .. } => {}
                TrackEvent::FuelEmpty => log::warn!("Out of fuel at x={:.1}", x),
            }
        }

        // Stand-in for the world's trigger volumes
        collected.extend(
            state
                .pickups
                .iter()
                .filter(|p| (p.pos.x - x).abs() <= PICKUP_REACH)
                .map(|p| p.id),
        );
    }

    let ground = state.ground_height(x).height().unwrap_or(f32::NAN);
    log::info!(
        "Run finished at x={:.1} (ground {:.2}): distance {:.1}, coins {}, fuel {:.0}%",
        x,
        ground,
        state.stats.distance,
        state.stats.coins,
        state.stats.fuel.fraction() * 100.0
    );
    log::info!(
        "Pickups spawned {}, evicted {}, live {}; rebakes {}; live path points {}",
        spawned,
        evicted,
        state.pickups.len(),
        rebakes,
        state.path.point_count()
    );
    println!(
        "distance={:.1} coins={} path_points={} frontier={:.1}",
        state.stats.distance,
        state.stats.coins,
        state.path.point_count(),
        state.frontier_x()
    );
    Ok(())
}
