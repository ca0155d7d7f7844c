//! Invariants of the streaming pipeline under arbitrary seeds and tunings

use endless_road::TrackSettings;
use endless_road::sim::{
    MIN_RETAINED_POINTS, PickupKind, SurfaceQuery, TickInput, TrackEvent, TrackState, tick,
};
use proptest::prelude::*;

const EPS: f32 = 1e-3;

fn settings_strategy() -> impl Strategy<Value = TrackSettings> {
    (1.0f32..8.0, 0.0f32..10.0, 0.05f32..=1.0, 0.0f32..=1.0, 0.0f32..40.0).prop_map(
        |(segment_length, height_variation, smoothness, spike, flat)| TrackSettings {
            segment_length,
            height_variation,
            smoothness,
            extreme_difficulty_chance: spike,
            flat_start_distance: flat,
            ..Default::default()
        },
    )
}

/// Drive at a constant speed, checking window invariants after every tick
fn drive(state: &mut TrackState, speed: f32, ticks: usize) -> Vec<TrackEvent> {
    let mut events = Vec::new();
    let mut x = state.reference_x;
    let mut last_frontier = state.frontier_x();
    for _ in 0..ticks {
        x += speed;
        events.extend(tick(state, &TickInput::at(x, 1.0 / 60.0)));

        assert!(state.frontier_x() >= last_frontier);
        last_frontier = state.frontier_x();

        assert!(state.path.point_count() >= MIN_RETAINED_POINTS);
        assert_eq!(state.path.back().map(|p| p.x), Some(state.frontier_x()));

        let front = state.path.front().map(|p| p.x).unwrap_or(f32::NAN);
        assert!(
            state.path.point_count() == MIN_RETAINED_POINTS
                || x - front <= state.settings.trailing_distance + state.settings.segment_length,
            "front {front} too far behind {x}"
        );
    }
    events
}

proptest! {
    #[test]
    fn frontier_advances_in_whole_segments(
        settings in settings_strategy(),
        seed in any::<u64>(),
        speed in 0.1f32..1.0,
        ticks in 10usize..400,
    ) {
        let mut state = TrackState::new(settings.clone(), seed, 0.0).unwrap();
        let initial = state.frontier_x();
        drive(&mut state, speed, ticks);

        let k = (state.frontier_x() - initial) / settings.segment_length;
        prop_assert!(k >= 0.0);
        prop_assert!((k - k.round()).abs() < 1e-2, "k = {}", k);
    }

    #[test]
    fn heights_respect_flat_start_and_range(
        settings in settings_strategy(),
        seed in any::<u64>(),
        extensions in 1usize..300,
    ) {
        let mut state = TrackState::new(settings.clone(), seed, 0.0).unwrap();
        for _ in 0..extensions {
            state.generator.extend(&mut state.path);
        }

        let flat_end = settings.flat_start_distance;
        for p in state.path.iter() {
            if p.x <= flat_end {
                prop_assert_eq!(p.y_top, settings.initial_ground_height);
            } else {
                prop_assert!(p.y_top >= settings.min_height && p.y_top <= settings.max_height);
            }
        }
    }

    #[test]
    fn slope_is_bounded(
        settings in settings_strategy(),
        seed in any::<u64>(),
        extensions in 1usize..300,
    ) {
        let mut state = TrackState::new(settings.clone(), seed, 0.0).unwrap();
        for _ in 0..extensions {
            state.generator.extend(&mut state.path);
        }

        let limit = settings.height_variation * 1.5 + EPS;
        let points: Vec<_> = state.path.iter().copied().collect();
        for pair in points.windows(2) {
            prop_assert!(pair[1].x > pair[0].x);
            prop_assert!((pair[1].y_top - pair[0].y_top).abs() <= limit);
        }
    }

    #[test]
    fn fuel_gaps_grow_by_increment(
        seed in any::<u64>(),
        initial_gap in 20.0f32..150.0,
        increment in 0.0f32..40.0,
    ) {
        let settings = TrackSettings {
            initial_fuel_gap: initial_gap,
            fuel_gap_increment: increment,
            ..Default::default()
        };
        let mut state = TrackState::new(settings, seed, 0.0).unwrap();
        let events = drive(&mut state, 1.0, 1500);

        let xs: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                TrackEvent::PickupSpawned { kind: PickupKind::Fuel, pos, .. } => Some(pos.x),
                _ => None,
            })
            .collect();
        prop_assert!(xs.len() >= 2);
        prop_assert!((xs[0] - initial_gap).abs() < EPS);

        let gaps: Vec<f32> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        prop_assert!((gaps[0] - (initial_gap + increment)).abs() < 1e-2);
        for pair in gaps.windows(2) {
            prop_assert!((pair[1] - pair[0] - increment).abs() < 1e-2);
        }
    }

    #[test]
    fn pickups_always_land_on_ground(
        settings in settings_strategy(),
        seed in any::<u64>(),
    ) {
        let mut state = TrackState::new(settings.clone(), seed, 0.0).unwrap();
        for _ in 0..300 {
            let x = state.reference_x + 0.5;
            let events = tick(&mut state, &TickInput::at(x, 1.0 / 60.0));
            for event in events {
                if let TrackEvent::PickupSpawned { kind, pos, .. } = event {
                    let ground = state.ground_height(pos.x);
                    prop_assert!(ground.hit);
                    let lift = match kind {
                        PickupKind::Coin => settings.pickup_height_offset,
                        PickupKind::Fuel => settings.pickup_height_offset + settings.fuel_visual_correction,
                    };
                    prop_assert!((pos.y - ground.height - lift).abs() < EPS);
                }
            }
        }
    }
}

#[test]
fn eviction_scenario_keeps_two_points() {
    let settings = TrackSettings {
        segment_length: 4.0,
        backfill_distance: 0.0,
        trailing_distance: 100.0,
        ..Default::default()
    };
    let mut state = TrackState::new(settings, 3, 0.0).unwrap();
    for _ in 0..60 {
        state.generator.extend(&mut state.path);
    }
    state.window.evict_path(&mut state.path, 150.0);
    assert!(state.path.iter().all(|p| p.x >= 50.0));
    assert_eq!(state.path.front().map(|p| p.x), Some(52.0));

    // Far past the frontier everything is stale, but a segment survives
    state.window.evict_path(&mut state.path, 10_000.0);
    assert_eq!(state.path.point_count(), MIN_RETAINED_POINTS);
    assert_eq!(state.path.back().map(|p| p.x), Some(state.frontier_x()));
}
