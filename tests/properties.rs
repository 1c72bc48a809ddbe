//! Property tests for the slider kernel.
//!
//! Random option arrays, track lengths and drag sessions are generated and
//! the core guarantees are checked against every outcome.

use proptest::prelude::*;

use range_slider_kernel::{
    build_options, Direction, GestureState, HandleId, LayoutOutcome, NoCallbacks, OptionArray, SliderConfig,
    SliderEngine,
};

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

fn option_array() -> impl Strategy<Value = OptionArray> {
    (-1000i32..1000, 1u32..50, 1usize..60).prop_map(|(min, step, count)| {
        let min = min as f64;
        let step = step as f64 / 4.0;
        build_options(min, min + step * (count - 1) as f64, step).unwrap()
    })
}

/// One press: handle, cumulative deltas for each move, release delta = last move.
fn drag_session() -> impl Strategy<Value = (bool, Vec<f64>)> {
    (any::<bool>(), prop::collection::vec(-400.0f64..400.0, 1..8))
}

fn range_config() -> impl Strategy<Value = SliderConfig> {
    (0usize..=10, 0usize..=10, any::<bool>(), any::<bool>()).prop_map(|(a, b, overlap, rtl)| {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let direction = if rtl { Direction::Rtl } else { Direction::Ltr };
        SliderConfig::default()
            .with_values(vec![low as f64, high as f64])
            .with_allow_overlap(overlap)
            .with_direction(direction)
    })
}

/// Marker widths; sums above 280 overflow the default track.
fn marker_widths() -> impl Strategy<Value = (f64, f64)> {
    prop_oneof![
        Just((0.0, 0.0)),
        (0.0f64..60.0, 0.0f64..60.0),
        (100.0f64..200.0, 100.0f64..200.0),
    ]
}

fn measured_engine(config: SliderConfig, (width_one, width_two): (f64, f64)) -> SliderEngine<NoCallbacks> {
    let mut engine = SliderEngine::without_callbacks(config).unwrap();
    engine.measure_marker(HandleId::One, width_one, 10.0);
    engine.measure_marker(HandleId::Two, width_two, 10.0);
    engine
}

fn run_session(engine: &mut SliderEngine<NoCallbacks>, two: bool, moves: &[f64]) {
    let handle = if two { HandleId::Two } else { HandleId::One };
    let _ = engine.start(handle);
    for dx in moves {
        let _ = engine.move_handle(handle, GestureState::drag(*dx, 0.0));
    }
    let last = moves.last().copied().unwrap_or(0.0);
    let _ = engine.end(handle, GestureState::drag(last, 0.0));
}

// ─────────────────────────────────────────────────────────────────────────────
// Discretizer
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn test_option_round_trip(options in option_array(), length in 1.0f64..2000.0) {
        for &value in options.as_slice() {
            let position = options.value_to_position(value, length);
            prop_assert_eq!(options.position_to_value(position, length), value);
        }
    }

    #[test]
    fn test_endpoints_map_to_track_ends(options in option_array(), length in 1.0f64..2000.0) {
        prop_assert_eq!(options.value_to_position(options.first(), length), 0.0);
        if options.len() > 1 {
            prop_assert!((options.value_to_position(options.last(), length) - length).abs() < 1e-9);
        }
    }

    #[test]
    fn test_position_to_value_monotonic(
        options in option_array(),
        length in 1.0f64..2000.0,
        a in -100.0f64..2100.0,
        b in -100.0f64..2100.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(options.position_to_value(low, length) <= options.position_to_value(high, length));
    }

    #[test]
    fn test_position_to_value_is_an_option(
        options in option_array(),
        length in 0.0f64..2000.0,
        position in -5000.0f64..5000.0,
    ) {
        let value = options.position_to_value(position, length);
        prop_assert!(options.as_slice().contains(&value));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn test_handles_never_cross(
        config in range_config(),
        widths in marker_widths(),
        sessions in prop::collection::vec(drag_session(), 1..10),
    ) {
        let mut engine = measured_engine(config, widths);
        for (two, moves) in &sessions {
            run_session(&mut engine, *two, moves);
            let values = engine.values();
            prop_assert!(values[0] <= values[1], "crossed: {:?}", values);
        }
    }

    #[test]
    fn test_range_handles_stay_on_track(
        config in range_config(),
        widths in marker_widths(),
        sessions in prop::collection::vec(drag_session(), 1..10),
    ) {
        let mut engine = measured_engine(config, widths);
        for (two, moves) in &sessions {
            run_session(&mut engine, *two, moves);
            let state = engine.state();
            let track = state.track;
            let one = state.one.position;
            let two = state.two.unwrap().position;
            prop_assert!((-1e-9..=track.available_size + 1e-9).contains(&one), "one at {}", one);
            prop_assert!(
                (track.unavailable_length - 1e-9..=280.0 + 1e-9).contains(&two),
                "two at {}",
                two
            );
            let geometry = engine.geometry();
            prop_assert!(geometry.track_before >= -1e-9);
            prop_assert!(geometry.track_after >= -1e-9);
        }
    }

    #[test]
    fn test_values_stay_in_options(
        config in range_config(),
        widths in marker_widths(),
        sessions in prop::collection::vec(drag_session(), 1..10),
    ) {
        let mut engine = measured_engine(config, widths);
        for (two, moves) in &sessions {
            run_session(&mut engine, *two, moves);
            for value in engine.values() {
                prop_assert!(engine.options().as_slice().contains(&value));
            }
            prop_assert!(!engine.state().any_pressed());
        }
    }

    #[test]
    fn test_single_handle_stays_on_track(
        start in 0usize..=10,
        sessions in prop::collection::vec(drag_session(), 1..10),
    ) {
        let config = SliderConfig::default().with_values(vec![start as f64]);
        let mut engine = SliderEngine::without_callbacks(config).unwrap();
        for (_, moves) in &sessions {
            run_session(&mut engine, false, moves);
            let position = engine.state().one.position;
            prop_assert!((0.0..=280.0).contains(&position));
        }
    }

    #[test]
    fn test_sessions_are_deterministic(
        config in range_config(),
        sessions in prop::collection::vec(drag_session(), 1..6),
    ) {
        let mut a = SliderEngine::without_callbacks(config.clone()).unwrap();
        let mut b = SliderEngine::without_callbacks(config).unwrap();
        for (two, moves) in &sessions {
            run_session(&mut a, *two, moves);
            run_session(&mut b, *two, moves);
        }
        prop_assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_repeated_measurement_is_idempotent(
        config in range_config(),
        width_one in 0.0f64..100.0,
        width_two in 0.0f64..100.0,
    ) {
        let mut engine = SliderEngine::without_callbacks(config).unwrap();
        engine.measure_marker(HandleId::One, width_one, 10.0);
        engine.measure_marker(HandleId::Two, width_two, 10.0);
        let settled = engine.state().clone();

        let again = engine.measure_marker(HandleId::Two, width_two, 10.0);
        prop_assert!(!again.recomputed());
        prop_assert!(matches!(again, LayoutOutcome::Unchanged | LayoutOutcome::Degenerate { .. }), "repeated measurement should be Unchanged or Degenerate");
        prop_assert_eq!(engine.state(), &settled);
    }
}
