#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn screen() -> ScreenSize {
    ScreenSize::new(1920.0, 1080.0)
}

fn assert_in_bounds(cursor: &CursorState) {
    let p = cursor.position();
    assert!((0.0..=1920.0).contains(&p.x), "x out of bounds: {}", p.x);
    assert!((0.0..=1080.0).contains(&p.y), "y out of bounds: {}", p.y);
}

// =============================================================
// TouchDeltaTracker
// =============================================================

#[test]
fn first_sample_yields_zero_delta() {
    let mut t = TouchDeltaTracker::new();
    assert_eq!(t.on_touch_moved(pt(812.0, 33.0)), pt(0.0, 0.0));
}

#[test]
fn second_sample_yields_difference() {
    let mut t = TouchDeltaTracker::new();
    t.on_touch_moved(pt(100.0, 100.0));
    assert_eq!(t.on_touch_moved(pt(120.0, 90.0)), pt(20.0, -10.0));
}

#[test]
fn deltas_are_relative_to_previous_call() {
    let mut t = TouchDeltaTracker::new();
    t.on_touch_moved(pt(0.0, 0.0));
    t.on_touch_moved(pt(10.0, 0.0));
    assert_eq!(t.on_touch_moved(pt(15.0, 5.0)), pt(5.0, 5.0));
}

#[test]
fn reset_suppresses_jump_on_next_touch() {
    let mut t = TouchDeltaTracker::new();
    t.on_touch_moved(pt(10.0, 10.0));
    t.on_touch_moved(pt(20.0, 20.0));
    t.reset();
    assert_eq!(t.on_touch_moved(pt(900.0, 900.0)), pt(0.0, 0.0));
    assert_eq!(t.on_touch_moved(pt(901.0, 900.0)), pt(1.0, 0.0));
}

#[test]
fn negative_first_location_is_still_a_baseline() {
    let mut t = TouchDeltaTracker::new();
    assert_eq!(t.on_touch_moved(pt(-1.0, -1.0)), pt(0.0, 0.0));
    assert_eq!(t.on_touch_moved(pt(1.0, 1.0)), pt(2.0, 2.0));
}

// =============================================================
// CursorState
// =============================================================

#[test]
fn new_cursor_is_centered_visible_default() {
    let c = CursorState::new(screen());
    assert_eq!(c.position(), pt(960.0, 540.0));
    assert!(c.is_visible());
    assert_eq!(c.glyph(), Glyph::Default);
}

#[test]
fn apply_delta_moves_both_axes() {
    let mut c = CursorState::new(screen());
    assert!(c.apply_delta(20.0, -40.0));
    assert_eq!(c.position(), pt(980.0, 500.0));
}

#[test]
fn overflowing_axis_is_held_not_clipped() {
    let mut c = CursorState::new(screen());
    c.apply_delta(950.0, 0.0);
    assert_eq!(c.position().x, 1910.0);
    c.apply_delta(20.0, 10.0);
    assert_eq!(c.position(), pt(1910.0, 550.0));
}

#[test]
fn exact_edges_are_reachable() {
    let mut c = CursorState::new(screen());
    c.apply_delta(-960.0, 540.0);
    assert_eq!(c.position(), pt(0.0, 1080.0));
}

#[test]
fn negative_overflow_holds_axis() {
    let mut c = CursorState::new(screen());
    c.apply_delta(-961.0, -541.0);
    assert_eq!(c.position(), pt(960.0, 540.0));
}

#[test]
fn no_change_reports_false() {
    let mut c = CursorState::new(screen());
    assert!(!c.apply_delta(0.0, 0.0));
    assert!(!c.apply_delta(5000.0, -5000.0));
}

#[test]
fn nan_delta_is_ignored() {
    let mut c = CursorState::new(screen());
    c.apply_delta(f64::NAN, f64::NAN);
    assert_eq!(c.position(), pt(960.0, 540.0));
}

#[test]
fn stays_in_bounds_for_any_delta_sequence() {
    let mut c = CursorState::new(screen());
    let deltas = [
        (300.0, 200.0),
        (900.0, 900.0),
        (-2500.0, 13.0),
        (-700.0, -700.0),
        (1919.0, 1079.0),
        (0.5, -0.25),
        (-10_000.0, 10_000.0),
        (640.0, -300.0),
    ];
    for _ in 0..25 {
        for (dx, dy) in deltas {
            c.apply_delta(dx, dy);
            assert_in_bounds(&c);
        }
    }
}

#[test]
fn touch_scenario_produces_expected_positions() {
    let mut t = TouchDeltaTracker::new();
    let mut c = CursorState::new(screen());
    t.reset();

    let samples = [pt(100.0, 100.0), pt(120.0, 100.0), pt(150.0, 130.0)];
    let expected_deltas = [pt(0.0, 0.0), pt(20.0, 0.0), pt(30.0, 30.0)];
    let expected_positions = [pt(960.0, 540.0), pt(980.0, 540.0), pt(1010.0, 570.0)];

    for ((sample, delta), position) in samples.into_iter().zip(expected_deltas).zip(expected_positions) {
        let d = t.on_touch_moved(sample);
        assert_eq!(d, delta);
        c.apply_delta(d.x, d.y);
        assert_eq!(c.position(), position);
    }
}

#[test]
fn set_glyph_reports_change() {
    let mut c = CursorState::new(screen());
    assert!(c.set_glyph(true));
    assert_eq!(c.glyph(), Glyph::Pointer);
    assert!(!c.set_glyph(true));
    assert!(c.set_glyph(false));
    assert_eq!(c.glyph(), Glyph::Default);
}

#[test]
fn set_visible_toggles() {
    let mut c = CursorState::new(screen());
    c.set_visible(false);
    assert!(!c.is_visible());
    c.set_visible(true);
    assert!(c.is_visible());
}

#[test]
fn glyph_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Glyph::Pointer).unwrap(), "\"pointer\"");
}
