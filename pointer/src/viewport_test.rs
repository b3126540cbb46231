#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// --- Point ---

#[test]
fn point_delta_from() {
    let d = pt(150.0, 130.0).delta_from(pt(120.0, 100.0));
    assert_eq!(d, pt(30.0, 30.0));
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), pt(0.0, 0.0));
}

// --- scale ---

#[test]
fn scale_is_frame_over_content() {
    let vp = Viewport::new(1920.0, 960, 0.0);
    assert_eq!(vp.scale(), Some(2.0));
}

#[test]
fn scale_below_one_when_content_is_wider() {
    let vp = Viewport::new(1920.0, 3840, 0.0);
    assert_eq!(vp.scale(), Some(0.5));
}

#[test]
fn scale_none_for_zero_content_width() {
    assert_eq!(Viewport::new(1920.0, 0, 0.0).scale(), None);
}

#[test]
fn scale_none_for_negative_content_width() {
    assert_eq!(Viewport::new(1920.0, -5, 0.0).scale(), None);
}

#[test]
fn scale_none_for_zero_frame_width() {
    assert_eq!(Viewport::new(0.0, 960, 0.0).scale(), None);
}

// --- to_content_point ---

#[test]
fn maps_with_overlay_and_scale() {
    let vp = Viewport::new(1920.0, 960, 50.0);
    assert_eq!(vp.to_content_point(pt(400.0, 450.0)), Some(ContentPoint::new(200, 200)));
}

#[test]
fn maps_identity_at_unit_scale() {
    let vp = Viewport::new(1920.0, 1920, 0.0);
    assert_eq!(vp.to_content_point(pt(33.0, 44.0)), Some(ContentPoint::new(33, 44)));
}

#[test]
fn truncates_fractional_results() {
    let vp = Viewport::new(1920.0, 960, 0.0);
    assert_eq!(vp.to_content_point(pt(5.0, 7.0)), Some(ContentPoint::new(2, 3)));
}

#[test]
fn none_when_content_width_unknown() {
    let vp = Viewport::new(1920.0, 0, 0.0);
    assert_eq!(vp.to_content_point(pt(400.0, 450.0)), None);
}

#[test]
fn none_when_over_overlay() {
    let vp = Viewport::new(1920.0, 960, 145.0);
    assert_eq!(vp.to_content_point(pt(400.0, 144.0)), None);
}

#[test]
fn overlay_boundary_row_maps_to_zero() {
    let vp = Viewport::new(1920.0, 960, 145.0);
    assert_eq!(vp.to_content_point(pt(0.0, 145.0)), Some(ContentPoint::new(0, 0)));
}

#[test]
fn matches_formula_for_many_widths() {
    for content_width in [320_i64, 800, 960, 1280, 1920, 2560] {
        let vp = Viewport::new(1920.0, content_width, 30.0);
        let scale = 1920.0 / content_width as f64;
        let screen = pt(1234.0, 567.0);
        let expected = ContentPoint::new((1234.0 / scale) as i64, ((567.0 - 30.0) / scale) as i64);
        assert_eq!(vp.to_content_point(screen), Some(expected), "content_width={content_width}");
    }
}

// --- project ---

#[test]
fn project_distinguishes_overlay_from_unscaled() {
    let vp = Viewport::new(1920.0, 0, 100.0);
    assert_eq!(vp.project(pt(10.0, 50.0)), Projection::Overlay);
    assert_eq!(vp.project(pt(10.0, 150.0)), Projection::Unscaled);
}

#[test]
fn projection_content_accessor() {
    assert_eq!(Projection::Content(ContentPoint::new(1, 2)).content(), Some(ContentPoint::new(1, 2)));
    assert_eq!(Projection::Overlay.content(), None);
    assert_eq!(Projection::Unscaled.content(), None);
}

// --- ScreenSize ---

#[test]
fn screen_default_is_1080p() {
    let s = ScreenSize::default();
    assert_eq!(s.width, 1920.0);
    assert_eq!(s.height, 1080.0);
}

#[test]
fn screen_center() {
    assert_eq!(ScreenSize::new(1920.0, 1080.0).center(), pt(960.0, 540.0));
}
