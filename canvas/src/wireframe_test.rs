#![allow(clippy::float_cmp)]

use super::*;
use crate::shapes::SHAPE_PALETTE;

fn visible_core() -> WireframeCore {
    let mut core = WireframeCore::new(&WireframeConfig::default());
    core.set_visible(true);
    core
}

#[test]
fn starts_hidden_on_the_configured_shape() {
    let config = WireframeConfig { initial_shape: Shape::Pyramid, ..WireframeConfig::default() };
    let core = WireframeCore::new(&config);
    assert_eq!(core.shape(), Shape::Pyramid);
    assert!(!core.is_visible());
}

#[test]
fn hidden_frames_do_no_work() {
    let mut core = WireframeCore::new(&WireframeConfig::default());
    core.set_pointer(Point::new(100.0, 100.0));
    for i in 0..10 {
        assert!(core.advance(f64::from(i) * 16.0).is_none());
    }
    assert_eq!(core.damped_pointer(), Point::default());
}

#[test]
fn clicks_cycle_the_palette() {
    let mut core = visible_core();
    for k in 1..=SHAPE_PALETTE.len() {
        let shape = core.click();
        assert_eq!(shape.index(), k % SHAPE_PALETTE.len());
    }
    assert_eq!(core.shape(), Shape::Cube);
}

#[test]
fn pointer_smoothing_uses_elapsed_seconds() {
    let mut core = visible_core();
    core.set_pointer(Point::new(100.0, 50.0));
    core.advance(0.0);
    assert_eq!(core.damped_pointer(), Point::default());

    let frame = core.advance(50.0).map(|f| f.mouse);
    // 8 per second over 50 ms covers 40% of the gap.
    assert_eq!(frame, Some(core.damped_pointer()));
    assert!((core.damped_pointer().x - 40.0).abs() < 1e-9);
    assert!((core.damped_pointer().y - 20.0).abs() < 1e-9);
}

#[test]
fn long_gap_does_not_overshoot() {
    let mut core = visible_core();
    core.set_pointer(Point::new(10.0, 10.0));
    core.advance(0.0);
    core.advance(5_000.0);
    assert_eq!(core.damped_pointer(), Point::new(10.0, 10.0));
}

#[test]
fn smoothed_pointer_converges() {
    let mut core = visible_core();
    core.set_pointer(Point::new(320.0, 240.0));
    for i in 0..600 {
        core.advance(f64::from(i) * 16.0);
    }
    let p = core.damped_pointer();
    assert!((p.x - 320.0).abs() < 1e-3);
    assert!((p.y - 240.0).abs() < 1e-3);
}

#[test]
fn time_counts_from_first_frame_even_while_hidden() {
    let mut core = WireframeCore::new(&WireframeConfig::default());
    assert!(core.advance(1_000.0).is_none());
    core.set_visible(true);
    let frame = core.advance(3_500.0);
    assert_eq!(frame.map(|f| f.time), Some(2.5));
}

#[test]
fn frame_carries_current_shape_geometry() {
    let mut core = visible_core();
    core.click();
    let frame = core.advance(0.0);
    assert_eq!(frame.map(|f| f.shape.edges.len()), Some(6));
}
