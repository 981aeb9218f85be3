#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn capped_dpr_passes_through_below_cap() {
    assert_eq!(capped_dpr(1.25, 2.0), 1.25);
}

#[test]
fn capped_dpr_clamps_high_density() {
    assert_eq!(capped_dpr(3.0, 1.5), 1.5);
    assert_eq!(capped_dpr(3.0, 2.0), 2.0);
}

#[test]
fn capped_dpr_uncapped_keeps_raw_ratio() {
    assert_eq!(capped_dpr(3.0, f64::INFINITY), 3.0);
}

#[test]
fn capped_dpr_rejects_garbage() {
    assert_eq!(capped_dpr(0.0, 2.0), 1.0);
    assert_eq!(capped_dpr(-2.0, 2.0), 1.0);
    assert_eq!(capped_dpr(f64::NAN, 2.0), 1.0);
}

#[test]
fn surface_size_pixels_scale_by_ratio() {
    let size = SurfaceSize::new(400.0, 300.0, 3.0, 2.0);
    assert_eq!(size.dpr, 2.0);
    assert_eq!(size.pixel_width(), 800);
    assert_eq!(size.pixel_height(), 600);
}

#[test]
fn surface_size_never_reports_zero_pixels() {
    let size = SurfaceSize::new(0.0, 0.0, 1.0, 2.0);
    assert!(size.is_empty());
    assert_eq!(size.pixel_width(), 1);
    assert_eq!(size.pixel_height(), 1);
}

#[test]
fn surface_size_aspect_handles_zero_height() {
    assert_eq!(SurfaceSize::new(200.0, 0.0, 1.0, 1.0).aspect(), 1.0);
    assert_eq!(SurfaceSize::new(200.0, 100.0, 1.0, 1.0).aspect(), 2.0);
}

#[test]
fn surface_size_rejects_negative_box() {
    let size = SurfaceSize::new(-5.0, 10.0, 1.0, 1.0);
    assert_eq!(size.css_width, 0.0);
    assert!(size.is_empty());
}

#[test]
fn compact_when_touch_or_narrow() {
    assert!(is_compact(true, 1920.0));
    assert!(is_compact(false, 600.0));
    assert!(!is_compact(false, 1024.0));
    assert!(!is_compact(false, 768.0));
}
