use super::*;

fn field_knot() -> TorusKnot {
    TorusKnot::new(1.3, 0.45, 80, 12)
}

#[test]
fn vertex_count_includes_seams() {
    assert_eq!(field_knot().vertex_count(), 81 * 13);
    assert_eq!(field_knot().vertices().len(), 81 * 13);
}

#[test]
fn vertices_stay_within_tube_of_curve_bounds() {
    let knot = field_knot();
    // Centerline distance from the origin is at most radius * 1.5.
    let bound = knot.radius * 1.5 + knot.tube + 1e-3;
    for v in knot.vertices() {
        assert!(v.length() <= bound, "{v:?} outside {bound}");
    }
}

#[test]
fn each_ring_sits_tube_radius_from_centerline() {
    let knot = field_knot();
    let vertices = knot.vertices();
    let rings = knot.radial_segments + 1;
    for i in [0_usize, 17, 80] {
        let u = i as f32 / knot.tubular_segments as f32 * knot.p as f32 * TAU;
        let center = knot.curve_point(u);
        for v in &vertices[i * rings..(i + 1) * rings] {
            assert!(((*v - center).length() - knot.tube).abs() < 1e-3);
        }
    }
}

#[test]
fn curve_closes_after_p_turns() {
    let knot = field_knot();
    let start = knot.curve_point(0.0);
    let end = knot.curve_point(knot.p as f32 * TAU);
    assert!((start - end).length() < 1e-4);
}

#[test]
fn sample_positions_wraps_native_list() {
    let vertices = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let out = sample_positions(&vertices, 5);
    assert_eq!(out.len(), 15);
    assert_eq!(&out[0..3], &[1.0, 2.0, 3.0]);
    assert_eq!(&out[3..6], &[4.0, 5.0, 6.0]);
    assert_eq!(&out[12..15], &[1.0, 2.0, 3.0]);
}

#[test]
fn sample_positions_may_undersample() {
    let vertices = field_knot().vertices();
    let out = sample_positions(&vertices, 10);
    assert_eq!(out.len(), 30);
}

#[test]
fn sample_positions_from_empty_list_is_zeroed() {
    let out = sample_positions(&[], 4);
    assert_eq!(out, vec![0.0; 12]);
}
