#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// --- Camera ---

#[test]
fn camera_default_looks_from_z5() {
    let cam = Camera::default();
    assert_eq!(cam.position, Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(cam.fov_deg, 75.0);
}

#[test]
fn view_moves_world_opposite_to_camera() {
    let cam = Camera::new(75.0, Vec3::new(0.2, 0.0, 4.5));
    let p = cam.view().transform_point3(Vec3::ZERO);
    assert!(approx_eq(p.x, -0.2));
    assert!(approx_eq(p.z, -4.5));
}

#[test]
fn origin_projects_near_center() {
    let cam = Camera::default();
    let clip = cam.projection() * cam.view() * Vec3::ZERO.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(approx_eq(ndc.x, 0.0));
    assert!(approx_eq(ndc.y, 0.0));
    assert!(ndc.z > -1.0 && ndc.z < 1.0);
}

#[test]
fn set_aspect_ignores_degenerate_values() {
    let mut cam = Camera::default();
    cam.set_aspect(2.0);
    assert_eq!(cam.aspect, 2.0);
    cam.set_aspect(0.0);
    cam.set_aspect(f64::NAN);
    assert_eq!(cam.aspect, 2.0);
}

// --- model_matrix ---

#[test]
fn model_matrix_identity_at_zero() {
    assert_eq!(model_matrix(0.0, 0.0), Mat4::IDENTITY);
}

#[test]
fn model_matrix_y_turn_moves_x_axis_to_minus_z() {
    let p = model_matrix(0.0, std::f32::consts::FRAC_PI_2).transform_point3(Vec3::X);
    assert!(approx_eq(p.z, -1.0));
    assert!(approx_eq(p.x, 0.0));
}

// --- client_to_ndc ---

#[test]
fn client_to_ndc_corners() {
    assert_eq!(client_to_ndc(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
    assert_eq!(client_to_ndc(800.0, 600.0, 800.0, 600.0), (1.0, -1.0));
    assert_eq!(client_to_ndc(400.0, 300.0, 800.0, 600.0), (0.0, 0.0));
}

#[test]
fn client_to_ndc_degenerate_viewport() {
    assert_eq!(client_to_ndc(10.0, 10.0, 0.0, 600.0), (0.0, 0.0));
}
