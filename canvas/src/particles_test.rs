#![allow(clippy::float_cmp)]

use super::*;

fn approx3(a: [f32; 3], b: [f32; 3]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
}

#[test]
fn sampled_set_has_aligned_buffers() {
    let vertices = vec![Vec3::X, Vec3::Y, Vec3::Z];
    let set = ParticleSet::sample(&vertices, 7, |_| [0.6, 0.2, 0.9]);
    assert_eq!(set.count(), 7);
    assert!(set.is_consistent());
    assert_eq!(set.positions().len(), 21);
    assert_eq!(set.colors().len(), 21);
}

#[test]
fn rest_matches_initial_positions() {
    let vertices = vec![Vec3::new(1.0, 2.0, 3.0)];
    let set = ParticleSet::sample(&vertices, 3, |_| [1.0, 1.0, 1.0]);
    assert_eq!(set.rest(), set.positions());
    assert!(set.velocities().iter().all(|v| *v == 0.0));
}

#[test]
fn color_callback_receives_index() {
    let set = ParticleSet::sample(&[Vec3::ZERO], 3, |i| [i as f32, 0.0, 0.0]);
    assert_eq!(set.colors()[0], 0.0);
    assert_eq!(set.colors()[3], 1.0);
    assert_eq!(set.colors()[6], 2.0);
}

#[test]
fn dynamics_mut_keeps_lengths() {
    let mut set = ParticleSet::sample(&[Vec3::ONE], 4, |_| [0.0; 3]);
    {
        let (positions, velocities, rest) = set.dynamics_mut();
        positions[0] += 1.0;
        velocities[0] = 0.5;
        assert_eq!(rest[0], 1.0);
    }
    assert!(set.is_consistent());
    assert_eq!(set.positions()[0], 2.0);
}

#[test]
fn empty_set_is_consistent() {
    let set = ParticleSet::sample(&[], 0, |_| [0.0; 3]);
    assert!(set.is_consistent());
    assert_eq!(set.count(), 0);
}

#[test]
fn hsl_primaries() {
    assert!(approx3(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
    assert!(approx3(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
    assert!(approx3(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
}

#[test]
fn hsl_grey_when_unsaturated() {
    assert!(approx3(hsl_to_rgb(0.4, 0.0, 0.7), [0.7, 0.7, 0.7]));
}

#[test]
fn hsl_components_stay_in_unit_range() {
    for step in 0..20 {
        let rgb = hsl_to_rgb(step as f32 / 20.0, 0.8, 0.7);
        assert!(rgb.iter().all(|c| (0.0..=1.0).contains(c)));
    }
}
