#![allow(clippy::float_cmp)]

use super::*;

fn small_config() -> FieldConfig {
    FieldConfig { particle_count: 64, ..FieldConfig::default() }
}

#[test]
fn device_variants() {
    let mobile = FieldConfig::for_device(true);
    assert_eq!(mobile.particle_count, 1500);
    assert!((mobile.point_size - 0.045).abs() < 1e-6);
    assert!(mobile.touch);

    let desktop = FieldConfig::for_device(false);
    assert_eq!(desktop.particle_count, 2500);
    assert!((desktop.point_size - 0.038).abs() < 1e-6);
    assert!(!desktop.touch);
}

#[test]
fn particles_share_one_tint() {
    let core = ParticleFieldCore::new(&small_config());
    assert!(core.particles.is_consistent());
    for rgb in core.particles.colors().chunks_exact(3) {
        assert_eq!(rgb, &FIELD_TINT);
    }
}

#[test]
fn count_may_exceed_knot_resolution() {
    let config = small_config();
    let vertex_count = config.knot.vertex_count();
    let config = FieldConfig { particle_count: vertex_count + 5, ..config };
    let core = ParticleFieldCore::new(&config);
    assert_eq!(core.particles.positions().len(), (vertex_count + 5) * 3);
    assert_eq!(core.particles.positions()[vertex_count * 3..vertex_count * 3 + 3], core.particles.positions()[..3]);
}

#[test]
fn reveals_exactly_once_after_warmup() {
    let mut core = ParticleFieldCore::new(&small_config());
    let mut reveals = Vec::new();
    for frame in 1..=40 {
        if core.advance(frame as f32 / 60.0).revealed {
            reveals.push(frame);
        }
    }
    assert_eq!(reveals, vec![WARMUP_FRAMES]);
    assert!(core.is_revealed());
}

#[test]
fn hidden_during_warmup() {
    let mut core = ParticleFieldCore::new(&small_config());
    for _ in 0..WARMUP_FRAMES - 1 {
        core.advance(0.0);
    }
    assert!(!core.is_revealed());
}

#[test]
fn mouse_drag_moves_target() {
    let mut core = ParticleFieldCore::new(&small_config());
    core.pointer_down(Point::new(100.0, 100.0), PointerKind::Mouse);
    core.pointer_move(Point::new(150.0, 80.0));
    assert!((core.orbit.target_y - 50.0 * 0.005).abs() < 1e-6);
    assert!((core.orbit.target_x + 20.0 * 0.005).abs() < 1e-6);
}

#[test]
fn touch_drag_is_more_sensitive() {
    let mut core = ParticleFieldCore::new(&small_config());
    core.pointer_down(Point::new(0.0, 0.0), PointerKind::Touch);
    core.pointer_move(Point::new(10.0, 0.0));
    assert!((core.orbit.target_y - 10.0 * 0.008).abs() < 1e-6);
}

#[test]
fn move_without_press_does_not_rotate() {
    let mut core = ParticleFieldCore::new(&small_config());
    core.pointer_move(Point::new(300.0, 300.0));
    core.pointer_up();
    core.pointer_move(Point::new(0.0, 0.0));
    assert_eq!(core.orbit, OrbitState::default());
}

#[test]
fn rotation_converges_after_release() {
    let mut core = ParticleFieldCore::new(&small_config());
    core.pointer_down(Point::new(0.0, 0.0), PointerKind::Mouse);
    core.pointer_move(Point::new(200.0, 100.0));
    core.pointer_up();

    let mut last = core.orbit.remaining();
    for _ in 0..1000 {
        core.advance(0.0);
        let now = core.orbit.remaining();
        assert!(now <= last);
        last = now;
    }
    assert!(last < 1e-5);
}

#[test]
fn idle_spin_applies_regardless_of_drag() {
    let mut core = ParticleFieldCore::new(&small_config());
    let frame = core.advance(10.0);
    assert!((frame.angle_y - 10.0 * FIELD_IDLE_SPIN).abs() < 1e-6);

    core.pointer_down(Point::new(0.0, 0.0), PointerKind::Mouse);
    let frame = core.advance(20.0);
    assert!((frame.angle_y - 20.0 * FIELD_IDLE_SPIN).abs() < 1e-6);
}

#[test]
fn interaction_phase_follows_pointer_after_reveal() {
    let mut core = ParticleFieldCore::new(&small_config());
    for _ in 0..WARMUP_FRAMES {
        core.advance(0.0);
    }
    core.pointer_down(Point::new(0.0, 0.0), PointerKind::Mouse);
    assert_eq!(core.lifecycle.phase(), crate::lifecycle::Phase::Interacting);
    core.pointer_up();
    assert_eq!(core.lifecycle.phase(), crate::lifecycle::Phase::ReadyIdle);
}

#[test]
fn buffers_keep_their_length_across_frames() {
    let mut core = ParticleFieldCore::new(&small_config());
    for i in 0..100 {
        core.advance(i as f32);
    }
    assert!(core.particles.is_consistent());
    assert_eq!(core.particles.positions().len(), 64 * 3);
}
