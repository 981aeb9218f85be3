#![allow(clippy::float_cmp)]

use super::*;

fn core(seed: u64) -> StaticFieldCore {
    StaticFieldCore::new(StaticFieldConfig::default(), 800.0, 600.0, seed)
}

fn quiet_config() -> StaticFieldConfig {
    StaticFieldConfig { count: 1, jitter: 0.0, ..StaticFieldConfig::default() }
}

#[test]
fn spawns_configured_count_inside_surface() {
    let core = core(1);
    assert_eq!(core.motes().len(), 400);
    for m in core.motes() {
        assert!((0.0..=800.0).contains(&m.x));
        assert!((0.0..=600.0).contains(&m.y));
        assert!((0.5..=2.0).contains(&m.size));
        assert!((0.15..=0.55).contains(&m.alpha));
        assert!(m.vx.abs() <= 0.1 && m.vy.abs() <= 0.1);
        assert!(m.rotation_speed.abs() <= 0.02);
        assert_eq!(m.glow, 0.0);
    }
}

#[test]
fn accent_is_the_minority_tint() {
    let core = core(5);
    let accents = core.motes().iter().filter(|m| m.tint == Tint::Accent).count();
    assert!(accents > 80 && accents < 200, "accents = {accents}");
}

#[test]
fn pointer_starts_parked_off_surface() {
    assert_eq!(core(1).pointer(), Point::new(-1000.0, -1000.0));
}

#[test]
fn same_seed_same_trajectory() {
    let run = |seed| {
        let mut c = core(seed);
        for i in 0..200 {
            c.set_pointer(Point::new(f64::from(i) * 3.0, 300.0));
            c.step();
        }
        c.motes().to_vec()
    };
    assert_eq!(run(11), run(11));
    assert_ne!(run(11), run(12));
}

#[test]
fn near_pointer_pulls_and_swirls() {
    let mut c = StaticFieldCore::new(quiet_config(), 800.0, 600.0, 1);
    c.motes[0] = Mote { x: 400.0, y: 300.0, vx: 0.0, vy: 0.0, glow: 0.0, ..c.motes[0] };
    c.set_pointer(Point::new(500.0, 300.0));
    c.step();

    let m = c.motes()[0];
    let force = (250.0 - 100.0) / 250.0;
    // Pull along +x, swirl along -y (dy = 0, dx > 0).
    assert!((m.vx - force * 0.1 * 0.96).abs() < 1e-12);
    assert!((m.vy + force * 0.06 * 8.0 * 0.96).abs() < 1e-12);
    assert!((m.glow - force * 0.6).abs() < 1e-12);
}

#[test]
fn glow_decays_out_of_range() {
    let mut c = StaticFieldCore::new(quiet_config(), 800.0, 600.0, 1);
    c.motes[0] = Mote { x: 400.0, y: 300.0, vx: 0.0, vy: 0.0, glow: 0.5, ..c.motes[0] };
    c.step();
    assert!((c.motes()[0].glow - 0.45).abs() < 1e-12);
}

#[test]
fn pointer_exactly_on_mote_applies_no_force() {
    let mut c = StaticFieldCore::new(quiet_config(), 800.0, 600.0, 1);
    c.motes[0] = Mote { x: 100.0, y: 100.0, vx: 0.0, vy: 0.0, glow: 0.0, ..c.motes[0] };
    c.set_pointer(Point::new(100.0, 100.0));
    c.step();
    let m = c.motes()[0];
    assert_eq!((m.x, m.y, m.vx, m.vy), (100.0, 100.0, 0.0, 0.0));
}

#[test]
fn wraps_with_margin() {
    let mut v = -20.5;
    wrap(&mut v, 800.0, 20.0);
    assert_eq!(v, 820.0);

    let mut v = 820.5;
    wrap(&mut v, 800.0, 20.0);
    assert_eq!(v, -20.0);

    let mut v = -19.0;
    wrap(&mut v, 800.0, 20.0);
    assert_eq!(v, -19.0);
}

#[test]
fn fill_alpha_is_capped() {
    let m = Mote { alpha: 0.55, glow: 0.8, ..core(1).motes()[0] };
    assert_eq!(m.fill_alpha(), 0.85);
    let m = Mote { alpha: 0.2, glow: 0.2, ..m };
    assert!((m.fill_alpha() - 0.3).abs() < 1e-12);
}

#[test]
fn glow_pass_only_above_threshold() {
    let base = core(1).motes()[0];
    assert!(!Mote { glow: 0.4, ..base }.glows());
    assert!(Mote { glow: 0.41, ..base }.glows());
}

#[test]
fn respawn_resizes_without_changing_count() {
    let mut c = core(3);
    c.respawn(200.0, 100.0);
    assert_eq!(c.size(), (200.0, 100.0));
    assert_eq!(c.motes().len(), 400);
    assert!(c.motes().iter().all(|m| m.x <= 200.0 && m.y <= 100.0));
}

#[test]
fn motes_stay_within_wrap_bounds() {
    let mut c = core(9);
    c.set_pointer(Point::new(400.0, 300.0));
    for _ in 0..2_000 {
        c.step();
    }
    for m in c.motes() {
        assert!((-20.0..=820.0).contains(&m.x));
        assert!((-20.0..=620.0).contains(&m.y));
    }
}
