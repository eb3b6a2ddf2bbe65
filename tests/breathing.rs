use anyhow::Result;
use glasskit::animation::Breather;
use glasskit::card::PHOTO_LAYERS;
use glasskit::{AssetLoader, Scene};
use std::sync::Arc;

struct MockLoader;
impl AssetLoader for MockLoader {
    fn load_bytes(&self, _id: &str) -> Result<Vec<u8>> {
        Ok(vec![0; 10])
    }
}

#[test]
fn drift_never_exceeds_authored_magnitude() {
    let mut breather = Breather::default();
    breather.set_enabled(true, 0.0);

    let mut t = 0.0;
    while t < 12.0 {
        let phase = breather.phase(t);
        for layer in &PHOTO_LAYERS {
            let (x, y) = layer.drift.offset(phase);
            assert!(x.abs() <= layer.drift.dx.abs() + 1e-5, "x drift {} at t={}", x, t);
            assert!(y.abs() <= layer.drift.dy.abs() + 1e-5, "y drift {} at t={}", y, t);
        }
        t += 0.01;
    }
}

#[test]
fn cycle_reverses_every_period() {
    let mut b = Breather::default();
    b.set_enabled(true, 0.0);

    assert_eq!(b.phase(0.0), 0.0);
    assert!((b.phase(3.0) - 1.0).abs() < 1e-4);
    assert!(b.phase(6.0).abs() < 1e-4);
    assert!((b.phase(9.0) - 1.0).abs() < 1e-4);
    // Mirror legs sample the same eased curve
    assert!((b.phase(1.0) - b.phase(5.0)).abs() < 1e-5);
}

#[test]
fn toggling_twice_returns_to_rest_without_drift() {
    let mut b = Breather::default();
    b.set_enabled(true, 0.0);

    b.set_enabled(false, 1.0);
    assert_eq!(b.phase(1.0 + Breather::DEFAULT_SETTLE), 0.0);
    b.set_enabled(true, 2.0);

    b.set_enabled(false, 3.0);
    assert_eq!(b.phase(3.0 + Breather::DEFAULT_SETTLE), 0.0);
    b.set_enabled(true, 4.0);

    // Resumes from REST exactly as a fresh driver would: nothing leaked
    assert_eq!(b.phase(4.0), 0.0);
    let mut fresh = Breather::default();
    fresh.set_enabled(true, 0.0);
    assert!((b.phase(5.0) - fresh.phase(1.0)).abs() < 1e-6);
    assert!((b.phase(7.0) - fresh.phase(3.0)).abs() < 1e-6);
    assert!((b.phase(10.0) - fresh.phase(6.0)).abs() < 1e-6);
}

#[test]
fn disable_settles_over_the_short_transition() {
    let mut b = Breather::default();
    b.set_enabled(true, 0.0);

    // Disable at the peak
    b.set_enabled(false, 3.0);
    let p0 = b.phase(3.0);
    let p1 = b.phase(3.15);
    let p2 = b.phase(3.3);
    assert!((p0 - 1.0).abs() < 1e-4);
    assert!(p1 < p0 && p1 > 0.0, "settle passes through intermediate phases");
    assert_eq!(p2, 0.0);
}

#[test]
fn scene_phase_follows_the_breather() {
    let mut scene = Scene::new(100, 100, Arc::new(MockLoader));

    scene.update(0.0);
    assert_eq!(scene.phase(), 0.0);

    scene.update(3.0);
    assert!((scene.phase() - 1.0).abs() < 1e-4);

    scene.set_breathing(false, 3.0);
    scene.update(3.0 + Breather::DEFAULT_SETTLE);
    assert_eq!(scene.phase(), 0.0);

    scene.set_breathing(true, 5.0);
    scene.update(6.5);
    assert!(scene.phase() > 0.0);
}
