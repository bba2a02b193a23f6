use super::*;
use crate::geometry::placement::PercentRect;

#[test]
fn initial_state_uses_percent_fields() {
    let rect = PlacementRect::from_percent_rect(PercentRect {
        x_percent: 50.0,
        y_percent: 50.0,
        width_percent: 10.0,
        height_percent: 10.0,
    });
    let s = PlacementState::initial(&rect);
    assert!((s.center.x - 0.55).abs() < 1e-12);
    assert!((s.center.y - 0.55).abs() < 1e-12);
    assert_eq!(s.scale, 1.0);
    assert_eq!(s.rotation, 0.0);
}

#[test]
fn initial_state_from_legacy_pixels() {
    let s = PlacementState::initial(&PlacementRect::from_pixels(100.0, 0.0, 200.0, 100.0));
    assert!((s.center.x - 0.5).abs() < 1e-12);
    assert!((s.center.y - 0.125).abs() < 1e-12);
}

#[test]
fn validate_rejects_degenerate_states() {
    let ok = PlacementState::initial(&PlacementRect::centered_default());
    ok.validate().unwrap();
    assert!(PlacementState { scale: 0.0, ..ok }.validate().is_err());
    assert!(PlacementState { rotation: f64::NAN, ..ok }.validate().is_err());
    assert!(
        PlacementState {
            center: Point::new(f64::INFINITY, 0.0),
            ..ok
        }
        .validate()
        .is_err()
    );
}

#[test]
fn hash_distinguishes_states() {
    let a = PlacementState::initial(&PlacementRect::centered_default());
    let b = PlacementState { rotation: 1.0, ..a };
    let digest = |s: &PlacementState| {
        let mut h = Fnv1a64::new_default();
        s.hash_into(&mut h);
        h.finish()
    };
    assert_eq!(digest(&a), digest(&a));
    assert_ne!(digest(&a), digest(&b));
}
