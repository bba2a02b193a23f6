use super::*;

fn params(style: WarpStyle, intensity: f64, amplitude: f64) -> WarpParams {
    WarpParams {
        style,
        intensity,
        amplitude,
        ..WarpParams::default()
    }
}

#[test]
fn zero_intensity_is_identity_for_every_style() {
    for style in [WarpStyle::Wave, WarpStyle::Bulge, WarpStyle::Pinch] {
        for direction in [WarpDirection::Horizontal, WarpDirection::Vertical] {
            let p = WarpParams {
                style,
                direction,
                intensity: 0.0,
                frequency: 7.0,
                amplitude: 20.0,
                phase: 123.0,
            };
            for (u, v) in [(0.0, 0.0), (0.5, 0.5), (0.13, 0.97), (1.0, 1.0)] {
                assert_eq!(generate(&p, Point::new(u, v)), Vec2::ZERO);
            }
        }
    }
}

#[test]
fn horizontal_wave_displaces_only_along_y() {
    let p = WarpParams {
        intensity: 60.0,
        amplitude: 10.0,
        frequency: 3.0,
        ..WarpParams::default()
    };
    for u in [0.05, 0.2, 0.37, 0.8] {
        let d = generate(&p, Point::new(u, 0.3));
        assert_eq!(d.x, 0.0);
        // Independent of v.
        assert_eq!(d, generate(&p, Point::new(u, 0.9)));
    }
}

#[test]
fn vertical_wave_displaces_only_along_x() {
    let p = WarpParams {
        direction: WarpDirection::Vertical,
        intensity: -40.0,
        amplitude: 10.0,
        ..WarpParams::default()
    };
    let d = generate(&p, Point::new(0.2, 0.1));
    assert_eq!(d.y, 0.0);
    assert!(d.x != 0.0);
}

#[test]
fn wave_matches_harmonic_sum() {
    let p = WarpParams {
        intensity: 50.0,
        amplitude: 8.0,
        frequency: 2.0,
        phase: 90.0,
        ..WarpParams::default()
    };
    let u: f64 = 0.1;
    let ph = 90f64.to_radians();
    let s = (TAU * 2.0 * u + ph).sin()
        + 0.5 * (TAU * 4.0 * u + ph).sin()
        + 0.125 * (TAU * 6.0 * u + ph).sin();
    let d = generate(&p, Point::new(u, 0.5));
    assert!((d.y - s * 8.0 * 0.5).abs() < 1e-12);
}

#[test]
fn negative_intensity_flips_the_field() {
    for style in [WarpStyle::Wave, WarpStyle::Bulge, WarpStyle::Pinch] {
        let a = generate(&params(style, 70.0, 12.0), Point::new(0.31, 0.62));
        let b = generate(&params(style, -70.0, 12.0), Point::new(0.31, 0.62));
        assert!((a + b).hypot() < 1e-12);
    }
}

#[test]
fn bulge_is_bounded_and_points_outward() {
    let p = params(WarpStyle::Bulge, 100.0, 20.0);
    let bound = max_displacement(&p);
    assert!((bound - 20.0 * 1.15).abs() < 1e-12);

    for i in 0..=20 {
        for j in 0..=20 {
            let d = generate(&p, Point::new(f64::from(i) / 20.0, f64::from(j) / 20.0));
            assert!(d.hypot() <= bound + 1e-9);
        }
    }

    // Right of center: the radial component dominates and points away from center.
    let d = generate(&p, Point::new(0.7, 0.5));
    assert!(d.x > 0.0);
}

#[test]
fn bulge_decays_far_from_center() {
    let p = params(WarpStyle::Bulge, 100.0, 20.0);
    // d = 0.65 > 0.6: exp(-0.4225 / 0.09) ~ 0.009
    let d = generate(&p, Point::new(0.5 + 0.65, 0.5));
    assert!(d.hypot() < 0.01 * 20.0 * 1.15);
    let far = generate(&p, Point::new(5.0, 5.0));
    assert!(far.hypot() < 1e-12);
}

#[test]
fn bulge_center_has_no_radial_component() {
    let p = params(WarpStyle::Bulge, 100.0, 10.0);
    let d = generate(&p, Point::new(0.5, 0.5));
    // atan2(0, 0) = 0 -> tangential (sin 0, cos 0) = (0, 1) scaled by 0.15 * 10.
    assert!(d.x.abs() < 1e-12);
    assert!((d.y - 1.5).abs() < 1e-12);
}

#[test]
fn pinch_points_inward_and_is_tighter_than_bulge() {
    let pinch = params(WarpStyle::Pinch, 100.0, 10.0);
    let bulge = params(WarpStyle::Bulge, 100.0, 10.0);
    // Along +x the 8-lobe ripple (sin 0, cos 0) is purely vertical.
    let d = generate(&pinch, Point::new(0.6, 0.5));
    assert!(d.x < 0.0);

    let at = Point::new(0.5 + 0.35, 0.5);
    assert!(generate(&pinch, at).hypot() < generate(&bulge, at).hypot());

    let bound = max_displacement(&pinch);
    for i in 0..=16 {
        for j in 0..=16 {
            let d = generate(&pinch, Point::new(f64::from(i) / 16.0, f64::from(j) / 16.0));
            assert!(d.hypot() <= bound + 1e-9);
        }
    }
}

#[test]
fn sampled_field_matches_generate_and_is_order_independent() {
    let p = WarpParams {
        style: WarpStyle::Pinch,
        intensity: 55.0,
        amplitude: 9.0,
        ..WarpParams::default()
    };
    let serial = DisplacementField::sample(&p, 17, 11, false).unwrap();
    let parallel = DisplacementField::sample(&p, 17, 11, true).unwrap();
    for y in 0..11 {
        for x in 0..17 {
            assert_eq!(serial.get(x, y), parallel.get(x, y));
            let expected = generate(&p, Point::new(f64::from(x) / 17.0, f64::from(y) / 11.0));
            assert_eq!(serial.get(x, y), expected);
        }
    }
    assert!(serial.max_magnitude() <= max_displacement(&p) + 1e-9);
    assert_eq!(serial.get(17, 0), Vec2::ZERO);
}

#[test]
fn identity_field_is_all_zero() {
    let f = DisplacementField::sample(&WarpParams::default(), 8, 8, true).unwrap();
    assert_eq!(f.max_magnitude(), 0.0);
}
