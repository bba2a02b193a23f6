use super::*;
use crate::warp::params::{WarpDirection, WarpParams, WarpStyle};

fn gradient(w: u32, h: u32) -> Vec<u8> {
    let mut v = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            v.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 50, 255]);
        }
    }
    v
}

#[test]
fn identity_field_reproduces_source() {
    let src = gradient(9, 7);
    let field = DisplacementField::sample(&WarpParams::default(), 9, 7, false).unwrap();
    let out = warp_rgba8_premul(&src, 9, 7, &field, true).unwrap();
    assert_eq!(out, src);
}

#[test]
fn parallel_and_serial_are_identical() {
    let src = gradient(24, 16);
    let params = WarpParams {
        style: WarpStyle::Wave,
        direction: WarpDirection::Vertical,
        intensity: 80.0,
        amplitude: 3.0,
        frequency: 2.0,
        phase: 45.0,
    };
    let field = DisplacementField::sample(&params, 24, 16, true).unwrap();
    let a = warp_rgba8_premul(&src, 24, 16, &field, false).unwrap();
    let b = warp_rgba8_premul(&src, 24, 16, &field, true).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, src);
}

#[test]
fn samples_outside_source_become_transparent() {
    // A strong vertical wave pushes edge columns outside the source.
    let src = vec![255u8; 16 * 16 * 4];
    let params = WarpParams {
        direction: WarpDirection::Vertical,
        intensity: 100.0,
        amplitude: 20.0,
        frequency: 1.0,
        phase: 90.0,
        ..WarpParams::default()
    };
    let field = DisplacementField::sample(&params, 16, 16, false).unwrap();
    let out = warp_rgba8_premul(&src, 16, 16, &field, false).unwrap();
    // At u = 0 with phase 90 the offset is positive, so x - du < 0.
    assert_eq!(&out[0..4], &[0, 0, 0, 0]);
    assert!(out.chunks_exact(4).any(|px| px[3] == 255));
}

#[test]
fn mismatched_field_is_rejected() {
    let src = gradient(4, 4);
    let field = DisplacementField::sample(&WarpParams::default(), 3, 4, false).unwrap();
    assert!(warp_rgba8_premul(&src, 4, 4, &field, false).is_err());
}
