use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_masked_skips_uncovered_pixels() {
    let mut dst = vec![10u8, 20, 30, 255, 10, 20, 30, 255];
    let src = vec![200u8, 200, 200, 255, 200, 200, 200, 255];
    over_masked_in_place(&mut dst, &src, &[0, 255], 1.0).unwrap();
    assert_eq!(&dst[0..4], &[10, 20, 30, 255]);
    assert_eq!(&dst[4..8], &[200, 200, 200, 255]);
}

#[test]
fn multiply_opaque_is_channel_product() {
    let mut dst = vec![128u8, 255, 0, 255];
    let src = vec![128u8, 128, 255, 255];
    blend_masked_in_place(&mut dst, &src, &[255], 1.0, BlendMode::Multiply).unwrap();
    assert_eq!(dst, vec![64, 128, 0, 255]);
}

#[test]
fn screen_opaque_lightens() {
    let mut dst = vec![128u8, 0, 255, 255];
    let src = vec![128u8, 0, 0, 255];
    blend_masked_in_place(&mut dst, &src, &[255], 1.0, BlendMode::Screen).unwrap();
    // 0.502 + 0.502 - 0.252 = 0.752
    assert!((i32::from(dst[0]) - 192).abs() <= 1);
    assert_eq!(dst[1], 0);
    assert_eq!(dst[2], 255);
    assert_eq!(dst[3], 255);
}

#[test]
fn blend_respects_mask_and_opacity() {
    let base = vec![100u8, 100, 100, 255];
    let src = vec![0u8, 0, 0, 255];

    let mut masked = base.clone();
    blend_masked_in_place(&mut masked, &src, &[0], 1.0, BlendMode::Multiply).unwrap();
    assert_eq!(masked, base);

    let mut half = base.clone();
    blend_masked_in_place(&mut half, &src, &[255], 0.5, BlendMode::Multiply).unwrap();
    assert!((i32::from(half[0]) - 50).abs() <= 1);
}

#[test]
fn blend_onto_transparent_dst_is_plain_source() {
    let mut dst = vec![0u8, 0, 0, 0];
    let src = vec![40u8, 80, 120, 255];
    blend_masked_in_place(&mut dst, &src, &[255], 1.0, BlendMode::Multiply).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(over_masked_in_place(&mut dst, &[0u8; 4], &[255, 255], 1.0).is_err());
    assert!(blend_masked_in_place(&mut dst, &[0u8; 8], &[255], 1.0, BlendMode::Screen).is_err());
}
