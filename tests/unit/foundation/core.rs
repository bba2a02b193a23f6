use super::*;

#[test]
fn image_dimensions_empty_and_aspect() {
    assert!(ImageDimensions::new(0, 10).is_empty());
    assert!(ImageDimensions::new(10, 0).is_empty());
    let d = ImageDimensions::new(200, 100);
    assert!(!d.is_empty());
    assert!((d.aspect() - 2.0).abs() < 1e-12);
    assert_eq!(d.rgba8_len().unwrap(), 200 * 100 * 4);
}

#[test]
fn letterboxed_surface_centers_tall_product() {
    let s = RenderSurface::letterboxed(800, 600, ImageDimensions::new(400, 600));
    assert!(s.is_ready());
    assert_eq!(s.product_bounds, Rect::new(200.0, 0.0, 600.0, 600.0));
}

#[test]
fn surface_with_empty_product_is_not_ready() {
    let s = RenderSurface::letterboxed(800, 600, ImageDimensions::new(0, 0));
    assert!(!s.is_ready());
}

#[test]
fn premultiply_roundtrip_opaque_and_transparent() {
    assert_eq!(premultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(premultiply([10, 20, 30, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply([10, 20, 30, 255]), [10, 20, 30, 255]);

    let p = premultiply([200, 100, 50, 128]);
    let s = unpremultiply(p);
    for c in 0..3 {
        assert!((i32::from(s[c]) - i32::from([200u8, 100, 50][c])).abs() <= 2);
    }
}
