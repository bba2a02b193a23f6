use super::*;

#[test]
fn rect_silhouette_masks_outside_pixels() {
    let s = Silhouette::from_bounds(Rect::new(2.0, 0.0, 6.0, 4.0));
    let mask = s.coverage_mask(8, 4, None, false).unwrap();
    for y in 0..4usize {
        for x in 0..8usize {
            let expected = if (2..6).contains(&x) { 255 } else { 0 };
            assert_eq!(mask[y * 8 + x], expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn polygon_clips_inside_bounds() {
    // Triangle covering the lower-left half of a 10x10 product.
    let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
    let tri = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 10.0),
        Point::new(10.0, 10.0),
    ];
    let s = Silhouette::with_polygon(bounds, &tri).unwrap();
    assert!(s.contains(Point::new(1.0, 8.0)));
    assert!(!s.contains(Point::new(8.0, 1.0)));

    let mask = s.coverage_mask(10, 10, None, true).unwrap();
    assert_eq!(mask[8 * 10 + 1], 255);
    assert_eq!(mask[10 + 8], 0);
}

#[test]
fn product_alpha_scales_coverage() {
    let s = Silhouette::from_bounds(Rect::new(0.0, 0.0, 2.0, 1.0));
    let mask = s.coverage_mask(2, 1, Some(&[0, 200]), false).unwrap();
    assert_eq!(mask, vec![0, 200]);
    assert!(s.coverage_mask(2, 1, Some(&[0]), true).is_err());
}

#[test]
fn polygon_needs_three_points() {
    let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
    assert!(Silhouette::with_polygon(bounds, &[Point::ZERO, Point::new(1.0, 1.0)]).is_err());
    assert!(Silhouette::with_polygon(bounds, &[]).is_err());
}

#[test]
fn bounds_outside_surface_yield_empty_mask() {
    let s = Silhouette::from_bounds(Rect::new(50.0, 50.0, 60.0, 60.0));
    let mask = s.coverage_mask(10, 10, None, false).unwrap();
    assert!(mask.iter().all(|&m| m == 0));
}

#[test]
fn serial_mask_matches_parallel() {
    let bounds = Rect::new(1.5, 0.5, 11.0, 9.0);
    let poly = [
        Point::new(2.0, 1.0),
        Point::new(11.0, 3.0),
        Point::new(6.0, 9.0),
    ];
    let s = Silhouette::with_polygon(bounds, &poly).unwrap();
    let alpha: Vec<u8> = (0..120).map(|i| (i * 13 % 256) as u8).collect();
    assert_eq!(
        s.coverage_mask(12, 10, Some(&alpha), false).unwrap(),
        s.coverage_mask(12, 10, Some(&alpha), true).unwrap()
    );
}
