use super::*;
use crate::geometry::placement::PercentRect;

fn surface_800x600() -> RenderSurface {
    RenderSurface {
        width: 800,
        height: 600,
        product_bounds: Rect::new(200.0, 0.0, 600.0, 600.0),
    }
}

fn small_percent_rect() -> PlacementRect {
    PlacementRect::from_percent_rect(PercentRect {
        x_percent: 50.0,
        y_percent: 50.0,
        width_percent: 10.0,
        height_percent: 10.0,
    })
}

#[test]
fn placement_centers_relative_to_product_bounds() {
    let layout = DesignLayout::compute(
        surface_800x600(),
        &small_percent_rect(),
        ImageDimensions::new(40, 60),
        true,
    )
    .unwrap();
    let placed = layout.layer_placement(&layout.initial_state());
    let c = placed.rect.center();
    assert!((c.x - 420.0).abs() < 1e-9);
    assert!((c.y - 330.0).abs() < 1e-9);
    assert!((placed.rect.width() - 40.0).abs() < 1e-9);
}

#[test]
fn state_scale_multiplies_fit_size() {
    let layout = DesignLayout::compute(
        surface_800x600(),
        &small_percent_rect(),
        ImageDimensions::new(40, 60),
        true,
    )
    .unwrap();
    let state = PlacementState {
        scale: 2.0,
        ..layout.initial_state()
    };
    let placed = layout.layer_placement(&state);
    assert!((placed.rect.width() - 80.0).abs() < 1e-9);
    assert!((placed.rect.height() - 120.0).abs() < 1e-9);
}

#[test]
fn invalid_rect_falls_back_to_centered_default() {
    let bad = PlacementRect::from_pixels(350.0, 0.0, 100.0, 100.0);
    let layout =
        DesignLayout::compute(surface_800x600(), &bad, ImageDimensions::new(10, 10), true)
            .unwrap();
    assert_eq!(layout.placement, PlacementRect::centered_default());
    assert_eq!(layout.target, Rect::new(300.0, 150.0, 500.0, 450.0));
}

#[test]
fn empty_bounds_are_not_ready() {
    let surface = RenderSurface {
        width: 800,
        height: 600,
        product_bounds: Rect::ZERO,
    };
    let err = DesignLayout::compute(
        surface,
        &small_percent_rect(),
        ImageDimensions::new(10, 10),
        true,
    )
    .unwrap_err();
    assert!(matches!(err, DrapeError::SurfaceNotReady(_)));
}

#[test]
fn normalized_and_surface_points_invert() {
    let layout = DesignLayout::compute(
        surface_800x600(),
        &small_percent_rect(),
        ImageDimensions::new(10, 10),
        true,
    )
    .unwrap();
    let p = Point::new(512.0, 77.0);
    let back = layout.to_surface(layout.normalized(p));
    assert!((back - p).hypot() < 1e-9);
}
