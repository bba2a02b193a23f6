use std::io::Cursor;

use super::*;
use crate::geometry::placement::{PercentRect, PlacementRect};

fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, px.repeat((w * h) as usize)).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn record() -> ProductRecord {
    ProductRecord {
        id: "tee".to_owned(),
        image_url: "tee.png".to_owned(),
        placement_rect: PlacementRect::from_percent_rect(PercentRect {
            x_percent: 25.0,
            y_percent: 25.0,
            width_percent: 50.0,
            height_percent: 50.0,
        }),
        color_options: vec!["#F5F5F5".to_owned(), "#1A1A1A".to_owned()],
        category_tags: vec![],
        optional_polygon_mask: None,
    }
}

fn ready_session() -> EditSession {
    let mut s = EditSession::new(record(), CompositorOpts::default(), 80, 40).unwrap();
    s.load_product(ImageSource::Bytes(png(40, 40, [255, 255, 255, 255])))
        .unwrap();
    s.load_design(ImageSource::Bytes(png(10, 10, [255, 0, 0, 255])))
        .unwrap();
    s
}

#[test]
fn new_session_defaults() {
    let s = EditSession::new(record(), CompositorOpts::default(), 80, 40).unwrap();
    assert_eq!(s.color(), "#F5F5F5");
    assert_eq!(s.warp(), WarpParams::default());
    assert!(s.state().is_none());
    assert!(!s.product_slot().is_ready());
}

#[test]
fn invalid_record_is_rejected() {
    let mut rec = record();
    rec.color_options = vec!["nope".to_owned()];
    assert!(EditSession::new(rec, CompositorOpts::default(), 80, 40).is_err());
}

#[test]
fn composite_reports_pending_and_failed_images() {
    let mut s = EditSession::new(record(), CompositorOpts::default(), 80, 40).unwrap();
    assert!(matches!(s.composite(), Err(DrapeError::SurfaceNotReady(_))));

    s.load_product(ImageSource::Bytes(png(40, 40, [255; 4])))
        .unwrap();
    assert!(s.load_design(ImageSource::Bytes(b"junk".to_vec())).is_err());
    assert!(matches!(s.composite(), Err(DrapeError::ImageDecodeFailed(_))));
    assert!(matches!(s.drag_to(Point::ZERO), Err(DrapeError::ImageDecodeFailed(_))));
}

#[test]
fn repeated_composites_hit_the_cache() {
    let mut s = ready_session();
    let a = s.composite().unwrap();
    let b = s.composite().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(s.cache_stats(), CacheStats { hits: 1, misses: 1 });
    assert_eq!((a.width, a.height), (80, 40));
}

#[test]
fn gestures_bypass_the_cache() {
    let mut s = ready_session();
    s.composite().unwrap();
    let before = s.cache_stats();

    s.begin_gesture().unwrap();
    s.drag_to(Point::new(30.0, 15.0)).unwrap();
    s.composite().unwrap();
    s.rotate_to(45.0).unwrap();
    s.composite().unwrap();
    assert_eq!(s.cache_stats(), before);
    assert_eq!(s.cached_composites(), 1);

    let end = s.end_gesture().unwrap();
    assert_eq!(end.rotation, 45.0);
    s.composite().unwrap();
    assert_eq!(s.cache_stats().misses, before.misses + 1);
}

#[test]
fn warp_and_color_changes_produce_new_composites() {
    let mut s = ready_session();
    let plain = s.composite().unwrap();

    let applied = s.set_warp(WarpParams {
        intensity: 250.0,
        ..WarpParams::default()
    });
    assert_eq!(applied.intensity, 100.0);
    let warped = s.composite().unwrap();
    assert_ne!(plain.data, warped.data);

    s.select_color("#1A1A1A").unwrap();
    let dark = s.composite().unwrap();
    assert_ne!(warped.data, dark.data);
    assert!(s.select_color("#12").is_err());
    assert_eq!(s.cache_stats().misses, 3);
}

#[test]
fn debounced_resize_keeps_normalized_placement() {
    let mut s = ready_session();
    let t0 = Instant::now();
    let before = s.state().unwrap();

    s.notify_resize(160, 80, t0);
    assert!(!s.tick(t0 + Duration::from_millis(10)));
    assert_eq!(s.viewport(), (80, 40));

    assert!(s.tick(t0 + Duration::from_millis(150)));
    assert_eq!(s.viewport(), (160, 80));
    let after = s.state().unwrap();
    assert!((after.center - before.center).hypot() < 1e-9);
    assert_eq!(s.composite().unwrap().width, 160);
}

#[test]
fn set_state_is_clamped() {
    let mut s = ready_session();
    let st = s
        .set_state(PlacementState {
            center: Point::new(-5.0, 0.5),
            scale: 9.0,
            rotation: 270.0,
        })
        .unwrap();
    assert_eq!(st.scale, 2.0);
    assert_eq!(st.rotation, -90.0);
    assert!(st.center.x >= 0.0);
}

#[test]
fn export_and_save_request() {
    let mut s = ready_session();
    let full = s.export_full_resolution().unwrap();
    assert_eq!((full.width, full.height), (40, 40));

    let req = s.save_request("user-1").unwrap();
    assert_eq!(req.product_id, "tee");
    assert_eq!(req.user_id, "user-1");
    assert!(req.data_url.starts_with("data:image/png;base64,"));
    assert!(s.save_request("").is_err());
}

#[test]
fn new_design_resets_placement() {
    let mut s = ready_session();
    let initial = s.state().unwrap();
    s.drag_to(Point::new(30.0, 15.0)).unwrap();
    assert_ne!(s.state().unwrap(), initial);

    s.load_design(ImageSource::Bytes(png(10, 10, [0, 0, 255, 255])))
        .unwrap();
    assert_eq!(s.state().unwrap(), initial);
    assert_eq!(s.cached_composites(), 0);
}
