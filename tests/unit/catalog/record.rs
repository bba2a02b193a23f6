use super::*;

const RECORD: &str = r##"{
    "id": "tee-classic",
    "imageUrl": "products/tee.png",
    "placementRect": {"x": 100, "y": 80, "width": 200, "height": 240,
                      "xPercent": 25, "yPercent": 20, "widthPercent": 50, "heightPercent": 60},
    "colorOptions": ["#1a1a1a", "#F5F5F5"],
    "categoryTags": ["Dark Apparel"],
    "optionalPolygonMask": [{"x": 0, "y": 0}, {"x": 400, "y": 0}, {"x": 200, "y": 400}]
}"##;

#[test]
fn parses_camel_case_catalog_json() {
    let rec = ProductRecord::from_json(RECORD).unwrap();
    assert_eq!(rec.id, "tee-classic");
    assert_eq!(rec.image_url, "products/tee.png");
    assert_eq!(rec.placement_rect.width_percent, Some(50.0));
    assert_eq!(rec.default_color(), "#1a1a1a");
    assert_eq!(rec.optional_polygon_mask.as_ref().map(Vec::len), Some(3));
    rec.validate().unwrap();
}

#[test]
fn optional_fields_default() {
    let rec = ProductRecord::from_json(
        r#"{"id":"mug","imageUrl":"m.png","placementRect":{"x":0,"y":0,"width":10,"height":10}}"#,
    )
    .unwrap();
    assert!(rec.color_options.is_empty());
    assert!(rec.optional_polygon_mask.is_none());
    assert_eq!(rec.default_color(), "#FFFFFF");
    assert!(rec.placement_rect.x_percent.is_none());
}

#[test]
fn validate_rejects_bad_colors_and_polygons() {
    let mut rec = ProductRecord::from_json(RECORD).unwrap();
    rec.color_options.push("#12345".to_owned());
    assert!(matches!(
        rec.validate(),
        Err(DrapeError::InvalidColorFormat(_))
    ));

    let mut rec = ProductRecord::from_json(RECORD).unwrap();
    rec.optional_polygon_mask = Some(vec![Point::ZERO, Point::new(1.0, 1.0)]);
    assert!(rec.validate().is_err());
}

#[test]
fn save_request_serializes_camel_case() {
    let req = SaveDesignRequest {
        product_id: "p1".to_owned(),
        user_id: "u1".to_owned(),
        data_url: "data:image/png;base64,AA==".to_owned(),
    };
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v["productId"], "p1");
    assert_eq!(v["userId"], "u1");
    assert!(v["dataUrl"].as_str().unwrap().starts_with("data:image/png"));
}

#[test]
fn malformed_json_is_validation_error() {
    assert!(matches!(
        ProductRecord::from_json("{"),
        Err(DrapeError::Validation(_))
    ));
}
