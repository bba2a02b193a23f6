use super::*;

#[test]
fn brightness_endpoints_and_mid_gray() {
    assert!(brightness("#000000").unwrap().abs() < 1e-12);
    assert!((brightness("#FFFFFF").unwrap() - 1.0).abs() < 1e-12);
    assert!((brightness("#808080").unwrap() - 0.502).abs() < 1e-3);
}

#[test]
fn hash_prefix_is_optional_and_case_insensitive() {
    assert_eq!(Rgb8::parse_hex("ff8000").unwrap(), Rgb8::parse_hex("#FF8000").unwrap());
    assert_eq!(
        Rgb8::parse_hex("#Ff8000").unwrap(),
        Rgb8 {
            r: 255,
            g: 128,
            b: 0
        }
    );
}

#[test]
fn channel_weights_follow_luma() {
    assert!((brightness("#ff0000").unwrap() - 0.299).abs() < 1e-9);
    assert!((brightness("#00ff00").unwrap() - 0.587).abs() < 1e-9);
    assert!((brightness("#0000ff").unwrap() - 0.114).abs() < 1e-9);
}

#[test]
fn malformed_colors_are_rejected() {
    for bad in ["", "#", "#fff", "#ffffff00", "##ffffff", "#gg0000", " #ffffff", "#ffé000"] {
        let err = brightness(bad).unwrap_err();
        assert!(
            matches!(err, DrapeError::InvalidColorFormat(_)),
            "expected InvalidColorFormat for {bad:?}"
        );
    }
}

#[test]
fn to_hex_is_lowercase() {
    assert_eq!(Rgb8::parse_hex("#ABCDEF").unwrap().to_hex(), "#abcdef");
}
