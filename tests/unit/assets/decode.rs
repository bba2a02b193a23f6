use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn fully_transparent_pixels_zero_color() {
    let img = image::RgbaImage::from_raw(1, 1, vec![255, 255, 255, 0]).unwrap();
    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(prepared.rgba8_premul.as_slice(), &[0, 0, 0, 0]);
}

#[test]
fn garbage_bytes_are_decode_failures() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, DrapeError::ImageDecodeFailed(_)));
}

#[test]
fn missing_file_is_decode_failure() {
    let err = decode_image_file(Path::new("/definitely/not/here.png")).unwrap_err();
    assert!(matches!(err, DrapeError::ImageDecodeFailed(_)));
}

#[test]
fn from_premul_checks_length_and_alpha_plane() {
    assert!(PreparedImage::from_premul(2, 1, vec![0; 4]).is_err());
    let img = PreparedImage::from_premul(2, 1, vec![1, 2, 3, 9, 0, 0, 0, 7]).unwrap();
    assert_eq!(img.alpha_plane(), vec![9, 7]);
    assert_eq!(img.dimensions(), ImageDimensions::new(2, 1));
}
