use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::{ImageDimensions, premultiply};
use crate::foundation::error::{DrapeError, DrapeResult};

/// A decoded bitmap ready for compositing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap an already premultiplied buffer, checking its length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> DrapeResult<Self> {
        let expected = ImageDimensions::new(width, height).rgba8_len()?;
        if rgba8_premul.len() != expected {
            return Err(DrapeError::validation(format!(
                "premultiplied buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Pixel dimensions.
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }

    /// Alpha channel only, one byte per pixel.
    pub fn alpha_plane(&self) -> Vec<u8> {
        self.rgba8_premul.chunks_exact(4).map(|px| px[3]).collect()
    }
}

/// Decode encoded image bytes (PNG or JPEG) into premultiplied RGBA8.
///
/// Any decoder failure, and any zero-sized result, maps to `ImageDecodeFailed`.
pub fn decode_image(bytes: &[u8]) -> DrapeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| DrapeError::decode_failed(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DrapeError::decode_failed(format!(
            "decoded image is empty ({width}x{height})"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Read and decode an image file.
pub fn decode_image_file(path: &Path) -> DrapeResult<PreparedImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| DrapeError::decode_failed(format!("read '{}': {e}", path.display())))?;
    decode_image(&bytes)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = premultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
