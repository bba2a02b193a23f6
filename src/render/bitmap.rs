use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::foundation::core::unpremultiply;
use crate::foundation::error::{DrapeError, DrapeResult};

/// Final composite produced by the compositor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl RenderedBitmap {
    /// RGBA8 with straight alpha, as image encoders and browsers expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> DrapeResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| DrapeError::validation("bitmap data does not match dimensions"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| DrapeError::Other(anyhow::anyhow!("encode png: {e}")))?;
        Ok(buf)
    }

    /// `data:image/png;base64,...` form for the persistence payload.
    pub fn to_png_data_url(&self) -> DrapeResult<String> {
        let png = self.encode_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            BASE64_STANDARD.encode(png)
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/bitmap.rs"]
mod tests;
