use crate::foundation::error::{DrapeError, DrapeResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Side length of the fixed reference canvas placement rects are authored on.
pub const REFERENCE_CANVAS: f64 = 400.0;

/// Pixel dimensions of a decoded bitmap (design or product).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageDimensions {
    /// Width in source pixels.
    pub width: u32,
    /// Height in source pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Create dimensions without validation.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height. Callers must check [`ImageDimensions::is_empty`] first.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Number of bytes of a tightly packed RGBA8 buffer with these dimensions.
    pub fn rgba8_len(self) -> DrapeResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| DrapeError::validation("rgba8 buffer size overflow"))
    }
}

/// The drawing area of a preview or export, plus where the product photo lands inside it.
///
/// Product photos are letterboxed (contain-fit and centered), so `product_bounds` is usually
/// smaller than the surface along one axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderSurface {
    /// Surface width in device pixels.
    pub width: u32,
    /// Surface height in device pixels.
    pub height: u32,
    /// Rendered bounds of the product image within the surface.
    pub product_bounds: Rect,
}

impl RenderSurface {
    /// Letterbox a product image of `product` dimensions into a `width`x`height` surface.
    pub fn letterboxed(width: u32, height: u32, product: ImageDimensions) -> Self {
        let product_bounds =
            crate::geometry::placement::product_bounds_in_surface(product, width, height);
        Self {
            width,
            height,
            product_bounds,
        }
    }

    /// Return `true` once product bounds have a non-zero area.
    pub fn is_ready(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.product_bounds.width() > 0.0
            && self.product_bounds.height() > 0.0
    }
}

/// Premultiplied RGBA8 pixel (r,g,b already multiplied by a).
pub type PremulRgba8 = [u8; 4];

/// Convert straight-alpha RGBA8 into premultiplied RGBA8.
pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        crate::foundation::math::mul_div255_u8(u16::from(px[0]), a),
        crate::foundation::math::mul_div255_u8(u16::from(px[1]), a),
        crate::foundation::math::mul_div255_u8(u16::from(px[2]), a),
        px[3],
    ]
}

/// Convert premultiplied RGBA8 back into straight alpha.
pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
