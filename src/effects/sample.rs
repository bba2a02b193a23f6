//! Bilinear sampling over premultiplied RGBA8 buffers.

use crate::foundation::core::PremulRgba8;

/// Sample at `(sx, sy)` when it lies inside `[0, w-1] x [0, h-1]`; `None` otherwise.
///
/// The four neighbours are blended by the fractional offsets `fx`, `fy` across all channels.
#[inline]
pub(crate) fn bilinear_strict(
    src: &[u8],
    width: u32,
    height: u32,
    sx: f64,
    sy: f64,
) -> Option<PremulRgba8> {
    if width == 0 || height == 0 {
        return None;
    }
    let max_x = f64::from(width - 1);
    let max_y = f64::from(height - 1);
    if !(0.0..=max_x).contains(&sx) || !(0.0..=max_y).contains(&sy) {
        return None;
    }

    let x0 = sx.floor() as u32;
    let y0 = sy.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = (sx - f64::from(x0)) as f32;
    let fy = (sy - f64::from(y0)) as f32;

    let px = |x: u32, y: u32| -> [f32; 4] {
        let i = ((y as usize) * (width as usize) + (x as usize)) * 4;
        [
            f32::from(src[i]),
            f32::from(src[i + 1]),
            f32::from(src[i + 2]),
            f32::from(src[i + 3]),
        ]
    };
    Some(mix4(px(x0, y0), px(x1, y0), px(x0, y1), px(x1, y1), fx, fy))
}

/// Sample at `(sx, sy)` treating everything outside the image as transparent.
///
/// Unlike [`bilinear_strict`], pixels half a texel past the edge still pick up partial
/// coverage, which antialiases the borders of a resized or rotated layer.
#[inline]
pub(crate) fn bilinear_border(
    src: &[u8],
    width: u32,
    height: u32,
    sx: f64,
    sy: f64,
) -> PremulRgba8 {
    let x0f = sx.floor();
    let y0f = sy.floor();
    let (w, h) = (i64::from(width), i64::from(height));
    if x0f < -1.0 || y0f < -1.0 || x0f >= w as f64 || y0f >= h as f64 {
        return [0; 4];
    }
    let x0 = x0f as i64;
    let y0 = y0f as i64;
    let fx = (sx - x0f) as f32;
    let fy = (sy - y0f) as f32;

    let px = |x: i64, y: i64| -> [f32; 4] {
        if x < 0 || y < 0 || x >= w || y >= h {
            return [0.0; 4];
        }
        let i = ((y as usize) * (width as usize) + (x as usize)) * 4;
        [
            f32::from(src[i]),
            f32::from(src[i + 1]),
            f32::from(src[i + 2]),
            f32::from(src[i + 3]),
        ]
    };
    mix4(
        px(x0, y0),
        px(x0 + 1, y0),
        px(x0, y0 + 1),
        px(x0 + 1, y0 + 1),
        fx,
        fy,
    )
}

/// Sample at `(sx, sy)` with coordinates clamped to the image, so edge texels extend outward.
#[inline]
pub(crate) fn bilinear_clamp(
    src: &[u8],
    width: u32,
    height: u32,
    sx: f64,
    sy: f64,
) -> PremulRgba8 {
    if width == 0 || height == 0 {
        return [0; 4];
    }
    let sx = sx.clamp(0.0, f64::from(width - 1));
    let sy = sy.clamp(0.0, f64::from(height - 1));
    bilinear_strict(src, width, height, sx, sy).unwrap_or([0; 4])
}

#[inline(always)]
fn mix4(tl: [f32; 4], tr: [f32; 4], bl: [f32; 4], br: [f32; 4], fx: f32, fy: f32) -> PremulRgba8 {
    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = lerp(tl[c], tr[c], fx);
        let bot = lerp(bl[c], br[c], fx);
        out[c] = lerp(top, bot, fy).round().clamp(0.0, 255.0) as u8;
    }
    // Premultiplied invariant: color never exceeds alpha after rounding.
    for c in 0..3 {
        out[c] = out[c].min(out[3]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sample.rs"]
mod tests;
