use rayon::prelude::*;

use crate::appearance::adaptive::ShadowParams;
use crate::effects::blur::{blur_rgba8_premul, radius_sigma_for_blur};
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::foundation::math::mul_div255_u8;

/// Drop shadow of a premultiplied layer: its alpha tinted with `shadow.color` at
/// `shadow.opacity`, shifted by `shadow.offset` and blurred by `shadow.blur`.
///
/// Offset and blur are taken as surface pixels here; scale them with
/// [`ShadowParams::scaled`] first. Fractional offsets resample the alpha bilinearly.
pub fn drop_shadow_rgba8_premul(
    layer: &[u8],
    width: u32,
    height: u32,
    shadow: &ShadowParams,
    parallel: bool,
) -> DrapeResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DrapeError::validation("shadow buffer size overflow"))?;
    if layer.len() != expected {
        return Err(DrapeError::validation(
            "drop_shadow_rgba8_premul expects layer matching width*height*4",
        ));
    }
    let mut out = vec![0u8; expected];
    let opacity = shadow.opacity.clamp(0.0, 1.0);
    if expected == 0 || opacity <= 0.0 {
        return Ok(out);
    }
    let (dx, dy) = (shadow.offset.x, shadow.offset.y);
    if !dx.is_finite() || !dy.is_finite() {
        return Err(DrapeError::validation("shadow offset must be finite"));
    }

    let (w, h) = (i64::from(width), i64::from(height));
    let alpha = |x: i64, y: i64| -> f64 {
        if x < 0 || y < 0 || x >= w || y >= h {
            return 0.0;
        }
        f64::from(layer[((y * w + x) as usize) * 4 + 3])
    };
    let stride = (width as usize) * 4;
    let cast_row = |(y, row): (usize, &mut [u8])| {
        let sy = y as f64 - dy;
        let y0 = sy.floor();
        let fy = sy - y0;
        let y0 = y0 as i64;
        for x in 0..(width as usize) {
            let sx = x as f64 - dx;
            let x0 = sx.floor();
            let fx = sx - x0;
            let x0 = x0 as i64;
            let top = alpha(x0, y0) * (1.0 - fx) + alpha(x0 + 1, y0) * fx;
            let bot = alpha(x0, y0 + 1) * (1.0 - fx) + alpha(x0 + 1, y0 + 1) * fx;
            let a = ((top * (1.0 - fy) + bot * fy) * opacity).round().clamp(0.0, 255.0) as u8;
            if a == 0 {
                continue;
            }
            let i = x * 4;
            for c in 0..3 {
                row[i + c] = mul_div255_u8(u16::from(shadow.color[c]), u16::from(a));
            }
            row[i + 3] = a;
        }
    };
    if parallel {
        out.par_chunks_mut(stride).enumerate().for_each(cast_row);
    } else {
        out.chunks_mut(stride).enumerate().for_each(cast_row);
    }

    let (radius, sigma) = radius_sigma_for_blur(shadow.blur);
    if radius == 0 {
        return Ok(out);
    }
    blur_rgba8_premul(&out, width, height, radius, sigma, parallel)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
