use crate::appearance::adaptive::BlendMode;
use crate::foundation::core::PremulRgba8;
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::foundation::math::mul_div255_u8;

/// Premultiplied source-over with a global opacity.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Source-over `src` onto `dst`, each pixel weighted by `mask` coverage and `opacity`.
///
/// `mask` holds one coverage byte per pixel.
pub fn over_masked_in_place(
    dst: &mut [u8],
    src: &[u8],
    mask: &[u8],
    opacity: f32,
) -> DrapeResult<()> {
    check_lengths("over_masked_in_place", dst, src, mask)?;
    for ((d, s), &m) in dst
        .chunks_exact_mut(4)
        .zip(src.chunks_exact(4))
        .zip(mask.iter())
    {
        if m == 0 || s[3] == 0 {
            continue;
        }
        let op = opacity * (f32::from(m) / 255.0);
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], op);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `src` onto `dst` with a separable blend mode, weighted by `mask` and `opacity`.
pub fn blend_masked_in_place(
    dst: &mut [u8],
    src: &[u8],
    mask: &[u8],
    opacity: f32,
    mode: BlendMode,
) -> DrapeResult<()> {
    check_lengths("blend_masked_in_place", dst, src, mask)?;

    // Blend dispatch happens once per call, not per pixel.
    match mode {
        BlendMode::Multiply => blend_masked(dst, src, mask, opacity, |s, d| s * d),
        BlendMode::Screen => blend_masked(dst, src, mask, opacity, |s, d| s + d - s * d),
    }
    Ok(())
}

#[inline(always)]
fn blend_masked<F>(dst: &mut [u8], src: &[u8], mask: &[u8], opacity: f32, blend_fn: F)
where
    F: Fn(f32, f32) -> f32,
{
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }

    for ((d, s), &m) in dst
        .chunks_exact_mut(4)
        .zip(src.chunks_exact(4))
        .zip(mask.iter())
    {
        if m == 0 || s[3] == 0 {
            continue;
        }
        let op = opacity * (f32::from(m) / 255.0);

        // Porter-Duff source-over with the blend applied to unpremultiplied channels:
        // out_a = sa + da * (1 - sa)
        // out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da
        let sa = (f32::from(s[3]) / 255.0) * op;
        let da = f32::from(d[3]) / 255.0;
        let inv_sa = 1.0 - sa;
        let out_a = (sa + da * inv_sa).clamp(0.0, 1.0);

        for c in 0..3 {
            let sp = (f32::from(s[c]) / 255.0) * op;
            let dp = f32::from(d[c]) / 255.0;
            let sc = if sa > 0.0 { (sp / sa).clamp(0.0, 1.0) } else { 0.0 };
            let dc = if da > 0.0 { (dp / da).clamp(0.0, 1.0) } else { 0.0 };
            let b = blend_fn(sc, dc).clamp(0.0, 1.0);
            let out_p = (sp * (1.0 - da) + dp * inv_sa + b * sa * da).clamp(0.0, 1.0);
            d[c] = (out_p * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        d[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

fn check_lengths(op: &str, dst: &[u8], src: &[u8], mask: &[u8]) -> DrapeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) || mask.len() * 4 != dst.len() {
        return Err(DrapeError::validation(format!(
            "{op} expects equal-length rgba8 buffers and one mask byte per pixel"
        )));
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
