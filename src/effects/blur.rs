use rayon::prelude::*;

use crate::foundation::error::{DrapeError, DrapeResult};

/// Separable Gaussian blur over premultiplied RGBA8, edges clamped.
///
/// Weights are quantized to Q16 and renormalized so constant images stay constant. Rows are
/// independent in both passes, so `parallel` does not change the output.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
    parallel: bool,
) -> DrapeResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DrapeError::validation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(DrapeError::validation(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, &kernel, parallel);
    vertical_pass(&tmp, &mut out, width, height, &kernel, parallel);
    Ok(out)
}

/// Blur parameters for a CSS-style blur radius: `sigma = radius / 2`, taps cover `2 * sigma`.
pub fn radius_sigma_for_blur(blur: f64) -> (u32, f32) {
    if !blur.is_finite() || blur <= 0.0 {
        return (0, 0.0);
    }
    let sigma = (blur / 2.0).max(0.5);
    ((2.0 * sigma).ceil() as u32, sigma as f32)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> DrapeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(DrapeError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(DrapeError::validation("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32], parallel: bool) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let stride = (width as usize) * 4;
    let blur_row = |(out_row, in_row): (&mut [u8], &[u8])| {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = (sx as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(in_row[idx + c]);
                }
            }
            let out_idx = (x as usize) * 4;
            for c in 0..4 {
                out_row[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    };
    if parallel {
        dst.par_chunks_mut(stride)
            .zip(src.par_chunks(stride))
            .for_each(blur_row);
    } else {
        dst.chunks_mut(stride).zip(src.chunks(stride)).for_each(blur_row);
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], parallel: bool) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let stride = (width as usize) * 4;
    let blur_row = |(y, out_row): (usize, &mut [u8])| {
        let y = y as i32;
        for x in 0..(width as usize) {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = (sy as usize) * stride + x * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            for c in 0..4 {
                out_row[x * 4 + c] = q16_to_u8(acc[c]);
            }
        }
    };
    if parallel {
        dst.par_chunks_mut(stride).enumerate().for_each(blur_row);
    } else {
        dst.chunks_mut(stride).enumerate().for_each(blur_row);
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
