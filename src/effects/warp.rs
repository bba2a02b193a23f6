use rayon::prelude::*;

use crate::effects::sample::bilinear_strict;
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::warp::field::DisplacementField;

/// Backward-map every destination pixel through `field` and bilinearly resample `src`.
///
/// Destination `(x, y)` samples source `(x - du, y - dv)`. Samples landing outside
/// `[0, w-1] x [0, h-1]` are written fully transparent (no clamping or wrapping). Rows are
/// independent, so the parallel and serial paths are bit-identical.
pub fn warp_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    field: &DisplacementField,
    parallel: bool,
) -> DrapeResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DrapeError::validation("warp buffer size overflow"))?;
    if src.len() != expected {
        return Err(DrapeError::validation(
            "warp_rgba8_premul expects src matching width*height*4",
        ));
    }
    if field.width != width || field.height != height {
        return Err(DrapeError::validation(
            "displacement field does not match image dimensions",
        ));
    }

    let mut out = vec![0u8; expected];
    if expected == 0 {
        return Ok(out);
    }

    let stride = (width as usize) * 4;
    let warp_row = |(y, row): (usize, &mut [u8])| {
        let y = y as u32;
        for x in 0..width {
            let d = field.get(x, y);
            let sx = f64::from(x) - d.x;
            let sy = f64::from(y) - d.y;
            if let Some(px) = bilinear_strict(src, width, height, sx, sy) {
                let i = (x as usize) * 4;
                row[i..i + 4].copy_from_slice(&px);
            }
        }
    };
    if parallel {
        out.par_chunks_mut(stride).enumerate().for_each(warp_row);
    } else {
        out.chunks_mut(stride).enumerate().for_each(warp_row);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/warp.rs"]
mod tests;
