use image::{RgbaImage, imageops};
use rayon::prelude::*;

use crate::effects::sample::{bilinear_border, bilinear_clamp};
use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{DrapeError, DrapeResult};

/// Where and how a layer lands on a surface: an axis-aligned draw rect rotated about its
/// own center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerPlacement {
    /// Unrotated draw rect in surface pixels.
    pub rect: Rect,
    /// Clockwise rotation in degrees (y axis points down).
    pub rotation_deg: f64,
}

impl LayerPlacement {
    /// Affine mapping source pixel space (`src_w` x `src_h`) onto the surface.
    pub fn to_affine(&self, src_w: u32, src_h: u32) -> Affine {
        let sx = self.rect.width() / f64::from(src_w.max(1));
        let sy = self.rect.height() / f64::from(src_h.max(1));
        let center = self.rect.center().to_vec2();
        let half = Vec2::new(self.rect.width() / 2.0, self.rect.height() / 2.0);
        Affine::translate(center)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::translate(-half)
            * Affine::scale_non_uniform(sx, sy)
    }

    /// Axis-aligned bounding box of the rotated rect.
    pub fn bounding_box(&self) -> Rect {
        let center = self.rect.center().to_vec2();
        let a = Affine::translate(center)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::translate(-center);
        a.transform_rect_bbox(self.rect)
    }
}

/// How a layer's border pixels are sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerEdges {
    /// Coverage fades out over the half texel past the source edge (antialiased border).
    Feather,
    /// Only pixels whose centers fall inside the placement are drawn, sampled with edge
    /// texels clamped. An opaque source stays opaque up to its border.
    Clamp,
}

/// Render a premultiplied source onto a transparent `surface_w` x `surface_h` layer.
///
/// Each destination pixel center is mapped back through the inverse placement affine and
/// sampled bilinearly; `edges` decides what happens at the source border.
#[allow(clippy::too_many_arguments)]
pub fn draw_layer(
    src: &[u8],
    src_w: u32,
    src_h: u32,
    placement: LayerPlacement,
    edges: LayerEdges,
    surface_w: u32,
    surface_h: u32,
    parallel: bool,
) -> DrapeResult<Vec<u8>> {
    let src_len = (src_w as usize)
        .checked_mul(src_h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DrapeError::validation("layer source size overflow"))?;
    if src.len() != src_len {
        return Err(DrapeError::validation(
            "draw_layer expects src matching src_w*src_h*4",
        ));
    }
    let out_len = (surface_w as usize)
        .checked_mul(surface_h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DrapeError::validation("layer surface size overflow"))?;
    let mut out = vec![0u8; out_len];
    if src_len == 0 || out_len == 0 || placement.rect.area() <= 0.0 {
        return Ok(out);
    }

    let forward = placement.to_affine(src_w, src_h);
    if forward.determinant().abs() < 1e-12 {
        return Ok(out);
    }
    let inverse = forward.inverse();

    let bbox = placement
        .bounding_box()
        .inflate(1.0, 1.0)
        .intersect(Rect::new(0.0, 0.0, f64::from(surface_w), f64::from(surface_h)));
    if bbox.area() <= 0.0 {
        return Ok(out);
    }
    let (x_start, x_end) = (bbox.x0.floor() as usize, bbox.x1.ceil() as usize);
    let (y_start, y_end) = (bbox.y0.floor() as usize, bbox.y1.ceil() as usize);

    let stride = (surface_w as usize) * 4;
    let draw_row = |(y, row): (usize, &mut [u8])| {
        if y < y_start || y >= y_end {
            return;
        }
        for x in x_start..x_end {
            let p = inverse * Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let px = match edges {
                LayerEdges::Feather => bilinear_border(src, src_w, src_h, p.x - 0.5, p.y - 0.5),
                LayerEdges::Clamp => {
                    if !(0.0..f64::from(src_w)).contains(&p.x)
                        || !(0.0..f64::from(src_h)).contains(&p.y)
                    {
                        continue;
                    }
                    bilinear_clamp(src, src_w, src_h, p.x - 0.5, p.y - 0.5)
                }
            };
            if px[3] != 0 {
                row[x * 4..x * 4 + 4].copy_from_slice(&px);
            }
        }
    };
    if parallel {
        out.par_chunks_mut(stride).enumerate().for_each(draw_row);
    } else {
        out.chunks_mut(stride).enumerate().for_each(draw_row);
    }
    Ok(out)
}

/// Downscale a premultiplied source when it is more than twice the target size, so the
/// bilinear placement pass does not alias. Returns `None` when no prescale is needed.
pub fn prescale_for_target(
    src: &[u8],
    src_w: u32,
    src_h: u32,
    target_w: f64,
    target_h: f64,
) -> DrapeResult<Option<(Vec<u8>, u32, u32)>> {
    if target_w <= 0.0 || target_h <= 0.0 {
        return Ok(None);
    }
    if f64::from(src_w) <= 2.0 * target_w && f64::from(src_h) <= 2.0 * target_h {
        return Ok(None);
    }
    let nw = (target_w.ceil() as u32).clamp(1, src_w.max(1));
    let nh = (target_h.ceil() as u32).clamp(1, src_h.max(1));
    let img = RgbaImage::from_raw(src_w, src_h, src.to_vec())
        .ok_or_else(|| DrapeError::validation("prescale source does not match dimensions"))?;
    // Linear filtering of premultiplied data keeps edges free of color fringes.
    let resized = imageops::resize(&img, nw, nh, imageops::FilterType::Triangle);
    Ok(Some((resized.into_raw(), nw, nh)))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transform.rs"]
mod tests;
