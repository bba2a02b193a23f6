use kurbo::{BezPath, Shape};
use rayon::prelude::*;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{DrapeError, DrapeResult};

/// Region of the surface actually occupied by the product photo.
///
/// Always the rendered product bounds; optionally intersected with an externally supplied
/// polygon (already mapped to surface pixels).
#[derive(Clone, Debug)]
pub struct Silhouette {
    bounds: Rect,
    polygon: Option<BezPath>,
}

impl Silhouette {
    /// Rectangular silhouette.
    pub fn from_bounds(bounds: Rect) -> Self {
        Self {
            bounds,
            polygon: None,
        }
    }

    /// Silhouette clipped by a closed polygon. Needs at least three points.
    pub fn with_polygon(bounds: Rect, points: &[Point]) -> DrapeResult<Self> {
        let mut iter = points.iter();
        let first = iter
            .next()
            .filter(|_| points.len() >= 3)
            .ok_or_else(|| DrapeError::validation("polygon mask needs at least 3 points"))?;
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        path.close_path();
        Ok(Self {
            bounds,
            polygon: Some(path),
        })
    }

    /// Rendered product bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether surface point `p` is inside the silhouette.
    pub fn contains(&self, p: Point) -> bool {
        if !(p.x >= self.bounds.x0
            && p.x < self.bounds.x1
            && p.y >= self.bounds.y0
            && p.y < self.bounds.y1)
        {
            return false;
        }
        self.polygon.as_ref().is_none_or(|path| path.contains(p))
    }

    /// One coverage byte per surface pixel, sampled at pixel centers.
    ///
    /// With `product_alpha` (one byte per pixel), coverage is further scaled by the product's
    /// own alpha so transparent photo pixels never receive design ink.
    pub fn coverage_mask(
        &self,
        width: u32,
        height: u32,
        product_alpha: Option<&[u8]>,
        parallel: bool,
    ) -> DrapeResult<Vec<u8>> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| DrapeError::validation("mask size overflow"))?;
        if let Some(a) = product_alpha
            && a.len() != len
        {
            return Err(DrapeError::validation(
                "product alpha must have one byte per surface pixel",
            ));
        }
        let mut mask = vec![0u8; len];
        if len == 0 {
            return Ok(mask);
        }

        let region = self
            .bounds
            .intersect(Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));
        if region.area() <= 0.0 {
            return Ok(mask);
        }
        let y_range = (region.y0.floor() as usize)..(region.y1.ceil() as usize);
        let x_range = (region.x0.floor() as usize)..(region.x1.ceil() as usize);

        let mask_row = |(y, row): (usize, &mut [u8])| {
            if !y_range.contains(&y) {
                return;
            }
            for x in x_range.clone() {
                if !self.contains(Point::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    continue;
                }
                row[x] = match product_alpha {
                    Some(a) => a[y * (width as usize) + x],
                    None => 255,
                };
            }
        };
        if parallel {
            mask.par_chunks_mut(width as usize)
                .enumerate()
                .for_each(mask_row);
        } else {
            mask.chunks_mut(width as usize).enumerate().for_each(mask_row);
        }
        Ok(mask)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/silhouette.rs"]
mod tests;
