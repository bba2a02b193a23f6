//! Placement rects on the reference canvas and their projection onto rendered product bounds.
//!
//! Rects are authored on a fixed 400x400 reference canvas. Percent fields, when present, are
//! authoritative; pixel fields are derived and recomputed for every surface size.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{ImageDimensions, Point, REFERENCE_CANVAS, Rect};
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::geometry::fit::fit;

/// Placement region on the reference canvas, with optional authoritative percent fields.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRect {
    /// Left edge in reference-canvas pixels.
    pub x: f64,
    /// Top edge in reference-canvas pixels.
    pub y: f64,
    /// Width in reference-canvas pixels.
    pub width: f64,
    /// Height in reference-canvas pixels.
    pub height: f64,
    /// Left edge as a percentage (0-100) of the product width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_percent: Option<f64>,
    /// Top edge as a percentage (0-100) of the product height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_percent: Option<f64>,
    /// Width as a percentage (0-100) of the product width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_percent: Option<f64>,
    /// Height as a percentage (0-100) of the product height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_percent: Option<f64>,
}

/// Percent-only form of a placement rect (each field on a 0-100 scale).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentRect {
    /// Left edge percentage.
    pub x_percent: f64,
    /// Top edge percentage.
    pub y_percent: f64,
    /// Width percentage.
    pub width_percent: f64,
    /// Height percentage.
    pub height_percent: f64,
}

impl PlacementRect {
    /// Legacy pixel-only rect.
    pub fn from_pixels(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            x_percent: None,
            y_percent: None,
            width_percent: None,
            height_percent: None,
        }
    }

    /// Rect whose pixel fields are derived from `percent` on the reference canvas.
    pub fn from_percent_rect(percent: PercentRect) -> Self {
        from_percent(percent, REFERENCE_CANVAS, REFERENCE_CANVAS).with_percent(percent)
    }

    /// Attach authoritative percent fields.
    pub fn with_percent(mut self, percent: PercentRect) -> Self {
        self.x_percent = Some(percent.x_percent);
        self.y_percent = Some(percent.y_percent);
        self.width_percent = Some(percent.width_percent);
        self.height_percent = Some(percent.height_percent);
        self
    }

    /// Authoritative percent data, present only when all four fields are set.
    pub fn percent(&self) -> Option<PercentRect> {
        Some(PercentRect {
            x_percent: self.x_percent?,
            y_percent: self.y_percent?,
            width_percent: self.width_percent?,
            height_percent: self.height_percent?,
        })
    }

    /// Centered fallback covering the middle half of the reference canvas.
    pub fn centered_default() -> Self {
        Self::from_percent_rect(PercentRect {
            x_percent: 25.0,
            y_percent: 25.0,
            width_percent: 50.0,
            height_percent: 50.0,
        })
    }

    /// Check pixel fields against the reference canvas and percent fields against 0-100.
    ///
    /// Violations are reported, never clamped.
    pub fn validate(&self) -> DrapeResult<()> {
        check_bounds(
            "pixel",
            [self.x, self.y, self.width, self.height],
            REFERENCE_CANVAS,
        )?;
        if let Some(p) = self.percent() {
            check_bounds(
                "percent",
                [p.x_percent, p.y_percent, p.width_percent, p.height_percent],
                100.0,
            )?;
        }
        Ok(())
    }
}

fn check_bounds(kind: &str, [x, y, w, h]: [f64; 4], extent: f64) -> DrapeResult<()> {
    if ![x, y, w, h].iter().all(|v| v.is_finite()) {
        return Err(DrapeError::invalid_placement(format!(
            "{kind} rect has non-finite fields"
        )));
    }
    if w <= 0.0 || h <= 0.0 {
        return Err(DrapeError::invalid_placement(format!(
            "{kind} rect must have positive size, got {w}x{h}"
        )));
    }
    if x < 0.0 || y < 0.0 {
        return Err(DrapeError::invalid_placement(format!(
            "{kind} rect origin ({x}, {y}) is negative"
        )));
    }
    // Small slack so percent data derived from pixel data does not trip on rounding.
    const EPS: f64 = 1e-9;
    if x + w > extent + EPS || y + h > extent + EPS {
        return Err(DrapeError::invalid_placement(format!(
            "{kind} rect right/bottom edge ({}, {}) exceeds {extent}",
            x + w,
            y + h
        )));
    }
    Ok(())
}

/// Express a pixel rect as percentages of the reference canvas.
///
/// Total: malformed input yields out-of-range percentages; use [`PlacementRect::validate`].
pub fn to_percent(rect: &PlacementRect) -> PercentRect {
    PercentRect {
        x_percent: rect.x / REFERENCE_CANVAS * 100.0,
        y_percent: rect.y / REFERENCE_CANVAS * 100.0,
        width_percent: rect.width / REFERENCE_CANVAS * 100.0,
        height_percent: rect.height / REFERENCE_CANVAS * 100.0,
    }
}

/// Scale a percent rect onto a `surface_width` x `surface_height` area.
pub fn from_percent(percent: PercentRect, surface_width: f64, surface_height: f64) -> PlacementRect {
    PlacementRect::from_pixels(
        percent.x_percent / 100.0 * surface_width,
        percent.y_percent / 100.0 * surface_height,
        percent.width_percent / 100.0 * surface_width,
        percent.height_percent / 100.0 * surface_height,
    )
}

/// Project a placement rect onto the rendered product bounds inside a surface.
///
/// Percent data is resolved relative to `product_bounds` (never the full surface). Legacy
/// pixel-only rects are scaled by `bounds / 400` and offset by the bounds origin. Zero-size
/// bounds produce a zero-size rect at the bounds origin.
pub fn resolve_against_product(rect: &PlacementRect, product_bounds: Rect) -> Rect {
    let bw = product_bounds.width();
    let bh = product_bounds.height();
    let origin = product_bounds.origin();
    if bw <= 0.0 || bh <= 0.0 {
        return Rect::from_origin_size(origin, (0.0, 0.0));
    }

    let (x, y, w, h) = match rect.percent() {
        Some(p) => (
            p.x_percent / 100.0 * bw,
            p.y_percent / 100.0 * bh,
            p.width_percent / 100.0 * bw,
            p.height_percent / 100.0 * bh,
        ),
        None => {
            let sx = bw / REFERENCE_CANVAS;
            let sy = bh / REFERENCE_CANVAS;
            (rect.x * sx, rect.y * sy, rect.width * sx, rect.height * sy)
        }
    };

    Rect::new(origin.x + x, origin.y + y, origin.x + x + w, origin.y + y + h)
}

/// Inverse of [`resolve_against_product`]: express a surface rect relative to product bounds.
///
/// The result carries authoritative percent fields. Fails with `SurfaceNotReady` for empty
/// bounds.
pub fn reference_from_surface(rect: Rect, product_bounds: Rect) -> DrapeResult<PlacementRect> {
    let bw = product_bounds.width();
    let bh = product_bounds.height();
    if bw <= 0.0 || bh <= 0.0 {
        return Err(DrapeError::surface_not_ready(
            "product bounds are empty; cannot express rect relative to product",
        ));
    }
    let percent = PercentRect {
        x_percent: (rect.x0 - product_bounds.x0) / bw * 100.0,
        y_percent: (rect.y0 - product_bounds.y0) / bh * 100.0,
        width_percent: rect.width() / bw * 100.0,
        height_percent: rect.height() / bh * 100.0,
    };
    Ok(PlacementRect::from_percent_rect(percent))
}

/// Letterbox a product image into a surface: contain-fit, centered.
///
/// Empty product dimensions yield [`Rect::ZERO`] (image not decoded or degenerate).
pub fn product_bounds_in_surface(
    product: ImageDimensions,
    surface_width: u32,
    surface_height: u32,
) -> Rect {
    let target = Rect::new(0.0, 0.0, f64::from(surface_width), f64::from(surface_height));
    match fit(product, target, true) {
        Ok(f) => f.rect(),
        Err(_) => Rect::ZERO,
    }
}

/// Map polygon mask points authored on the reference canvas onto product bounds.
pub fn polygon_to_surface(points: &[Point], product_bounds: Rect) -> Vec<Point> {
    let sx = product_bounds.width() / REFERENCE_CANVAS;
    let sy = product_bounds.height() / REFERENCE_CANVAS;
    points
        .iter()
        .map(|p| Point::new(product_bounds.x0 + p.x * sx, product_bounds.y0 + p.y * sy))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/placement.rs"]
mod tests;
