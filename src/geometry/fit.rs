use serde::{Deserialize, Serialize};

use crate::foundation::core::{ImageDimensions, Rect};
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::geometry::placement::PlacementRect;

/// Draw rect for a design inside a target, plus the uniform (or horizontal) scale applied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Output width.
    pub width: f64,
    /// Output height.
    pub height: f64,
    /// `width / design.width`.
    pub scale: f64,
}

impl FitRect {
    /// The draw area as a `kurbo` rect.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Size and center a design of `design` pixels inside `target`.
///
/// With `maintain_aspect_ratio`, the design fills the target along its relatively wider axis
/// and is centered along the other. Without it, the output is exactly `target`.
pub fn fit(design: ImageDimensions, target: Rect, maintain_aspect_ratio: bool) -> DrapeResult<FitRect> {
    if design.is_empty() {
        return Err(DrapeError::invalid_design_dimensions(
            design.width,
            design.height,
        ));
    }

    let target = target.abs();
    let tw = target.width();
    let th = target.height();
    let design_w = f64::from(design.width);

    if !maintain_aspect_ratio {
        return Ok(FitRect {
            x: target.x0,
            y: target.y0,
            width: tw,
            height: th,
            scale: tw / design_w,
        });
    }

    let design_aspect = design.aspect();
    let target_aspect = tw / th;
    let (width, height) = if design_aspect > target_aspect {
        (tw, tw / design_aspect)
    } else {
        (th * design_aspect, th)
    };

    Ok(FitRect {
        x: target.x0 + (tw - width) / 2.0,
        y: target.y0 + (th - height) / 2.0,
        width,
        height,
        scale: width / design_w,
    })
}

/// [`fit`] against a placement rect's reference-canvas pixel fields.
pub fn fit_placement(
    design: ImageDimensions,
    target: &PlacementRect,
    maintain_aspect_ratio: bool,
) -> DrapeResult<FitRect> {
    let rect = Rect::new(
        target.x,
        target.y,
        target.x + target.width,
        target.y + target.height,
    );
    fit(design, rect, maintain_aspect_ratio)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
