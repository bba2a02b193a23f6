use crate::effects::transform::LayerPlacement;
use crate::foundation::core::{ImageDimensions, Point, Rect, RenderSurface, Size};
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::geometry::fit::{FitRect, fit};
use crate::geometry::placement::{PlacementRect, resolve_against_product};
use crate::interaction::state::PlacementState;

/// Resolved geometry of one design on one surface, before user adjustments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DesignLayout {
    /// Surface the layout was computed for.
    pub surface: RenderSurface,
    /// Placement rect actually used (the centered default when the record's rect is invalid).
    pub placement: PlacementRect,
    /// Placement rect projected onto the product bounds.
    pub target: Rect,
    /// Design fitted into `target`.
    pub fit: FitRect,
}

impl DesignLayout {
    /// Resolve `placement` against the surface's product bounds and fit the design into it.
    ///
    /// An invalid placement rect is replaced by [`PlacementRect::centered_default`].
    pub fn compute(
        surface: RenderSurface,
        placement: &PlacementRect,
        design: ImageDimensions,
        maintain_aspect_ratio: bool,
    ) -> DrapeResult<Self> {
        if !surface.is_ready() {
            return Err(DrapeError::surface_not_ready(format!(
                "product bounds unknown on {}x{} surface",
                surface.width, surface.height
            )));
        }
        let placement = match placement.validate() {
            Ok(()) => *placement,
            Err(e) => {
                tracing::warn!(error = %e, "invalid placement rect; using centered default");
                PlacementRect::centered_default()
            }
        };
        let target = resolve_against_product(&placement, surface.product_bounds);
        let fit = fit(design, target, maintain_aspect_ratio)?;
        Ok(Self {
            surface,
            placement,
            target,
            fit,
        })
    }

    /// Design size at fit scale, in surface pixels.
    pub fn base_size(&self) -> Size {
        Size::new(self.fit.width, self.fit.height)
    }

    /// State placing the design centered in the placement rect at fit scale.
    pub fn initial_state(&self) -> PlacementState {
        PlacementState {
            center: self.normalized(self.target.center()),
            ..PlacementState::initial(&self.placement)
        }
    }

    /// Surface point for a product-normalized point.
    pub fn to_surface(&self, normalized: Point) -> Point {
        let b = self.surface.product_bounds;
        Point::new(
            b.x0 + normalized.x * b.width(),
            b.y0 + normalized.y * b.height(),
        )
    }

    /// Product-normalized point for a surface point.
    pub fn normalized(&self, p: Point) -> Point {
        let b = self.surface.product_bounds;
        Point::new((p.x - b.x0) / b.width(), (p.y - b.y0) / b.height())
    }

    /// Final draw placement for `state`: fit size times `state.scale`, centered on
    /// `state.center`, rotated by `state.rotation`.
    pub fn layer_placement(&self, state: &PlacementState) -> LayerPlacement {
        let size = self.base_size() * state.scale;
        LayerPlacement {
            rect: Rect::from_center_size(self.to_surface(state.center), size),
            rotation_deg: state.rotation,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
