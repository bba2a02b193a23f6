use crate::foundation::core::Point;
use crate::interaction::state::PlacementState;
use crate::render::layout::DesignLayout;

/// Smallest allowed multiple of the fit scale.
pub const MIN_SCALE: f64 = 0.5;
/// Largest allowed multiple of the fit scale.
pub const MAX_SCALE: f64 = 2.0;

/// Turns pointer gestures into clamped [`PlacementState`] values.
#[derive(Clone, Debug)]
pub struct InteractionController {
    layout: DesignLayout,
    state: PlacementState,
    gesture_active: bool,
}

impl InteractionController {
    /// Controller starting from `state`, clamped to the layout.
    pub fn new(layout: DesignLayout, state: PlacementState) -> Self {
        let mut out = Self {
            layout,
            state,
            gesture_active: false,
        };
        out.state = out.clamp(state);
        out
    }

    /// Current placement.
    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// Layout gestures are clamped against.
    pub fn layout(&self) -> &DesignLayout {
        &self.layout
    }

    /// Whether a drag/resize/rotate is in progress.
    pub fn is_gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Mark the start of a gesture; composites bypass the cache until [`Self::end_gesture`].
    pub fn begin_gesture(&mut self) {
        self.gesture_active = true;
    }

    /// Mark the end of a gesture.
    pub fn end_gesture(&mut self) -> PlacementState {
        self.gesture_active = false;
        self.state
    }

    /// Swap in a layout for a new viewport. The normalized state carries over, re-clamped.
    pub fn set_layout(&mut self, layout: DesignLayout) -> PlacementState {
        self.layout = layout;
        self.state = self.clamp(self.state);
        self.state
    }

    /// Move the design center to surface point `point`.
    pub fn drag_to(&mut self, point: Point) -> PlacementState {
        if !point.is_finite() {
            tracing::warn!(?point, "ignoring non-finite drag target");
            return self.state;
        }
        let next = PlacementState {
            center: self.layout.normalized(point),
            ..self.state
        };
        self.state = self.clamp(next);
        self.state
    }

    /// Set the scale (multiple of the fit scale), clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn resize_to(&mut self, scale: f64) -> PlacementState {
        if !scale.is_finite() {
            tracing::warn!(scale, "ignoring non-finite scale");
            return self.state;
        }
        let next = PlacementState {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            ..self.state
        };
        self.state = self.clamp(next);
        self.state
    }

    /// Set the rotation in degrees, normalized to `(-180, 180]`.
    pub fn rotate_to(&mut self, angle: f64) -> PlacementState {
        if !angle.is_finite() {
            tracing::warn!(angle, "ignoring non-finite rotation");
            return self.state;
        }
        let next = PlacementState {
            rotation: normalize_degrees(angle),
            ..self.state
        };
        self.state = self.clamp(next);
        self.state
    }

    fn clamp(&self, state: PlacementState) -> PlacementState {
        let scale = if state.scale.is_finite() {
            state.scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            1.0
        };
        let rotation = if state.rotation.is_finite() {
            normalize_degrees(state.rotation)
        } else {
            0.0
        };
        let state = PlacementState {
            scale,
            rotation,
            ..state
        };

        let bbox = self.layout.layer_placement(&state).bounding_box();
        let (hw, hh) = (bbox.width() / 2.0, bbox.height() / 2.0);
        let b = self.layout.surface.product_bounds;
        let c = self.layout.to_surface(state.center);
        let clamped = Point::new(
            clamp_axis(c.x, b.x0 + hw, b.x1 - hw),
            clamp_axis(c.y, b.y0 + hh, b.y1 - hh),
        );
        PlacementState {
            center: self.layout.normalized(clamped),
            ..state
        }
    }
}

/// Map any finite angle into `(-180, 180]`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0);
    if r > 180.0 { r - 360.0 } else { r }
}

// When the box is wider than the bounds, `lo > hi`: keep the bounds covered instead.
fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    if lo <= hi { v.clamp(lo, hi) } else { v.clamp(hi, lo) }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
