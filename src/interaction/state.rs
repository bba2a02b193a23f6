use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, REFERENCE_CANVAS};
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::foundation::math::Fnv1a64;
use crate::geometry::placement::PlacementRect;

/// Where the user has put the design. Each gesture produces a new value.
///
/// `center` is normalized to the product bounds (`(0, 0)` top-left, `(1, 1)` bottom-right) so
/// the state survives viewport changes unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementState {
    /// Design center relative to product bounds.
    pub center: Point,
    /// Multiple of the fit scale.
    pub scale: f64,
    /// Clockwise rotation in degrees, in `(-180, 180]`.
    pub rotation: f64,
}

impl PlacementState {
    /// Design centered in `rect`, at fit scale, unrotated.
    pub fn initial(rect: &PlacementRect) -> Self {
        let center = match rect.percent() {
            Some(p) => Point::new(
                (p.x_percent + p.width_percent / 2.0) / 100.0,
                (p.y_percent + p.height_percent / 2.0) / 100.0,
            ),
            None => Point::new(
                (rect.x + rect.width / 2.0) / REFERENCE_CANVAS,
                (rect.y + rect.height / 2.0) / REFERENCE_CANVAS,
            ),
        };
        Self {
            center,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Reject non-finite values and non-positive scale.
    pub fn validate(&self) -> DrapeResult<()> {
        if !self.center.is_finite() || !self.rotation.is_finite() {
            return Err(DrapeError::validation(
                "placement state must have a finite center and rotation",
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DrapeError::validation(format!(
                "placement scale must be > 0, got {}",
                self.scale
            )));
        }
        Ok(())
    }

    pub(crate) fn hash_into(&self, h: &mut Fnv1a64) {
        h.write_f64(self.center.x);
        h.write_f64(self.center.y);
        h.write_f64(self.scale);
        h.write_f64(self.rotation);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/state.rs"]
mod tests;
