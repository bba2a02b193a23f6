use serde::{Deserialize, Serialize};

use crate::foundation::error::{DrapeError, DrapeResult};
use crate::foundation::math::Fnv1a64;

/// Shape of the fabric warp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarpStyle {
    /// Sinusoidal folds with two harmonics.
    #[default]
    Wave,
    /// Radial outward swell around the center.
    Bulge,
    /// Radial inward pull with gathered creases.
    Pinch,
}

/// Axis a wave travels along. The displacement is applied on the perpendicular axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarpDirection {
    /// Wave travels along X, displaces along Y.
    #[default]
    Horizontal,
    /// Wave travels along Y, displaces along X.
    Vertical,
}

/// Fabric warp settings. The default is a no-op (`intensity == 0`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpParams {
    /// Warp shape.
    pub style: WarpStyle,
    /// Wave travel axis (ignored by radial styles).
    pub direction: WarpDirection,
    /// Signed strength in `[-100, 100]`; `0` disables warping.
    pub intensity: f64,
    /// Wave cycles across the image in `[1, 10]`.
    pub frequency: f64,
    /// Peak displacement in source pixels, `[1, 20]`.
    pub amplitude: f64,
    /// Wave phase in degrees, `[0, 360)`.
    pub phase: f64,
}

impl Default for WarpParams {
    fn default() -> Self {
        Self {
            style: WarpStyle::Wave,
            direction: WarpDirection::Horizontal,
            intensity: 0.0,
            frequency: 2.0,
            amplitude: 5.0,
            phase: 0.0,
        }
    }
}

impl WarpParams {
    /// `true` when the warp has no effect and the filter can be skipped.
    pub fn is_identity(&self) -> bool {
        self.intensity == 0.0
    }

    /// Reject non-finite or out-of-range fields.
    pub fn validate(&self) -> DrapeResult<()> {
        let fields = [
            ("intensity", self.intensity, -100.0, 100.0),
            ("frequency", self.frequency, 1.0, 10.0),
            ("amplitude", self.amplitude, 1.0, 20.0),
        ];
        for (name, v, lo, hi) in fields {
            if !v.is_finite() || v < lo || v > hi {
                return Err(DrapeError::validation(format!(
                    "warp {name} must be in [{lo}, {hi}], got {v}"
                )));
            }
        }
        if !self.phase.is_finite() || !(0.0..360.0).contains(&self.phase) {
            return Err(DrapeError::validation(format!(
                "warp phase must be in [0, 360), got {}",
                self.phase
            )));
        }
        Ok(())
    }

    /// Bring every field into range; phase wraps, the rest clamp. Non-finite values reset to
    /// the default.
    pub fn clamped(self) -> Self {
        let d = Self::default();
        let fix = |v: f64, lo: f64, hi: f64, fallback: f64| {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        };
        Self {
            style: self.style,
            direction: self.direction,
            intensity: fix(self.intensity, -100.0, 100.0, d.intensity),
            frequency: fix(self.frequency, 1.0, 10.0, d.frequency),
            amplitude: fix(self.amplitude, 1.0, 20.0, d.amplitude),
            phase: if self.phase.is_finite() {
                // rem_euclid can round tiny negatives up to exactly 360.
                let p = self.phase.rem_euclid(360.0);
                if p >= 360.0 { 0.0 } else { p }
            } else {
                d.phase
            },
        }
    }

    pub(crate) fn hash_into(&self, h: &mut Fnv1a64) {
        h.write_u8(match self.style {
            WarpStyle::Wave => 0,
            WarpStyle::Bulge => 1,
            WarpStyle::Pinch => 2,
        });
        h.write_u8(match self.direction {
            WarpDirection::Horizontal => 0,
            WarpDirection::Vertical => 1,
        });
        h.write_f64(self.intensity);
        h.write_f64(self.frequency);
        h.write_f64(self.amplitude);
        h.write_f64(self.phase);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/warp/params.rs"]
mod tests;
