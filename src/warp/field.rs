//! Continuous displacement fields for fabric warps.
//!
//! Offsets are in source pixels and are *subtracted* from a destination pixel to find where
//! it samples from (backward mapping).

use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::warp::params::{WarpDirection, WarpParams, WarpStyle};

/// Relative weights of the wave harmonics at 1x, 2x and 3x the base frequency.
const WAVE_HARMONICS: [f64; 3] = [1.0, 0.5, 0.125];

/// Envelope denominators: `exp(-d² / falloff)` with `d` in normalized units.
const BULGE_FALLOFF: f64 = 0.09;
const PINCH_FALLOFF: f64 = 0.04;

const BULGE_TANGENTIAL: f64 = 0.15;
const PINCH_RIPPLE: f64 = 0.2;
const PINCH_LOBES: f64 = 8.0;

/// Evaluate the displacement at normalized coordinates `coord = (u, v)` in `[0, 1]²`.
pub fn generate(params: &WarpParams, coord: Point) -> Vec2 {
    if params.is_identity() {
        return Vec2::ZERO;
    }
    let k = params.intensity / 100.0;
    match params.style {
        WarpStyle::Wave => wave(params, k, coord),
        WarpStyle::Bulge => radial(
            params.amplitude * k,
            BULGE_FALLOFF,
            1.0,
            BULGE_TANGENTIAL,
            2.0,
            coord,
        ),
        WarpStyle::Pinch => radial(
            params.amplitude * k,
            PINCH_FALLOFF,
            -1.0,
            PINCH_RIPPLE,
            PINCH_LOBES,
            coord,
        ),
    }
}

/// Upper bound on `|generate(params, _)|` for any coordinate.
pub fn max_displacement(params: &WarpParams) -> f64 {
    let k = (params.intensity / 100.0).abs();
    let coeff = match params.style {
        WarpStyle::Wave => WAVE_HARMONICS.iter().sum(),
        WarpStyle::Bulge => 1.0 + BULGE_TANGENTIAL,
        WarpStyle::Pinch => 1.0 + PINCH_RIPPLE,
    };
    params.amplitude * k * coeff
}

fn wave(params: &WarpParams, k: f64, coord: Point) -> Vec2 {
    let phase = params.phase.to_radians();
    let t = match params.direction {
        WarpDirection::Horizontal => coord.x,
        WarpDirection::Vertical => coord.y,
    };
    let s: f64 = WAVE_HARMONICS
        .iter()
        .enumerate()
        .map(|(i, w)| w * (TAU * params.frequency * (i as f64 + 1.0) * t + phase).sin())
        .sum();
    let d = s * params.amplitude * k;
    match params.direction {
        WarpDirection::Horizontal => Vec2::new(0.0, d),
        WarpDirection::Vertical => Vec2::new(d, 0.0),
    }
}

/// Radial push (`sign = 1`) or pull (`sign = -1`) under a Gaussian envelope, plus an angular
/// ripple `(sin nθ, cos nθ)` so the result is not perfectly radial.
fn radial(
    strength: f64,
    falloff: f64,
    sign: f64,
    ripple: f64,
    lobes: f64,
    coord: Point,
) -> Vec2 {
    let delta = coord - Point::new(0.5, 0.5);
    let dist2 = delta.hypot2();
    let envelope = (-dist2 / falloff).exp();
    let m = strength * envelope;

    // The radial direction is undefined at the exact center.
    let radial = if dist2 > 1e-18 {
        delta / dist2.sqrt() * (sign * m)
    } else {
        Vec2::ZERO
    };
    let angle = delta.y.atan2(delta.x);
    let tangential = Vec2::new((lobes * angle).sin(), (lobes * angle).cos()) * (ripple * m);
    radial + tangential
}

/// The displacement field sampled at every pixel of a `width` x `height` image.
#[derive(Clone, Debug)]
pub struct DisplacementField {
    /// Field width in pixels.
    pub width: u32,
    /// Field height in pixels.
    pub height: u32,
    offsets: Vec<Vec2>,
}

impl DisplacementField {
    /// Sample `params` at `(x / width, y / height)` for every pixel, row-parallel when
    /// `parallel` is set. Output does not depend on execution order.
    pub fn sample(
        params: &WarpParams,
        width: u32,
        height: u32,
        parallel: bool,
    ) -> DrapeResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| DrapeError::validation("displacement field size overflow"))?;
        let mut offsets = vec![Vec2::ZERO; len];
        if width == 0 || height == 0 || params.is_identity() {
            return Ok(Self {
                width,
                height,
                offsets,
            });
        }

        let (w, h) = (f64::from(width), f64::from(height));
        let fill_row = |(y, row): (usize, &mut [Vec2])| {
            let v = y as f64 / h;
            for (x, out) in row.iter_mut().enumerate() {
                *out = generate(params, Point::new(x as f64 / w, v));
            }
        };
        if parallel {
            offsets
                .par_chunks_mut(width as usize)
                .enumerate()
                .for_each(fill_row);
        } else {
            offsets
                .chunks_mut(width as usize)
                .enumerate()
                .for_each(fill_row);
        }

        Ok(Self {
            width,
            height,
            offsets,
        })
    }

    /// Offset for pixel `(x, y)`; zero outside the field.
    pub fn get(&self, x: u32, y: u32) -> Vec2 {
        if x >= self.width || y >= self.height {
            return Vec2::ZERO;
        }
        self.offsets[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Largest offset magnitude present in the sampled field.
    pub fn max_magnitude(&self) -> f64 {
        self.offsets.iter().map(|d| d.hypot()).fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/warp/field.rs"]
mod tests;
