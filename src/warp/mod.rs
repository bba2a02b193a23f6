//! Fabric warp: parameters and displacement fields.

/// Continuous displacement function and its sampled grid.
pub mod field;
/// User-facing warp parameters.
pub mod params;
