//! CPU pixel kernels over premultiplied RGBA8 buffers.

/// Separable Gaussian blur.
pub mod blur;
/// Source-over and blend-mode compositing.
pub mod composite;
pub(crate) mod sample;
/// Drop shadows cast by a layer.
pub mod shadow;
/// Product silhouette clip masks.
pub mod silhouette;
/// Layer placement: resize, rotate, prescale.
pub mod transform;
/// Displacement-field warping.
pub mod warp;
