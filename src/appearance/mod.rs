//! Product-color driven compositing parameters.

/// Blend mode, opacity and shadow derived from product color.
pub mod adaptive;
/// Hex color parsing and perceptual brightness.
pub mod color;
