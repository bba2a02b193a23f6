//! The compositing pipeline and its supporting pieces.

/// Output bitmaps and their encodings.
pub mod bitmap;
/// Memoization of finished composites.
pub mod cache;
/// Design-onto-product compositing.
pub mod compositor;
/// Resolved design geometry on a surface.
pub mod layout;
/// Compositor configuration.
pub mod opts;
