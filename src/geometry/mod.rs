//! Reference-canvas placement and aspect fitting.

/// Centered aspect-correct (or stretched) draw rects.
pub mod fit;
/// Placement rects, percent conversion and projection onto product bounds.
pub mod placement;
