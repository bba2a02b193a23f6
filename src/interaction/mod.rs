//! Drag, resize and rotate gestures over a placed design.

/// Gesture handling with clamping against product bounds.
pub mod controller;
/// Immutable placement state.
pub mod state;
