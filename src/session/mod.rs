//! Editing sessions: one product, one design, and the state between gestures.

/// Quiet-period debouncing for viewport resizes.
pub mod debounce;
/// The editing session.
pub mod edit_session;
