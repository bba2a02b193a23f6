/// Shared geometry aliases, image dimensions and render surfaces.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
pub(crate) mod math;
