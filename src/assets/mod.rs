//! Bitmap decoding and the decode-state model.

/// Decode PNG/JPEG bytes into premultiplied RGBA8.
pub mod decode;
/// Decode slots and bounded-wait loading.
pub mod slot;
