/// Convenience result type used across drape.
pub type DrapeResult<T> = Result<T, DrapeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is an anticipated, recoverable condition: callers decide whether to show a
/// placeholder, fall back to defaults, or retry.
#[derive(thiserror::Error, Debug)]
pub enum DrapeError {
    /// A design bitmap has a zero (or otherwise unusable) width or height.
    #[error("invalid design dimensions: {width}x{height}")]
    InvalidDesignDimensions {
        /// Reported width in pixels.
        width: u32,
        /// Reported height in pixels.
        height: u32,
    },

    /// A color string is not exactly six hex digits (after an optional `#`).
    #[error("invalid color format: \"{0}\"")]
    InvalidColorFormat(String),

    /// A placement rect violates reference-canvas or percent bounds.
    #[error("invalid placement rect: {0}")]
    InvalidPlacementRect(String),

    /// A product or design bitmap failed to load or decode.
    #[error("image decode failed: {0}")]
    ImageDecodeFailed(String),

    /// Geometry or composition was requested before product bounds are known.
    #[error("surface not ready: {0}")]
    SurfaceNotReady(String),

    /// Invalid caller-provided data not covered by a more specific variant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrapeError {
    /// Build a [`DrapeError::InvalidDesignDimensions`] value.
    pub fn invalid_design_dimensions(width: u32, height: u32) -> Self {
        Self::InvalidDesignDimensions { width, height }
    }

    /// Build a [`DrapeError::InvalidColorFormat`] value.
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColorFormat(input.into())
    }

    /// Build a [`DrapeError::InvalidPlacementRect`] value.
    pub fn invalid_placement(msg: impl Into<String>) -> Self {
        Self::InvalidPlacementRect(msg.into())
    }

    /// Build a [`DrapeError::ImageDecodeFailed`] value.
    pub fn decode_failed(msg: impl Into<String>) -> Self {
        Self::ImageDecodeFailed(msg.into())
    }

    /// Build a [`DrapeError::SurfaceNotReady`] value.
    pub fn surface_not_ready(msg: impl Into<String>) -> Self {
        Self::SurfaceNotReady(msg.into())
    }

    /// Build a [`DrapeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
