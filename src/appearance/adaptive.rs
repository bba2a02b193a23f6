//! Color-adaptive blend mode, opacity, and drop shadow.
//!
//! The thresholds here are empirically tuned so designs read as "printed on" across product
//! colors. They are heuristics, not a physical model: keep them exact for compatibility, and
//! swap in a perceptual model (e.g. CIELAB lightness) only together with new reference renders.

use serde::{Deserialize, Serialize};

use crate::appearance::color::Rgb8;
use crate::foundation::core::Vec2;
use crate::foundation::error::DrapeResult;

const DARK_BELOW: f64 = 0.3;
const LIGHT_ABOVE: f64 = 0.7;
const COLORED_SCREEN_BELOW: f64 = 0.4;
const DARK_TAG_OPACITY_BONUS: f64 = 0.05;

/// Pixel-compositing rule used to lay a design onto product pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// `s * d`: darkens, lets fabric shading through on light products.
    Multiply,
    /// `s + d - s * d`: lightens, keeps designs visible on dark products.
    Screen,
}

/// Soft drop shadow drawn beneath the design layer.
///
/// `blur` and `offset` are in reference-canvas units (a product 400 units wide); use
/// [`ShadowParams::scaled`] to convert them to surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowParams {
    /// Shadow RGB; alpha comes from `opacity`.
    pub color: [u8; 3],
    /// Blur radius in reference-canvas units.
    pub blur: f64,
    /// Offset of the shadow relative to the design, in reference-canvas units.
    pub offset: Vec2,
    /// Shadow opacity in `[0, 1]`.
    pub opacity: f64,
}

impl ShadowParams {
    /// Same shadow with `blur` and `offset` multiplied by `factor` (surface pixels per
    /// reference-canvas unit). Non-finite or negative factors collapse the shadow geometry.
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 0.0 };
        Self {
            blur: self.blur * factor,
            offset: self.offset * factor,
            ..*self
        }
    }

    /// CSS `rgba(...)` form for UI collaborators.
    pub fn css_color(&self) -> String {
        format!(
            "rgba({},{},{},{})",
            self.color[0], self.color[1], self.color[2], self.opacity
        )
    }
}

/// Derived compositing parameters for one product color. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppearanceParams {
    /// Blend mode for the design layer.
    pub blend_mode: BlendMode,
    /// Design layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Drop shadow parameters.
    pub shadow: ShadowParams,
}

/// Category markers extracted from free-form product tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TagMarkers {
    /// A tag mentions `dark` or `black`.
    pub dark: bool,
    /// A tag mentions `colored` or `coloured`.
    pub colored: bool,
}

impl TagMarkers {
    /// Scan tags case-insensitively.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let mut out = Self::default();
        for tag in tags {
            let t = tag.as_ref().to_ascii_lowercase();
            out.dark |= t.contains("dark") || t.contains("black");
            out.colored |= t.contains("colored") || t.contains("coloured");
        }
        out
    }
}

/// Blend mode for a product color and its category tags.
pub fn blend_mode<S: AsRef<str>>(hex_color: &str, category_tags: &[S]) -> DrapeResult<BlendMode> {
    let b = Rgb8::parse_hex(hex_color)?.brightness();
    Ok(blend_mode_for(b, TagMarkers::from_tags(category_tags)))
}

/// Design opacity for a product color and its category tags.
pub fn opacity<S: AsRef<str>>(hex_color: &str, category_tags: &[S]) -> DrapeResult<f64> {
    let b = Rgb8::parse_hex(hex_color)?.brightness();
    Ok(opacity_for(b, TagMarkers::from_tags(category_tags)))
}

/// Drop shadow for a product color and its category tags.
pub fn shadow<S: AsRef<str>>(hex_color: &str, category_tags: &[S]) -> DrapeResult<ShadowParams> {
    let b = Rgb8::parse_hex(hex_color)?.brightness();
    Ok(shadow_for(b, TagMarkers::from_tags(category_tags)))
}

/// All appearance parameters at once (parses the color a single time).
pub fn appearance<S: AsRef<str>>(
    hex_color: &str,
    category_tags: &[S],
) -> DrapeResult<AppearanceParams> {
    let b = Rgb8::parse_hex(hex_color)?.brightness();
    let tags = TagMarkers::from_tags(category_tags);
    Ok(AppearanceParams {
        blend_mode: blend_mode_for(b, tags),
        opacity: opacity_for(b, tags),
        shadow: shadow_for(b, tags),
    })
}

pub(crate) fn blend_mode_for(brightness: f64, tags: TagMarkers) -> BlendMode {
    if tags.dark {
        return BlendMode::Screen;
    }
    if tags.colored && brightness < COLORED_SCREEN_BELOW {
        return BlendMode::Screen;
    }
    if brightness < DARK_BELOW {
        BlendMode::Screen
    } else if brightness > LIGHT_ABOVE {
        BlendMode::Multiply
    } else if brightness < 0.5 {
        BlendMode::Screen
    } else {
        BlendMode::Multiply
    }
}

pub(crate) fn opacity_for(brightness: f64, tags: TagMarkers) -> f64 {
    let bonus = if tags.dark { DARK_TAG_OPACITY_BONUS } else { 0.0 };
    if brightness < DARK_BELOW {
        (0.90 + bonus).min(1.0)
    } else if brightness > LIGHT_ABOVE {
        (0.75 + bonus).min(1.0)
    } else {
        let t = (brightness - DARK_BELOW) / (LIGHT_ABOVE - DARK_BELOW);
        0.85 + (0.75 - 0.85) * t
    }
}

pub(crate) fn shadow_for(brightness: f64, tags: TagMarkers) -> ShadowParams {
    let color = if brightness < 0.5 || tags.dark {
        [255, 255, 255]
    } else {
        [0, 0, 0]
    };
    let blur = if (DARK_BELOW..=LIGHT_ABOVE).contains(&brightness) {
        4.0
    } else {
        3.0
    };
    let opacity = if (brightness - 0.5).abs() > 0.3 {
        0.35
    } else {
        0.25
    };
    ShadowParams {
        color,
        blur,
        offset: Vec2::new(2.0, 2.0),
        opacity,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/appearance/adaptive.rs"]
mod tests;
