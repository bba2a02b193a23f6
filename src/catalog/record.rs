use serde::{Deserialize, Serialize};

use crate::appearance::color::Rgb8;
use crate::foundation::core::Point;
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::geometry::placement::PlacementRect;

/// One product as delivered by the catalog service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Catalog identifier.
    pub id: String,
    /// Location of the product photo.
    pub image_url: String,
    /// Printable region on the 400x400 reference canvas.
    pub placement_rect: PlacementRect,
    /// Available product colors as `#RRGGBB`.
    #[serde(default)]
    pub color_options: Vec<String>,
    /// Free-form category tags (`"dark"`, `"colored"`, ...).
    #[serde(default)]
    pub category_tags: Vec<String>,
    /// Optional silhouette polygon on the reference canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_polygon_mask: Option<Vec<Point>>,
}

impl ProductRecord {
    /// Parse a record from catalog JSON.
    pub fn from_json(json: &str) -> DrapeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DrapeError::validation(format!("product record json: {e}")))
    }

    /// Check colors and the polygon mask. The placement rect is validated separately so a bad
    /// rect can fall back to the centered default.
    pub fn validate(&self) -> DrapeResult<()> {
        if self.id.is_empty() {
            return Err(DrapeError::validation("product id must be non-empty"));
        }
        for c in &self.color_options {
            Rgb8::parse_hex(c)?;
        }
        if let Some(poly) = &self.optional_polygon_mask {
            if poly.len() < 3 {
                return Err(DrapeError::validation(
                    "polygon mask needs at least 3 points",
                ));
            }
            if poly.iter().any(|p| !p.is_finite()) {
                return Err(DrapeError::validation("polygon mask points must be finite"));
            }
        }
        Ok(())
    }

    /// First listed color, or white when the catalog lists none.
    pub fn default_color(&self) -> &str {
        self.color_options
            .first()
            .map(String::as_str)
            .unwrap_or("#FFFFFF")
    }
}

/// Payload handed to the design persistence service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDesignRequest {
    /// Product the design was composited onto.
    pub product_id: String,
    /// Owner of the saved design.
    pub user_id: String,
    /// Full-resolution composite as a `data:image/png;base64,...` URL.
    pub data_url: String,
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/record.rs"]
mod tests;
