//! drape composites user artwork onto product photos so it looks printed on.
//!
//! Given a product photo, a placement region authored on a 400x400 reference canvas, a design
//! bitmap and a handful of adjustments (fabric warp, scale, rotation), drape produces a
//! pixel-accurate composite that stays consistent across viewport sizes.
//!
//! # Pipeline overview
//!
//! 1. **Place**: project the placement rect onto the letterboxed product bounds
//!    ([`resolve_against_product`]) and fit the design into it ([`fit`]).
//! 2. **Appear**: derive blend mode, opacity and drop shadow from the product color
//!    ([`appearance`]).
//! 3. **Warp** (optional): backward-map the design through a displacement field
//!    ([`DisplacementField`]).
//! 4. **Composite**: resize, rotate, shadow, blend and clip to the product silhouette
//!    ([`Compositor`]).
//!
//! [`EditSession`] ties these together for an interactive editor: decode slots, gestures,
//! debounced viewport changes and a composite cache.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** end-to-end: every kernel consumes and produces premultiplied pixels.
//! - **Pure geometry**: placement, fit, appearance and warp are free functions of their inputs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Product-color driven compositing parameters.
pub mod appearance;
/// Bitmap decoding and decode slots.
pub mod assets;
/// Catalog-facing records.
pub mod catalog;
/// CPU pixel kernels.
pub mod effects;
/// Shared types and the error taxonomy.
pub mod foundation;
/// Placement and fitting.
pub mod geometry;
/// Gesture handling.
pub mod interaction;
/// The compositing pipeline.
pub mod render;
/// Editing sessions.
pub mod session;
/// Fabric warp.
pub mod warp;

pub use appearance::adaptive::{
    AppearanceParams, BlendMode, ShadowParams, TagMarkers, appearance, blend_mode, opacity, shadow,
};
pub use appearance::color::{Rgb8, brightness};
pub use assets::decode::{PreparedImage, decode_image, decode_image_file};
pub use assets::slot::{
    DEFAULT_DECODE_TIMEOUT, ImageSlot, ImageSource, load_image_with_timeout, load_with_timeout,
};
pub use catalog::record::{ProductRecord, SaveDesignRequest};
pub use foundation::core::{
    Affine, ImageDimensions, Point, REFERENCE_CANVAS, Rect, RenderSurface, Size, Vec2,
};
pub use foundation::error::{DrapeError, DrapeResult};
pub use geometry::fit::{FitRect, fit, fit_placement};
pub use geometry::placement::{
    PercentRect, PlacementRect, from_percent, product_bounds_in_surface, reference_from_surface,
    resolve_against_product, to_percent,
};
pub use interaction::controller::{InteractionController, MAX_SCALE, MIN_SCALE};
pub use interaction::state::PlacementState;
pub use render::bitmap::RenderedBitmap;
pub use render::cache::{CacheStats, CompositeCache, CompositeKey};
pub use render::compositor::{Compositor, ProductInput};
pub use render::layout::DesignLayout;
pub use render::opts::{CACHE_CAPACITY_ENV, CompositorOpts};
pub use session::debounce::ResizeDebouncer;
pub use session::edit_session::EditSession;
pub use warp::field::{DisplacementField, generate, max_displacement};
pub use warp::params::{WarpDirection, WarpParams, WarpStyle};
