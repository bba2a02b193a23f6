use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::appearance::color::Rgb8;
use crate::assets::decode::PreparedImage;
use crate::assets::slot::{ImageSlot, ImageSource, load_with_timeout};
use crate::catalog::record::{ProductRecord, SaveDesignRequest};
use crate::foundation::core::Point;
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::interaction::controller::InteractionController;
use crate::interaction::state::PlacementState;
use crate::render::bitmap::RenderedBitmap;
use crate::render::cache::{CacheStats, CompositeCache, CompositeKey, CompositeKeyParts, bitmap_id};
use crate::render::compositor::{Compositor, ProductInput};
use crate::render::opts::CompositorOpts;
use crate::session::debounce::ResizeDebouncer;
use crate::warp::params::WarpParams;

/// One user editing one design on one product.
///
/// Owns everything a preview depends on: the catalog record, both decode slots, the placement
/// and warp state, the composite cache and the viewport. Gestures go through the session so the
/// cache can be bypassed while one is in flight.
#[derive(Debug)]
pub struct EditSession {
    record: ProductRecord,
    color: String,
    product: ImageSlot,
    design: ImageSlot,
    product_id: u64,
    design_id: u64,
    warp: WarpParams,
    compositor: Compositor,
    cache: CompositeCache,
    debouncer: ResizeDebouncer,
    controller: Option<InteractionController>,
}

impl EditSession {
    /// Session for `record` previewed in a `viewport_w` x `viewport_h` surface.
    ///
    /// The record must validate; its placement rect may still be invalid and then falls back to
    /// the centered default at render time. `DRAPE_CACHE_CAPACITY` overrides the cache size.
    pub fn new(
        record: ProductRecord,
        opts: CompositorOpts,
        viewport_w: u32,
        viewport_h: u32,
    ) -> DrapeResult<Self> {
        record.validate()?;
        let opts = opts.with_env_overrides();
        let cache = CompositeCache::new(opts.cache_capacity);
        let debouncer = ResizeDebouncer::new(Duration::from_millis(opts.resize_quiet_ms));
        let color = record.default_color().to_owned();
        let compositor = Compositor::new(opts, viewport_w, viewport_h)?;
        Ok(Self {
            record,
            color,
            product: ImageSlot::Pending,
            design: ImageSlot::Pending,
            product_id: 0,
            design_id: 0,
            warp: WarpParams::default(),
            compositor,
            cache,
            debouncer,
            controller: None,
        })
    }

    /// Catalog record being edited.
    pub fn record(&self) -> &ProductRecord {
        &self.record
    }

    /// Selected product color.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Product photo decode state.
    pub fn product_slot(&self) -> &ImageSlot {
        &self.product
    }

    /// Design decode state.
    pub fn design_slot(&self) -> &ImageSlot {
        &self.design
    }

    /// Current warp parameters.
    pub fn warp(&self) -> WarpParams {
        self.warp
    }

    /// Current placement, once both images and the viewport are ready.
    pub fn state(&self) -> Option<PlacementState> {
        self.controller.as_ref().map(InteractionController::state)
    }

    /// Preview viewport size.
    pub fn viewport(&self) -> (u32, u32) {
        self.compositor.viewport()
    }

    /// Composite cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of cached composites.
    pub fn cached_composites(&self) -> usize {
        self.cache.len()
    }

    /// Select a product color (`#RRGGBB`).
    pub fn select_color(&mut self, color: &str) -> DrapeResult<()> {
        Rgb8::parse_hex(color)?;
        self.color = color.to_owned();
        Ok(())
    }

    /// Replace the warp parameters; out-of-range values are clamped.
    pub fn set_warp(&mut self, warp: WarpParams) -> WarpParams {
        self.warp = warp.clamped();
        self.warp
    }

    /// Restore a saved placement (clamped like a gesture).
    pub fn set_state(&mut self, state: PlacementState) -> DrapeResult<PlacementState> {
        state.validate()?;
        let controller = self.controller_mut()?;
        let layout = *controller.layout();
        *controller = InteractionController::new(layout, state);
        Ok(controller.state())
    }

    /// Record the outcome of decoding the product photo.
    pub fn set_product_image(&mut self, res: DrapeResult<PreparedImage>) {
        self.product = ImageSlot::from_result(res);
        self.product_id = self.product.ready().map(bitmap_id).unwrap_or(0);
        self.cache.invalidate();
        self.refresh_layout();
    }

    /// Record the outcome of decoding the user's design. A new design starts from the initial
    /// placement.
    pub fn set_design_image(&mut self, res: DrapeResult<PreparedImage>) {
        self.design = ImageSlot::from_result(res);
        self.design_id = self.design.ready().map(bitmap_id).unwrap_or(0);
        self.cache.invalidate();
        self.controller = None;
        self.refresh_layout();
    }

    /// Decode the product photo, waiting at most the configured decode timeout.
    pub fn load_product(&mut self, source: ImageSource) -> DrapeResult<()> {
        self.set_product_image(load_with_timeout(source, self.decode_timeout()));
        self.product.require("product").map(|_| ())
    }

    /// Decode the design, waiting at most the configured decode timeout.
    pub fn load_design(&mut self, source: ImageSource) -> DrapeResult<()> {
        self.set_design_image(load_with_timeout(source, self.decode_timeout()));
        self.design.require("design").map(|_| ())
    }

    /// Note a viewport resize observed at `now`. Geometry is recomputed by [`Self::tick`].
    pub fn notify_resize(&mut self, width: u32, height: u32, now: Instant) {
        self.debouncer.notify(width, height, now);
    }

    /// Apply a debounced resize once its quiet period has passed. Returns `true` when a resize
    /// fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some((w, h)) => {
                self.resize_now(w, h);
                true
            }
            None => false,
        }
    }

    /// Apply a viewport size immediately. Recomputing for an unchanged size is a no-op.
    pub fn resize_now(&mut self, width: u32, height: u32) {
        if self.compositor.viewport() == (width, height) {
            return;
        }
        self.compositor.set_viewport(width, height);
        self.refresh_layout();
    }

    /// Start a drag/resize/rotate gesture; composites skip the cache until it ends.
    pub fn begin_gesture(&mut self) -> DrapeResult<()> {
        self.controller_mut()?.begin_gesture();
        Ok(())
    }

    /// End the current gesture.
    pub fn end_gesture(&mut self) -> DrapeResult<PlacementState> {
        Ok(self.controller_mut()?.end_gesture())
    }

    /// Move the design center to a viewport point.
    pub fn drag_to(&mut self, point: Point) -> DrapeResult<PlacementState> {
        Ok(self.controller_mut()?.drag_to(point))
    }

    /// Set the design scale as a multiple of its fit scale.
    pub fn resize_to(&mut self, scale: f64) -> DrapeResult<PlacementState> {
        Ok(self.controller_mut()?.resize_to(scale))
    }

    /// Set the design rotation in degrees.
    pub fn rotate_to(&mut self, angle: f64) -> DrapeResult<PlacementState> {
        Ok(self.controller_mut()?.rotate_to(angle))
    }

    /// Preview composite at the viewport size, served from the cache when possible.
    pub fn composite(&mut self) -> DrapeResult<Arc<RenderedBitmap>> {
        let state = self.controller_mut()?.state();
        let gesture = self.controller.as_ref().is_some_and(|c| c.is_gesture_active());

        let product = self.product.require("product")?;
        let design = self.design.require("design")?;
        let input = ProductInput {
            record: &self.record,
            image: product,
            color: &self.color,
        };

        if gesture {
            let bmp = self
                .compositor
                .composite(&input, design, &state, &self.warp)?;
            return Ok(Arc::new(bmp));
        }

        let surface = self.compositor.preview_surface(product);
        let appearance = input.appearance()?;
        let key = CompositeKey::new(&CompositeKeyParts {
            design_id: self.design_id,
            product_id: self.product_id,
            surface: &surface,
            placement: &self.record.placement_rect,
            polygon: self.record.optional_polygon_mask.as_deref(),
            warp: &self.warp,
            state: &state,
            appearance: &appearance,
            opts: self.compositor.opts(),
        });
        if let Some(hit) = self.cache.get(key) {
            return Ok(hit);
        }
        let bmp = Arc::new(
            self.compositor
                .composite(&input, design, &state, &self.warp)?,
        );
        self.cache.insert(key, Arc::clone(&bmp));
        Ok(bmp)
    }

    /// Composite at the product photo's native resolution.
    pub fn export_full_resolution(&mut self) -> DrapeResult<RenderedBitmap> {
        let state = self.controller_mut()?.state();
        let input = ProductInput {
            record: &self.record,
            image: self.product.require("product")?,
            color: &self.color,
        };
        let design = self.design.require("design")?;
        self.compositor
            .export_full_resolution(&input, design, &state, &self.warp)
    }

    /// Payload for the design persistence service: full-resolution export as a PNG data URL.
    #[tracing::instrument(skip(self), fields(product = %self.record.id))]
    pub fn save_request(&mut self, user_id: &str) -> DrapeResult<SaveDesignRequest> {
        if user_id.is_empty() {
            return Err(DrapeError::validation("user id must be non-empty"));
        }
        let bmp = self.export_full_resolution()?;
        Ok(SaveDesignRequest {
            product_id: self.record.id.clone(),
            user_id: user_id.to_owned(),
            data_url: bmp.to_png_data_url()?,
        })
    }

    fn decode_timeout(&self) -> Duration {
        Duration::from_millis(self.compositor.opts().decode_timeout_ms)
    }

    fn controller_mut(&mut self) -> DrapeResult<&mut InteractionController> {
        if self.controller.is_none() {
            self.refresh_layout();
        }
        if self.controller.is_none() {
            return Err(self.layout_error());
        }
        self.controller
            .as_mut()
            .ok_or_else(|| DrapeError::surface_not_ready("placement layout unavailable"))
    }

    // Precise reason the layout is missing: pending/failed decode or unknown bounds.
    fn layout_error(&self) -> DrapeError {
        let res = self.product.require("product").and_then(|product| {
            let design = self.design.require("design")?;
            let input = ProductInput {
                record: &self.record,
                image: product,
                color: &self.color,
            };
            let surface = self.compositor.preview_surface(product);
            self.compositor.layout(surface, &input, design)
        });
        match res {
            Ok(_) => DrapeError::surface_not_ready("placement layout unavailable"),
            Err(e) => e,
        }
    }

    fn refresh_layout(&mut self) {
        let (Some(product), Some(design)) = (self.product.ready(), self.design.ready()) else {
            self.controller = None;
            return;
        };
        let input = ProductInput {
            record: &self.record,
            image: product,
            color: &self.color,
        };
        let surface = self.compositor.preview_surface(product);
        match self.compositor.layout(surface, &input, design) {
            Ok(layout) => match self.controller.as_mut() {
                Some(c) => {
                    c.set_layout(layout);
                }
                None => {
                    self.controller = Some(InteractionController::new(
                        layout,
                        layout.initial_state(),
                    ));
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "placement layout not available yet");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/edit_session.rs"]
mod tests;
