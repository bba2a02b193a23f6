use std::sync::Arc;

use crate::appearance::adaptive::{AppearanceParams, appearance};
use crate::assets::decode::PreparedImage;
use crate::catalog::record::ProductRecord;
use crate::effects::composite::{blend_masked_in_place, over_masked_in_place};
use crate::effects::shadow::drop_shadow_rgba8_premul;
use crate::effects::silhouette::Silhouette;
use crate::effects::transform::{LayerEdges, LayerPlacement, draw_layer, prescale_for_target};
use crate::effects::warp::warp_rgba8_premul;
use crate::foundation::core::{REFERENCE_CANVAS, RenderSurface};
use crate::foundation::error::{DrapeError, DrapeResult};
use crate::geometry::placement::polygon_to_surface;
use crate::interaction::state::PlacementState;
use crate::render::bitmap::RenderedBitmap;
use crate::render::layout::DesignLayout;
use crate::render::opts::CompositorOpts;
use crate::warp::field::DisplacementField;
use crate::warp::params::WarpParams;

/// A product ready to composite onto: catalog record, decoded photo and selected color.
#[derive(Clone, Copy, Debug)]
pub struct ProductInput<'a> {
    /// Catalog record (placement rect, tags, polygon mask).
    pub record: &'a ProductRecord,
    /// Decoded product photo.
    pub image: &'a PreparedImage,
    /// Selected product color as `#RRGGBB`.
    pub color: &'a str,
}

impl ProductInput<'_> {
    /// Appearance parameters for the selected color and the record's tags.
    pub fn appearance(&self) -> DrapeResult<AppearanceParams> {
        appearance(self.color, &self.record.category_tags)
    }
}

/// Renders designs onto product photos.
///
/// Previews render at the viewport size with the product letterboxed; exports render at the
/// product photo's native size. Both run the same pipeline.
pub struct Compositor {
    opts: CompositorOpts,
    viewport: (u32, u32),
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("opts", &self.opts)
            .field("viewport", &self.viewport)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl Compositor {
    /// Compositor rendering previews into a `viewport_w` x `viewport_h` surface.
    pub fn new(opts: CompositorOpts, viewport_w: u32, viewport_h: u32) -> DrapeResult<Self> {
        opts.validate()?;
        let pool = opts.build_thread_pool()?.map(Arc::new);
        Ok(Self {
            opts,
            viewport: (viewport_w, viewport_h),
            pool,
        })
    }

    /// Active options.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Preview surface size.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Change the preview surface size.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Preview surface with `product` letterboxed into the viewport.
    pub fn preview_surface(&self, product: &PreparedImage) -> RenderSurface {
        RenderSurface::letterboxed(self.viewport.0, self.viewport.1, product.dimensions())
    }

    /// Surface at the product photo's native resolution.
    pub fn export_surface(&self, product: &PreparedImage) -> RenderSurface {
        RenderSurface::letterboxed(product.width, product.height, product.dimensions())
    }

    /// Design layout on `surface` for this product and design.
    pub fn layout(
        &self,
        surface: RenderSurface,
        product: &ProductInput<'_>,
        design: &PreparedImage,
    ) -> DrapeResult<DesignLayout> {
        DesignLayout::compute(
            surface,
            &product.record.placement_rect,
            design.dimensions(),
            self.opts.maintain_aspect_ratio,
        )
    }

    /// Interactive preview at the viewport size.
    #[tracing::instrument(skip_all, fields(product = %product.record.id, viewport = ?self.viewport))]
    pub fn composite(
        &self,
        product: &ProductInput<'_>,
        design: &PreparedImage,
        state: &PlacementState,
        warp: &WarpParams,
    ) -> DrapeResult<RenderedBitmap> {
        self.render_on(self.preview_surface(product.image), product, design, state, warp)
    }

    /// Same pipeline with the surface sized to the product photo.
    #[tracing::instrument(skip_all, fields(product = %product.record.id, width = product.image.width, height = product.image.height))]
    pub fn export_full_resolution(
        &self,
        product: &ProductInput<'_>,
        design: &PreparedImage,
        state: &PlacementState,
        warp: &WarpParams,
    ) -> DrapeResult<RenderedBitmap> {
        self.render_on(self.export_surface(product.image), product, design, state, warp)
    }

    /// Composite onto an explicit surface.
    pub fn render_on(
        &self,
        surface: RenderSurface,
        product: &ProductInput<'_>,
        design: &PreparedImage,
        state: &PlacementState,
        warp: &WarpParams,
    ) -> DrapeResult<RenderedBitmap> {
        match &self.pool {
            Some(pool) => pool.install(|| self.render_inner(surface, product, design, state, warp)),
            None => self.render_inner(surface, product, design, state, warp),
        }
    }

    fn render_inner(
        &self,
        surface: RenderSurface,
        product: &ProductInput<'_>,
        design: &PreparedImage,
        state: &PlacementState,
        warp: &WarpParams,
    ) -> DrapeResult<RenderedBitmap> {
        let parallel = self.opts.parallel;
        state.validate()?;
        check_image(product.image, "product")?;
        if design.width == 0 || design.height == 0 {
            return Err(DrapeError::invalid_design_dimensions(
                design.width,
                design.height,
            ));
        }
        check_image(design, "design")?;

        let look = product.appearance()?;
        let layout = self.layout(surface, product, design)?;
        let warp = warp.clamped();
        let (w, h) = (surface.width, surface.height);

        let mut base = draw_product(product.image, &surface, parallel)?;

        let warped;
        let design_px: &[u8] = if warp.is_identity() {
            design.rgba8_premul.as_slice()
        } else {
            let field = DisplacementField::sample(&warp, design.width, design.height, parallel)?;
            warped = warp_rgba8_premul(
                &design.rgba8_premul,
                design.width,
                design.height,
                &field,
                parallel,
            )?;
            warped.as_slice()
        };

        let placement = layout.layer_placement(state);
        let layer = match prescale_for_target(
            design_px,
            design.width,
            design.height,
            placement.rect.width(),
            placement.rect.height(),
        )? {
            Some((px, pw, ph)) => {
                draw_layer(&px, pw, ph, placement, LayerEdges::Feather, w, h, parallel)?
            }
            None => draw_layer(
                design_px,
                design.width,
                design.height,
                placement,
                LayerEdges::Feather,
                w,
                h,
                parallel,
            )?,
        };

        let silhouette = match &product.record.optional_polygon_mask {
            Some(points) => Silhouette::with_polygon(
                surface.product_bounds,
                &polygon_to_surface(points, surface.product_bounds),
            )?,
            None => Silhouette::from_bounds(surface.product_bounds),
        };
        let product_alpha = self
            .opts
            .clip_to_product_alpha
            .then(|| base.chunks_exact(4).map(|px| px[3]).collect::<Vec<u8>>());
        let mask = silhouette.coverage_mask(w, h, product_alpha.as_deref(), parallel)?;

        if self.opts.shadow_enabled {
            // Shadow geometry is authored against the reference canvas width.
            let px_per_unit = surface.product_bounds.width() / REFERENCE_CANVAS;
            let shadow = look.shadow.scaled(px_per_unit);
            let shadow = drop_shadow_rgba8_premul(&layer, w, h, &shadow, parallel)?;
            over_masked_in_place(&mut base, &shadow, &mask, 1.0)?;
        }
        blend_masked_in_place(&mut base, &layer, &mask, look.opacity as f32, look.blend_mode)?;

        tracing::debug!(
            width = w,
            height = h,
            blend = ?look.blend_mode,
            warped = !warp.is_identity(),
            "composite rendered"
        );
        Ok(RenderedBitmap {
            width: w,
            height: h,
            data: base,
            premultiplied: true,
        })
    }
}

fn check_image(img: &PreparedImage, what: &str) -> DrapeResult<()> {
    let expected = img.dimensions().rgba8_len()?;
    if img.width == 0 || img.height == 0 || img.rgba8_premul.len() != expected {
        return Err(DrapeError::decode_failed(format!(
            "{what} bitmap is incomplete ({}x{}, {} bytes)",
            img.width,
            img.height,
            img.rgba8_premul.len()
        )));
    }
    Ok(())
}

fn draw_product(
    product: &PreparedImage,
    surface: &RenderSurface,
    parallel: bool,
) -> DrapeResult<Vec<u8>> {
    let bounds = surface.product_bounds;
    let placement = LayerPlacement {
        rect: bounds,
        rotation_deg: 0.0,
    };
    match prescale_for_target(
        &product.rgba8_premul,
        product.width,
        product.height,
        bounds.width(),
        bounds.height(),
    )? {
        Some((px, pw, ph)) => draw_layer(
            &px,
            pw,
            ph,
            placement,
            LayerEdges::Clamp,
            surface.width,
            surface.height,
            parallel,
        ),
        None => draw_layer(
            &product.rgba8_premul,
            product.width,
            product.height,
            placement,
            LayerEdges::Clamp,
            surface.width,
            surface.height,
            parallel,
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
