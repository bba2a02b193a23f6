use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::appearance::adaptive::{AppearanceParams, BlendMode};
use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Point, RenderSurface};
use crate::foundation::math::Fnv1a64;
use crate::geometry::placement::PlacementRect;
use crate::interaction::state::PlacementState;
use crate::render::bitmap::RenderedBitmap;
use crate::render::opts::CompositorOpts;
use crate::warp::params::WarpParams;

/// Content fingerprint of a decoded bitmap.
pub fn bitmap_id(img: &PreparedImage) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(u64::from(img.width));
    h.write_u64(u64::from(img.height));
    h.write_bytes(&img.rgba8_premul);
    h.finish()
}

/// Everything a composite depends on.
#[derive(Clone, Copy, Debug)]
pub struct CompositeKeyParts<'a> {
    /// [`bitmap_id`] of the design.
    pub design_id: u64,
    /// [`bitmap_id`] of the product photo.
    pub product_id: u64,
    /// Target surface, including product bounds.
    pub surface: &'a RenderSurface,
    /// Placement rect from the product record.
    pub placement: &'a PlacementRect,
    /// Optional silhouette polygon, reference-canvas points.
    pub polygon: Option<&'a [Point]>,
    /// Fabric warp.
    pub warp: &'a WarpParams,
    /// User placement.
    pub state: &'a PlacementState,
    /// Color-adaptive appearance.
    pub appearance: &'a AppearanceParams,
    /// Pipeline switches that change output pixels.
    pub opts: &'a CompositorOpts,
}

/// Fingerprint identifying one composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompositeKey(pub u64);

impl CompositeKey {
    /// Hash all composite inputs.
    pub fn new(parts: &CompositeKeyParts<'_>) -> Self {
        let mut h = Fnv1a64::new_default();
        h.write_u64(parts.design_id);
        h.write_u64(parts.product_id);

        h.write_u64(u64::from(parts.surface.width));
        h.write_u64(u64::from(parts.surface.height));
        let b = parts.surface.product_bounds;
        for v in [b.x0, b.y0, b.x1, b.y1] {
            h.write_f64(v);
        }

        let p = parts.placement;
        for v in [p.x, p.y, p.width, p.height] {
            h.write_f64(v);
        }
        match p.percent() {
            Some(pc) => {
                h.write_u8(1);
                for v in [
                    pc.x_percent,
                    pc.y_percent,
                    pc.width_percent,
                    pc.height_percent,
                ] {
                    h.write_f64(v);
                }
            }
            None => h.write_u8(0),
        }

        match parts.polygon {
            Some(points) => {
                h.write_u64(points.len() as u64);
                for pt in points {
                    h.write_f64(pt.x);
                    h.write_f64(pt.y);
                }
            }
            None => h.write_u8(0),
        }

        parts.warp.hash_into(&mut h);
        parts.state.hash_into(&mut h);
        hash_appearance(parts.appearance, &mut h);

        let o = parts.opts;
        h.write_u8(u8::from(o.maintain_aspect_ratio));
        h.write_u8(u8::from(o.clip_to_product_alpha));
        h.write_u8(u8::from(o.shadow_enabled));
        Self(h.finish())
    }
}

fn hash_appearance(a: &AppearanceParams, h: &mut Fnv1a64) {
    h.write_u8(match a.blend_mode {
        BlendMode::Multiply => 0,
        BlendMode::Screen => 1,
    });
    h.write_f64(a.opacity);
    h.write_bytes(&a.shadow.color);
    h.write_f64(a.shadow.blur);
    h.write_f64(a.shadow.offset.x);
    h.write_f64(a.shadow.offset.y);
    h.write_f64(a.shadow.opacity);
}

/// Hit/miss counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that had to render.
    pub misses: u64,
}

/// Bounded LRU of finished composites.
#[derive(Debug)]
pub struct CompositeCache {
    entries: HashMap<CompositeKey, Arc<RenderedBitmap>>,
    lru: VecDeque<CompositeKey>,
    capacity: usize,
    stats: CacheStats,
}

impl CompositeCache {
    /// Empty cache holding at most `capacity` composites (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: VecDeque::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Look up a composite, marking it most recently used.
    pub fn get(&mut self, key: CompositeKey) -> Option<Arc<RenderedBitmap>> {
        match self.entries.get(&key).cloned() {
            Some(bmp) => {
                self.touch(key);
                self.stats.hits += 1;
                tracing::debug!(key = key.0, "composite cache hit");
                Some(bmp)
            }
            None => {
                self.stats.misses += 1;
                tracing::debug!(key = key.0, "composite cache miss");
                None
            }
        }
    }

    /// Store a composite, evicting the least recently used entries beyond capacity.
    pub fn insert(&mut self, key: CompositeKey, bmp: Arc<RenderedBitmap>) {
        self.entries.insert(key, bmp);
        self.touch(key);
        while self.lru.len() > self.capacity {
            if let Some(old) = self.lru.pop_front() {
                self.entries.remove(&old);
            }
        }
    }

    /// Drop every entry.
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    /// Number of cached composites.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of composites kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hit/miss counters since creation.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn touch(&mut self, key: CompositeKey) {
        if let Some(pos) = self.lru.iter().position(|k| *k == key) {
            self.lru.remove(pos);
        }
        self.lru.push_back(key);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
