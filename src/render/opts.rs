use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{DrapeError, DrapeResult};

/// Env var overriding [`CompositorOpts::cache_capacity`].
pub const CACHE_CAPACITY_ENV: &str = "DRAPE_CACHE_CAPACITY";

const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Tuning knobs for the compositor and editing session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorOpts {
    /// Run warp and resampling loops row-parallel.
    pub parallel: bool,
    /// Optional explicit worker thread count for parallel kernels.
    pub threads: Option<usize>,
    /// Maximum number of memoized composites.
    pub cache_capacity: usize,
    /// Keep the design's aspect ratio when fitting it into the placement rect.
    pub maintain_aspect_ratio: bool,
    /// Weight the silhouette clip by the product photo's own alpha.
    pub clip_to_product_alpha: bool,
    /// Draw the color-adaptive drop shadow beneath the design.
    pub shadow_enabled: bool,
    /// Bounded wait for image decodes, in milliseconds.
    pub decode_timeout_ms: u64,
    /// Quiet period before viewport geometry is recomputed, in milliseconds.
    pub resize_quiet_ms: u64,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            maintain_aspect_ratio: true,
            clip_to_product_alpha: true,
            shadow_enabled: true,
            decode_timeout_ms: 10_000,
            resize_quiet_ms: 100,
        }
    }
}

impl CompositorOpts {
    /// Load options from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> DrapeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DrapeError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        let opts: Self = serde_json::from_str(&text).map_err(|e| {
            DrapeError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        opts.validate()?;
        Ok(opts)
    }

    /// Apply environment overrides (`DRAPE_CACHE_CAPACITY`). Unparsable or zero values are
    /// ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = std::env::var(CACHE_CAPACITY_ENV)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.cache_capacity = n;
        }
        self
    }

    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> DrapeResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(DrapeError::validation(
                "compositor 'threads' must be >= 1 when set",
            ));
        }
        if self.cache_capacity == 0 {
            return Err(DrapeError::validation(
                "compositor 'cache_capacity' must be >= 1",
            ));
        }
        Ok(())
    }

    pub(crate) fn build_thread_pool(&self) -> DrapeResult<Option<rayon::ThreadPool>> {
        let Some(n) = self.threads.filter(|_| self.parallel) else {
            return Ok(None);
        };
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map(Some)
            .map_err(|e| DrapeError::validation(format!("failed to build rayon thread pool: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/opts.rs"]
mod tests;
