// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use mask_primitives::{F26Dot6, Point};

use super::{MaskCache, MaskKey};
use crate::mask::AlphaMask;
use crate::raster::MaskRasterizer;

/// Default horizontal phase step: quarter-pixel positioning.
const DEFAULT_X_STEP: u8 = 16;

/// Default vertical phase step: whole-pixel positioning.
const DEFAULT_Y_STEP: u8 = 64;

/// A renderer's handle onto a shared [`MaskCache`].
///
/// A text renderer walks glyphs under a slowly-changing ambient state — active font,
/// text size, rasterizer configuration, sub-pixel pen phase. The session keeps that
/// state as the current key prefix: the renderer notifies it when a component changes
/// and then looks masks up by glyph index alone, calling [`pass_mask`](Self::pass_mask)
/// right after rasterizing a miss. The cache never calls back into the renderer.
///
/// Sub-pixel phases are folded into the key through a configurable quantization step
/// per axis. Coarse steps collapse many pen positions onto few cache entries — higher
/// hit rate and less memory, but visibly steppier glyph motion in animations; fine
/// steps render smoother motion at a multiple of the cache traffic. The defaults
/// (quarter-pixel horizontal, whole-pixel vertical) match how latin text is usually
/// rendered: horizontal placement matters to rhythm, vertical snapping is invisible.
///
/// Each consumer thread gets its own session; the shared cache behind them is
/// concurrency-safe.
#[derive(Clone, Debug)]
pub struct CacheSession {
    cache: Arc<MaskCache>,
    font_id: u64,
    signature: u64,
    size: F26Dot6,
    phase_x: u8,
    phase_y: u8,
    x_step: u8,
    y_step: u8,
}

impl CacheSession {
    /// Creates a session over `cache` with default phase quantization and an unset
    /// (zero) font, signature and size.
    pub fn new(cache: Arc<MaskCache>) -> Self {
        Self {
            cache,
            font_id: 0,
            signature: 0,
            size: F26Dot6::ZERO,
            phase_x: 0,
            phase_y: 0,
            x_step: DEFAULT_X_STEP,
            y_step: DEFAULT_Y_STEP,
        }
    }

    /// The shared cache this session fronts.
    pub fn cache(&self) -> &Arc<MaskCache> {
        &self.cache
    }

    /// Sets the per-axis sub-pixel quantization steps, in 64ths of a pixel.
    ///
    /// Panics unless both steps are in `[1, 64]`. The new steps apply from the next
    /// [`notify_fract_change`](Self::notify_fract_change).
    pub fn set_phase_quantization(&mut self, x_step: u8, y_step: u8) {
        assert!(
            (1..=64).contains(&x_step) && (1..=64).contains(&y_step),
            "quantization steps must be in [1, 64], got ({x_step}, {y_step})"
        );
        self.x_step = x_step;
        self.y_step = y_step;
    }

    /// Updates the active font identity.
    pub fn notify_font_change(&mut self, font_id: u64) {
        self.font_id = font_id;
    }

    /// Updates the active text size.
    pub fn notify_size_change(&mut self, size: F26Dot6) {
        self.size = size;
    }

    /// Updates the active rasterizer configuration fingerprint.
    pub fn notify_rasterizer_change(&mut self, rasterizer: &dyn MaskRasterizer) {
        self.signature = rasterizer.signature();
    }

    /// Updates the active sub-pixel phase and returns the quantized phase the caller
    /// must rasterize at.
    ///
    /// Only the fractional part of `fract` is used. Quantization snaps downwards, so
    /// the returned phase never carries into a whole pixel and always round-trips to
    /// the stored key bits — the mask a later hit returns was rasterized at exactly
    /// the phase this returned.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a quantized-down fractional part is at most 63"
    )]
    pub fn notify_fract_change(&mut self, fract: Point) -> Point {
        let x = fract.x.fract().quantize_down(self.x_step);
        let y = fract.y.fract().quantize_down(self.y_step);
        self.phase_x = x.to_bits() as u8;
        self.phase_y = y.to_bits() as u8;
        Point::new(x, y)
    }

    /// Looks up the mask for `glyph_id` under the current key state.
    pub fn mask(&self, glyph_id: u32) -> Option<Arc<AlphaMask>> {
        self.cache.get(&self.key(glyph_id))
    }

    /// Stores a freshly rasterized mask for `glyph_id` under the current key state.
    ///
    /// Best-effort, like [`MaskCache::put`]; a mask that doesn't fit is simply not
    /// cached.
    pub fn pass_mask(&self, glyph_id: u32, mask: Arc<AlphaMask>) {
        self.cache.put(self.key(glyph_id), mask);
    }

    fn key(&self, glyph_id: u32) -> MaskKey {
        MaskKey {
            font_id: self.font_id,
            signature: self.signature,
            size: self.size,
            glyph_id,
            phase_x: self.phase_x,
            phase_y: self.phase_y,
        }
    }
}
