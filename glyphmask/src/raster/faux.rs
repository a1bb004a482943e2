// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mask_primitives::{F26Dot6, Point, Rect};

use super::{MaskRasterizer, SIGNATURE_TAG_FAUX, base_signature, rasterize_outline};
use crate::edge_marker::EdgeMarker;
use crate::mask::AlphaMask;
use crate::outline::Outline;
use crate::segmenter::CurveSegmenter;

/// Largest accepted faux-bold extra width, in pixels.
pub const MAX_EXTRA_WIDTH: f32 = 16.0;

/// A rasterizer producing synthetic oblique and bold variants of an outline.
///
/// Oblique is a horizontal shear: each coordinate moves by `skew * y` before scan
/// conversion, so the slant is exact at any amount of skew. Faux bold extends coverage
/// rightwards by `extra_width` pixels after accumulation, a cheap approximation that
/// thickens stems without re-tracing the outline; the glyph's advance is the caller's
/// concern. Both tunables are quantized to 1/64 so that equal-looking configurations
/// share a signature.
///
/// With both tunables at zero this produces byte-identical output to
/// [`EdgeMarkerRasterizer`](super::EdgeMarkerRasterizer), under a distinct signature.
#[derive(Clone, Debug, Default)]
pub struct FauxRasterizer {
    segmenter: CurveSegmenter,
    marker: EdgeMarker,
    skew: f32,
    extra_width: f32,
    row_scratch: Vec<u8>,
}

impl FauxRasterizer {
    /// Creates a rasterizer with no skew and no extra width.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the oblique skew factor, clamped to `[-1, 1]` and quantized to 1/64.
    ///
    /// Positive values shift coordinates rightwards in proportion to their y position.
    /// With y growing downwards, a negative skew produces the usual italic slant.
    pub fn set_skew(&mut self, skew: f32) {
        let quantized = F26Dot6::from_f64(f64::from(skew.clamp(-1.0, 1.0)));
        self.skew = quantized.to_f64() as f32;
    }

    /// The effective skew factor.
    pub fn skew(&self) -> f32 {
        self.skew
    }

    /// Sets the faux-bold extra width, clamped to `[0, MAX_EXTRA_WIDTH]` pixels and
    /// quantized to 1/64.
    pub fn set_extra_width(&mut self, extra_width: f32) {
        let quantized = F26Dot6::from_f64(f64::from(extra_width.clamp(0.0, MAX_EXTRA_WIDTH)));
        self.extra_width = quantized.to_f64() as f32;
    }

    /// The effective extra width.
    pub fn extra_width(&self) -> f32 {
        self.extra_width
    }

    /// Sets the curve flattening threshold, clamped and quantized as documented on
    /// [`CurveSegmenter::set_threshold`].
    pub fn set_curve_threshold(&mut self, threshold: f32) {
        self.segmenter.set_threshold(threshold);
    }

    /// The effective curve flattening threshold.
    pub fn curve_threshold(&self) -> f32 {
        self.segmenter.threshold()
    }

    /// Sets the cap on recursive curve subdivisions.
    pub fn set_max_curve_splits(&mut self, max_splits: u8) {
        self.segmenter.set_max_splits(max_splits);
    }

    /// The cap on recursive curve subdivisions.
    pub fn max_curve_splits(&self) -> u8 {
        self.segmenter.max_splits()
    }

    /// The margin-expanded bounding box of the transformed outline.
    fn expanded_bounds(&self, base: Rect) -> Rect {
        if base.is_empty() {
            return base;
        }
        let mut bounds = base;
        let skew = f64::from(self.skew);
        if skew != 0.0 {
            let (min_x, min_y) = base.min.to_f64s();
            let (max_x, max_y) = base.max.to_f64s();
            let shift_lo = (skew * min_y).min(skew * max_y);
            let shift_hi = (skew * min_y).max(skew * max_y);
            bounds.min.x = F26Dot6::from_f64_down(min_x + shift_lo);
            bounds.max.x = F26Dot6::from_f64_up(max_x + shift_hi);
        }
        if self.extra_width > 0.0 {
            bounds.max.x += F26Dot6::from_f64_up(f64::from(self.extra_width));
        }
        bounds
    }
}

impl MaskRasterizer for FauxRasterizer {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "both tunables quantize to well under 11 bits of 64ths"
    )]
    fn signature(&self) -> u64 {
        let skew_64ths = F26Dot6::from_f64(f64::from(self.skew)).to_bits() as i16;
        let width_64ths = F26Dot6::from_f64(f64::from(self.extra_width)).to_bits() as u16;
        base_signature(SIGNATURE_TAG_FAUX, &self.segmenter)
            | (u64::from(width_64ths) << 16)
            | u64::from(skew_64ths as u16)
    }

    fn rasterize(&mut self, outline: &Outline, origin: Point) -> AlphaMask {
        let bounds = self.expanded_bounds(outline.bounds());
        let skew = f64::from(self.skew);
        let mut raw = rasterize_outline(
            &mut self.marker,
            &self.segmenter,
            outline,
            origin,
            bounds,
            |x, y| (x + skew * y, y),
        );
        let width = raw.width() as usize;
        if self.extra_width > 0.0 && width > 0 {
            extend_coverage(raw.pixels_mut(), width, self.extra_width, &mut self.row_scratch);
        }
        raw.into_mask()
    }
}

/// Extends each row's coverage rightwards by `extra_width` pixels.
///
/// Every output pixel takes the maximum of itself and its `floor(extra_width)` left
/// neighbors, plus a fractional share of the one beyond, so sub-pixel widths thicken
/// smoothly.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the width is clamped non-negative and the tail share is at most 255"
)]
fn extend_coverage(pixels: &mut [u8], width: usize, extra_width: f32, scratch: &mut Vec<u8>) {
    let whole = extra_width as usize;
    let fract = f64::from(extra_width) - whole as f64;
    for row in pixels.chunks_exact_mut(width) {
        scratch.clear();
        scratch.extend_from_slice(row);
        for (x, out) in row.iter_mut().enumerate() {
            let mut best = scratch[x];
            for reach in 1..=whole.min(x) {
                best = best.max(scratch[x - reach]);
            }
            if fract > 0.0 && x > whole {
                let tail = (f64::from(scratch[x - whole - 1]) * fract + 0.5) as u8;
                best = best.max(tail);
            }
            *out = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::EdgeMarkerRasterizer;

    fn square(min: i32, max: i32) -> Outline {
        let mut outline = Outline::new();
        outline.move_to(Point::from_ints(min, min));
        outline.line_to(Point::from_ints(min, max));
        outline.line_to(Point::from_ints(max, max));
        outline.line_to(Point::from_ints(max, min));
        outline.line_to(Point::from_ints(min, min));
        outline
    }

    #[test]
    fn neutral_faux_matches_the_core_rasterizer() {
        let mut faux = FauxRasterizer::new();
        let mut core = EdgeMarkerRasterizer::new();
        let faux_mask = faux.rasterize(&square(0, 2), Point::ZERO);
        let core_mask = core.rasterize(&square(0, 2), Point::ZERO);
        assert_eq!(faux_mask.pixels(), core_mask.pixels());
        assert_eq!(faux_mask.offset(), core_mask.offset());
        // Same pixels, different identity: the cache must not mix them up.
        assert_ne!(faux.signature(), core.signature());
    }

    #[test]
    fn extra_width_thickens_rows() {
        let mut faux = FauxRasterizer::new();
        faux.set_extra_width(1.0);
        let mask = faux.rasterize(&square(0, 2), Point::ZERO);
        // One extra column, fully covered by the extension.
        assert_eq!(mask.width(), 3);
        assert_eq!(mask.height(), 2);
        assert_eq!(mask.pixels(), &[255, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn skew_shears_the_mask() {
        let mut faux = FauxRasterizer::new();
        faux.set_skew(1.0);
        let mask = faux.rasterize(&square(0, 2), Point::ZERO);
        // x spans [0, 2] at y = 0 and [2, 4] at y = 2.
        assert_eq!(mask.width(), 4);
        assert_eq!(mask.height(), 2);
        // Top row leans left, bottom row leans right.
        let pixels = mask.pixels();
        assert!(pixels[0] > 0, "top-left should have coverage");
        assert_eq!(pixels[3], 0, "top-right is outside the sheared square");
        assert_eq!(pixels[4], 0, "bottom-left is outside the sheared square");
        assert!(pixels[7] > 0, "bottom-right should have coverage");
    }

    #[test]
    fn tunables_are_quantized_and_clamped() {
        let mut faux = FauxRasterizer::new();
        faux.set_skew(2.0);
        assert_eq!(faux.skew(), 1.0);
        faux.set_skew(-0.5);
        assert_eq!(faux.skew(), -0.5);
        faux.set_extra_width(-3.0);
        assert_eq!(faux.extra_width(), 0.0);

        // Sub-1/64 differences collapse onto the same signature.
        let mut other = FauxRasterizer::new();
        faux.set_skew(0.25);
        other.set_skew(0.25 + 1.0 / 1024.0);
        assert_eq!(faux.signature(), other.signature());
    }

    #[test]
    fn signature_separates_visibly_distinct_variants() {
        let mut a = FauxRasterizer::new();
        let mut b = FauxRasterizer::new();
        a.set_skew(0.25);
        b.set_skew(-0.25);
        assert_ne!(a.signature(), b.signature());

        b.set_skew(0.25);
        assert_eq!(a.signature(), b.signature());
        b.set_extra_width(0.5);
        assert_ne!(a.signature(), b.signature());
    }
}
