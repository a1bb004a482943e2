// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mask_primitives::Point;

use super::{MaskRasterizer, SIGNATURE_TAG_EDGE_MARKER, base_signature, rasterize_outline};
use crate::edge_marker::EdgeMarker;
use crate::mask::AlphaMask;
use crate::outline::Outline;
use crate::segmenter::CurveSegmenter;

/// The core rasterizer: edge-marker scan conversion of the outline as given.
///
/// Tunables are the curve flattening threshold and the subdivision cap; see
/// [`CurveSegmenter`] for their exact semantics. The accumulation buffer is kept between
/// calls, so rasterizing runs of similarly-sized glyphs allocates only the output masks.
#[derive(Clone, Debug, Default)]
pub struct EdgeMarkerRasterizer {
    segmenter: CurveSegmenter,
    marker: EdgeMarker,
}

impl EdgeMarkerRasterizer {
    /// Creates a rasterizer with default curve settings.
    pub fn new() -> Self {
        Self::default()
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
}

impl MaskRasterizer for EdgeMarkerRasterizer {
    fn signature(&self) -> u64 {
        base_signature(SIGNATURE_TAG_EDGE_MARKER, &self.segmenter)
    }

    fn rasterize(&mut self, outline: &Outline, origin: Point) -> AlphaMask {
        let bounds = outline.bounds();
        rasterize_outline(
            &mut self.marker,
            &self.segmenter,
            outline,
            origin,
            bounds,
            |x, y| (x, y),
        )
        .into_mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mask_primitives::F26Dot6;

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
    fn unit_square_is_fully_opaque() {
        let mut rasterizer = EdgeMarkerRasterizer::new();
        let mask = rasterizer.rasterize(&square(0, 2), Point::ZERO);
        assert_eq!(mask.width(), 2);
        assert_eq!(mask.height(), 2);
        assert_eq!(mask.offset(), (0, 0));
        assert_eq!(mask.pixels(), &[255, 255, 255, 255]);
    }

    #[test]
    fn rasterization_is_idempotent() {
        let mut outline = Outline::new();
        outline.move_to(Point::from_ints(0, 0));
        outline.quad_to(Point::from_ints(3, 5), Point::from_ints(6, 0));
        outline.line_to(Point::from_ints(0, 0));

        let mut rasterizer = EdgeMarkerRasterizer::new();
        let origin = Point::new(F26Dot6::from_f64(0.25), F26Dot6::from_f64(0.5));
        let first = rasterizer.rasterize(&outline, origin);
        let second = rasterizer.rasterize(&outline, origin);
        assert_eq!(first.pixels(), second.pixels());
        assert_eq!(first.offset(), second.offset());
    }

    #[test]
    fn move_only_outline_yields_empty_mask() {
        let mut outline = Outline::new();
        outline.move_to(Point::from_ints(5, 7));
        let mut rasterizer = EdgeMarkerRasterizer::new();
        let mask = rasterizer.rasterize(&outline, Point::ZERO);
        assert!(mask.is_empty());
    }

    #[test]
    fn negative_bounds_land_in_the_anchor() {
        let mut rasterizer = EdgeMarkerRasterizer::new();
        let mask = rasterizer.rasterize(&square(-2, 0), Point::ZERO);
        assert_eq!(mask.offset(), (-2, -2));
        assert_eq!(mask.width(), 2);
        assert_eq!(mask.pixels(), &[255, 255, 255, 255]);
    }

    #[test]
    fn subpixel_origin_shifts_coverage() {
        let mut rasterizer = EdgeMarkerRasterizer::new();
        let origin = Point::new(F26Dot6::HALF, F26Dot6::ZERO);
        let mask = rasterizer.rasterize(&square(0, 2), origin);
        // The square now spans x in [0.5, 2.5]: three columns at half, full, half.
        assert_eq!(mask.width(), 3);
        assert_eq!(mask.height(), 2);
        assert_eq!(mask.pixels(), &[128, 255, 128, 128, 255, 128]);
    }

    #[test]
    fn signature_tracks_visible_settings() {
        let mut rasterizer = EdgeMarkerRasterizer::new();
        let base = rasterizer.signature();

        rasterizer.set_curve_threshold(0.5);
        let threshold_changed = rasterizer.signature();
        assert_ne!(base, threshold_changed);

        rasterizer.set_max_curve_splits(3);
        assert_ne!(threshold_changed, rasterizer.signature());

        // Sub-threshold-resolution changes are not visible and must not churn the key.
        rasterizer.set_curve_threshold(0.5001);
        assert_eq!(rasterizer.curve_threshold(), 0.5);
        let mut other = EdgeMarkerRasterizer::new();
        other.set_curve_threshold(0.5);
        other.set_max_curve_splits(3);
        assert_eq!(rasterizer.signature(), other.signature());
    }
}
