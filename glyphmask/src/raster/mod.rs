// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rasterizer contract and concrete rasterizers.

mod default;
mod faux;

pub use default::EdgeMarkerRasterizer;
pub use faux::{FauxRasterizer, MAX_EXTRA_WIDTH};

use core::fmt::Debug;

use log::trace;
use mask_primitives::{Point, Rect};

use crate::edge_marker::EdgeMarker;
use crate::mask::AlphaMask;
use crate::outline::{Outline, OutlineCommand};
use crate::segmenter::CurveSegmenter;

/// Converts glyph outlines into alpha masks.
///
/// Rasterization is a pure function of the outline, the sub-pixel origin and the
/// rasterizer's configuration: the same inputs always produce byte-identical masks.
/// Degenerate inputs (no drawing commands, zero-area outlines) yield the empty mask —
/// they are designed no-ops, not errors.
///
/// Implementations own mutable scratch state (accumulation buffer, pen position) and are
/// not safe for concurrent use; give each rendering thread its own instance.
pub trait MaskRasterizer: Debug {
    /// A 64-bit fingerprint of this rasterizer's configuration.
    ///
    /// Combines an identity tag with the quantized values of every tunable that affects
    /// output, so the glyph mask cache can tell configurations apart without comparing
    /// objects. The signature must change if and only if a configuration change would
    /// visibly alter the produced masks.
    fn signature(&self) -> u64;

    /// Rasterizes `outline` placed at `origin` into a coverage mask.
    ///
    /// `origin` is typically the fractional part of the pen position; whole-pixel
    /// placement belongs in the mask's anchor, not in re-rasterization. Outlines with
    /// nothing to draw (the space glyph) return an empty mask without allocating.
    fn rasterize(&mut self, outline: &Outline, origin: Point) -> AlphaMask;
}

/// Signature tag byte of [`EdgeMarkerRasterizer`].
pub(crate) const SIGNATURE_TAG_EDGE_MARKER: u64 = b'E' as u64;

/// Signature tag byte of [`FauxRasterizer`].
pub(crate) const SIGNATURE_TAG_FAUX: u64 = b'F' as u64;

/// Signature tag byte reserved for the experimental stroke rasterizer.
///
/// TODO: the stroke/outline variant (parallel-offset segments with mitered joints) needs
/// its clipping finished before it can ship behind this tag.
#[allow(dead_code, reason = "reserved for the stroke rasterizer variant")]
pub(crate) const SIGNATURE_TAG_STROKE: u64 = b'S' as u64;

/// Packs the signature fields shared by all rasterizers.
///
/// Layout: tag in bits 56..64, curve threshold (3 decimal digits) in bits 40..56, curve
/// split cap in bits 32..40. Bits 0..32 are left to each variant.
pub(crate) fn base_signature(tag: u64, segmenter: &CurveSegmenter) -> u64 {
    (tag << 56)
        | (u64::from(segmenter.threshold_millis()) << 40)
        | (u64::from(segmenter.max_splits()) << 32)
}

/// An alpha mask still open for post-processing.
pub(crate) struct RawMask {
    width: u32,
    height: u32,
    offset: (i32, i32),
    pixels: Vec<u8>,
}

impl RawMask {
    fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            offset: (0, 0),
            pixels: Vec::new(),
        }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub(crate) fn into_mask(self) -> AlphaMask {
        if self.pixels.is_empty() {
            AlphaMask::empty()
        } else {
            AlphaMask::new(self.width, self.height, self.offset, self.pixels)
        }
    }
}

/// The shared rasterization pipeline.
///
/// `bounds` is the (possibly margin-expanded) fixed-point bounding box of the outline
/// *after* `map` has been applied; `map` transforms outline coordinates in `f64` pixel
/// space before marking, letting variants shear or otherwise distort the glyph without
/// touching the walk itself.
///
/// The pipeline derives the integer canvas from the origin-shifted bounds, normalizes
/// all coordinates into the positive quadrant the scan converter requires, replays the
/// command stream (expanding curves through the segmenter), accumulates coverage and
/// anchors the result at the bounding-box floor.
#[expect(
    clippy::cast_possible_truncation,
    reason = "canvas dimensions are non-negative i32 pixel counts"
)]
pub(crate) fn rasterize_outline(
    marker: &mut EdgeMarker,
    segmenter: &CurveSegmenter,
    outline: &Outline,
    origin: Point,
    bounds: Rect,
    map: impl Fn(f64, f64) -> (f64, f64),
) -> RawMask {
    if !outline.has_drawing_commands() || bounds.is_empty() {
        trace!("outline draws nothing; returning the empty mask");
        return RawMask::empty();
    }

    let shifted = bounds.translate(origin);
    let min_x = shifted.min.x.to_int();
    let min_y = shifted.min.y.to_int();
    let width = (shifted.max.x.to_int_ceil() - min_x) as usize;
    let height = (shifted.max.y.to_int_ceil() - min_y) as usize;

    marker.resize(width, height);
    let origin_x = origin.x.to_f64() - f64::from(min_x);
    let origin_y = origin.y.to_f64() - f64::from(min_y);
    let place = |point: Point| {
        let (x, y) = point.to_f64s();
        let (x, y) = map(x, y);
        (x + origin_x, y + origin_y)
    };

    let mut pen = (origin_x, origin_y);
    for command in outline.commands() {
        match *command {
            OutlineCommand::MoveTo(p) => {
                pen = place(p);
                marker.move_to(pen.0, pen.1);
            }
            OutlineCommand::LineTo(p) => {
                pen = place(p);
                marker.line_to(pen.0, pen.1);
            }
            OutlineCommand::QuadTo(c, p) => {
                let c = place(c);
                let end = place(p);
                segmenter.quad(pen.0, pen.1, c.0, c.1, end.0, end.1, &mut |x, y| {
                    marker.line_to(x, y);
                });
                pen = end;
            }
            OutlineCommand::CubeTo(c1, c2, p) => {
                let c1 = place(c1);
                let c2 = place(c2);
                let end = place(p);
                segmenter.cube(
                    pen.0, pen.1, c1.0, c1.1, c2.0, c2.1, end.0, end.1,
                    &mut |x, y| {
                        marker.line_to(x, y);
                    },
                );
                pen = end;
            }
        }
    }

    let mut pixels = vec![0_u8; width * height];
    marker.accumulate_into(&mut pixels);
    RawMask {
        width: width as u32,
        height: height as u32,
        offset: (min_x, min_y),
        pixels,
    }
}
