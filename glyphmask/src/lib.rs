// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyphmask rasterizes glyph outlines into cached anti-aliased alpha masks.
//!
//! This is the CPU rendering core under a text renderer: a font engine supplies glyph
//! outlines as move/line/quad/cube command streams in 26.6 fixed-point coordinates, a
//! [`MaskRasterizer`] scan-converts them into 8-bit [`AlphaMask`]es, and a [`MaskCache`]
//! keeps the produced masks under a byte budget so rendering the same glyphs frame after
//! frame is a map lookup. Shaping, layout, font parsing and target surfaces all live
//! outside this crate.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use glyphmask::{CacheSession, EdgeMarkerRasterizer, MaskCache, MaskRasterizer, Outline, Point};
//!
//! // A 2x2 pixel square, as a font engine would hand it over.
//! let mut outline = Outline::new();
//! outline.move_to(Point::from_ints(0, 0));
//! outline.line_to(Point::from_ints(0, 2));
//! outline.line_to(Point::from_ints(2, 2));
//! outline.line_to(Point::from_ints(2, 0));
//! outline.line_to(Point::from_ints(0, 0));
//!
//! let mut rasterizer = EdgeMarkerRasterizer::new();
//! let cache = Arc::new(MaskCache::with_capacity(1 << 20));
//! let mut session = CacheSession::new(cache);
//! session.notify_rasterizer_change(&rasterizer);
//!
//! // Renderer loop: look up first, rasterize and store on a miss.
//! let glyph_id = 7;
//! let mask = match session.mask(glyph_id) {
//!     Some(mask) => mask,
//!     None => {
//!         let mask = Arc::new(rasterizer.rasterize(&outline, Point::ZERO));
//!         session.pass_mask(glyph_id, Arc::clone(&mask));
//!         mask
//!     }
//! };
//! assert_eq!(mask.pixels(), &[255; 4]);
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cache;
mod edge_marker;
mod mask;
mod outline;
mod raster;
mod segmenter;

pub use cache::{CacheSession, MaskCache, MaskKey};
pub use edge_marker::EdgeMarker;
pub use mask::AlphaMask;
pub use outline::{Outline, OutlineCommand};
pub use raster::{EdgeMarkerRasterizer, FauxRasterizer, MAX_EXTRA_WIDTH, MaskRasterizer};
pub use segmenter::{
    CURVE_THRESHOLD_RANGE, CurveSegmenter, DEFAULT_CURVE_THRESHOLD, DEFAULT_MAX_CURVE_SPLITS,
};

// The fixed-point vocabulary types, re-exported for convenience.
pub use mask_primitives::{F26Dot6, Point, Rect};
