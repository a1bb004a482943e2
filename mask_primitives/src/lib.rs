// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fundamental fixed-point geometry types for glyph rasterization.
//!
//! This crate is intended as a lightweight, `no_std`-friendly vocabulary layer shared between
//! rasterizers, glyph caches and the font engines that feed them. Sub-pixel positions are
//! represented in 26.6 fixed point (1 unit = 1/64 pixel), the format font engines deliver
//! outline coordinates in, so every arithmetic operation documents its rounding behavior and
//! callers can rely on exact tie-breaking.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward
//!   compatibility.
//! - `bytemuck`: Implement traits from `bytemuck` on [`F26Dot6`] and [`Point`].
//!
//! ## Example
//!
//! ```
//! use mask_primitives::F26Dot6;
//!
//! let x = F26Dot6::from_f64(2.5);
//! assert_eq!(x.to_bits(), 160);
//! assert_eq!(x.floor().to_int(), 2);
//! // The fractional part of 2.5 is already a multiple of half a pixel.
//! assert_eq!(x.quantize_up(32), x);
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
#![no_std]

mod fixed;
#[cfg(feature = "bytemuck")]
mod impl_bytemuck;
mod point;
mod rect;

pub use fixed::F26Dot6;
pub use point::Point;
pub use rect::Rect;
