// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph mask cache key.

use mask_primitives::F26Dot6;

/// Unique identity of a cached glyph mask.
///
/// Two lookups with equal keys are guaranteed to want the same pixels: the key collapses
/// every input that affects a rasterized mask — which font, which glyph, at what size,
/// under which rasterizer configuration, at which quantized sub-pixel phase — into a
/// small `Copy` tuple. Masks are pure functions of their key, which is what makes
/// first-writer-wins insertion and racy double-rasterization safe.
///
/// `font_id` must be stable and collision-free for the lifetime of the font objects it
/// names; handing out such identifiers is the font engine's job.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MaskKey {
    /// Stable identifier of the font the glyph comes from.
    pub font_id: u64,
    /// The rasterizer configuration fingerprint.
    pub signature: u64,
    /// Text size the mask was rasterized at.
    pub size: F26Dot6,
    /// Glyph index within the font.
    pub glyph_id: u32,
    /// Quantized horizontal sub-pixel phase, in 64ths of a pixel.
    pub phase_x: u8,
    /// Quantized vertical sub-pixel phase, in 64ths of a pixel.
    pub phase_y: u8,
}
