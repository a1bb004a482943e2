// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph outlines as drawing command streams.

use mask_primitives::{Point, Rect};
use smallvec::SmallVec;

/// A single outline drawing command in 26.6 fixed-point coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutlineCommand {
    /// Starts a new subpath at the given point.
    MoveTo(Point),
    /// A straight segment from the current position.
    LineTo(Point),
    /// A quadratic Bézier (control, end) from the current position.
    QuadTo(Point, Point),
    /// A cubic Bézier (control 1, control 2, end) from the current position.
    CubeTo(Point, Point, Point),
}

impl OutlineCommand {
    /// The position the pen ends up at after this command.
    #[inline]
    pub fn end(self) -> Point {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::QuadTo(_, p) | Self::CubeTo(_, _, p) => p,
        }
    }
}

/// A glyph boundary as an ordered stream of drawing commands.
///
/// This is the read contract the rasterization pipeline needs from a font engine: the
/// engine walks a glyph's segments and appends one command per segment. Subpaths
/// concatenate and are expected to close themselves (the last point of each subpath
/// returning to its starting point); the rasterizer does not close them implicitly.
#[derive(Clone, Default, Debug)]
pub struct Outline {
    commands: SmallVec<[OutlineCommand; 8]>,
}

impl Outline {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn push(&mut self, command: OutlineCommand) {
        self.commands.push(command);
    }

    /// Starts a new subpath at `point`.
    pub fn move_to(&mut self, point: Point) {
        self.commands.push(OutlineCommand::MoveTo(point));
    }

    /// Appends a straight segment ending at `point`.
    pub fn line_to(&mut self, point: Point) {
        self.commands.push(OutlineCommand::LineTo(point));
    }

    /// Appends a quadratic Bézier through `control` ending at `end`.
    pub fn quad_to(&mut self, control: Point, end: Point) {
        self.commands.push(OutlineCommand::QuadTo(control, end));
    }

    /// Appends a cubic Bézier through `control1` and `control2` ending at `end`.
    pub fn cube_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.commands
            .push(OutlineCommand::CubeTo(control1, control2, end));
    }

    /// Removes all commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// The command stream in drawing order.
    #[inline]
    pub fn commands(&self) -> &[OutlineCommand] {
        &self.commands
    }

    /// Whether the outline contains any command that draws.
    ///
    /// An outline of only `MoveTo`s (or nothing at all) produces no coverage; the space
    /// glyph is the common case.
    pub fn has_drawing_commands(&self) -> bool {
        self.commands
            .iter()
            .any(|command| !matches!(command, OutlineCommand::MoveTo(_)))
    }

    /// The control-box bounding rectangle of the outline.
    ///
    /// Control points of curve commands are included, so this is a conservative bound:
    /// the true curve never leaves it, but may not touch all of its sides.
    pub fn bounds(&self) -> Rect {
        let mut bounds = Rect::EMPTY;
        for command in &self.commands {
            match *command {
                OutlineCommand::MoveTo(p) | OutlineCommand::LineTo(p) => bounds.include(p),
                OutlineCommand::QuadTo(c, p) => {
                    bounds.include(c);
                    bounds.include(p);
                }
                OutlineCommand::CubeTo(c1, c2, p) => {
                    bounds.include(c1);
                    bounds.include(c2);
                    bounds.include(p);
                }
            }
        }
        bounds
    }
}
