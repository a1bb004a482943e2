// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{F26Dot6, Point};

/// An axis-aligned rectangle in 26.6 fixed-point coordinates.
///
/// `max` is exclusive. A rectangle is empty when `min >= max` on either axis; empty
/// rectangles absorb nothing and act as the identity for [`union`](Self::union).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rect {
    /// Inclusive minimum corner.
    pub min: Point,
    /// Exclusive maximum corner.
    pub max: Point,
}

impl Rect {
    /// The empty rectangle positioned so that any [`include`](Self::include) replaces it.
    pub const EMPTY: Self = Self {
        min: Point {
            x: F26Dot6::from_bits(i32::MAX),
            y: F26Dot6::from_bits(i32::MAX),
        },
        max: Point {
            x: F26Dot6::from_bits(i32::MIN),
            y: F26Dot6::from_bits(i32::MIN),
        },
    };

    /// Creates a rectangle from its corners.
    #[inline]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Whether the rectangle contains no area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Horizontal extent. Zero for empty rectangles.
    #[inline]
    pub fn width(self) -> F26Dot6 {
        if self.is_empty() {
            F26Dot6::ZERO
        } else {
            self.max.x - self.min.x
        }
    }

    /// Vertical extent. Zero for empty rectangles.
    #[inline]
    pub fn height(self) -> F26Dot6 {
        if self.is_empty() {
            F26Dot6::ZERO
        } else {
            self.max.y - self.min.y
        }
    }

    /// Grows the rectangle to contain `point`.
    #[inline]
    pub fn include(&mut self, point: Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// The smallest rectangle containing both inputs. Empty inputs are ignored.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Moves the rectangle by `delta`.
    #[inline]
    pub fn translate(self, delta: Point) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Expands each side outwards by the given per-axis margins.
    #[inline]
    pub fn outset(self, dx: F26Dot6, dy: F26Dot6) -> Self {
        Self {
            min: self.min - Point::new(dx, dy),
            max: self.max + Point::new(dx, dy),
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_semantics() {
        assert!(Rect::EMPTY.is_empty());
        assert_eq!(Rect::EMPTY.width(), F26Dot6::ZERO);

        // A rectangle with min == max on one axis is empty.
        let line = Rect::new(Point::from_ints(1, 1), Point::from_ints(1, 5));
        assert!(line.is_empty());
    }

    #[test]
    fn include_builds_bounds() {
        let mut rect = Rect::EMPTY;
        rect.include(Point::from_ints(2, 3));
        assert!(rect.is_empty());
        rect.include(Point::from_ints(-1, 7));
        assert_eq!(rect.min, Point::from_ints(-1, 3));
        assert_eq!(rect.max, Point::from_ints(2, 7));
        assert!(!rect.is_empty());
    }

    #[test]
    fn union_ignores_empty() {
        let rect = Rect::new(Point::from_ints(0, 0), Point::from_ints(2, 2));
        assert_eq!(rect.union(Rect::EMPTY), rect);
        assert_eq!(Rect::EMPTY.union(rect), rect);

        let other = Rect::new(Point::from_ints(1, -1), Point::from_ints(3, 1));
        let both = rect.union(other);
        assert_eq!(both.min, Point::from_ints(0, -1));
        assert_eq!(both.max, Point::from_ints(3, 2));
    }

    #[test]
    fn translate_and_outset() {
        let rect = Rect::new(Point::from_ints(0, 0), Point::from_ints(2, 2));
        let moved = rect.translate(Point::from_ints(-3, 1));
        assert_eq!(moved.min, Point::from_ints(-3, 1));
        assert_eq!(moved.max, Point::from_ints(-1, 3));

        let fat = rect.outset(F26Dot6::ONE, F26Dot6::ZERO);
        assert_eq!(fat.min, Point::from_ints(-1, 0));
        assert_eq!(fat.max, Point::from_ints(3, 2));
    }
}
