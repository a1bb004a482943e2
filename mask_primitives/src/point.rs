// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::F26Dot6;

/// A position in 26.6 fixed-point pixel coordinates.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: F26Dot6,
    /// Vertical coordinate.
    pub y: F26Dot6,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self {
        x: F26Dot6::ZERO,
        y: F26Dot6::ZERO,
    };

    /// Creates a point from its coordinates.
    #[inline]
    pub const fn new(x: F26Dot6, y: F26Dot6) -> Self {
        Self { x, y }
    }

    /// Creates a point from whole-pixel coordinates.
    #[inline]
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: F26Dot6::from_int(x),
            y: F26Dot6::from_int(y),
        }
    }

    /// Converts both coordinates to `f64` pixels. Exact.
    #[inline]
    pub fn to_f64s(self) -> (f64, f64) {
        (self.x.to_f64(), self.y.to_f64())
    }

    /// The per-axis fractional parts, each in `[0, 1)`.
    #[inline]
    pub const fn fract(self) -> Self {
        Self {
            x: self.x.fract(),
            y: self.y.fract(),
        }
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}
