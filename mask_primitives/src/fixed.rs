// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(
    clippy::cast_possible_truncation,
    reason = "narrowing back to 26.6 after widened intermediate arithmetic is the contract"
)]

use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of fractional bits.
const FRACT_BITS: u32 = 6;

/// Raw value of one whole pixel.
const ONE_BITS: i32 = 1 << FRACT_BITS;

/// Bit mask selecting the fractional part.
const FRACT_MASK: i32 = ONE_BITS - 1;

/// A 26.6 fixed-point scalar (1 unit = 1/64 pixel).
///
/// This is the coordinate format font engines deliver glyph outlines in: a signed 32-bit
/// value with 26 integer bits and 6 fractional bits. All arithmetic rounds deterministically
/// and each operation documents its tie-breaking rule, so callers building cache keys or
/// pixel grids from these values get bit-exact, reproducible results.
///
/// The fractional part is always taken relative to [`floor`](Self::floor): `fract` of
/// `-1.25` is `0.75`, never a negative value. This keeps quantization and sub-pixel phase
/// extraction uniform across the whole coordinate range.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct F26Dot6(i32);

impl F26Dot6 {
    /// The zero value.
    pub const ZERO: Self = Self(0);

    /// One whole pixel.
    pub const ONE: Self = Self(ONE_BITS);

    /// Half a pixel.
    pub const HALF: Self = Self(ONE_BITS / 2);

    /// Creates a value from its raw 26.6 bit representation.
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the raw 26.6 bit representation.
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a value from a whole number of pixels.
    #[inline]
    pub const fn from_int(value: i32) -> Self {
        Self(value << FRACT_BITS)
    }

    /// Creates a value from `f64`, rounding to the nearest 64th with ties away from zero.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self(round_ties_away(value * ONE_BITS as f64))
    }

    /// Creates a value from `f64`, rounding up (towards positive infinity) to the next 64th.
    #[inline]
    pub fn from_f64_up(value: f64) -> Self {
        Self(ceil_to_i32(value * ONE_BITS as f64))
    }

    /// Creates a value from `f64`, rounding down (towards negative infinity) to the
    /// previous 64th.
    #[inline]
    pub fn from_f64_down(value: f64) -> Self {
        Self(floor_to_i32(value * ONE_BITS as f64))
    }

    /// Converts to `f64`. Exact: every 26.6 value is representable.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(ONE_BITS)
    }

    /// Rounds down to the nearest whole pixel.
    #[inline]
    pub const fn floor(self) -> Self {
        Self(self.0 & !FRACT_MASK)
    }

    /// Rounds up to the nearest whole pixel.
    #[inline]
    pub const fn ceil(self) -> Self {
        Self((self.0 + FRACT_MASK) & !FRACT_MASK)
    }

    /// Rounds to the nearest whole pixel, ties away from zero.
    #[inline]
    pub const fn round(self) -> Self {
        if self.0 >= 0 {
            self.round_half_up()
        } else {
            self.round_half_down()
        }
    }

    /// Rounds to the nearest whole pixel, ties towards positive infinity.
    #[inline]
    pub const fn round_half_up(self) -> Self {
        Self((self.0 + ONE_BITS / 2) & !FRACT_MASK)
    }

    /// Rounds to the nearest whole pixel, ties towards negative infinity.
    #[inline]
    pub const fn round_half_down(self) -> Self {
        Self((self.0 + ONE_BITS / 2 - 1) & !FRACT_MASK)
    }

    /// Returns the whole-pixel part, rounding down.
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> FRACT_BITS
    }

    /// Returns the whole-pixel part, rounding up.
    #[inline]
    pub const fn to_int_ceil(self) -> i32 {
        (self.0 + FRACT_MASK) >> FRACT_BITS
    }

    /// Returns the fractional part relative to [`floor`](Self::floor), in `[0, 1)`.
    #[inline]
    pub const fn fract(self) -> Self {
        Self(self.0 & FRACT_MASK)
    }

    /// Returns the whole-pixel part, rounding towards zero.
    #[inline]
    pub const fn trunc(self) -> Self {
        Self((self.0 / ONE_BITS) * ONE_BITS)
    }

    /// Whether the value is a whole number of pixels.
    #[inline]
    pub const fn is_whole(self) -> bool {
        self.0 & FRACT_MASK == 0
    }

    /// Fixed-point multiplication, rounding to the nearest 64th with ties away from zero.
    #[inline]
    pub fn mul(self, rhs: Self) -> Self {
        let wide = i64::from(self.0) * i64::from(rhs.0);
        Self(shift_ties_away(wide, FRACT_BITS) as i32)
    }

    /// Fixed-point division, rounding to the nearest 64th with ties away from zero.
    ///
    /// Panics on division by zero, like integer division.
    #[inline]
    pub fn div(self, rhs: Self) -> Self {
        let num = i64::from(self.0) << FRACT_BITS;
        Self(div_ties_away(num, i64::from(rhs.0)) as i32)
    }

    /// Scales the value by the ratio `num / den` with a single rounding step, ties away
    /// from zero.
    ///
    /// This is the operation used to map coordinates between two scales (e.g. font units
    /// to pixels at a given text size) without intermediate precision loss. Panics if
    /// `den` is zero.
    #[inline]
    pub fn rescale(self, num: i32, den: i32) -> Self {
        let wide = i64::from(self.0) * i64::from(num);
        Self(div_ties_away(wide, i64::from(den)) as i32)
    }

    /// Snaps the fractional part up to the next multiple of `step`.
    ///
    /// `step` must be in `[1, 64]` or this panics. The result is never smaller than the
    /// input, and its fractional part is a multiple of `step` (a snap landing on 64
    /// carries into the whole-pixel part, leaving a fractional part of zero).
    ///
    /// Coarser steps collapse more sub-pixel positions onto the same phase, which raises
    /// glyph cache hit rates at the cost of sub-pixel positioning fidelity.
    #[inline]
    pub fn quantize_up(self, step: u8) -> Self {
        let step = check_step(step);
        let fract = self.0 & FRACT_MASK;
        let rem = fract % step;
        if rem == 0 {
            return self;
        }
        let snapped = (fract - rem + step).min(ONE_BITS);
        Self((self.0 & !FRACT_MASK) + snapped)
    }

    /// Snaps the fractional part down to the previous multiple of `step`.
    ///
    /// `step` must be in `[1, 64]` or this panics. The result is never larger than the
    /// input and its fractional part is a multiple of `step`.
    #[inline]
    pub fn quantize_down(self, step: u8) -> Self {
        let step = check_step(step);
        Self(self.0 - (self.0 & FRACT_MASK) % step)
    }

    /// Snaps the fractional part to the nearest multiple of `step`, ties upwards.
    ///
    /// `step` must be in `[1, 64]` or this panics.
    #[inline]
    pub fn quantize(self, step: u8) -> Self {
        let up = self.quantize_up(step);
        let down = self.quantize_down(step);
        if up.0 - self.0 <= self.0 - down.0 {
            up
        } else {
            down
        }
    }
}

/// Panics unless `step` is a valid quantization step.
#[inline]
fn check_step(step: u8) -> i32 {
    assert!(
        (1..=64).contains(&step),
        "quantization step must be in [1, 64], got {step}"
    );
    i32::from(step)
}

/// Rounds `value >> shift` to the nearest integer, ties away from zero.
#[inline]
fn shift_ties_away(value: i64, shift: u32) -> i64 {
    let half = 1_i64 << (shift - 1);
    if value >= 0 {
        (value + half) >> shift
    } else {
        -((-value + half) >> shift)
    }
}

/// Rounded integer division, ties away from zero.
#[inline]
fn div_ties_away(num: i64, den: i64) -> i64 {
    let quot = num / den;
    let rem = num % den;
    if rem.abs() * 2 >= den.abs() {
        if (num < 0) == (den < 0) {
            quot + 1
        } else {
            quot - 1
        }
    } else {
        quot
    }
}

/// `no_std` floor-to-integer. The cast truncates towards zero, so negative non-integers
/// need one step down.
#[inline]
fn floor_to_i32(value: f64) -> i32 {
    let truncated = value as i32;
    if f64::from(truncated) > value {
        truncated - 1
    } else {
        truncated
    }
}

/// `no_std` ceil-to-integer.
#[inline]
fn ceil_to_i32(value: f64) -> i32 {
    let truncated = value as i32;
    if f64::from(truncated) < value {
        truncated + 1
    } else {
        truncated
    }
}

/// Round to nearest integer, ties away from zero.
#[inline]
fn round_ties_away(value: f64) -> i32 {
    if value >= 0.0 {
        floor_to_i32(value + 0.5)
    } else {
        ceil_to_i32(value - 0.5)
    }
}

impl Add for F26Dot6 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for F26Dot6 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for F26Dot6 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for F26Dot6 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for F26Dot6 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<i32> for F26Dot6 {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from_int(value)
    }
}

impl fmt::Debug for F26Dot6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F26Dot6({self})")
    }
}

impl fmt::Display for F26Dot6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = self.0 >> FRACT_BITS;
        let fract = self.0 & FRACT_MASK;
        if fract == 0 {
            write!(f, "{int}")
        } else {
            write!(f, "{int}+{fract}/64")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_round_trip() {
        for value in [-1000, -1, 0, 1, 37, 1000] {
            assert_eq!(F26Dot6::from_int(value).to_int(), value);
            assert!(F26Dot6::from_int(value).is_whole());
        }
    }

    #[test]
    fn from_f64_variants() {
        // 0.3 * 64 = 19.2
        assert_eq!(F26Dot6::from_f64(0.3).to_bits(), 19);
        assert_eq!(F26Dot6::from_f64_up(0.3).to_bits(), 20);
        assert_eq!(F26Dot6::from_f64_down(0.3).to_bits(), 19);

        // -0.3 * 64 = -19.2
        assert_eq!(F26Dot6::from_f64(-0.3).to_bits(), -19);
        assert_eq!(F26Dot6::from_f64_up(-0.3).to_bits(), -19);
        assert_eq!(F26Dot6::from_f64_down(-0.3).to_bits(), -20);

        // Exact ties round away from zero.
        assert_eq!(F26Dot6::from_f64(0.5 / 64.0).to_bits(), 1);
        assert_eq!(F26Dot6::from_f64(-0.5 / 64.0).to_bits(), -1);

        // Exact values stay exact in every variant.
        for bits in [-130, -64, -1, 0, 1, 64, 130] {
            let value = f64::from(bits) / 64.0;
            assert_eq!(F26Dot6::from_f64(value).to_bits(), bits);
            assert_eq!(F26Dot6::from_f64_up(value).to_bits(), bits);
            assert_eq!(F26Dot6::from_f64_down(value).to_bits(), bits);
        }
    }

    #[test]
    fn floor_ceil_round() {
        let x = F26Dot6::from_f64(1.25);
        assert_eq!(x.floor(), F26Dot6::from_int(1));
        assert_eq!(x.ceil(), F26Dot6::from_int(2));
        assert_eq!(x.round(), F26Dot6::from_int(1));

        let y = F26Dot6::from_f64(-1.25);
        assert_eq!(y.floor(), F26Dot6::from_int(-2));
        assert_eq!(y.ceil(), F26Dot6::from_int(-1));
        assert_eq!(y.round(), F26Dot6::from_int(-1));

        // Half-pixel ties.
        let h = F26Dot6::from_f64(2.5);
        assert_eq!(h.round_half_up(), F26Dot6::from_int(3));
        assert_eq!(h.round_half_down(), F26Dot6::from_int(2));
        assert_eq!(h.round(), F26Dot6::from_int(3));
        let nh = F26Dot6::from_f64(-2.5);
        assert_eq!(nh.round_half_up(), F26Dot6::from_int(-2));
        assert_eq!(nh.round_half_down(), F26Dot6::from_int(-3));
        assert_eq!(nh.round(), F26Dot6::from_int(-3));
    }

    #[test]
    fn fract_is_floor_relative() {
        assert_eq!(F26Dot6::from_f64(1.75).fract().to_bits(), 48);
        assert_eq!(F26Dot6::from_f64(-1.25).fract().to_bits(), 48);
        assert_eq!(F26Dot6::from_int(-3).fract(), F26Dot6::ZERO);
    }

    #[test]
    fn trunc_towards_zero() {
        assert_eq!(F26Dot6::from_f64(1.75).trunc(), F26Dot6::from_int(1));
        assert_eq!(F26Dot6::from_f64(-1.75).trunc(), F26Dot6::from_int(-1));
    }

    #[test]
    fn mul_ties_away_from_zero() {
        let half = F26Dot6::HALF;
        // 0.5 * (1/64) = 1/128: an exact tie, away from zero.
        assert_eq!(half.mul(F26Dot6::from_bits(1)).to_bits(), 1);
        assert_eq!(half.mul(F26Dot6::from_bits(-1)).to_bits(), -1);
        assert_eq!((-half).mul(F26Dot6::from_bits(1)).to_bits(), -1);

        assert_eq!(
            F26Dot6::from_int(3).mul(F26Dot6::from_f64(1.5)),
            F26Dot6::from_f64(4.5)
        );
    }

    #[test]
    fn div_ties_away_from_zero() {
        // (1/64) / 2 = 1/128: tie, away from zero.
        assert_eq!(F26Dot6::from_bits(1).div(F26Dot6::from_int(2)).to_bits(), 1);
        assert_eq!(
            F26Dot6::from_bits(-1).div(F26Dot6::from_int(2)).to_bits(),
            -1
        );
        assert_eq!(
            F26Dot6::from_int(7).div(F26Dot6::from_int(2)),
            F26Dot6::from_f64(3.5)
        );
    }

    #[test]
    fn rescale_single_rounding() {
        // 10 units scaled by 64/192 = 1/3: 640/3 = 213.33 -> 213 bits.
        assert_eq!(F26Dot6::from_int(10).rescale(64, 192).to_bits(), 213);
        // One rounding step, not two: 1/64 * 32/64 = 0.5 bits -> tie away -> 1.
        assert_eq!(F26Dot6::from_bits(1).rescale(32, 64).to_bits(), 1);
        assert_eq!(F26Dot6::from_bits(-1).rescale(32, 64).to_bits(), -1);
    }

    #[test]
    fn quantize_directional_bounds() {
        // Every value, every step: up >= value >= down, and the snapped fractional
        // part is a multiple of the step.
        for bits in -256..=256 {
            let value = F26Dot6::from_bits(bits);
            for step in 1..=64_u8 {
                let up = value.quantize_up(step);
                let down = value.quantize_down(step);
                assert!(up >= value, "up {up:?} < {value:?} at step {step}");
                assert!(down <= value, "down {down:?} > {value:?} at step {step}");
                assert_eq!(up.fract().to_bits() % i32::from(step), 0);
                assert_eq!(down.fract().to_bits() % i32::from(step), 0);
                assert!(up - value <= F26Dot6::from_bits(i32::from(step)));
                assert!(value - down < F26Dot6::from_bits(i32::from(step)));

                let nearest = value.quantize(step);
                assert!(nearest == up || nearest == down);
            }
        }
    }

    #[test]
    fn quantize_carries_into_integer_part() {
        // fract 48 with step 32 snaps up to 64, carrying into the next pixel.
        let x = F26Dot6::from_f64(1.75);
        assert_eq!(x.quantize_up(32), F26Dot6::from_int(2));
        assert_eq!(x.quantize_down(32), F26Dot6::from_f64(1.5));
        // Negative values behave identically in the fractional domain.
        let y = F26Dot6::from_f64(-0.25);
        assert_eq!(y.quantize_up(32), F26Dot6::ZERO);
        assert_eq!(y.quantize_down(32), F26Dot6::from_f64(-0.5));
    }

    #[test]
    fn quantize_nearest_ties_up() {
        // fract 16 with step 32 is an exact tie between 0 and 32.
        let x = F26Dot6::from_bits(16);
        assert_eq!(x.quantize(32).to_bits(), 32);
    }

    #[test]
    #[should_panic(expected = "quantization step must be in [1, 64]")]
    fn quantize_rejects_zero_step() {
        let _ = F26Dot6::ONE.quantize(0);
    }

    #[test]
    #[should_panic(expected = "quantization step must be in [1, 64]")]
    fn quantize_rejects_large_step() {
        let _ = F26Dot6::ONE.quantize_up(65);
    }
}
