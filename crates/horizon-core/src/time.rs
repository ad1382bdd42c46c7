// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Time Values
//!
//! All time in the algebra is measured as a signed, fixed-point offset from the
//! start of a plan, counted in whole microseconds. [`Duration`] is the single
//! newtype used for both instants and spans.
//!
//! Two sentinels, [`Duration::MIN`] and [`Duration::MAX`], stand in for the
//! unbounded past and future. They sit at half the range of `i64` so that the
//! span between them still fits, and so that one sentinel minus the other
//! never wraps. Arithmetic comes in three flavours:
//!
//! - operators (`+`, `-`, `*`) panic when leaving `[MIN, MAX]`,
//! - `checked_*` return `None` instead,
//! - `saturating_*` clamp to the sentinels, which is what shifting uses.

use num_traits::{Bounded, CheckedAdd, CheckedSub, SaturatingAdd, SaturatingSub, Zero};
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Duration(i64);

impl Duration {
    pub const ZERO: Duration = Duration(0);
    pub const EPSILON: Duration = Duration(1);
    pub const MICROSECOND: Duration = Duration(1);
    pub const MILLISECOND: Duration = Duration(1_000);
    pub const SECOND: Duration = Duration(1_000_000);
    pub const MINUTE: Duration = Duration(60 * 1_000_000);
    pub const HOUR: Duration = Duration(60 * 60 * 1_000_000);
    pub const DAY: Duration = Duration(24 * 60 * 60 * 1_000_000);

    /// The earliest representable instant.
    pub const MIN: Duration = Duration(i64::MIN / 2);

    /// The latest representable instant.
    pub const MAX: Duration = Duration(i64::MAX / 2);

    /// Creates a duration of `micros` microseconds.
    ///
    /// Values outside `[MIN, MAX]` are clamped to the sentinels.
    ///
    /// # Examples
    ///
    /// ```
    /// use horizon_core::time::Duration;
    ///
    /// assert_eq!(Duration::from_micros(1_500_000), Duration::from_millis(1_500));
    /// assert_eq!(Duration::from_micros(i64::MAX), Duration::MAX);
    /// ```
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        if micros < Self::MIN.0 {
            Self::MIN
        } else if micros > Self::MAX.0 {
            Self::MAX
        } else {
            Duration(micros)
        }
    }

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self::from_micros(millis.saturating_mul(Self::MILLISECOND.0))
    }

    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Self::from_micros(secs.saturating_mul(Self::SECOND.0))
    }

    #[inline]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self::from_micros(minutes.saturating_mul(Self::MINUTE.0))
    }

    /// Creates a duration from fractional seconds, rounded to the nearest microsecond.
    ///
    /// Non-finite inputs saturate: `NaN` maps to zero, infinities to the sentinels.
    ///
    /// # Examples
    ///
    /// ```
    /// use horizon_core::time::Duration;
    ///
    /// assert_eq!(Duration::from_secs_f64(0.0000016).as_micros(), 2);
    /// assert_eq!(Duration::from_secs_f64(f64::INFINITY), Duration::MAX);
    /// ```
    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        let micros = (secs * Self::SECOND.0 as f64).round();
        if micros.is_nan() {
            Self::ZERO
        } else if micros <= Self::MIN.0 as f64 {
            Self::MIN
        } else if micros >= Self::MAX.0 as f64 {
            Self::MAX
        } else {
            Duration(micros as i64)
        }
    }

    #[inline]
    pub const fn as_micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / Self::SECOND.0 as f64
    }

    #[inline]
    pub const fn is_min(self) -> bool {
        self.0 == Self::MIN.0
    }

    #[inline]
    pub const fn is_max(self) -> bool {
        self.0 == Self::MAX.0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn abs(self) -> Self {
        Duration(self.0.abs())
    }

    #[inline]
    fn in_range(value: i64) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&value)
            .then_some(Duration(value))
    }

    #[inline]
    pub fn checked_add(self, rhs: Duration) -> Option<Self> {
        self.0.checked_add(rhs.0).and_then(Self::in_range)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Duration) -> Option<Self> {
        self.0.checked_sub(rhs.0).and_then(Self::in_range)
    }

    #[inline]
    pub fn checked_mul(self, rhs: i64) -> Option<Self> {
        self.0.checked_mul(rhs).and_then(Self::in_range)
    }

    /// Adds `rhs`, clamping the result to `[MIN, MAX]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use horizon_core::time::Duration;
    ///
    /// assert_eq!(Duration::MAX.saturating_add(Duration::SECOND), Duration::MAX);
    /// assert_eq!(Duration::ZERO.saturating_add(Duration::SECOND), Duration::SECOND);
    /// ```
    #[inline]
    pub const fn saturating_add(self, rhs: Duration) -> Self {
        Self::from_micros(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub const fn saturating_sub(self, rhs: Duration) -> Self {
        Self::from_micros(self.0.saturating_sub(rhs.0))
    }

    #[inline]
    pub const fn saturating_mul(self, rhs: i64) -> Self {
        Self::from_micros(self.0.saturating_mul(rhs))
    }

    /// How many whole `unit`s fit into `self`, truncated towards zero.
    ///
    /// # Panics
    ///
    /// Panics if `unit` is zero.
    #[inline]
    pub fn div_duration(self, unit: Duration) -> i64 {
        assert!(!unit.is_zero(), "division of Duration by zero Duration");
        self.0 / unit.0
    }

    /// The ratio `self / unit` as a float.
    #[inline]
    pub fn ratio(self, unit: Duration) -> f64 {
        self.0 as f64 / unit.0 as f64
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_min() {
            return write!(f, "MIN");
        }
        if self.is_max() {
            return write!(f, "MAX");
        }
        let sign = if self.0 < 0 { '-' } else { '+' };
        let micros = self.0.unsigned_abs();
        let secs = micros / 1_000_000;
        write!(
            f,
            "{}{:02}:{:02}:{:02}.{:06}",
            sign,
            secs / 3600,
            (secs / 60) % 60,
            secs % 60,
            micros % 1_000_000
        )
    }
}

impl From<i64> for Duration {
    #[inline]
    fn from(micros: i64) -> Self {
        Duration::from_micros(micros)
    }
}

impl Add for Duration {
    type Output = Duration;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs).expect("overflow in Duration + Duration")
    }
}

impl AddAssign for Duration {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl Sub for Duration {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        self.checked_sub(rhs).expect("overflow in Duration - Duration")
    }
}

impl SubAssign for Duration {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    #[inline]
    fn mul(self, rhs: i64) -> Self::Output {
        self.checked_mul(rhs).expect("overflow in Duration * i64")
    }
}

impl Div<i64> for Duration {
    type Output = Duration;

    #[inline]
    fn div(self, rhs: i64) -> Self::Output {
        assert!(rhs != 0, "division of Duration by zero");
        Duration(self.0 / rhs)
    }
}

impl Neg for Duration {
    type Output = Duration;

    #[inline]
    fn neg(self) -> Self::Output {
        // MIN and MAX are symmetric up to one microsecond.
        Duration::from_micros(-self.0)
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Self {
        iter.fold(Duration::ZERO, |acc, d| acc + d)
    }
}

impl Zero for Duration {
    #[inline]
    fn zero() -> Self {
        Duration::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Bounded for Duration {
    #[inline]
    fn min_value() -> Self {
        Duration::MIN
    }

    #[inline]
    fn max_value() -> Self {
        Duration::MAX
    }
}

impl CheckedAdd for Duration {
    #[inline]
    fn checked_add(&self, v: &Self) -> Option<Self> {
        Duration::checked_add(*self, *v)
    }
}

impl CheckedSub for Duration {
    #[inline]
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        Duration::checked_sub(*self, *v)
    }
}

impl SaturatingAdd for Duration {
    #[inline]
    fn saturating_add(&self, v: &Self) -> Self {
        Duration::saturating_add(*self, *v)
    }
}

impl SaturatingSub for Duration {
    #[inline]
    fn saturating_sub(&self, v: &Self) -> Self {
        Duration::saturating_sub(*self, *v)
    }
}
