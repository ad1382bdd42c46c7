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

//! Piecewise-linear numeric profiles.
//!
//! A [`LinearEquation`] describes `value(t) = initial_value + rate * (t -
//! initial_time)` with `t` in seconds. Comparing two equations solves for
//! their single crossing and samples the predicate around it, so every
//! comparison of linear profiles is exact up to the microsecond rounding of
//! the crossing time.

use crate::{
    binary_op::{combine_or_none, from_cases},
    err::{ClampBoundsInvertedError, ProfileError},
    interval_map::IntervalMap,
    profile::{Profile, ProfileExt, from_fn, map2_values},
};
use horizon_core::{
    interval::{Inclusivity, Interval},
    segment::Segment,
    time::Duration,
};
use std::fmt::Display;
use tracing::{instrument, warn};

#[derive(Debug, Clone, Copy)]
pub struct LinearEquation {
    initial_time: Duration,
    initial_value: f64,
    rate: f64,
}

impl LinearEquation {
    /// A line through `(initial_time, initial_value)` rising `rate` per second.
    #[inline]
    pub const fn new(initial_time: Duration, initial_value: f64, rate: f64) -> Self {
        Self {
            initial_time,
            initial_value,
            rate,
        }
    }

    #[inline]
    pub const fn constant(value: f64) -> Self {
        Self::new(Duration::ZERO, value, 0.0)
    }

    #[inline]
    pub const fn initial_time(&self) -> Duration {
        self.initial_time
    }

    #[inline]
    pub const fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Change per second.
    #[inline]
    pub const fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn value_at(&self, t: Duration) -> f64 {
        self.initial_value + self.rate * (t.as_secs_f64() - self.initial_time.as_secs_f64())
    }

    /// The same line, anchored at `t`.
    #[inline]
    pub fn shift_initial_time(&self, t: Duration) -> Self {
        Self::new(t, self.value_at(t), self.rate)
    }

    pub fn plus(&self, other: &LinearEquation) -> Self {
        let shifted = other.shift_initial_time(self.initial_time);
        Self::new(
            self.initial_time,
            self.initial_value + shifted.initial_value,
            self.rate + other.rate,
        )
    }

    pub fn minus(&self, other: &LinearEquation) -> Self {
        self.plus(&other.negate())
    }

    #[inline]
    pub fn negate(&self) -> Self {
        Self::new(self.initial_time, -self.initial_value, -self.rate)
    }

    #[inline]
    pub fn times(&self, factor: f64) -> Self {
        Self::new(self.initial_time, self.initial_value * factor, self.rate * factor)
    }

    /// The instant where both lines take the same value, rounded to the
    /// nearest microsecond.
    ///
    /// `None` for parallel lines, and for lines whose crossing cannot be
    /// computed because a coefficient is not finite.
    pub fn intersection_time(&self, other: &LinearEquation) -> Option<Duration> {
        if self.rate == other.rate {
            return None;
        }
        let offset =
            (other.value_at(self.initial_time) - self.initial_value) / (self.rate - other.rate);
        if !offset.is_finite() {
            warn!(left = %self, right = %other, "non-finite crossing; treating lines as parallel");
            return None;
        }
        Some(
            self.initial_time
                .saturating_add(Duration::from_secs_f64(offset)),
        )
    }

    /// Where `predicate(self(t), other(t))` holds.
    ///
    /// Parallel lines give a constant answer sampled at `self`'s initial
    /// time. Otherwise the result has three pieces around the crossing `t0`,
    /// sampled one second before, exactly at, and one second after it.
    ///
    /// # Examples
    ///
    /// ```
    /// use horizon_core::time::Duration;
    /// use horizon_profile::linear::LinearEquation;
    ///
    /// let falling = LinearEquation::new(Duration::ZERO, 10.0, -1.0);
    /// let rising = LinearEquation::new(Duration::ZERO, 0.0, 1.0);
    /// let below = falling.compare(&rising, |l, r| l < r);
    /// assert_eq!(below.value_at(Duration::from_secs(4)), Some(&false));
    /// assert_eq!(below.value_at(Duration::from_secs(5)), Some(&false));
    /// assert_eq!(below.value_at(Duration::from_secs(6)), Some(&true));
    /// ```
    pub fn compare<F>(&self, other: &LinearEquation, predicate: F) -> IntervalMap<bool>
    where
        F: Fn(f64, f64) -> bool,
    {
        let holds = |t: Duration| predicate(self.value_at(t), other.value_at(t));
        match self.intersection_time(other) {
            None => IntervalMap::constant(holds(self.initial_time)),
            Some(crossing) => IntervalMap::of([
                Segment::new(
                    Interval::between(
                        Duration::MIN,
                        Inclusivity::Inclusive,
                        crossing,
                        Inclusivity::Exclusive,
                    ),
                    holds(crossing.saturating_sub(Duration::SECOND)),
                ),
                Segment::new(Interval::at(crossing), holds(crossing)),
                Segment::new(
                    Interval::between(
                        crossing,
                        Inclusivity::Exclusive,
                        Duration::MAX,
                        Inclusivity::Inclusive,
                    ),
                    holds(crossing.saturating_add(Duration::SECOND)),
                ),
            ]),
        }
    }
}

/// Lines are equal when they agree at `t = 0` and `t = 1 min`.
impl PartialEq for LinearEquation {
    fn eq(&self, other: &Self) -> bool {
        self.value_at(Duration::ZERO) == other.value_at(Duration::ZERO)
            && self.value_at(Duration::MINUTE) == other.value_at(Duration::MINUTE)
    }
}

impl Display for LinearEquation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LinearEquation({} + {}/s * (t - {}))",
            self.initial_value, self.rate, self.initial_time
        )
    }
}

/// Resource dynamics as reported by the simulator: a value and its rate of
/// change at the start of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealDynamics {
    pub initial: f64,
    pub rate: f64,
}

impl RealDynamics {
    #[inline]
    pub const fn new(initial: f64, rate: f64) -> Self {
        Self { initial, rate }
    }

    #[inline]
    pub const fn constant(initial: f64) -> Self {
        Self::new(initial, 0.0)
    }
}

impl LinearEquation {
    /// The line described by `dynamics` for a segment starting at `start`.
    #[inline]
    pub const fn from_real_dynamics(start: Duration, dynamics: &RealDynamics) -> Self {
        Self::new(start, dynamics.initial, dynamics.rate)
    }
}

/// Arithmetic and comparisons on any `Profile<LinearEquation>`.
pub trait LinearProfileOps: Profile<LinearEquation> + Sized {
    fn plus<Q: Profile<LinearEquation>>(self, other: Q) -> impl Profile<LinearEquation> {
        map2_values(
            self,
            other,
            combine_or_none(|l: &LinearEquation, r: &LinearEquation| l.plus(r)),
        )
    }

    fn minus<Q: Profile<LinearEquation>>(self, other: Q) -> impl Profile<LinearEquation> {
        map2_values(
            self,
            other,
            combine_or_none(|l: &LinearEquation, r: &LinearEquation| l.minus(r)),
        )
    }

    fn times(self, factor: f64) -> impl Profile<LinearEquation> {
        self.map_values(move |l: &LinearEquation| l.times(factor))
    }

    fn negate(self) -> impl Profile<LinearEquation> {
        self.map_values(|l: &LinearEquation| l.negate())
    }

    /// The piecewise-constant rate of change, per second.
    fn rate(self) -> impl Profile<f64> {
        self.map_values(|l: &LinearEquation| l.rate())
    }

    fn less_than<Q: Profile<LinearEquation>>(self, other: Q) -> impl Profile<bool> {
        self.flat_compare_values(other, |l: &LinearEquation, r: &LinearEquation| {
            l.compare(r, |a, b| a < b)
        })
    }

    fn less_than_or_equal<Q: Profile<LinearEquation>>(self, other: Q) -> impl Profile<bool> {
        self.flat_compare_values(other, |l: &LinearEquation, r: &LinearEquation| {
            l.compare(r, |a, b| a <= b)
        })
    }

    fn greater_than<Q: Profile<LinearEquation>>(self, other: Q) -> impl Profile<bool> {
        self.flat_compare_values(other, |l: &LinearEquation, r: &LinearEquation| {
            l.compare(r, |a, b| a > b)
        })
    }

    fn greater_than_or_equal<Q: Profile<LinearEquation>>(self, other: Q) -> impl Profile<bool> {
        self.flat_compare_values(other, |l: &LinearEquation, r: &LinearEquation| {
            l.compare(r, |a, b| a >= b)
        })
    }

    fn equal_to_linear<Q: Profile<LinearEquation>>(self, other: Q) -> impl Profile<bool> {
        self.flat_compare_values(other, |l: &LinearEquation, r: &LinearEquation| {
            l.compare(r, |a, b| a == b)
        })
    }

    fn not_equal_to_linear<Q: Profile<LinearEquation>>(self, other: Q) -> impl Profile<bool> {
        self.flat_compare_values(other, |l: &LinearEquation, r: &LinearEquation| {
            l.compare(r, |a, b| a != b)
        })
    }

    /// True where the value is changing: inside sloped segments, and at a
    /// boundary where two meeting segments disagree on the value.
    ///
    /// A segment after a gap has an unknown first point, which is left unset.
    /// At the start of the bounds the first point is true when the segment
    /// there is sloped.
    fn linear_change_points(self) -> impl Profile<bool> {
        from_fn(move |bounds: Interval| {
            let mut out = Vec::new();
            let mut previous: Option<Segment<LinearEquation>> = None;
            for segment in self.stream(bounds) {
                let interval = segment.interval();
                let line = *segment.value();
                let start = interval.start();
                let left_edge = match &previous {
                    Some(prev) if prev.interval().meets(&interval) => {
                        Some(prev.value().value_at(start) != line.value_at(start))
                    }
                    Some(_) => None,
                    None if interval.compare_starts(&bounds).is_eq() => Some(line.rate() != 0.0),
                    None => None,
                };
                if let Some(edge) = left_edge {
                    out.push(Segment::new(Interval::at(start), edge));
                }
                let interior = Interval::between(
                    start,
                    Inclusivity::Exclusive,
                    interval.end(),
                    interval.end_inclusivity(),
                );
                if !interior.is_empty() {
                    out.push(Segment::new(interior, line.rate() != 0.0));
                }
                previous = Some(segment);
            }
            out
        })
    }
}

impl<P: Profile<LinearEquation>> LinearProfileOps for P {}

/// Restricts `profile` to lie between `lower` and `upper`, evaluated over
/// `bounds`.
///
/// The result is defined where all three inputs are. Fails if `upper` drops
/// below `lower` anywhere within `bounds`.
#[instrument(level = "debug", skip(profile, lower, upper))]
pub fn clamp<P, L, U>(
    profile: &P,
    lower: &L,
    upper: &U,
    bounds: Interval,
) -> Result<IntervalMap<LinearEquation>, ProfileError>
where
    P: Profile<LinearEquation> + ?Sized,
    L: Profile<LinearEquation> + ?Sized,
    U: Profile<LinearEquation> + ?Sized,
{
    let inverted = upper.less_than(lower).evaluate(bounds);
    if let Some(interval) = inverted.first_interval_equal_to(&true) {
        return Err(ClampBoundsInvertedError::new(interval).into());
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Pick {
        Lower,
        Upper,
        Value,
    }

    let pick = map2_values(
        profile.less_than(lower),
        profile.greater_than(upper),
        from_cases(
            |below: &bool| Some(if *below { Pick::Lower } else { Pick::Value }),
            |above: &bool| Some(if *above { Pick::Upper } else { Pick::Value }),
            |below: &bool, above: &bool| {
                Some(match (*below, *above) {
                    (true, _) => Pick::Lower,
                    (_, true) => Pick::Upper,
                    _ => Pick::Value,
                })
            },
        ),
    );
    let candidates = map2_values(
        map2_values(
            profile,
            lower,
            combine_or_none(|v: &LinearEquation, l: &LinearEquation| (*v, *l)),
        ),
        upper,
        combine_or_none(|&(v, l): &(LinearEquation, LinearEquation), u: &LinearEquation| (v, l, *u)),
    );

    Ok(map2_values(
        pick,
        candidates,
        combine_or_none(
            |pick: &Pick, &(v, l, u): &(LinearEquation, LinearEquation, LinearEquation)| match pick {
                Pick::Lower => l,
                Pick::Upper => u,
                Pick::Value => v,
            },
        ),
    )
    .evaluate(bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::constant;

    #[inline]
    fn secs(s: i64) -> Duration {
        Duration::from_secs(s)
    }

    #[inline]
    fn co(a: i64, b: i64) -> Interval {
        Interval::closed_open(secs(a), secs(b))
    }

    #[test]
    fn test_value_at_and_shift() {
        let l = LinearEquation::new(secs(10), 5.0, 0.5);
        assert_eq!(l.value_at(secs(10)), 5.0);
        assert_eq!(l.value_at(secs(14)), 7.0);
        assert_eq!(l.value_at(secs(0)), 0.0);
        let shifted = l.shift_initial_time(secs(0));
        assert_eq!(shifted.initial_value(), 0.0);
        assert_eq!(shifted, l);
    }

    #[test]
    fn test_operational_equality() {
        let a = LinearEquation::new(secs(0), 0.0, 1.0);
        let b = LinearEquation::new(secs(30), 30.0, 1.0);
        assert_eq!(a, b);
        assert_ne!(a, LinearEquation::new(secs(0), 0.0, 2.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = LinearEquation::new(secs(0), 1.0, 2.0);
        let b = LinearEquation::new(secs(5), 0.0, -1.0);
        let sum = a.plus(&b);
        assert_eq!(sum.initial_time(), secs(0));
        assert_eq!(sum.value_at(secs(7)), a.value_at(secs(7)) + b.value_at(secs(7)));
        let diff = a.minus(&b);
        assert_eq!(diff.value_at(secs(3)), a.value_at(secs(3)) - b.value_at(secs(3)));
        assert_eq!(a.times(3.0).value_at(secs(2)), 15.0);
        assert_eq!(a.negate().rate(), -2.0);
    }

    #[test]
    fn test_crossing_scenario() {
        let left = LinearEquation::new(secs(0), 10.0, -1.0);
        let right = LinearEquation::new(secs(0), 0.0, 1.0);
        assert_eq!(left.intersection_time(&right), Some(secs(5)));

        let less = left.compare(&right, |l, r| l < r);
        assert_eq!(
            less,
            IntervalMap::of([
                Segment::new(
                    Interval::between(Duration::MIN, Inclusivity::Inclusive, secs(5), Inclusivity::Inclusive),
                    false
                ),
                Segment::new(
                    Interval::between(secs(5), Inclusivity::Exclusive, Duration::MAX, Inclusivity::Inclusive),
                    true
                ),
            ])
        );
        let le = left.compare(&right, |l, r| l <= r);
        assert_eq!(le.value_at(secs(5)), Some(&true));
        assert_eq!(le.value_at(secs(4)), Some(&false));
    }

    #[test]
    fn test_parallel_lines_are_constant() {
        let a = LinearEquation::new(secs(0), 1.0, 1.0);
        let b = LinearEquation::new(secs(0), 3.0, 1.0);
        assert_eq!(a.intersection_time(&b), None);
        assert_eq!(a.compare(&b, |l, r| l < r), IntervalMap::constant(true));
    }

    #[test]
    fn test_non_finite_is_no_crossing() {
        let a = LinearEquation::new(secs(0), f64::NAN, 1.0);
        let b = LinearEquation::new(secs(0), 0.0, 2.0);
        assert_eq!(a.intersection_time(&b), None);
        assert_eq!(a.compare(&b, |l, r| l < r), IntervalMap::constant(false));
        assert_eq!(a.compare(&b, |l, r| l >= r), IntervalMap::constant(false));
    }

    #[test]
    fn test_profile_comparison_within_segments() {
        let left = IntervalMap::of([
            Segment::new(co(0, 10), LinearEquation::new(secs(0), 10.0, -1.0)),
            Segment::new(co(10, 20), LinearEquation::constant(3.0)),
        ]);
        let right = IntervalMap::single(co(0, 20), LinearEquation::new(secs(0), 0.0, 1.0));
        let less = (&left).less_than(&right).evaluate(Interval::FOREVER);
        assert_eq!(
            less,
            IntervalMap::of([
                Segment::new(Interval::closed(secs(0), secs(5)), false),
                Segment::new(Interval::open(secs(5), secs(20)), true),
            ])
        );
    }

    #[test]
    fn test_profile_arithmetic_and_rate() {
        let a = IntervalMap::single(co(0, 10), LinearEquation::new(secs(0), 1.0, 1.0));
        let b = IntervalMap::single(co(5, 15), LinearEquation::constant(2.0));
        let sum = (&a).plus(&b).evaluate(Interval::FOREVER);
        assert_eq!(sum.len(), 1);
        assert_eq!(sum.value_at(secs(7)).map(|l| l.value_at(secs(7))), Some(10.0));

        let rate = (&a).minus(&b).rate().evaluate(Interval::FOREVER);
        assert_eq!(rate, IntervalMap::single(co(5, 10), 1.0));

        let scaled = (&a).times(2.0).negate().evaluate(Interval::FOREVER);
        assert_eq!(scaled.value_at(secs(1)).map(|l| l.value_at(secs(1))), Some(-4.0));
    }

    #[test]
    fn test_linear_change_points() {
        let p = IntervalMap::of([
            Segment::new(co(0, 5), LinearEquation::constant(1.0)),
            Segment::new(co(5, 10), LinearEquation::constant(2.0)),
            Segment::new(co(10, 15), LinearEquation::new(secs(10), 2.0, 1.0)),
        ]);
        let changes = (&p).linear_change_points().evaluate(co(0, 15));
        assert_eq!(changes.value_at(secs(0)), Some(&false));
        assert_eq!(changes.value_at(secs(3)), Some(&false));
        assert_eq!(changes.value_at(secs(5)), Some(&true));
        assert_eq!(changes.value_at(secs(10)), Some(&false));
        assert_eq!(changes.value_at(secs(12)), Some(&true));
    }

    #[test]
    fn test_clamp() {
        let p = IntervalMap::single(co(0, 20), LinearEquation::new(secs(0), 0.0, 1.0));
        let clamped = clamp(&p, &constant(LinearEquation::constant(5.0)), &constant(LinearEquation::constant(15.0)), co(0, 20))
            .unwrap();
        let at = |t: i64| clamped.value_at(secs(t)).map(|l| l.value_at(secs(t)));
        assert_eq!(at(2), Some(5.0));
        assert_eq!(at(10), Some(10.0));
        assert_eq!(at(18), Some(15.0));
    }

    #[test]
    fn test_clamp_inverted_bounds() {
        let p = IntervalMap::single(co(0, 20), LinearEquation::constant(1.0));
        let lower = IntervalMap::single(co(0, 20), LinearEquation::constant(5.0));
        let upper = IntervalMap::of([
            Segment::new(co(0, 10), LinearEquation::constant(6.0)),
            Segment::new(co(10, 20), LinearEquation::constant(4.0)),
        ]);
        let err = clamp(&p, &lower, &upper, co(0, 20)).unwrap_err();
        assert_eq!(
            err,
            ProfileError::ClampBoundsInverted(ClampBoundsInvertedError::new(co(10, 20)))
        );
    }
}
