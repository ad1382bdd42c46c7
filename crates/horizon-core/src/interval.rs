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

//! Intervals of time with independently inclusive or exclusive bounds.
//!
//! Every empty interval is normalized to [`Interval::EMPTY`] on construction,
//! so structural equality is also semantic equality.

use crate::time::Duration;
use std::{cmp::Ordering, fmt::Display};

/// Whether an interval bound includes the bounding instant itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inclusivity {
    Inclusive,
    Exclusive,
}

impl Inclusivity {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Inclusivity::Inclusive => Inclusivity::Exclusive,
            Inclusivity::Exclusive => Inclusivity::Inclusive,
        }
    }

    #[inline]
    pub const fn is_inclusive(self) -> bool {
        matches!(self, Inclusivity::Inclusive)
    }

    /// `true` if `self` admits fewer instants than `other` at the same bound.
    #[inline]
    pub const fn is_more_restrictive_than(self, other: Inclusivity) -> bool {
        matches!(
            (self, other),
            (Inclusivity::Exclusive, Inclusivity::Inclusive)
        )
    }

    /// Inclusive only if both are.
    #[inline]
    pub const fn and(self, other: Inclusivity) -> Self {
        if self.is_inclusive() && other.is_inclusive() {
            Inclusivity::Inclusive
        } else {
            Inclusivity::Exclusive
        }
    }

    /// Inclusive if either is.
    #[inline]
    pub const fn or(self, other: Inclusivity) -> Self {
        if self.is_inclusive() || other.is_inclusive() {
            Inclusivity::Inclusive
        } else {
            Inclusivity::Exclusive
        }
    }
}

/// A possibly empty, possibly unbounded range of time.
///
/// Bounds are [`Duration`] offsets; [`Duration::MIN`] and [`Duration::MAX`]
/// act as the unbounded past and future.
///
/// # Examples
///
/// ```
/// use horizon_core::interval::Interval;
/// use horizon_core::time::Duration;
///
/// let s = Duration::SECOND;
/// let a = Interval::closed_open(Duration::ZERO, s * 5);
/// assert!(a.contains_point(Duration::ZERO));
/// assert!(!a.contains_point(s * 5));
///
/// let b = Interval::closed(s * 5, s * 10);
/// assert!(a.meets(&b));
/// assert!(a.intersect(&b).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Duration,
    end: Duration,
    start_inclusivity: Inclusivity,
    end_inclusivity: Inclusivity,
}

/// The result of removing one interval from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalDifference {
    Empty,
    One(Interval),
    Two(Interval, Interval),
}

impl IntoIterator for IntervalDifference {
    type Item = Interval;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<Interval>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        let parts = match self {
            IntervalDifference::Empty => [None, None],
            IntervalDifference::One(a) => [Some(a), None],
            IntervalDifference::Two(a, b) => [Some(a), Some(b)],
        };
        parts.into_iter().flatten()
    }
}

impl Interval {
    pub const EMPTY: Interval = Interval {
        start: Duration::ZERO,
        end: Duration::ZERO,
        start_inclusivity: Inclusivity::Inclusive,
        end_inclusivity: Inclusivity::Exclusive,
    };

    pub const FOREVER: Interval = Interval {
        start: Duration::MIN,
        end: Duration::MAX,
        start_inclusivity: Inclusivity::Inclusive,
        end_inclusivity: Inclusivity::Inclusive,
    };

    /// Creates an interval from explicit bounds.
    ///
    /// Returns [`Interval::EMPTY`] if the bounds describe no instant.
    #[inline]
    pub fn between(
        start: Duration,
        start_inclusivity: Inclusivity,
        end: Duration,
        end_inclusivity: Inclusivity,
    ) -> Self {
        let empty = end < start
            || (start == end
                && !(start_inclusivity.is_inclusive() && end_inclusivity.is_inclusive()));
        if empty {
            return Self::EMPTY;
        }
        Interval {
            start,
            end,
            start_inclusivity,
            end_inclusivity,
        }
    }

    #[inline]
    pub fn closed(start: Duration, end: Duration) -> Self {
        Self::between(start, Inclusivity::Inclusive, end, Inclusivity::Inclusive)
    }

    #[inline]
    pub fn open(start: Duration, end: Duration) -> Self {
        Self::between(start, Inclusivity::Exclusive, end, Inclusivity::Exclusive)
    }

    #[inline]
    pub fn closed_open(start: Duration, end: Duration) -> Self {
        Self::between(start, Inclusivity::Inclusive, end, Inclusivity::Exclusive)
    }

    #[inline]
    pub fn open_closed(start: Duration, end: Duration) -> Self {
        Self::between(start, Inclusivity::Exclusive, end, Inclusivity::Inclusive)
    }

    /// The single instant `{t}`.
    #[inline]
    pub fn at(t: Duration) -> Self {
        Self::closed(t, t)
    }

    /// `[t, MAX]`.
    #[inline]
    pub fn from_start(t: Duration) -> Self {
        Self::closed(t, Duration::MAX)
    }

    #[inline]
    pub const fn start(&self) -> Duration {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Duration {
        self.end
    }

    #[inline]
    pub const fn start_inclusivity(&self) -> Inclusivity {
        self.start_inclusivity
    }

    #[inline]
    pub const fn end_inclusivity(&self) -> Inclusivity {
        self.end_inclusivity
    }

    #[inline]
    pub const fn includes_start(&self) -> bool {
        self.start_inclusivity.is_inclusive()
    }

    #[inline]
    pub const fn includes_end(&self) -> bool {
        self.end_inclusivity.is_inclusive()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        !self.is_empty() && self.start == self.end
    }

    /// `true` if either bound sits on a sentinel.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        !self.is_empty() && (self.start.is_min() || self.end.is_max())
    }

    /// The span `end - start`, saturating for unbounded intervals.
    #[inline]
    pub fn duration(&self) -> Duration {
        if self.is_empty() {
            return Duration::ZERO;
        }
        self.end.saturating_sub(self.start)
    }

    pub fn contains_point(&self, t: Duration) -> bool {
        if self.is_empty() {
            return false;
        }
        let after_start = self.start < t || (self.start == t && self.includes_start());
        let before_end = t < self.end || (t == self.end && self.includes_end());
        after_start && before_end
    }

    /// `true` if every instant of `other` is in `self`. The empty interval is
    /// contained in everything.
    #[inline]
    pub fn contains(&self, other: &Interval) -> bool {
        self.intersect(other) == *other
    }

    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Orders starts by time; at equal times an inclusive start comes first.
    pub fn compare_starts(&self, other: &Interval) -> Ordering {
        self.start.cmp(&other.start).then_with(|| {
            match (self.start_inclusivity, other.start_inclusivity) {
                (Inclusivity::Inclusive, Inclusivity::Exclusive) => Ordering::Less,
                (Inclusivity::Exclusive, Inclusivity::Inclusive) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        })
    }

    /// Orders ends by time; at equal times an exclusive end comes first.
    pub fn compare_ends(&self, other: &Interval) -> Ordering {
        self.end.cmp(&other.end).then_with(|| {
            match (self.end_inclusivity, other.end_inclusivity) {
                (Inclusivity::Exclusive, Inclusivity::Inclusive) => Ordering::Less,
                (Inclusivity::Inclusive, Inclusivity::Exclusive) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        })
    }

    #[inline]
    pub fn starts_before(&self, other: &Interval) -> bool {
        self.compare_starts(other) == Ordering::Less
    }

    #[inline]
    pub fn ends_after(&self, other: &Interval) -> bool {
        self.compare_ends(other) == Ordering::Greater
    }

    /// `true` if `self` ends before `other` starts with at least one instant
    /// between them.
    ///
    /// Intervals that [`meets`](Self::meets) are not strictly before each other.
    pub fn ends_strictly_before(&self, other: &Interval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.end < other.start
            || (self.end == other.start && !self.includes_end() && !other.includes_start())
    }

    #[inline]
    pub fn starts_strictly_after(&self, other: &Interval) -> bool {
        other.ends_strictly_before(self)
    }

    /// `true` if `self` ends exactly where `other` begins, with no gap and no
    /// shared instant.
    pub fn meets(&self, other: &Interval) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.end == other.start
            && self.end_inclusivity != other.start_inclusivity
    }

    #[inline]
    pub fn met_by(&self, other: &Interval) -> bool {
        other.meets(self)
    }

    #[inline]
    pub fn is_adjacent_to(&self, other: &Interval) -> bool {
        self.meets(other) || self.met_by(other)
    }

    /// The instants common to both intervals.
    ///
    /// # Examples
    ///
    /// ```
    /// use horizon_core::interval::Interval;
    /// use horizon_core::time::Duration;
    ///
    /// let s = Duration::SECOND;
    /// let a = Interval::closed(Duration::ZERO, s * 5);
    /// let b = Interval::open(s * 3, s * 8);
    /// assert_eq!(a.intersect(&b), Interval::open_closed(s * 3, s * 5));
    /// ```
    pub fn intersect(&self, other: &Interval) -> Interval {
        if self.is_empty() || other.is_empty() {
            return Self::EMPTY;
        }
        let (start, start_inclusivity) = match self.start.cmp(&other.start) {
            Ordering::Greater => (self.start, self.start_inclusivity),
            Ordering::Less => (other.start, other.start_inclusivity),
            Ordering::Equal => (
                self.start,
                self.start_inclusivity.and(other.start_inclusivity),
            ),
        };
        let (end, end_inclusivity) = match self.end.cmp(&other.end) {
            Ordering::Less => (self.end, self.end_inclusivity),
            Ordering::Greater => (other.end, other.end_inclusivity),
            Ordering::Equal => (self.end, self.end_inclusivity.and(other.end_inclusivity)),
        };
        Self::between(start, start_inclusivity, end, end_inclusivity)
    }

    /// The smallest interval covering both, including any gap between them.
    pub fn unify(&self, other: &Interval) -> Interval {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let (start, start_inclusivity) = match self.start.cmp(&other.start) {
            Ordering::Less => (self.start, self.start_inclusivity),
            Ordering::Greater => (other.start, other.start_inclusivity),
            Ordering::Equal => (self.start, self.start_inclusivity.or(other.start_inclusivity)),
        };
        let (end, end_inclusivity) = match self.end.cmp(&other.end) {
            Ordering::Greater => (self.end, self.end_inclusivity),
            Ordering::Less => (other.end, other.end_inclusivity),
            Ordering::Equal => (self.end, self.end_inclusivity.or(other.end_inclusivity)),
        };
        Self::between(start, start_inclusivity, end, end_inclusivity)
    }

    /// Every instant strictly before `self` starts.
    #[inline]
    pub fn strict_lower_bounds(&self) -> Interval {
        Self::between(
            Duration::MIN,
            Inclusivity::Inclusive,
            self.start,
            self.start_inclusivity.opposite(),
        )
    }

    /// Every instant strictly after `self` ends.
    #[inline]
    pub fn strict_upper_bounds(&self) -> Interval {
        Self::between(
            self.end,
            self.end_inclusivity.opposite(),
            Duration::MAX,
            Inclusivity::Inclusive,
        )
    }

    /// Removes the instants of `other` from `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use horizon_core::interval::{Interval, IntervalDifference};
    /// use horizon_core::time::Duration;
    ///
    /// let s = Duration::SECOND;
    /// let whole = Interval::closed_open(Duration::ZERO, s * 5);
    /// let hole = Interval::closed(s * 2, s * 3);
    /// assert_eq!(
    ///     whole.subtract(&hole),
    ///     IntervalDifference::Two(
    ///         Interval::closed_open(Duration::ZERO, s * 2),
    ///         Interval::open(s * 3, s * 5),
    ///     )
    /// );
    /// ```
    pub fn subtract(&self, other: &Interval) -> IntervalDifference {
        if self.is_empty() {
            return IntervalDifference::Empty;
        }
        if !self.overlaps(other) {
            return IntervalDifference::One(*self);
        }
        let left = self.intersect(&other.strict_lower_bounds());
        let right = self.intersect(&other.strict_upper_bounds());
        match (left.is_empty(), right.is_empty()) {
            (true, true) => IntervalDifference::Empty,
            (false, true) => IntervalDifference::One(left),
            (true, false) => IntervalDifference::One(right),
            (false, false) => IntervalDifference::Two(left, right),
        }
    }

    #[inline]
    pub fn shift_by(&self, delta: Duration) -> Interval {
        self.shift_bounds(delta, delta)
    }

    /// Moves the start by `start_delta` and the end by `end_delta`.
    ///
    /// Arithmetic saturates at the sentinels. A start at `Duration::MIN` or an
    /// end at `Duration::MAX` is unbounded and is not shifted, so an interval
    /// open toward either end of time keeps that side open after any shift.
    /// The result may be empty.
    pub fn shift_bounds(&self, start_delta: Duration, end_delta: Duration) -> Interval {
        if self.is_empty() {
            return Self::EMPTY;
        }
        let start = if self.start.is_min() {
            self.start
        } else {
            self.start.saturating_add(start_delta)
        };
        let end = if self.end.is_max() {
            self.end
        } else {
            self.end.saturating_add(end_delta)
        };
        Self::between(start, self.start_inclusivity, end, self.end_inclusivity)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "Interval(empty)");
        }
        let open = if self.includes_start() { '[' } else { '(' };
        let close = if self.includes_end() { ']' } else { ')' };
        write!(f, "Interval{}{}, {}{}", open, self.start, self.end, close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Inclusivity::{Exclusive, Inclusive};

    #[inline]
    fn s(secs: i64) -> Duration {
        Duration::from_secs(secs)
    }

    #[inline]
    fn iv(a: i64, ai: Inclusivity, b: i64, bi: Inclusivity) -> Interval {
        Interval::between(s(a), ai, s(b), bi)
    }

    #[test]
    fn test_emptiness_normalizes() {
        assert!(iv(5, Inclusive, 4, Inclusive).is_empty());
        assert!(iv(5, Exclusive, 5, Inclusive).is_empty());
        assert!(iv(5, Inclusive, 5, Exclusive).is_empty());
        assert!(!iv(5, Inclusive, 5, Inclusive).is_empty());
        assert_eq!(iv(7, Exclusive, 7, Exclusive), Interval::EMPTY);
        assert_eq!(iv(9, Inclusive, 2, Inclusive), Interval::EMPTY);
        assert!(Interval::at(s(3)).is_point());
    }

    #[test]
    fn test_contains_point_respects_inclusivity() {
        let i = Interval::open_closed(s(1), s(3));
        assert!(!i.contains_point(s(1)));
        assert!(i.contains_point(s(2)));
        assert!(i.contains_point(s(3)));
        assert!(!i.contains_point(s(3) + Duration::EPSILON));
        assert!(!Interval::EMPTY.contains_point(Duration::ZERO));
        assert!(Interval::FOREVER.contains_point(Duration::MIN));
        assert!(Interval::FOREVER.contains_point(Duration::MAX));
    }

    #[test]
    fn test_contains_interval() {
        let outer = Interval::closed(s(0), s(10));
        assert!(outer.contains(&Interval::open(s(0), s(10))));
        assert!(outer.contains(&Interval::EMPTY));
        assert!(!Interval::open(s(0), s(10)).contains(&outer));
        assert!(Interval::FOREVER.contains(&outer));
    }

    #[test]
    fn test_compare_starts_tie_break() {
        let incl = iv(1, Inclusive, 5, Inclusive);
        let excl = iv(1, Exclusive, 5, Inclusive);
        assert_eq!(incl.compare_starts(&excl), Ordering::Less);
        assert_eq!(excl.compare_starts(&incl), Ordering::Greater);
        assert_eq!(incl.compare_starts(&incl), Ordering::Equal);
        assert!(incl.starts_before(&excl));
        assert!(!excl.starts_before(&incl));
        assert!(iv(0, Exclusive, 1, Exclusive).starts_before(&incl));
    }

    #[test]
    fn test_compare_ends_tie_break() {
        let incl = iv(1, Inclusive, 5, Inclusive);
        let excl = iv(1, Inclusive, 5, Exclusive);
        assert_eq!(incl.compare_ends(&excl), Ordering::Greater);
        assert_eq!(excl.compare_ends(&incl), Ordering::Less);
        assert!(incl.ends_after(&excl));
        assert!(!excl.ends_after(&incl));
        assert!(!incl.ends_after(&incl));
    }

    #[test]
    fn test_meets() {
        let a = iv(0, Inclusive, 5, Exclusive);
        let b = iv(5, Inclusive, 10, Inclusive);
        let c = iv(5, Exclusive, 10, Inclusive);
        let d = iv(0, Inclusive, 5, Inclusive);
        assert!(a.meets(&b));
        assert!(b.met_by(&a));
        assert!(d.meets(&c));
        assert!(!a.meets(&c), "gap at 5");
        assert!(!d.meets(&b), "shared instant at 5");
        assert!(!b.meets(&a));
        assert!(a.is_adjacent_to(&b) && b.is_adjacent_to(&a));
    }

    #[test]
    fn test_strict_ordering_predicates() {
        let a = iv(0, Inclusive, 5, Exclusive);
        assert!(a.ends_strictly_before(&iv(5, Exclusive, 6, Inclusive)));
        assert!(a.ends_strictly_before(&iv(6, Inclusive, 7, Inclusive)));
        assert!(!a.ends_strictly_before(&iv(5, Inclusive, 6, Inclusive)));
        assert!(!a.ends_strictly_before(&iv(4, Inclusive, 6, Inclusive)));
        assert!(iv(6, Inclusive, 7, Inclusive).starts_strictly_after(&a));
        assert!(!iv(5, Inclusive, 7, Inclusive).starts_strictly_after(&a));
        assert!(!Interval::EMPTY.ends_strictly_before(&a));
    }

    #[test]
    fn test_intersect_inclusivity_on_ties() {
        let a = iv(0, Inclusive, 5, Inclusive);
        let b = iv(0, Exclusive, 5, Exclusive);
        assert_eq!(a.intersect(&b), b);
        assert_eq!(
            a.intersect(&iv(5, Inclusive, 9, Inclusive)),
            Interval::at(s(5))
        );
        assert!(a.intersect(&iv(5, Exclusive, 9, Inclusive)).is_empty());
        assert!(a.intersect(&Interval::EMPTY).is_empty());
        assert_eq!(Interval::FOREVER.intersect(&a), a);
    }

    #[test]
    fn test_unify_is_hull() {
        let a = iv(0, Exclusive, 2, Exclusive);
        let b = iv(0, Inclusive, 5, Exclusive);
        assert_eq!(a.unify(&b), iv(0, Inclusive, 5, Exclusive));
        let c = iv(7, Exclusive, 9, Inclusive);
        assert_eq!(a.unify(&c), iv(0, Exclusive, 9, Inclusive));
        assert_eq!(Interval::EMPTY.unify(&c), c);
        assert_eq!(c.unify(&Interval::EMPTY), c);
    }

    #[test]
    fn test_strict_bounds() {
        let a = iv(2, Inclusive, 3, Exclusive);
        assert_eq!(
            a.strict_lower_bounds(),
            Interval::between(Duration::MIN, Inclusive, s(2), Exclusive)
        );
        assert_eq!(
            a.strict_upper_bounds(),
            Interval::between(s(3), Inclusive, Duration::MAX, Inclusive)
        );
        assert!(Interval::FOREVER.strict_lower_bounds().is_empty());
        assert!(Interval::FOREVER.strict_upper_bounds().is_empty());
    }

    #[test]
    fn test_subtract_cases() {
        let whole = iv(0, Inclusive, 10, Inclusive);
        assert_eq!(
            whole.subtract(&iv(0, Inclusive, 10, Inclusive)),
            IntervalDifference::Empty
        );
        assert_eq!(
            whole.subtract(&iv(20, Inclusive, 30, Inclusive)),
            IntervalDifference::One(whole)
        );
        assert_eq!(
            whole.subtract(&iv(0, Inclusive, 4, Exclusive)),
            IntervalDifference::One(iv(4, Inclusive, 10, Inclusive))
        );
        assert_eq!(
            whole.subtract(&iv(6, Exclusive, 12, Inclusive)),
            IntervalDifference::One(iv(0, Inclusive, 6, Inclusive))
        );
        assert_eq!(
            whole.subtract(&Interval::at(s(5))),
            IntervalDifference::Two(iv(0, Inclusive, 5, Exclusive), iv(5, Exclusive, 10, Inclusive))
        );
        assert_eq!(
            Interval::EMPTY.subtract(&whole),
            IntervalDifference::Empty
        );
        let parts: Vec<_> = whole.subtract(&Interval::at(s(5))).into_iter().collect();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_shift_saturates_and_keeps_sentinels() {
        let a = iv(1, Inclusive, 2, Exclusive);
        assert_eq!(a.shift_by(s(3)), iv(4, Inclusive, 5, Exclusive));
        assert_eq!(a.shift_bounds(s(0), s(-2)), Interval::EMPTY);
        assert_eq!(Interval::FOREVER.shift_by(s(10)), Interval::FOREVER);
        let tail = Interval::from_start(s(0));
        assert_eq!(tail.shift_by(s(-1)), Interval::from_start(s(-1)));
        let near_max = Interval::closed(Duration::MAX - s(1), Duration::MAX - Duration::EPSILON);
        assert_eq!(near_max.shift_by(s(5)), Interval::at(Duration::MAX));
    }

    #[test]
    fn test_shift_half_open_sentinel_anchored() {
        let head = Interval::closed_open(Duration::MIN, s(10));
        assert_eq!(head.shift_by(s(5)), Interval::closed_open(Duration::MIN, s(15)));
        assert_eq!(head.shift_by(s(-5)), Interval::closed_open(Duration::MIN, s(5)));
        assert_eq!(
            head.shift_bounds(s(-3), s(2)),
            Interval::closed_open(Duration::MIN, s(12))
        );
        let tail = Interval::open_closed(s(10), Duration::MAX);
        assert_eq!(tail.shift_by(s(-4)), Interval::open_closed(s(6), Duration::MAX));
        assert_eq!(tail.shift_bounds(s(1), s(-7)), Interval::open_closed(s(11), Duration::MAX));
        assert_eq!(tail.shift_by(s(-4)).end(), Duration::MAX);
    }

    #[test]
    fn test_duration() {
        assert_eq!(iv(1, Exclusive, 4, Exclusive).duration(), s(3));
        assert_eq!(Interval::at(s(1)).duration(), Duration::ZERO);
        assert_eq!(Interval::EMPTY.duration(), Duration::ZERO);
        assert_eq!(Interval::FOREVER.duration(), Duration::MAX);
        assert!(Interval::FOREVER.is_unbounded());
        assert!(!iv(0, Inclusive, 1, Inclusive).is_unbounded());
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::EMPTY.to_string(), "Interval(empty)");
        assert_eq!(
            iv(0, Inclusive, 5, Exclusive).to_string(),
            "Interval[+00:00:00.000000, +00:00:05.000000)"
        );
        assert_eq!(Interval::FOREVER.to_string(), "Interval[MIN, MAX]");
    }
}
