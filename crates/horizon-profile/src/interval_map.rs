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

//! IntervalMap: canonical, sorted, non-overlapping sequence of labelled segments.
//!
//! Invariants (always held by a built map):
//!    - segments are sorted by start and mutually non-overlapping
//!    - no segment has an empty interval
//!    - two segments that meet never carry equal values
//!
//! Complexity:
//!    - `set`/`unset` on the builder: `O(log n + k)` to locate, `O(n)` to shift
//!    - `value_at`: `O(log n)`
//!    - streaming a window: `O(log n + k)`

use crate::{
    err::{BuilderConsumedError, BuilderOperation},
    profile::{Profile, SegmentStream},
};
use horizon_core::{interval::Interval, segment::Segment, time::Duration};
use std::fmt::Display;

/// A canonical piecewise assignment of values to time.
///
/// Maps are immutable once built; editing methods such as [`IntervalMap::assign`]
/// return a new map.
///
/// ## Invariants
///
/// 1.  **Sorted**: segments are in ascending order of their intervals.
/// 2.  **Disjoint**: no two segments share an instant.
/// 3.  **Coalesced**: segments that meet always have different values, e.g.
///     `[0s, 5s) = true` and `[5s, 8s] = true` become `[0s, 8s] = true`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalMap<V> {
    segments: Vec<Segment<V>>,
}

impl<V> Default for IntervalMap<V> {
    #[inline]
    fn default() -> Self {
        Self {
            segments: Vec::new(),
        }
    }
}

impl<V> IntervalMap<V> {
    #[inline]
    pub fn builder() -> IntervalMapBuilder<V> {
        IntervalMapBuilder::new()
    }

    /// A map with no segments.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Segment<V>] {
        &self.segments
    }

    #[inline]
    pub fn into_segments(self) -> Vec<Segment<V>> {
        self.segments
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Segment<V>> {
        self.segments.iter()
    }

    /// Returns the segment at `index`; negative indices count from the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use horizon_core::{interval::Interval, segment::Segment, time::Duration};
    /// use horizon_profile::interval_map::IntervalMap;
    ///
    /// let s = Duration::SECOND;
    /// let map = IntervalMap::of([
    ///     Segment::new(Interval::closed_open(Duration::ZERO, s), 1),
    ///     Segment::new(Interval::closed(s, s * 2), 2),
    /// ]);
    /// assert_eq!(map.get(-1).map(|seg| *seg.value()), Some(2));
    /// assert_eq!(map.get(0).map(|seg| *seg.value()), Some(1));
    /// assert!(map.get(2).is_none());
    /// ```
    pub fn get(&self, index: isize) -> Option<&Segment<V>> {
        let resolved = if index < 0 {
            self.segments.len().checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        self.segments.get(resolved)
    }

    #[inline]
    pub fn first(&self) -> Option<&Segment<V>> {
        self.segments.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Segment<V>> {
        self.segments.last()
    }

    #[inline]
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.segments.iter().map(Segment::interval)
    }

    /// The value in effect at `t`, if any.
    pub fn value_at(&self, t: Duration) -> Option<&V> {
        let idx = self
            .segments
            .partition_point(|seg| seg.interval().end() < t);
        self.segments[idx..]
            .iter()
            .take_while(|seg| seg.interval().start() <= t)
            .find(|seg| seg.interval().contains_point(t))
            .map(Segment::value)
    }

    /// Intervals whose value equals `value`, in order.
    pub fn iter_equal_to<'a>(&'a self, value: &'a V) -> impl Iterator<Item = Interval> + 'a
    where
        V: PartialEq,
    {
        self.segments
            .iter()
            .filter(move |seg| seg.value() == value)
            .map(Segment::interval)
    }

    #[inline]
    pub fn first_interval_equal_to(&self, value: &V) -> Option<Interval>
    where
        V: PartialEq,
    {
        self.iter_equal_to(value).next()
    }

    #[inline]
    pub fn last_interval_equal_to(&self, value: &V) -> Option<Interval>
    where
        V: PartialEq,
    {
        self.segments
            .iter()
            .rev()
            .find(|seg| seg.value() == value)
            .map(Segment::interval)
    }

    /// `true` if every segment agrees on a single value (or there are none).
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.segments.len() <= 1
    }
}

impl<V: Clone + PartialEq> IntervalMap<V> {
    /// Builds a map from segments in any order; later segments win where they overlap.
    pub fn of<I: IntoIterator<Item = Segment<V>>>(segments: I) -> Self {
        segments.into_iter().collect()
    }

    pub fn from_intervals<I: IntoIterator<Item = Interval>>(intervals: I, value: V) -> Self {
        let mut segments = Vec::new();
        for interval in intervals {
            set_segment(&mut segments, interval, value.clone());
        }
        Self { segments }
    }

    /// `value` over all of time.
    #[inline]
    pub fn constant(value: V) -> Self {
        Self::single(Interval::FOREVER, value)
    }

    #[inline]
    pub fn single(interval: Interval, value: V) -> Self {
        Self::from_intervals([interval], value)
    }

    /// A copy of this map with `value` assigned on `interval`.
    pub fn assign(&self, interval: Interval, value: V) -> Self {
        let mut segments = self.segments.clone();
        set_segment(&mut segments, interval, value);
        Self { segments }
    }

    /// A copy of this map with every segment of `other` written over it.
    pub fn assign_all(&self, other: &IntervalMap<V>) -> Self {
        let mut segments = self.segments.clone();
        for seg in other.iter() {
            set_segment(&mut segments, seg.interval(), seg.value().clone());
        }
        Self { segments }
    }

    /// A copy of this map with nothing assigned on `interval`.
    pub fn remove(&self, interval: Interval) -> Self {
        let mut segments = self.segments.clone();
        unset_segment(&mut segments, interval);
        Self { segments }
    }

    /// Keeps only the parts of this map inside `intervals`.
    pub fn select<I: IntoIterator<Item = Interval>>(&self, intervals: I) -> Self {
        let mut segments = Vec::new();
        for selection in intervals {
            for seg in self.stream_within(selection) {
                set_segment(&mut segments, seg.interval(), seg.into_value());
            }
        }
        Self { segments }
    }

    /// Wraps segments that are already canonical.
    pub(crate) fn from_canonical(segments: Vec<Segment<V>>) -> Self {
        debug_assert!(are_invariants_held(&segments));
        Self { segments }
    }

    /// Applies `f` to every value and re-coalesces.
    pub fn map_segments<W, F>(&self, f: F) -> IntervalMap<W>
    where
        W: Clone + PartialEq,
        F: Fn(&V, Interval) -> W,
    {
        self.segments
            .iter()
            .map(|seg| Segment::new(seg.interval(), f(seg.value(), seg.interval())))
            .collect()
    }

    fn stream_within(&self, bounds: Interval) -> impl Iterator<Item = Segment<V>> + '_ {
        let first = self
            .segments
            .partition_point(|seg| seg.interval().ends_strictly_before(&bounds));
        self.segments[first..]
            .iter()
            .take_while(move |seg| !seg.interval().starts_strictly_after(&bounds))
            .filter_map(move |seg| {
                let clipped = seg.interval().intersect(&bounds);
                (!clipped.is_empty()).then(|| seg.clone().with_interval(clipped))
            })
    }
}

impl<V: Clone + PartialEq> FromIterator<Segment<V>> for IntervalMap<V> {
    fn from_iter<I: IntoIterator<Item = Segment<V>>>(iter: I) -> Self {
        let mut segments = Vec::new();
        for seg in iter {
            let (interval, value) = seg.into_parts();
            set_segment(&mut segments, interval, value);
        }
        Self { segments }
    }
}

impl<V> IntoIterator for IntervalMap<V> {
    type Item = Segment<V>;
    type IntoIter = std::vec::IntoIter<Segment<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a IntervalMap<V> {
    type Item = &'a Segment<V>;
    type IntoIter = std::slice::Iter<'a, Segment<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl<V: Display> Display for IntervalMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IntervalMap[")?;
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", seg)?;
        }
        write!(f, "]")
    }
}

impl<V: Clone + PartialEq> Profile<V> for IntervalMap<V> {
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, V>
    where
        V: 'a,
    {
        Box::new(self.stream_within(bounds))
    }

    fn evaluate(&self, bounds: Interval) -> IntervalMap<V> {
        let covered = match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => bounds.contains(&first.interval().unify(&last.interval())),
            _ => true,
        };
        if covered {
            return self.clone();
        }
        self.stream_within(bounds).collect()
    }
}

/// Incrementally assembles an [`IntervalMap`].
///
/// Edits keep the working list canonical after every call. Once
/// [`build`](Self::build) has been called the builder is spent: further
/// `set`, `unset` or `build` calls return [`BuilderConsumedError`].
#[derive(Debug, Clone)]
pub struct IntervalMapBuilder<V> {
    segments: Option<Vec<Segment<V>>>,
}

impl<V> Default for IntervalMapBuilder<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntervalMapBuilder<V> {
    #[inline]
    pub fn new() -> Self {
        Self {
            segments: Some(Vec::new()),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Some(Vec::with_capacity(capacity)),
        }
    }

    #[inline]
    pub fn is_built(&self) -> bool {
        self.segments.is_none()
    }

    #[inline]
    fn working(
        &mut self,
        operation: BuilderOperation,
    ) -> Result<&mut Vec<Segment<V>>, BuilderConsumedError> {
        self.segments
            .as_mut()
            .ok_or(BuilderConsumedError::new(operation))
    }

    /// Freezes the working list. The builder cannot be used afterwards.
    pub fn build(&mut self) -> Result<IntervalMap<V>, BuilderConsumedError> {
        self.segments
            .take()
            .map(|segments| IntervalMap { segments })
            .ok_or(BuilderConsumedError::new(BuilderOperation::Build))
    }
}

impl<V: Clone + PartialEq> IntervalMapBuilder<V> {
    /// Assigns `value` on `interval`, overwriting whatever was there.
    ///
    /// Empty intervals are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use horizon_core::{interval::Interval, time::Duration};
    /// use horizon_profile::interval_map::IntervalMap;
    ///
    /// let s = Duration::SECOND;
    /// let mut builder = IntervalMap::builder();
    /// builder
    ///     .set(Interval::closed_open(Duration::ZERO, s * 5), true).unwrap()
    ///     .set(Interval::closed(s * 5, s * 8), true).unwrap();
    /// let map = builder.build().unwrap();
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.as_slice()[0].interval(), Interval::closed(Duration::ZERO, s * 8));
    /// assert!(builder.build().is_err());
    /// ```
    pub fn set(&mut self, interval: Interval, value: V) -> Result<&mut Self, BuilderConsumedError> {
        set_segment(self.working(BuilderOperation::Set)?, interval, value);
        Ok(self)
    }

    #[inline]
    pub fn set_segment(&mut self, segment: Segment<V>) -> Result<&mut Self, BuilderConsumedError> {
        let (interval, value) = segment.into_parts();
        self.set(interval, value)
    }

    /// Assigns every segment of `map`, in order.
    pub fn set_all(&mut self, map: &IntervalMap<V>) -> Result<&mut Self, BuilderConsumedError> {
        let segments = self.working(BuilderOperation::Set)?;
        for seg in map.iter() {
            set_segment(segments, seg.interval(), seg.value().clone());
        }
        Ok(self)
    }

    /// Removes any assignment on `interval`.
    ///
    /// Empty intervals are ignored.
    pub fn unset(&mut self, interval: Interval) -> Result<&mut Self, BuilderConsumedError> {
        unset_segment(self.working(BuilderOperation::Unset)?, interval);
        Ok(self)
    }
}

pub(crate) fn set_segment<V: Clone + PartialEq>(
    segments: &mut Vec<Segment<V>>,
    mut interval: Interval,
    value: V,
) {
    if interval.is_empty() {
        return;
    }

    let mut index = segments.partition_point(|seg| seg.interval().ends_strictly_before(&interval));

    if index < segments.len() && segments[index].interval().starts_before(&interval) {
        if *segments[index].value() == value {
            interval = segments.remove(index).interval().unify(&interval);
        } else {
            let existing = segments[index].interval();
            let prefix = existing.intersect(&interval.strict_lower_bounds());
            let suffix = existing.intersect(&interval.strict_upper_bounds());
            let kept = segments[index].value().clone();
            segments[index] = Segment::new(prefix, kept.clone());
            if !suffix.is_empty() {
                segments.insert(index + 1, Segment::new(suffix, kept));
            }
            index += 1;
        }
    }

    let consumed = segments[index..].partition_point(|seg| !seg.interval().ends_after(&interval));
    segments.drain(index..index + consumed);

    if index < segments.len() && !segments[index].interval().starts_strictly_after(&interval) {
        if *segments[index].value() == value {
            interval = segments.remove(index).interval().unify(&interval);
        } else {
            let trimmed = segments[index]
                .interval()
                .intersect(&interval.strict_upper_bounds());
            segments[index] = segments[index].clone().with_interval(trimmed);
        }
    }

    segments.insert(index, Segment::new(interval, value));
    debug_assert!(are_invariants_held(segments));
}

pub(crate) fn unset_segment<V: Clone + PartialEq>(segments: &mut Vec<Segment<V>>, interval: Interval) {
    if interval.is_empty() {
        return;
    }

    // Every candidate in first..last is visited exactly once and replaced by
    // its remainders on either side of `interval`.
    let first = segments.partition_point(|seg| seg.interval().ends_strictly_before(&interval));
    let last = first
        + segments[first..].partition_point(|seg| !seg.interval().starts_strictly_after(&interval));

    let remainders: Vec<Segment<V>> = segments[first..last]
        .iter()
        .flat_map(|seg| {
            seg.interval()
                .subtract(&interval)
                .into_iter()
                .map(move |part| seg.clone().with_interval(part))
        })
        .collect();
    segments.splice(first..last, remainders);
    debug_assert!(are_invariants_held(segments));
}

fn are_invariants_held<V: PartialEq>(segments: &[Segment<V>]) -> bool {
    segments.iter().all(|seg| !seg.interval().is_empty())
        && segments.windows(2).all(|w| {
            let (a, b) = (w[0].interval(), w[1].interval());
            a.ends_strictly_before(&b) || (a.meets(&b) && w[0].value() != w[1].value())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_core::interval::Inclusivity::{self, Exclusive, Inclusive};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::fmt::Debug;

    #[inline]
    fn s(secs: i64) -> Duration {
        Duration::from_secs(secs)
    }

    #[inline]
    fn iv(a: i64, ai: Inclusivity, b: i64, bi: Inclusivity) -> Interval {
        Interval::between(s(a), ai, s(b), bi)
    }

    #[inline]
    fn seg<V>(interval: Interval, value: V) -> Segment<V> {
        Segment::new(interval, value)
    }

    #[inline]
    fn assert_invariants<V: PartialEq + Debug>(map: &IntervalMap<V>) {
        assert!(
            are_invariants_held(map.as_slice()),
            "invariants violated: {:?}",
            map
        );
    }

    #[test]
    fn test_set_into_empty() {
        let map = IntervalMap::single(iv(0, Inclusive, 5, Exclusive), 1);
        assert_eq!(map.as_slice(), &[seg(iv(0, Inclusive, 5, Exclusive), 1)]);
    }

    #[test]
    fn test_set_empty_interval_is_noop() {
        let map = IntervalMap::single(iv(0, Inclusive, 5, Exclusive), 1);
        assert_eq!(map.assign(Interval::EMPTY, 9), map);
        assert_eq!(map.assign(iv(3, Exclusive, 3, Inclusive), 9), map);
        assert_eq!(map.remove(iv(4, Inclusive, 2, Inclusive)), map);
    }

    #[test]
    fn test_set_splits_existing_segment() {
        let map = IntervalMap::single(iv(0, Inclusive, 10, Inclusive), 'a')
            .assign(iv(3, Inclusive, 5, Exclusive), 'b');
        assert_eq!(
            map.as_slice(),
            &[
                seg(iv(0, Inclusive, 3, Exclusive), 'a'),
                seg(iv(3, Inclusive, 5, Exclusive), 'b'),
                seg(iv(5, Inclusive, 10, Inclusive), 'a'),
            ]
        );
        assert_invariants(&map);
    }

    #[test]
    fn test_set_unifies_meeting_equal_values() {
        let map = IntervalMap::single(iv(0, Inclusive, 5, Exclusive), true)
            .assign(iv(5, Inclusive, 8, Inclusive), true);
        assert_eq!(map.as_slice(), &[seg(iv(0, Inclusive, 8, Inclusive), true)]);

        let map = IntervalMap::single(iv(5, Exclusive, 8, Inclusive), true)
            .assign(iv(0, Inclusive, 5, Inclusive), true);
        assert_eq!(map.as_slice(), &[seg(iv(0, Inclusive, 8, Inclusive), true)]);
    }

    #[test]
    fn test_set_keeps_gap_between_equal_values() {
        let map = IntervalMap::single(iv(0, Inclusive, 5, Exclusive), true)
            .assign(iv(5, Exclusive, 8, Inclusive), true);
        assert_eq!(map.len(), 2);
        assert!(map.value_at(s(5)).is_none());
        assert_invariants(&map);
    }

    #[test]
    fn test_set_consumes_covered_segments() {
        let map = IntervalMap::of([
            seg(iv(0, Inclusive, 2, Exclusive), 1),
            seg(iv(2, Inclusive, 4, Exclusive), 2),
            seg(iv(4, Inclusive, 6, Exclusive), 3),
            seg(iv(6, Inclusive, 8, Exclusive), 4),
        ])
        .assign(iv(1, Inclusive, 7, Exclusive), 9);
        assert_eq!(
            map.as_slice(),
            &[
                seg(iv(0, Inclusive, 1, Exclusive), 1),
                seg(iv(1, Inclusive, 7, Exclusive), 9),
                seg(iv(7, Inclusive, 8, Exclusive), 4),
            ]
        );
    }

    #[test]
    fn test_set_extends_into_following_equal_value() {
        let map = IntervalMap::of([
            seg(iv(0, Inclusive, 5, Exclusive), 'a'),
            seg(iv(5, Inclusive, 10, Exclusive), 'b'),
        ])
        .assign(iv(3, Inclusive, 7, Exclusive), 'b');
        assert_eq!(
            map.as_slice(),
            &[
                seg(iv(0, Inclusive, 3, Exclusive), 'a'),
                seg(iv(3, Inclusive, 10, Exclusive), 'b'),
            ]
        );
    }

    #[test]
    fn test_set_single_point_inside_segment() {
        let map = IntervalMap::single(iv(0, Inclusive, 10, Inclusive), false)
            .assign(Interval::at(s(4)), true);
        assert_eq!(
            map.as_slice(),
            &[
                seg(iv(0, Inclusive, 4, Exclusive), false),
                seg(Interval::at(s(4)), true),
                seg(iv(4, Exclusive, 10, Inclusive), false),
            ]
        );
    }

    #[test]
    fn test_set_is_idempotent() {
        let base = IntervalMap::of([
            seg(iv(0, Inclusive, 3, Exclusive), 1),
            seg(iv(3, Inclusive, 9, Inclusive), 2),
        ]);
        let once = base.assign(iv(2, Exclusive, 5, Inclusive), 7);
        let twice = once.assign(iv(2, Exclusive, 5, Inclusive), 7);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unset_leaves_both_remainders() {
        let map = IntervalMap::single(iv(0, Inclusive, 5, Exclusive), true)
            .remove(iv(2, Inclusive, 3, Inclusive));
        assert_eq!(
            map.as_slice(),
            &[
                seg(iv(0, Inclusive, 2, Exclusive), true),
                seg(iv(3, Exclusive, 5, Exclusive), true),
            ]
        );
    }

    #[test]
    fn test_unset_across_several_segments() {
        let map = IntervalMap::of([
            seg(iv(0, Inclusive, 2, Exclusive), 1),
            seg(iv(2, Inclusive, 4, Exclusive), 2),
            seg(iv(4, Inclusive, 6, Exclusive), 3),
            seg(iv(7, Inclusive, 9, Exclusive), 4),
        ])
        .remove(iv(1, Exclusive, 7, Inclusive));
        assert_eq!(
            map.as_slice(),
            &[
                seg(iv(0, Inclusive, 1, Inclusive), 1),
                seg(iv(7, Exclusive, 9, Exclusive), 4),
            ]
        );
    }

    #[test]
    fn test_unset_whole_segment_and_neighbours_untouched() {
        let map = IntervalMap::of([
            seg(iv(0, Inclusive, 2, Exclusive), 1),
            seg(iv(2, Inclusive, 4, Exclusive), 2),
            seg(iv(4, Inclusive, 6, Exclusive), 3),
        ])
        .remove(iv(2, Inclusive, 4, Exclusive));
        assert_eq!(
            map.as_slice(),
            &[
                seg(iv(0, Inclusive, 2, Exclusive), 1),
                seg(iv(4, Inclusive, 6, Exclusive), 3),
            ]
        );
    }

    #[test]
    fn test_builder_rejects_reuse() {
        let mut builder = IntervalMapBuilder::new();
        builder.set(iv(0, Inclusive, 1, Inclusive), 1).unwrap();
        let map = builder.build().unwrap();
        assert_eq!(map.len(), 1);
        assert!(builder.is_built());

        let err = builder.set(iv(2, Inclusive, 3, Inclusive), 1).unwrap_err();
        assert_eq!(err.operation(), BuilderOperation::Set);
        let err = builder.unset(iv(0, Inclusive, 1, Inclusive)).unwrap_err();
        assert_eq!(err.operation(), BuilderOperation::Unset);
        let err = builder.build().unwrap_err();
        assert_eq!(err.operation(), BuilderOperation::Build);
    }

    #[test]
    fn test_get_with_negative_index() {
        let map = IntervalMap::of([
            seg(iv(0, Inclusive, 1, Exclusive), 'a'),
            seg(iv(1, Inclusive, 2, Exclusive), 'b'),
            seg(iv(2, Inclusive, 3, Exclusive), 'c'),
        ]);
        assert_eq!(map.get(-1).map(|x| *x.value()), Some('c'));
        assert_eq!(map.get(-3).map(|x| *x.value()), Some('a'));
        assert!(map.get(-4).is_none());
        assert!(map.get(3).is_none());
    }

    #[test]
    fn test_value_at() {
        let map = IntervalMap::of([
            seg(iv(0, Inclusive, 5, Exclusive), 'a'),
            seg(iv(5, Inclusive, 10, Exclusive), 'b'),
            seg(iv(10, Exclusive, 12, Inclusive), 'c'),
        ]);
        assert_eq!(map.value_at(s(0)), Some(&'a'));
        assert_eq!(map.value_at(s(5)), Some(&'b'));
        assert_eq!(map.value_at(s(10)), None);
        assert_eq!(map.value_at(s(12)), Some(&'c'));
        assert_eq!(map.value_at(s(-1)), None);
    }

    #[test]
    fn test_equal_to_queries() {
        let map = IntervalMap::of([
            seg(iv(0, Inclusive, 1, Exclusive), true),
            seg(iv(1, Inclusive, 2, Exclusive), false),
            seg(iv(2, Inclusive, 3, Exclusive), true),
        ]);
        assert_eq!(map.iter_equal_to(&true).count(), 2);
        assert_eq!(
            map.first_interval_equal_to(&true),
            Some(iv(0, Inclusive, 1, Exclusive))
        );
        assert_eq!(
            map.last_interval_equal_to(&true),
            Some(iv(2, Inclusive, 3, Exclusive))
        );
        assert_eq!(map.last_interval_equal_to(&false), Some(iv(1, Inclusive, 2, Exclusive)));
    }

    #[test]
    fn test_select_and_map_values() {
        let map = IntervalMap::single(iv(0, Inclusive, 10, Exclusive), 3);
        let picked = map.select([iv(1, Inclusive, 2, Inclusive), iv(5, Exclusive, 6, Exclusive)]);
        assert_eq!(picked.len(), 2);
        let parity = IntervalMap::of([
            seg(iv(0, Inclusive, 1, Exclusive), 1),
            seg(iv(1, Inclusive, 2, Exclusive), 3),
        ])
        .map_segments(|v, _| v % 2 == 1);
        assert_eq!(parity.as_slice(), &[seg(iv(0, Inclusive, 2, Exclusive), true)]);
    }

    #[test]
    fn test_stream_clips_to_bounds() {
        let map = IntervalMap::of([
            seg(iv(0, Inclusive, 5, Exclusive), 'a'),
            seg(iv(5, Inclusive, 10, Exclusive), 'b'),
        ]);
        let clipped: Vec<_> = map.stream(iv(3, Exclusive, 5, Inclusive)).collect();
        assert_eq!(
            clipped,
            vec![
                seg(iv(3, Exclusive, 5, Exclusive), 'a'),
                seg(Interval::at(s(5)), 'b'),
            ]
        );
        assert_eq!(map.stream(iv(10, Inclusive, 20, Inclusive)).count(), 0);
    }

    #[test]
    fn test_evaluate_round_trip() {
        let map = IntervalMap::of([
            seg(iv(0, Inclusive, 5, Exclusive), 1),
            seg(iv(5, Inclusive, 8, Inclusive), 2),
            seg(iv(9, Exclusive, 12, Exclusive), 1),
        ]);
        assert_eq!(map.evaluate(Interval::FOREVER), map);
        let bounds = iv(4, Inclusive, 10, Inclusive);
        let expected = IntervalMap::of([
            seg(iv(4, Inclusive, 5, Exclusive), 1),
            seg(iv(5, Inclusive, 8, Inclusive), 2),
            seg(iv(9, Exclusive, 10, Inclusive), 1),
        ]);
        assert_eq!(map.evaluate(bounds), expected);
    }

    #[test]
    fn test_display() {
        let map = IntervalMap::single(Interval::at(s(1)), 7);
        assert_eq!(
            map.to_string(),
            "IntervalMap[Segment(Interval[+00:00:01.000000, +00:00:01.000000] -> 7)]"
        );
    }

    fn random_interval(rng: &mut impl Rng) -> Interval {
        let a = rng.random_range(0..40);
        let b = rng.random_range(a..=40);
        let incl = |flag: bool| if flag { Inclusive } else { Exclusive };
        Interval::between(s(a), incl(rng.random_bool(0.5)), s(b), incl(rng.random_bool(0.5)))
    }

    #[test]
    fn test_random_edits_hold_invariants_and_match_pointwise_model() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let mut builder = IntervalMapBuilder::new();
            // Pointwise reference: value per half-second sample.
            let mut model: Vec<Option<u8>> = vec![None; 81];
            for _ in 0..12 {
                let interval = random_interval(&mut rng);
                if rng.random_bool(0.7) {
                    let value = rng.random_range(0..3u8);
                    builder.set(interval, value).unwrap();
                    for (k, slot) in model.iter_mut().enumerate() {
                        if interval.contains_point(Duration::from_millis(k as i64 * 500)) {
                            *slot = Some(value);
                        }
                    }
                } else {
                    builder.unset(interval).unwrap();
                    for (k, slot) in model.iter_mut().enumerate() {
                        if interval.contains_point(Duration::from_millis(k as i64 * 500)) {
                            *slot = None;
                        }
                    }
                }
            }
            let map = builder.build().unwrap();
            assert_invariants(&map);
            for (k, expected) in model.iter().enumerate() {
                let t = Duration::from_millis(k as i64 * 500);
                assert_eq!(map.value_at(t).copied(), *expected, "at {} in {:?}", t, map);
            }
        }
    }
}
