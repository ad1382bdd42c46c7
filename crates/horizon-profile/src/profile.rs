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

//! Lazy, composable profiles.
//!
//! A [`Profile`] is anything that can produce an ordered run of segments
//! within requested bounds. Nothing is computed until a caller asks for a
//! stream or an [`IntervalMap`]; combinators in [`ProfileExt`] only wrap their
//! inputs.
//!
//! Streams are ordered by start and never overlap, but adjacent segments may
//! carry equal values. Collecting into an [`IntervalMap`] coalesces them.

use crate::{
    binary_op::{BinaryOperation, CombineOrNone, combine_or_none, from_cases},
    edges::EdgesIter,
    interval_map::IntervalMap,
    merge::Map2,
};
use horizon_core::{interval::Interval, segment::Segment};
use std::{marker::PhantomData, rc::Rc, sync::Arc};

/// An ordered, non-overlapping run of segments.
pub type SegmentStream<'a, V> = Box<dyn Iterator<Item = Segment<V>> + 'a>;

/// A type-erased profile.
pub type BoxedProfile<'a, V> = Box<dyn Profile<V> + 'a>;

pub trait Profile<V> {
    /// Streams every segment that intersects `bounds`, clipped to `bounds`.
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, V>
    where
        V: 'a;

    /// Collects the stream over `bounds` into a canonical map.
    fn evaluate(&self, bounds: Interval) -> IntervalMap<V>
    where
        V: Clone + PartialEq,
    {
        self.stream(bounds).collect()
    }
}

macro_rules! forward_profile {
    ($($ptr:ty),*) => {$(
        impl<V, P: Profile<V> + ?Sized> Profile<V> for $ptr {
            #[inline]
            fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, V>
            where
                V: 'a,
            {
                (**self).stream(bounds)
            }

            #[inline]
            fn evaluate(&self, bounds: Interval) -> IntervalMap<V>
            where
                V: Clone + PartialEq,
            {
                (**self).evaluate(bounds)
            }
        }
    )*};
}

forward_profile!(&P, Box<P>, Rc<P>, Arc<P>);

/// The same value for all time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant<V> {
    value: V,
}

impl<V: Clone> Profile<V> for Constant<V> {
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, V>
    where
        V: 'a,
    {
        if bounds.is_empty() {
            return Box::new(std::iter::empty());
        }
        Box::new(std::iter::once(Segment::new(bounds, self.value.clone())))
    }
}

#[inline]
pub fn constant<V>(value: V) -> Constant<V> {
    Constant { value }
}

/// `value` over `interval`, nothing elsewhere.
#[inline]
pub fn constant_on<V: Clone + PartialEq>(interval: Interval, value: V) -> IntervalMap<V> {
    IntervalMap::single(interval, value)
}

/// A profile computed by a closure from the requested bounds.
///
/// The closure must return segments in order and without overlaps; they are
/// clipped to the bounds before being streamed.
pub struct FromFn<F> {
    f: F,
}

impl<V, F> Profile<V> for FromFn<F>
where
    F: Fn(Interval) -> Vec<Segment<V>>,
{
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, V>
    where
        V: 'a,
    {
        Box::new((self.f)(bounds).into_iter().filter_map(move |segment| {
            let clipped = segment.interval().intersect(&bounds);
            (!clipped.is_empty()).then(|| segment.with_interval(clipped))
        }))
    }
}

#[inline]
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn { f }
}

/// Merges two profiles pointwise; see [`Map2`] for the stepping rules.
pub struct Map2Values<P, Q, Op, L, R> {
    left: P,
    right: Q,
    op: Op,
    _values: PhantomData<fn() -> (L, R)>,
}

impl<P, Q, Op, L, R, O> Profile<O> for Map2Values<P, Q, Op, L, R>
where
    P: Profile<L>,
    Q: Profile<R>,
    Op: BinaryOperation<L, R, O>,
{
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, O>
    where
        O: 'a,
    {
        Box::new(Map2::new(
            self.left.stream(bounds),
            self.right.stream(bounds),
            &self.op,
        ))
    }
}

/// Merges `left` and `right` with `op`.
///
/// # Examples
///
/// ```
/// use horizon_core::prelude::*;
/// use horizon_profile::{binary_op::combine_or_none, interval_map::IntervalMap, profile::*};
///
/// let a = IntervalMap::single(Interval::closed_open(Duration::ZERO, Duration::from_secs(4)), 1);
/// let b = IntervalMap::single(Interval::closed_open(Duration::from_secs(2), Duration::from_secs(6)), 10);
/// let sum = map2_values(&a, &b, combine_or_none(|l: &i32, r: &i32| l + r)).evaluate(Interval::FOREVER);
/// assert_eq!(sum.len(), 1);
/// assert_eq!(sum.value_at(Duration::from_secs(3)), Some(&11));
/// ```
#[inline]
pub fn map2_values<P, Q, Op, L, R>(left: P, right: Q, op: Op) -> Map2Values<P, Q, Op, L, R>
where
    P: Profile<L>,
    Q: Profile<R>,
{
    Map2Values {
        left,
        right,
        op,
        _values: PhantomData,
    }
}

/// Merges two profiles into a profile of profiles, then flattens it.
#[inline]
pub fn flat_map2_values<P, Q, Op, L, R, N>(
    left: P,
    right: Q,
    op: Op,
) -> Flatten<Map2Values<P, Q, Op, L, R>, N>
where
    P: Profile<L>,
    Q: Profile<R>,
{
    Flatten {
        inner: map2_values(left, right, op),
        _nested: PhantomData,
    }
}

pub struct MapValues<P, F, V> {
    inner: P,
    f: F,
    _value: PhantomData<fn() -> V>,
}

impl<P, F, V, W> Profile<W> for MapValues<P, F, V>
where
    P: Profile<V>,
    F: Fn(&V) -> W,
{
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, W>
    where
        W: 'a,
    {
        Box::new(self.inner.stream(bounds).map(move |segment| {
            let interval = segment.interval();
            Segment::new(interval, (self.f)(segment.value()))
        }))
    }
}

/// A profile whose values are themselves profiles, read through.
///
/// Each outer segment's value is streamed over that segment's interval.
pub struct Flatten<P, N> {
    inner: P,
    _nested: PhantomData<fn() -> N>,
}

impl<P, N, W> Profile<W> for Flatten<P, N>
where
    P: Profile<N>,
    N: Profile<W>,
{
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, W>
    where
        W: 'a,
    {
        Box::new(self.inner.stream(bounds).flat_map(|segment| {
            let interval = segment.interval();
            segment.value().stream(interval).collect::<Vec<_>>()
        }))
    }
}

pub struct FilterValues<P, F> {
    inner: P,
    predicate: F,
}

impl<P, F, V> Profile<V> for FilterValues<P, F>
where
    P: Profile<V>,
    F: Fn(&V) -> bool,
{
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, V>
    where
        V: 'a,
    {
        Box::new(
            self.inner
                .stream(bounds)
                .filter(move |segment| (self.predicate)(segment.value())),
        )
    }
}

pub struct FilterIntervals<P, F> {
    inner: P,
    predicate: F,
}

impl<P, F, V> Profile<V> for FilterIntervals<P, F>
where
    P: Profile<V>,
    F: Fn(Interval) -> bool,
{
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, V>
    where
        V: 'a,
    {
        Box::new(
            self.inner
                .stream(bounds)
                .filter(move |segment| (self.predicate)(segment.interval())),
        )
    }
}

/// A profile with one interval cut out of it.
pub struct Unset<P> {
    inner: P,
    cut: Interval,
}

impl<P, V> Profile<V> for Unset<P>
where
    P: Profile<V>,
    V: Clone,
{
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, V>
    where
        V: 'a,
    {
        let cut = self.cut;
        Box::new(self.inner.stream(bounds).flat_map(move |segment| {
            let (interval, value) = segment.into_parts();
            interval
                .subtract(&cut)
                .into_iter()
                .map(move |part| Segment::new(part, value.clone()))
        }))
    }
}

/// Transition markers; see [`ProfileExt::edges`].
pub struct Edges<P, Op, V> {
    inner: P,
    op: Op,
    _value: PhantomData<fn() -> V>,
}

impl<P, Op, V> Profile<bool> for Edges<P, Op, V>
where
    P: Profile<V>,
    Op: BinaryOperation<V, V, bool>,
{
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, bool>
    where
        bool: 'a,
    {
        Box::new(EdgesIter::new(self.inner.stream(bounds), &self.op, bounds))
    }
}

/// Combinators available on every sized profile.
pub trait ProfileExt<V>: Profile<V> + Sized {
    fn map_values<W, F>(self, f: F) -> MapValues<Self, F, V>
    where
        F: Fn(&V) -> W,
    {
        MapValues {
            inner: self,
            f,
            _value: PhantomData,
        }
    }

    /// Maps every value to a profile and reads each one through over the
    /// segment it came from.
    fn flat_map_values<N, F>(self, f: F) -> Flatten<MapValues<Self, F, V>, N>
    where
        F: Fn(&V) -> N,
    {
        Flatten {
            inner: self.map_values(f),
            _nested: PhantomData,
        }
    }

    fn flatten<N>(self) -> Flatten<Self, N>
    where
        Self: Profile<N>,
    {
        Flatten {
            inner: self,
            _nested: PhantomData,
        }
    }

    fn filter_values<F>(self, predicate: F) -> FilterValues<Self, F>
    where
        F: Fn(&V) -> bool,
    {
        FilterValues {
            inner: self,
            predicate,
        }
    }

    fn filter_intervals<F>(self, predicate: F) -> FilterIntervals<Self, F>
    where
        F: Fn(Interval) -> bool,
    {
        FilterIntervals {
            inner: self,
            predicate,
        }
    }

    /// Overlays `other`: its values win wherever it is defined.
    fn set<Q>(self, other: Q) -> impl Profile<V>
    where
        Q: Profile<V>,
        V: Clone,
    {
        map2_values(
            self,
            other,
            from_cases(
                |l: &V| Some(l.clone()),
                |r: &V| Some(r.clone()),
                |_: &V, r: &V| Some(r.clone()),
            ),
        )
    }

    /// Overlays `value` on `interval`, leaving the rest of `self` untouched.
    fn set_on(self, interval: Interval, value: V) -> impl Profile<V>
    where
        V: Clone + PartialEq,
    {
        self.set(constant_on(interval, value))
    }

    /// Fills the gaps of `self` from `default`.
    fn assign_gaps<Q>(self, default: Q) -> impl Profile<V>
    where
        Q: Profile<V>,
        V: Clone,
    {
        map2_values(
            self,
            default,
            from_cases(
                |l: &V| Some(l.clone()),
                |r: &V| Some(r.clone()),
                |l: &V, _: &V| Some(l.clone()),
            ),
        )
    }

    fn unset(self, interval: Interval) -> Unset<Self>
    where
        V: Clone,
    {
        Unset {
            inner: self,
            cut: interval,
        }
    }

    /// `true` where both sides are defined and satisfy `predicate`.
    fn compare_values<R, Q, F>(self, other: Q, predicate: F) -> Map2Values<Self, Q, CombineOrNone<F>, V, R>
    where
        Q: Profile<R>,
        F: Fn(&V, &R) -> bool,
    {
        map2_values(self, other, combine_or_none(predicate))
    }

    /// Like [`compare_values`](Self::compare_values), but the comparison may
    /// itself vary within the overlap.
    fn flat_compare_values<R, Q, F, N>(
        self,
        other: Q,
        compare: F,
    ) -> Flatten<Map2Values<Self, Q, CombineOrNone<F>, V, R>, N>
    where
        Q: Profile<R>,
        F: Fn(&V, &R) -> N,
        N: Profile<bool>,
    {
        flat_map2_values(self, other, combine_or_none(compare))
    }

    fn equal_to<Q>(self, other: Q) -> impl Profile<bool>
    where
        Q: Profile<V>,
        V: PartialEq,
    {
        self.compare_values(other, |l: &V, r: &V| l == r)
    }

    fn not_equal_to<Q>(self, other: Q) -> impl Profile<bool>
    where
        Q: Profile<V>,
        V: PartialEq,
    {
        self.compare_values(other, |l: &V, r: &V| l != r)
    }

    /// Marks transitions between segments.
    ///
    /// `op.combine(prev, next)` decides the point where two segments meet,
    /// `op.right(next)` the start of a segment with nothing before it and
    /// `op.left(prev)` the end of a segment with nothing after it. Interiors
    /// are `false`. Where the stream touches an edge of `bounds` the point is
    /// `false` if `bounds` includes it and absent otherwise.
    fn edges<Op>(self, op: Op) -> Edges<Self, Op, V>
    where
        Op: BinaryOperation<V, V, bool>,
    {
        Edges {
            inner: self,
            op,
            _value: PhantomData,
        }
    }

    /// `true` at every instant where the value changes.
    fn all_edges(self) -> impl Profile<bool>
    where
        V: PartialEq,
    {
        self.edges(from_cases(
            |_: &V| None,
            |_: &V| None,
            |l: &V, r: &V| Some(l != r),
        ))
    }

    /// `true` exactly where a `from` segment is immediately followed by a
    /// `to` segment.
    fn specific_edges(self, from: V, to: V) -> impl Profile<bool>
    where
        V: Clone + PartialEq,
    {
        let (from_left, to_right) = (from.clone(), to.clone());
        self.edges(from_cases(
            move |l: &V| (*l != from_left).then_some(false),
            move |r: &V| (*r != to_right).then_some(false),
            move |l: &V, r: &V| Some(*l == from && *r == to),
        ))
    }

    fn boxed<'a>(self) -> BoxedProfile<'a, V>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<V, P: Profile<V>> ProfileExt<V> for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_op::combine_or_identity;
    use horizon_core::time::Duration;

    #[inline]
    fn secs(s: i64) -> Duration {
        Duration::from_secs(s)
    }

    #[inline]
    fn co(a: i64, b: i64) -> Interval {
        Interval::closed_open(secs(a), secs(b))
    }

    fn steps() -> IntervalMap<i32> {
        IntervalMap::of([
            Segment::new(co(0, 2), 1),
            Segment::new(co(2, 4), 2),
            Segment::new(co(6, 8), 3),
        ])
    }

    #[test]
    fn test_constant_streams_bounds() {
        let c = constant(7u8);
        let out: Vec<_> = c.stream(co(1, 3)).collect();
        assert_eq!(out, vec![Segment::new(co(1, 3), 7)]);
        assert_eq!(c.stream(Interval::EMPTY).count(), 0);
    }

    #[test]
    fn test_constant_on() {
        let m = constant_on(co(1, 3), 'x');
        assert_eq!(m.len(), 1);
        assert_eq!(m.value_at(secs(2)), Some(&'x'));
        assert_eq!(m.value_at(secs(3)), None);
    }

    #[test]
    fn test_map_values_coalesces_on_evaluate() {
        let parity = steps().map_values(|v: &i32| v % 2 == 0).evaluate(Interval::FOREVER);
        assert_eq!(
            parity,
            IntervalMap::of([
                Segment::new(co(0, 2), false),
                Segment::new(co(2, 4), true),
                Segment::new(co(6, 8), false),
            ])
        );

        let all_true = steps().map_values(|_: &i32| true).evaluate(Interval::FOREVER);
        assert_eq!(all_true.len(), 2);
        assert_eq!(all_true.first().map(|s| s.interval()), Some(co(0, 4)));
    }

    #[test]
    fn test_stream_clips_to_bounds() {
        let m = steps();
        let out: Vec<_> = (&m).stream(co(1, 7)).collect();
        assert_eq!(
            out,
            vec![
                Segment::new(co(1, 2), 1),
                Segment::new(co(2, 4), 2),
                Segment::new(co(6, 7), 3),
            ]
        );
    }

    #[test]
    fn test_set_and_assign_gaps() {
        let base = steps();
        let overlay = IntervalMap::single(co(1, 7), 9);
        let set = (&base).set(&overlay).evaluate(Interval::FOREVER);
        assert_eq!(
            set,
            IntervalMap::of([
                Segment::new(co(0, 1), 1),
                Segment::new(co(1, 7), 9),
                Segment::new(co(7, 8), 3),
            ])
        );

        let filled = (&base).assign_gaps(constant(0)).evaluate(co(0, 10));
        assert_eq!(filled.value_at(secs(5)), Some(&0));
        assert_eq!(filled.value_at(secs(3)), Some(&2));
        assert_eq!(filled.value_at(secs(9)), Some(&0));
        assert_eq!(filled.intervals().last(), Some(co(8, 10)));
    }

    #[test]
    fn test_unset_matches_eager_remove() {
        let base = steps();
        let cut = Interval::closed(secs(1), secs(3));
        let lazy = (&base).unset(cut).evaluate(Interval::FOREVER);
        assert_eq!(lazy, base.remove(cut));
    }

    #[test]
    fn test_filters() {
        let big = steps().filter_values(|v: &i32| *v > 1).evaluate(Interval::FOREVER);
        assert_eq!(big.len(), 2);
        assert_eq!(big.value_at(secs(1)), None);

        let late = steps()
            .filter_intervals(|i: Interval| i.start() >= secs(2))
            .evaluate(Interval::FOREVER);
        assert_eq!(late.intervals().collect::<Vec<_>>(), vec![co(2, 4), co(6, 8)]);
    }

    #[test]
    fn test_equal_to_only_where_both_defined() {
        let a = steps();
        let b = IntervalMap::of([Segment::new(co(0, 3), 1), Segment::new(co(3, 10), 3)]);
        let eq = (&a).equal_to(&b).evaluate(Interval::FOREVER);
        assert_eq!(
            eq,
            IntervalMap::of([
                Segment::new(co(0, 2), true),
                Segment::new(co(2, 4), false),
                Segment::new(co(6, 8), true),
            ])
        );
        let ne = (&a).not_equal_to(&b).evaluate(Interval::FOREVER);
        assert_eq!(ne.value_at(secs(3)), Some(&true));
        assert_eq!(ne.value_at(secs(5)), None);
    }

    #[test]
    fn test_map2_sum_with_identity() {
        let a = steps();
        let b = IntervalMap::single(co(3, 7), 100);
        let sum = map2_values(&a, &b, combine_or_identity(|l: &i32, r: &i32| l + r))
            .evaluate(Interval::FOREVER);
        assert_eq!(
            sum,
            IntervalMap::of([
                Segment::new(co(0, 2), 1),
                Segment::new(co(2, 3), 2),
                Segment::new(co(3, 4), 102),
                Segment::new(co(4, 6), 100),
                Segment::new(co(6, 7), 103),
                Segment::new(co(7, 8), 3),
            ])
        );
    }

    #[test]
    fn test_flat_map_values_reads_nested_profiles() {
        let inner = IntervalMap::of([Segment::new(co(0, 5), 'a'), Segment::new(co(5, 10), 'b')]);
        let outer = IntervalMap::of([Segment::new(co(2, 4), 0), Segment::new(co(4, 8), 1)]);
        let picked = (&outer)
            .flat_map_values(|v: &i32| if *v == 0 { constant('z').boxed() } else { (&inner).boxed() })
            .evaluate(Interval::FOREVER);
        assert_eq!(
            picked,
            IntervalMap::of([
                Segment::new(co(2, 4), 'z'),
                Segment::new(co(4, 5), 'a'),
                Segment::new(co(5, 8), 'b'),
            ])
        );
    }

    #[test]
    fn test_flat_compare_values() {
        let a = IntervalMap::single(co(0, 10), 5);
        let b = IntervalMap::single(co(2, 8), 1);
        let cmp = (&a)
            .flat_compare_values(&b, |l: &i32, r: &i32| {
                IntervalMap::single(co(0, i64::from(*l)), l > r)
            })
            .evaluate(Interval::FOREVER);
        assert_eq!(cmp, IntervalMap::single(co(2, 5), true));
    }

    #[test]
    fn test_all_edges_marks_value_changes() {
        let m = IntervalMap::of([
            Segment::new(co(0, 2), 'a'),
            Segment::new(co(2, 4), 'b'),
            Segment::new(co(6, 8), 'b'),
        ]);
        let edges = (&m).all_edges().evaluate(co(0, 10));
        assert_eq!(edges.value_at(secs(2)), Some(&true));
        assert_eq!(edges.value_at(secs(1)), Some(&false));
        assert_eq!(edges.value_at(secs(0)), Some(&false));
        assert_eq!(edges.value_at(secs(4)), None);
        assert_eq!(edges.value_at(secs(5)), None);
        assert_eq!(edges.value_at(secs(7)), Some(&false));
    }

    #[test]
    fn test_specific_edges_only_matching_transition() {
        let m = IntervalMap::of([
            Segment::new(co(0, 2), 'a'),
            Segment::new(co(2, 4), 'b'),
            Segment::new(co(4, 6), 'a'),
        ]);
        let rising = (&m).specific_edges('a', 'b').evaluate(co(0, 6));
        assert_eq!(rising.value_at(secs(2)), Some(&true));
        assert_eq!(rising.value_at(secs(4)), Some(&false));
        assert_eq!(rising.iter_equal_to(&true).count(), 1);
    }

    #[test]
    fn test_from_fn_clips_to_bounds() {
        let ramp = from_fn(|bounds: Interval| {
            (0..10)
                .map(|i| Segment::new(co(i, i + 1), i))
                .filter(|s| s.interval().overlaps(&bounds))
                .collect::<Vec<_>>()
        });
        let out = ramp.evaluate(Interval::closed_open(Duration::from_millis(2500), secs(4)));
        assert_eq!(
            out,
            IntervalMap::of([
                Segment::new(Interval::closed_open(Duration::from_millis(2500), secs(3)), 2),
                Segment::new(co(3, 4), 3),
            ])
        );
    }

    #[test]
    fn test_set_on_splices_into_lazy_profile() {
        let ramp = from_fn(|bounds: Interval| {
            (0..10)
                .map(|i| Segment::new(co(i, i + 1), i))
                .filter(|s| s.interval().overlaps(&bounds))
                .collect::<Vec<_>>()
        });
        let patched = ramp
            .set_on(Interval::closed_open(Duration::from_millis(2500), secs(5)), -1)
            .evaluate(co(1, 7));
        assert_eq!(
            patched,
            IntervalMap::of([
                Segment::new(co(1, 2), 1),
                Segment::new(Interval::closed_open(secs(2), Duration::from_millis(2500)), 2),
                Segment::new(Interval::closed_open(Duration::from_millis(2500), secs(5)), -1),
                Segment::new(co(5, 6), 5),
                Segment::new(co(6, 7), 6),
            ])
        );
    }

    #[test]
    fn test_pointer_profiles_forward() {
        let m = steps();
        let rc = Rc::new(m.clone());
        let arc = Arc::new(m.clone());
        let boxed: BoxedProfile<'_, i32> = Box::new(m.clone());
        assert_eq!(rc.evaluate(Interval::FOREVER), m);
        assert_eq!(arc.evaluate(Interval::FOREVER), m);
        assert_eq!(boxed.evaluate(Interval::FOREVER), m);
    }
}
