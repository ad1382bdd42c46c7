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

//! The two-stream merge engine behind every binary profile operation.
//!
//! [`Map2`] pulls one segment at a time from each side and keeps at most one
//! partially consumed segment per side. Each step classifies the two
//! candidates by their starts (inclusive before exclusive at equal times):
//!
//! - left leads: emit left up to where right begins, through `op.left`
//! - right leads: the mirror image, through `op.right`
//! - both start together: emit the overlap through `op.combine` and requeue
//!   the tail of whichever side reaches further
//!
//! Once a side is exhausted the other is passed through unchanged. The output
//! is ordered and clipped to the inputs, but not coalesced.

use crate::binary_op::BinaryOperation;
use crate::profile::SegmentStream;
use horizon_core::{interval::Interval, segment::Segment};
use std::{cmp::Ordering, iter::Fuse, marker::PhantomData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lead {
    Left,
    Right,
    Both,
}

/// Merges two ordered segment streams with a [`BinaryOperation`].
pub struct Map2<'a, L, R, O, Op> {
    left: Fuse<SegmentStream<'a, L>>,
    right: Fuse<SegmentStream<'a, R>>,
    remaining_left: Option<Segment<L>>,
    remaining_right: Option<Segment<R>>,
    op: Op,
    _out: PhantomData<fn() -> O>,
}

impl<'a, L, R, O, Op> Map2<'a, L, R, O, Op>
where
    Op: BinaryOperation<L, R, O>,
{
    pub fn new(left: SegmentStream<'a, L>, right: SegmentStream<'a, R>, op: Op) -> Self {
        Self {
            left: left.fuse(),
            right: right.fuse(),
            remaining_left: None,
            remaining_right: None,
            op,
            _out: PhantomData,
        }
    }

    /// Advances the merge by one step.
    ///
    /// Returns `None` once both sides are exhausted, and `Some(None)` for a
    /// step whose output the operation mapped to a gap.
    pub fn step(&mut self) -> Option<Option<Segment<O>>> {
        let left = self.remaining_left.take().or_else(|| self.left.next());
        let right = self.remaining_right.take().or_else(|| self.right.next());
        match (left, right) {
            (None, None) => None,
            (Some(l), None) => Some(self.pass_left(l)),
            (None, Some(r)) => Some(self.pass_right(r)),
            (Some(l), Some(r)) => Some(self.merge(l, r)),
        }
    }

    #[inline]
    fn pass_left(&self, left: Segment<L>) -> Option<Segment<O>> {
        let interval = left.interval();
        self.op
            .left(left.value())
            .map(|value| Segment::new(interval, value))
    }

    #[inline]
    fn pass_right(&self, right: Segment<R>) -> Option<Segment<O>> {
        let interval = right.interval();
        self.op
            .right(right.value())
            .map(|value| Segment::new(interval, value))
    }

    fn merge(&mut self, left: Segment<L>, right: Segment<R>) -> Option<Segment<O>> {
        let (li, ri) = (left.interval(), right.interval());
        let lead = match li.compare_starts(&ri) {
            Ordering::Less => Lead::Left,
            Ordering::Greater => Lead::Right,
            Ordering::Equal => Lead::Both,
        };
        let overlap = li.intersect(&ri);

        match lead {
            Lead::Left => {
                self.remaining_right = Some(right);
                if overlap.is_empty() {
                    return self.pass_left(left);
                }
                let (head, rest) = split_at_start_of(li, overlap);
                let out = self
                    .op
                    .left(left.value())
                    .map(|value| Segment::new(head, value));
                self.remaining_left = Some(left.with_interval(rest));
                out
            }
            Lead::Right => {
                self.remaining_left = Some(left);
                if overlap.is_empty() {
                    return self.pass_right(right);
                }
                let (head, rest) = split_at_start_of(ri, overlap);
                let out = self
                    .op
                    .right(right.value())
                    .map(|value| Segment::new(head, value));
                self.remaining_right = Some(right.with_interval(rest));
                out
            }
            Lead::Both => {
                let out = self
                    .op
                    .combine(left.value(), right.value())
                    .map(|value| Segment::new(overlap, value));
                if li.ends_after(&overlap) {
                    self.remaining_left = Some(left.with_interval(tail_after(li, overlap)));
                } else if ri.ends_after(&overlap) {
                    self.remaining_right = Some(right.with_interval(tail_after(ri, overlap)));
                }
                out
            }
        }
    }
}

/// Splits `whole` into the part before `overlap` begins and the rest.
#[inline]
fn split_at_start_of(whole: Interval, overlap: Interval) -> (Interval, Interval) {
    let head = Interval::between(
        whole.start(),
        whole.start_inclusivity(),
        overlap.start(),
        overlap.start_inclusivity().opposite(),
    );
    let rest = Interval::between(
        overlap.start(),
        overlap.start_inclusivity(),
        whole.end(),
        whole.end_inclusivity(),
    );
    (head, rest)
}

/// The part of `whole` after `overlap` ends.
#[inline]
fn tail_after(whole: Interval, overlap: Interval) -> Interval {
    Interval::between(
        overlap.end(),
        overlap.end_inclusivity().opposite(),
        whole.end(),
        whole.end_inclusivity(),
    )
}

impl<L, R, O, Op> Iterator for Map2<'_, L, R, O, Op>
where
    Op: BinaryOperation<L, R, O>,
{
    type Item = Segment<O>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(segment) = self.step()? {
                return Some(segment);
            }
        }
    }
}
