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

use crate::{binary_op::BinaryOperation, profile::SegmentStream};
use horizon_core::{interval::Interval, segment::Segment};
use std::{collections::VecDeque, iter::Fuse};

/// Turns a segment stream into a boolean stream of transition points.
///
/// For every input segment this yields a point at its start, the open
/// interior as `false` and a point at its end. A point produced later for the
/// same instant replaces the earlier one; a missing point leaves the earlier
/// one in place.
pub struct EdgesIter<'a, V, Op> {
    segments: Fuse<SegmentStream<'a, V>>,
    op: Op,
    bounds: Interval,
    previous: Option<Segment<V>>,
    held: Option<Segment<bool>>,
    ready: VecDeque<Segment<bool>>,
}

impl<'a, V, Op> EdgesIter<'a, V, Op>
where
    Op: BinaryOperation<V, V, bool>,
{
    pub fn new(segments: SegmentStream<'a, V>, op: Op, bounds: Interval) -> Self {
        Self {
            segments: segments.fuse(),
            op,
            bounds,
            previous: None,
            held: None,
            ready: VecDeque::with_capacity(3),
        }
    }

    fn push(&mut self, segment: Segment<bool>) {
        if let Some(held) = self.held.take() {
            let replaced = held.interval().is_point() && held.interval() == segment.interval();
            if !replaced {
                self.ready.push_back(held);
            }
        }
        self.held = Some(segment);
    }

    fn absorb(&mut self, current: Segment<V>) {
        let interval = current.interval();
        let bounds = self.bounds;

        let touches_start = interval.start() == bounds.start()
            && interval.start_inclusivity() == bounds.start_inclusivity();
        let touches_end = interval.end() == bounds.end()
            && interval.end_inclusivity() == bounds.end_inclusivity();

        let left_edge = match &self.previous {
            Some(prev) if prev.interval().meets(&interval) => {
                self.op.combine(prev.value(), current.value())
            }
            Some(_) => self.op.right(current.value()),
            None if touches_start => bounds.includes_start().then_some(false),
            None => self.op.right(current.value()),
        };
        let right_edge = if touches_end {
            bounds.includes_end().then_some(false)
        } else {
            self.op.left(current.value())
        };

        if let Some(edge) = left_edge {
            self.push(Segment::new(Interval::at(interval.start()), edge));
        }
        let interior = Interval::open(interval.start(), interval.end());
        if !interior.is_empty() {
            self.push(Segment::new(interior, false));
        }
        if let Some(edge) = right_edge {
            self.push(Segment::new(Interval::at(interval.end()), edge));
        }
        self.previous = Some(current);
    }
}

impl<V, Op> Iterator for EdgesIter<'_, V, Op>
where
    Op: BinaryOperation<V, V, bool>,
{
    type Item = Segment<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(segment) = self.ready.pop_front() {
                return Some(segment);
            }
            match self.segments.next() {
                Some(current) => self.absorb(current),
                None => return self.held.take(),
            }
        }
    }
}
