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

use crate::interval::Interval;
use std::fmt::Display;

/// A value labelling a non-empty interval of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment<V> {
    interval: Interval,
    value: V,
}

impl<V> Segment<V> {
    #[inline]
    pub const fn new(interval: Interval, value: V) -> Self {
        Self { interval, value }
    }

    #[inline]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }

    #[inline]
    pub fn into_parts(self) -> (Interval, V) {
        (self.interval, self.value)
    }

    #[inline]
    pub fn map_value<W, F: FnOnce(V) -> W>(self, f: F) -> Segment<W> {
        Segment::new(self.interval, f(self.value))
    }

    #[inline]
    pub fn with_interval(self, interval: Interval) -> Self {
        Segment::new(interval, self.value)
    }

    #[inline]
    pub fn as_ref(&self) -> Segment<&V> {
        Segment::new(self.interval, &self.value)
    }
}

impl<V> Segment<Option<V>> {
    /// Lifts the option out of the segment.
    #[inline]
    pub fn transpose(self) -> Option<Segment<V>> {
        let interval = self.interval;
        self.value.map(|value| Segment::new(interval, value))
    }
}

impl<V: Display> Display for Segment<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Segment({} -> {})", self.interval, self.value)
    }
}
