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

//! Boolean profiles ("windows").
//!
//! [`WindowsOps`] adds the lazy logical operators to every `Profile<bool>`.
//! The eager queries and rewrites live directly on `IntervalMap<bool>`, since
//! they need the whole materialized sequence (indexing true segments,
//! looking at neighbours, splitting).
//!
//! Gaps mean "unknown". `and` and `or` still produce a definite answer where
//! one side alone decides it: a lone `false` for `and`, a lone `true` for `or`.

use crate::{
    binary_op::{combine_or_identity, from_cases},
    err::{DurationFilterError, SplitError},
    interval_map::{IntervalMap, set_segment, unset_segment},
    linear::LinearEquation,
    profile::{Profile, ProfileExt, SegmentStream, map2_values},
};
use horizon_core::{
    interval::{Inclusivity, Interval},
    segment::Segment,
    time::Duration,
};
use tracing::{debug, instrument};

/// Lazy boolean algebra on any `Profile<bool>`.
pub trait WindowsOps: Profile<bool> + Sized {
    fn and<Q: Profile<bool>>(self, other: Q) -> impl Profile<bool> {
        map2_values(
            self,
            other,
            from_cases(
                |l: &bool| (!*l).then_some(false),
                |r: &bool| (!*r).then_some(false),
                |l: &bool, r: &bool| Some(*l && *r),
            ),
        )
    }

    fn or<Q: Profile<bool>>(self, other: Q) -> impl Profile<bool> {
        map2_values(
            self,
            other,
            from_cases(
                |l: &bool| l.then_some(true),
                |r: &bool| r.then_some(true),
                |l: &bool, r: &bool| Some(*l || *r),
            ),
        )
    }

    /// Like [`or`](Self::or), but a lone side is kept as is, so a lone
    /// `false` stays `false`.
    fn add<Q: Profile<bool>>(self, other: Q) -> impl Profile<bool> {
        map2_values(self, other, combine_or_identity(|l: &bool, r: &bool| *l || *r))
    }

    /// Inverts every value; gaps stay gaps.
    fn not(self) -> impl Profile<bool> {
        self.map_values(|v: &bool| !v)
    }

    /// Moves rising edges by `rising` and falling edges by `falling`.
    ///
    /// True segments have their start shifted by `rising` and their end by
    /// `falling`; false segments the other way round. Where shifted segments
    /// collide the later one wins. Arithmetic saturates at the time extremes.
    fn shift_edges(self, rising: Duration, falling: Duration) -> ShiftEdges<Self> {
        ShiftEdges {
            inner: self,
            rising,
            falling,
        }
    }

    fn shift_by(self, delta: Duration) -> ShiftEdges<Self> {
        self.shift_edges(delta, delta)
    }
}

impl<P: Profile<bool>> WindowsOps for P {}

pub struct ShiftEdges<P> {
    inner: P,
    rising: Duration,
    falling: Duration,
}

impl<P: Profile<bool>> Profile<bool> for ShiftEdges<P> {
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, bool>
    where
        bool: 'a,
    {
        let (low, high) = if self.rising <= self.falling {
            (self.rising, self.falling)
        } else {
            (self.falling, self.rising)
        };
        // Content up to `high` before the bounds can shift into them.
        let expanded = bounds.shift_bounds(-high, -low);
        let shifted: IntervalMap<bool> = self
            .inner
            .stream(expanded)
            .map(|segment| {
                let interval = segment.interval();
                let moved = if *segment.value() {
                    interval.shift_bounds(self.rising, self.falling)
                } else {
                    interval.shift_bounds(self.falling, self.rising)
                };
                segment.with_interval(moved)
            })
            .collect();

        Box::new(
            shifted
                .into_segments()
                .into_iter()
                .filter_map(move |segment| {
                    let clipped = segment.interval().intersect(&bounds);
                    (!clipped.is_empty()).then(|| segment.with_interval(clipped))
                }),
        )
    }
}

/// Resolves a possibly negative index into `0..len`.
#[inline]
fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        let index = index.unsigned_abs();
        (index < len).then_some(index)
    } else {
        len.checked_sub(index.unsigned_abs())
    }
}

impl IntervalMap<bool> {
    /// Sets true segments shorter than `min` or longer than `max` to false.
    #[instrument(level = "debug", skip_all, fields(min = %min, max = %max))]
    pub fn filter_by_duration(
        &self,
        min: Duration,
        max: Duration,
    ) -> Result<IntervalMap<bool>, DurationFilterError> {
        if min > max {
            return Err(DurationFilterError::new(min, max));
        }
        Ok(self.map_segments(|value, interval| {
            let duration = interval.duration();
            *value && duration >= min && duration <= max
        }))
    }

    /// Sets the `index`th true segment to false. Negative indices count from
    /// the end, `-1` being the last true segment. An index past either end
    /// leaves the map unchanged.
    pub fn remove_true_segment(&self, index: isize) -> IntervalMap<bool> {
        let trues: Vec<Interval> = self.iter_equal_to(&true).collect();
        match resolve_index(index, trues.len()) {
            Some(selected) => self.assign(trues[selected], false),
            None => self.clone(),
        }
    }

    /// Sets every true segment except the `index`th to false. An index past
    /// either end sets them all to false.
    pub fn keep_true_segment(&self, index: isize) -> IntervalMap<bool> {
        let trues: Vec<Interval> = self.iter_equal_to(&true).collect();
        let keep = resolve_index(index, trues.len());
        let mut segments = self.as_slice().to_vec();
        for (i, interval) in trues.into_iter().enumerate() {
            if Some(i) != keep {
                set_segment(&mut segments, interval, false);
            }
        }
        IntervalMap::from_canonical(segments)
    }

    /// Splits every true segment into `pieces` sub-intervals of equal
    /// integral width; the last piece absorbs the rounding remainder.
    ///
    /// Newly created boundaries take `internal_start` and `internal_end`; the
    /// outer bounds of each segment keep their inclusivity.
    ///
    /// # Examples
    ///
    /// ```
    /// use horizon_core::prelude::*;
    /// use horizon_profile::interval_map::IntervalMap;
    ///
    /// let w = IntervalMap::single(Interval::closed_open(Duration::ZERO, Duration::from_secs(5)), true);
    /// let parts = w.split(3, Inclusivity::Inclusive, Inclusivity::Exclusive).unwrap();
    /// assert_eq!(parts[1].start(), Duration::from_micros(1_666_666));
    /// assert_eq!(parts[2].start(), Duration::from_micros(3_333_332));
    /// assert_eq!(parts[2].end(), Duration::from_secs(5));
    /// ```
    #[instrument(level = "debug", skip(self))]
    pub fn split(
        &self,
        pieces: usize,
        internal_start: Inclusivity,
        internal_end: Inclusivity,
    ) -> Result<Vec<Interval>, SplitError> {
        if pieces == 0 {
            return Err(SplitError::ZeroPieces);
        }
        let mut out = Vec::new();
        for interval in self.iter_equal_to(&true) {
            if pieces == 1 {
                out.push(interval);
                continue;
            }
            if interval.start().is_min() || interval.end().is_max() {
                return Err(SplitError::Unbounded(interval));
            }
            if interval.is_point() {
                return Err(SplitError::SinglePoint(interval));
            }
            let duration = interval.duration();
            let n = match i64::try_from(pieces) {
                Ok(n) if duration.as_micros() >= n => n,
                _ => return Err(SplitError::TooShort { interval, pieces }),
            };
            let width = duration / n;

            let mut start = interval.start();
            let mut start_inclusivity = interval.start_inclusivity();
            for i in 1..n {
                let boundary = interval.start() + width * i;
                out.push(Interval::between(start, start_inclusivity, boundary, internal_end));
                start = boundary;
                start_inclusivity = internal_start;
            }
            out.push(Interval::between(
                start,
                start_inclusivity,
                interval.end(),
                interval.end_inclusivity(),
            ));
        }
        debug!(produced = out.len(), "split true segments");
        Ok(out)
    }

    /// Whether every true segment of `other` lies within a true segment of
    /// `self`.
    pub fn includes(&self, other: &IntervalMap<bool>) -> bool {
        let inclusion = map2_values(
            self,
            other,
            from_cases(
                |_: &bool| None,
                |theirs: &bool| Some(!*theirs),
                |ours: &bool, theirs: &bool| Some(!*theirs || *ours),
            ),
        );
        inclusion
            .stream(Interval::FOREVER)
            .all(|segment| *segment.value())
    }

    pub fn includes_interval(&self, probe: Interval) -> bool {
        self.includes(&IntervalMap::single(probe, true))
    }

    /// Start time and inclusivity of the first true segment.
    pub fn min_true_time_point(&self) -> Option<(Duration, Inclusivity)> {
        self.first_interval_equal_to(&true)
            .map(|i| (i.start(), i.start_inclusivity()))
    }

    /// End time and inclusivity of the last true segment.
    pub fn max_true_time_point(&self) -> Option<(Duration, Inclusivity)> {
        self.last_interval_equal_to(&true)
            .map(|i| (i.end(), i.end_inclusivity()))
    }

    /// False over `interval`, true exactly where a true segment lies wholly
    /// inside it.
    pub fn true_subset_contained_in(&self, interval: Interval) -> IntervalMap<bool> {
        let mut segments = Vec::new();
        set_segment(&mut segments, interval, false);
        for contained in self.iter_equal_to(&true).filter(|i| interval.contains(i)) {
            set_segment(&mut segments, contained, true);
        }
        IntervalMap::from_canonical(segments)
    }

    /// Marks the instant each true segment begins.
    ///
    /// A true segment that follows a false one becomes false except for a
    /// true point at its start. A true segment after a gap has no known
    /// start: it becomes false and its first point is left unset.
    pub fn starts(&self) -> IntervalMap<bool> {
        let source = self.as_slice();
        let mut segments = source.to_vec();
        for (i, segment) in source.iter().enumerate() {
            if !*segment.value() {
                continue;
            }
            let interval = segment.interval();
            let follows_false = i > 0 && source[i - 1].interval().meets(&interval);
            if follows_false {
                set_segment(&mut segments, Interval::at(interval.start()), true);
                set_segment(
                    &mut segments,
                    Interval::between(
                        interval.start(),
                        Inclusivity::Exclusive,
                        interval.end(),
                        interval.end_inclusivity(),
                    ),
                    false,
                );
            } else {
                set_segment(&mut segments, interval, false);
                if !interval.contains_point(Duration::MIN) {
                    unset_segment(&mut segments, Interval::at(interval.start()));
                }
            }
        }
        IntervalMap::from_canonical(segments)
    }

    /// Marks the instant each true segment ends; the mirror of
    /// [`starts`](Self::starts).
    pub fn ends(&self) -> IntervalMap<bool> {
        let source = self.as_slice();
        let mut segments = source.to_vec();
        for (i, segment) in source.iter().enumerate() {
            if !*segment.value() {
                continue;
            }
            let interval = segment.interval();
            let precedes_false = source
                .get(i + 1)
                .is_some_and(|next| interval.meets(&next.interval()));
            if precedes_false {
                set_segment(
                    &mut segments,
                    Interval::between(
                        interval.start(),
                        interval.start_inclusivity(),
                        interval.end(),
                        Inclusivity::Exclusive,
                    ),
                    false,
                );
                set_segment(&mut segments, Interval::at(interval.end()), true);
            } else {
                set_segment(&mut segments, interval, false);
                if !interval.contains_point(Duration::MAX) {
                    unset_segment(&mut segments, Interval::at(interval.end()));
                }
            }
        }
        IntervalMap::from_canonical(segments)
    }

    /// Running total of true time, in multiples of `unit`.
    ///
    /// Each segment carries a line starting at the total accumulated before
    /// it; true segments grow at one `unit` per `unit` of time, false
    /// segments and true points stay flat.
    pub fn accumulated_duration(&self, unit: Duration) -> IntervalMap<LinearEquation> {
        let rate = Duration::SECOND.ratio(unit);
        let mut accumulated = 0.0;
        self.iter()
            .map(|segment| {
                let interval = segment.interval();
                let line = if *segment.value() {
                    let slope = if interval.is_point() { 0.0 } else { rate };
                    LinearEquation::new(interval.start(), accumulated, slope)
                } else {
                    LinearEquation::new(Duration::ZERO, accumulated, 0.0)
                };
                if *segment.value() {
                    accumulated += interval.duration().ratio(unit);
                }
                Segment::new(interval, line)
            })
            .collect()
    }
}

impl<V: Clone + PartialEq> IntervalMap<V> {
    /// True at every instant where the value changes, false elsewhere.
    ///
    /// The first point of a segment that follows a gap is unknown and left
    /// unset, unless it is the beginning of time.
    pub fn change_points(&self) -> IntervalMap<bool> {
        let source = self.as_slice();
        let mut segments: Vec<Segment<bool>> = Vec::with_capacity(source.len() * 2);
        for segment in source {
            set_segment(&mut segments, segment.interval(), false);
        }
        for (i, segment) in source.iter().enumerate() {
            let interval = segment.interval();
            let start = Interval::at(interval.start());
            match i.checked_sub(1).map(|p| &source[p]) {
                None => {
                    if !interval.contains_point(Duration::MIN) {
                        unset_segment(&mut segments, start);
                    }
                }
                Some(previous) if previous.interval().meets(&interval) => {
                    if previous.value() != segment.value() {
                        set_segment(&mut segments, start, true);
                    }
                }
                Some(_) => unset_segment(&mut segments, start),
            }
        }
        IntervalMap::from_canonical(segments)
    }
}
