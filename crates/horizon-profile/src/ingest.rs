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

//! Profiles from simulator output.
//!
//! The simulator reports a resource as consecutive `(extent, dynamics)`
//! pairs. Each pair starts where the previous one ended; an entry without
//! dynamics is a gap.

use crate::{
    linear::{LinearEquation, RealDynamics},
    profile::{Profile, SegmentStream},
};
use horizon_core::{interval::Interval, segment::Segment, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSegment<D> {
    pub extent: Duration,
    pub dynamics: D,
}

impl<D> ProfileSegment<D> {
    #[inline]
    pub const fn new(extent: Duration, dynamics: D) -> Self {
        Self { extent, dynamics }
    }
}

/// A recorded sequence of simulator segments, read as a profile.
///
/// `convert` turns the dynamics of a segment and its absolute start time into
/// the profile value.
#[derive(Debug, Clone)]
pub struct SimulatedProfile<D, F> {
    start: Duration,
    segments: Vec<ProfileSegment<Option<D>>>,
    convert: F,
}

impl<D, F> SimulatedProfile<D, F> {
    pub fn new(start: Duration, segments: Vec<ProfileSegment<Option<D>>>, convert: F) -> Self {
        Self {
            start,
            segments,
            convert,
        }
    }

    #[inline]
    pub fn start(&self) -> Duration {
        self.start
    }

    /// Time at which the last recorded segment ends.
    pub fn end(&self) -> Duration {
        self.segments
            .iter()
            .fold(self.start, |t, seg| t.saturating_add(seg.extent))
    }
}

impl<D, F, V> Profile<V> for SimulatedProfile<D, F>
where
    F: Fn(&D, Duration) -> V,
{
    fn stream<'a>(&'a self, bounds: Interval) -> SegmentStream<'a, V>
    where
        V: 'a,
    {
        let mut offset = self.start;
        Box::new(
            self.segments
                .iter()
                .map(move |segment| {
                    let start = offset;
                    offset = offset.saturating_add(segment.extent);
                    (start, offset, segment)
                })
                .take_while(move |(start, _, _)| *start <= bounds.end())
                .filter_map(move |(start, end, segment)| {
                    let dynamics = segment.dynamics.as_ref()?;
                    let clipped = Interval::closed_open(start, end).intersect(&bounds);
                    if clipped.is_empty() {
                        return None;
                    }
                    Some(Segment::new(clipped, (self.convert)(dynamics, start)))
                }),
        )
    }
}

/// Dynamics that are their own value.
pub type Discrete<D> = SimulatedProfile<D, fn(&D, Duration) -> D>;

/// Real-valued dynamics read as lines.
pub type Real = SimulatedProfile<RealDynamics, fn(&RealDynamics, Duration) -> LinearEquation>;

#[inline]
fn clone_dynamics<D: Clone>(dynamics: &D, _start: Duration) -> D {
    dynamics.clone()
}

#[inline]
fn real_line(dynamics: &RealDynamics, start: Duration) -> LinearEquation {
    LinearEquation::from_real_dynamics(start, dynamics)
}

/// A simulated profile starting at time zero.
pub fn from_simulated_profile<D: Clone>(segments: Vec<ProfileSegment<Option<D>>>) -> Discrete<D> {
    from_external_profile(Duration::ZERO, segments)
}

/// A profile recorded outside the simulation, starting at `offset`.
pub fn from_external_profile<D: Clone>(
    offset: Duration,
    segments: Vec<ProfileSegment<Option<D>>>,
) -> Discrete<D> {
    SimulatedProfile::new(offset, segments, clone_dynamics::<D> as fn(&D, Duration) -> D)
}

/// A real-valued simulated profile starting at `offset`; each segment becomes
/// a line anchored at its own start.
pub fn from_real_profile(
    offset: Duration,
    segments: Vec<ProfileSegment<Option<RealDynamics>>>,
) -> Real {
    SimulatedProfile::new(
        offset,
        segments,
        real_line as fn(&RealDynamics, Duration) -> LinearEquation,
    )
}
