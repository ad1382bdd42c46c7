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

//! Profile algebra over time.
//!
//! Values that vary over time are modelled as ordered, non-overlapping
//! segments. [`interval_map::IntervalMap`] is the canonical materialized form;
//! [`profile::Profile`] is the lazy form that combinators build on. Boolean
//! profiles get the window operators in [`windows`], piecewise-linear ones the
//! arithmetic and crossings in [`linear`].

pub mod binary_op;
pub mod edges;
pub mod err;
pub mod ingest;
pub mod interval_map;
pub mod linear;
pub mod merge;
pub mod profile;
pub mod windows;

pub mod prelude {
    pub use crate::binary_op::{BinaryOperation, combine_or_identity, combine_or_none, from_cases};
    pub use crate::err::ProfileError;
    pub use crate::ingest::{
        ProfileSegment, from_external_profile, from_real_profile, from_simulated_profile,
    };
    pub use crate::interval_map::{IntervalMap, IntervalMapBuilder};
    pub use crate::linear::{LinearEquation, LinearProfileOps, RealDynamics, clamp};
    pub use crate::profile::{
        BoxedProfile, Profile, ProfileExt, constant, constant_on, from_fn, map2_values,
    };
    pub use crate::windows::WindowsOps;
}
