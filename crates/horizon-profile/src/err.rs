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

use horizon_core::{interval::Interval, time::Duration};
use std::fmt::Display;

/// The builder step that was attempted after `build()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderOperation {
    Set,
    Unset,
    Build,
}

impl Display for BuilderOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuilderOperation::Set => write!(f, "set"),
            BuilderOperation::Unset => write!(f, "unset"),
            BuilderOperation::Build => write!(f, "build"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConsumedError {
    operation: BuilderOperation,
}

impl BuilderConsumedError {
    pub fn new(operation: BuilderOperation) -> Self {
        Self { operation }
    }

    pub fn operation(&self) -> BuilderOperation {
        self.operation
    }
}

impl Display for BuilderConsumedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BuilderConsumedError: cannot {} after the interval map was built",
            self.operation
        )
    }
}

impl std::error::Error for BuilderConsumedError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampBoundsInvertedError {
    interval: Interval,
}

impl ClampBoundsInvertedError {
    pub fn new(interval: Interval) -> Self {
        Self { interval }
    }

    /// The first interval on which the upper bound lies below the lower bound.
    pub fn interval(&self) -> Interval {
        self.interval
    }
}

impl Display for ClampBoundsInvertedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ClampBoundsInvertedError: upper bound is below lower bound on {}",
            self.interval
        )
    }
}

impl std::error::Error for ClampBoundsInvertedError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationFilterError {
    min: Duration,
    max: Duration,
}

impl DurationFilterError {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }
}

impl Display for DurationFilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DurationFilterError: minimum duration {} is greater than maximum duration {}",
            self.min, self.max
        )
    }
}

impl std::error::Error for DurationFilterError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    ZeroPieces,
    SinglePoint(Interval),
    TooShort { interval: Interval, pieces: usize },
    Unbounded(Interval),
}

impl Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SplitError::*;
        match self {
            ZeroPieces => write!(f, "SplitError: number of pieces must be at least 1"),
            SinglePoint(i) => write!(f, "SplitError: cannot split the single point {}", i),
            TooShort { interval, pieces } => write!(
                f,
                "SplitError: {} is too short to split into {} pieces",
                interval, pieces
            ),
            Unbounded(i) => write!(f, "SplitError: cannot split the unbounded {}", i),
        }
    }
}

impl std::error::Error for SplitError {}

/// Every failure the algebra can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    BuilderConsumed(BuilderConsumedError),
    ClampBoundsInverted(ClampBoundsInvertedError),
    DurationFilter(DurationFilterError),
    Split(SplitError),
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ProfileError::*;
        match self {
            BuilderConsumed(e) => write!(f, "{}", e),
            ClampBoundsInverted(e) => write!(f, "{}", e),
            DurationFilter(e) => write!(f, "{}", e),
            Split(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use ProfileError::*;
        match self {
            BuilderConsumed(e) => Some(e),
            ClampBoundsInverted(e) => Some(e),
            DurationFilter(e) => Some(e),
            Split(e) => Some(e),
        }
    }
}

impl From<BuilderConsumedError> for ProfileError {
    fn from(err: BuilderConsumedError) -> Self {
        Self::BuilderConsumed(err)
    }
}

impl From<ClampBoundsInvertedError> for ProfileError {
    fn from(err: ClampBoundsInvertedError) -> Self {
        Self::ClampBoundsInverted(err)
    }
}

impl From<DurationFilterError> for ProfileError {
    fn from(err: DurationFilterError) -> Self {
        Self::DurationFilter(err)
    }
}

impl From<SplitError> for ProfileError {
    fn from(err: SplitError) -> Self {
        Self::Split(err)
    }
}
