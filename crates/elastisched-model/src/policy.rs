// Copyright (c) 2025 The Elastisched Authors.
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

use elastisched_core::time::TimeDelta;
use num_traits::{PrimInt, Signed};

/// How a job may be placed by the search.
///
/// - `splittable`: the job may be represented by multiple segments.
/// - `overlappable`: the job's segments may overlap other jobs' segments
///   without making the schedule illegal (overlap still costs).
/// - `invisible`: surface flag, carried through untouched.
/// - `round_to_granularity`: when the duration is a whole number of
///   granularity units, split durations stay on that unit grid.
/// - `max_splits`: number of *additional* segments allowed, so a job may
///   have at most `max_splits + 1` segments.
/// - `min_split_duration`: lower bound on each segment's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Policy<T = i64>
where
    T: PrimInt + Signed,
{
    max_splits: u8,
    min_split_duration: TimeDelta<T>,
    splittable: bool,
    overlappable: bool,
    invisible: bool,
    round_to_granularity: bool,
}

impl<T: PrimInt + Signed> Policy<T> {
    #[inline]
    pub fn new(
        max_splits: u8,
        min_split_duration: TimeDelta<T>,
        splittable: bool,
        overlappable: bool,
        invisible: bool,
        round_to_granularity: bool,
    ) -> Self {
        Self {
            max_splits,
            min_split_duration,
            splittable,
            overlappable,
            invisible,
            round_to_granularity,
        }
    }

    #[inline]
    pub fn max_splits(&self) -> u8 {
        self.max_splits
    }

    #[inline]
    pub fn min_split_duration(&self) -> TimeDelta<T> {
        self.min_split_duration
    }

    #[inline]
    pub fn is_splittable(&self) -> bool {
        self.splittable
    }

    #[inline]
    pub fn is_overlappable(&self) -> bool {
        self.overlappable
    }

    #[inline]
    pub fn is_invisible(&self) -> bool {
        self.invisible
    }

    #[inline]
    pub fn round_to_granularity(&self) -> bool {
        self.round_to_granularity
    }
}

impl<T: PrimInt + Signed> Default for Policy<T> {
    /// Non-splittable, non-overlappable, visible, unaligned.
    #[inline]
    fn default() -> Self {
        Self {
            max_splits: 0,
            min_split_duration: TimeDelta::zero(),
            splittable: false,
            overlappable: false,
            invisible: false,
            round_to_granularity: false,
        }
    }
}
