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

use crate::{id::JobId, policy::Policy, tag::Tag};
use elastisched_core::time::{TimeDelta, TimeInterval, TimePoint};
use num_traits::{PrimInt, Signed};
use std::collections::BTreeSet;
use std::fmt::Display;

/// A unit of work to be placed on the calendar.
///
/// A job carries a fixed duration, the window it may be scheduled in, and the
/// list of segments currently assigned to it. The segment list is never
/// empty; a freshly constructed job holds the single interval handed to the
/// constructor (callers that have not scheduled anything yet typically pass
/// a placeholder inside the window).
///
/// A job is *rigid* when its duration equals the length of its schedulable
/// window: there is exactly one way to place it, and the search never moves
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job<T = i64>
where
    T: PrimInt + Signed,
{
    id: JobId,
    duration: TimeDelta<T>,
    schedulable_range: TimeInterval<T>,
    segments: Vec<TimeInterval<T>>,
    policy: Policy<T>,
    dependencies: BTreeSet<JobId>,
    tags: BTreeSet<Tag>,
}

impl<T: PrimInt + Signed> Job<T> {
    pub fn new(
        id: impl Into<JobId>,
        duration: TimeDelta<T>,
        schedulable_range: TimeInterval<T>,
        scheduled: TimeInterval<T>,
        policy: Policy<T>,
        dependencies: BTreeSet<JobId>,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Self {
            id: id.into(),
            duration,
            schedulable_range,
            segments: vec![scheduled],
            policy,
            dependencies,
            tags,
        }
    }

    #[inline]
    pub fn id(&self) -> &JobId {
        &self.id
    }

    #[inline]
    pub fn duration(&self) -> TimeDelta<T> {
        self.duration
    }

    #[inline]
    pub fn schedulable_range(&self) -> TimeInterval<T> {
        self.schedulable_range
    }

    #[inline]
    pub fn segments(&self) -> &[TimeInterval<T>] {
        &self.segments
    }

    #[inline]
    pub fn policy(&self) -> &Policy<T> {
        &self.policy
    }

    #[inline]
    pub fn dependencies(&self) -> &BTreeSet<JobId> {
        &self.dependencies
    }

    #[inline]
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// A rigid job fills its whole window; it has exactly one placement.
    #[inline]
    pub fn is_rigid(&self) -> bool {
        self.duration == self.schedulable_range.duration()
    }

    /// Replaces the assigned segments.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty; a job always has at least one segment.
    pub fn set_segments(&mut self, segments: Vec<TimeInterval<T>>) {
        assert!(
            !segments.is_empty(),
            "set_segments: a job must keep at least one segment"
        );
        self.segments = segments;
    }

    /// The earliest instant any segment of this job begins.
    pub fn earliest_start(&self) -> TimePoint<T> {
        self.segments
            .iter()
            .map(|s| s.start())
            .min()
            .expect("segments are never empty")
    }

    /// The latest instant any segment of this job ends.
    pub fn latest_end(&self) -> TimePoint<T> {
        self.segments
            .iter()
            .map(|s| s.end())
            .max()
            .expect("segments are never empty")
    }

    /// Total scheduled time across all segments.
    pub fn scheduled_duration(&self) -> TimeDelta<T> {
        self.segments.iter().map(|s| s.duration()).sum()
    }
}

impl<T: PrimInt + Signed + Display> Display for Job<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Job(id: {}, duration: {}, window: {}, segments: [",
            self.id, self.duration, self.schedulable_range
        )?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", segment)?;
        }
        write!(
            f,
            "], splittable: {}, overlappable: {}, dependencies: {})",
            self.policy.is_splittable(),
            self.policy.is_overlappable(),
            self.dependencies.len()
        )
    }
}
