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

//! Schedule scoring.
//!
//! A schedule is either illegal (out-of-window segment, collision between
//! non-overlappable jobs, dependency cycle or violation) and costs a flat
//! [`ILLEGAL_SCHEDULE_COST`], or legal and scored by soft terms: normalized
//! overlap length plus a per-extra-segment split penalty. Illegality is a
//! price, not an error, so the annealer can walk through infeasible states.

use crate::constants::{ILLEGAL_SCHEDULE_COST, SPLIT_COST_FACTOR};
use crate::deps::check_dependency_violations;
use crate::itree::IntervalTree;
use elastisched_core::SchedulerVariable;
use elastisched_core::time::TimeDelta;
use elastisched_model::schedule::Schedule;
use num_traits::ToPrimitive;

/// Scores one schedule at a fixed granularity.
///
/// Each cost term is independently callable so tests can pin them down one
/// by one; [`CostEvaluator::schedule_cost`] is their sum.
#[derive(Debug, Clone, Copy)]
pub struct CostEvaluator<'a, T: SchedulerVariable> {
    schedule: &'a Schedule<T>,
    granularity: TimeDelta<T>,
}

impl<'a, T: SchedulerVariable> CostEvaluator<'a, T> {
    #[inline]
    pub fn new(schedule: &'a Schedule<T>, granularity: TimeDelta<T>) -> Self {
        Self {
            schedule,
            granularity,
        }
    }

    /// Flat penalty for hard-constraint violations, zero otherwise.
    ///
    /// The first failing condition short-circuits; an illegal schedule costs
    /// [`ILLEGAL_SCHEDULE_COST`] exactly once no matter how many constraints
    /// it breaks.
    pub fn illegal_schedule_cost(&self) -> f64 {
        let mut blocked = IntervalTree::new();
        for (index, job) in self.schedule.iter().enumerate() {
            let window = job.schedulable_range();
            for segment in job.segments() {
                if !window.contains_interval(segment) {
                    return ILLEGAL_SCHEDULE_COST;
                }
                if !job.policy().is_overlappable() {
                    if blocked.any_overlap(segment).is_some() {
                        return ILLEGAL_SCHEDULE_COST;
                    }
                    blocked.insert(*segment, index);
                }
            }
        }

        let dependency_check = check_dependency_violations(self.schedule);
        if dependency_check.has_cyclic_dependencies() || dependency_check.has_violations() {
            return ILLEGAL_SCHEDULE_COST;
        }

        0.0
    }

    /// Sum of pairwise segment overlaps, normalized by the granularity so the
    /// scale is comparable to the split penalty regardless of time units.
    pub fn overlap_cost(&self) -> f64 {
        if self.schedule.len() < 2 {
            return 0.0;
        }
        let norm = self
            .granularity
            .value()
            .to_f64()
            .unwrap_or(1.0)
            .max(1.0);

        let mut indexed = IntervalTree::new();
        let mut cost = 0.0;
        for (index, job) in self.schedule.iter().enumerate() {
            for segment in job.segments() {
                for (interval, _) in indexed.all_overlapping(segment) {
                    let overlap: TimeDelta<T> = segment.overlap_length(interval);
                    cost += overlap.value().to_f64().unwrap_or(0.0) / norm;
                }
                indexed.insert(*segment, index);
            }
        }
        cost
    }

    /// `(segment_count - 1) * SPLIT_COST_FACTOR` per split job.
    pub fn split_cost(&self) -> f64 {
        self.schedule
            .iter()
            .map(|job| job.segments().len())
            .filter(|&count| count > 1)
            .map(|count| (count - 1) as f64 * SPLIT_COST_FACTOR)
            .sum()
    }

    /// The composite cost the annealer minimizes.
    pub fn schedule_cost(&self) -> f64 {
        self.illegal_schedule_cost() + self.overlap_cost() + self.split_cost()
    }
}
