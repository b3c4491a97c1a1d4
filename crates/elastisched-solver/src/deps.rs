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

//! Precedence checking over a schedule.
//!
//! The dependency graph is induced on the jobs actually present: edges to
//! unknown ids are ignored. A cycle makes the whole schedule invalid and
//! skips violation collection; otherwise a violation is recorded for every
//! job whose dependency ends strictly after the job begins, measured over
//! the extreme points of each side's segment list.

use elastisched_core::SchedulerVariable;
use elastisched_core::time::TimePoint;
use elastisched_model::{id::JobId, schedule::Schedule};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// One job that starts before some of its dependencies have finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyViolation {
    job_id: JobId,
    violated_dependencies: BTreeSet<JobId>,
}

impl DependencyViolation {
    #[inline]
    pub fn new(job_id: JobId, violated_dependencies: BTreeSet<JobId>) -> Self {
        Self {
            job_id,
            violated_dependencies,
        }
    }

    #[inline]
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    #[inline]
    pub fn violated_dependencies(&self) -> &BTreeSet<JobId> {
        &self.violated_dependencies
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyCheckResult {
    has_violations: bool,
    has_cyclic_dependencies: bool,
    violations: Vec<DependencyViolation>,
}

impl DependencyCheckResult {
    #[inline]
    pub fn has_violations(&self) -> bool {
        self.has_violations
    }

    #[inline]
    pub fn has_cyclic_dependencies(&self) -> bool {
        self.has_cyclic_dependencies
    }

    #[inline]
    pub fn violations(&self) -> &[DependencyViolation] {
        &self.violations
    }
}

/// Checks a schedule for cyclic and temporal dependency violations.
pub fn check_dependency_violations<T: SchedulerVariable>(
    schedule: &Schedule<T>,
) -> DependencyCheckResult {
    let mut result = DependencyCheckResult::default();
    if schedule.is_empty() {
        return result;
    }

    let mut bounds: BTreeMap<&JobId, (TimePoint<T>, TimePoint<T>)> = BTreeMap::new();
    for job in schedule.iter() {
        bounds.insert(job.id(), (job.earliest_start(), job.latest_end()));
    }

    let mut in_degree: BTreeMap<&JobId, usize> = BTreeMap::new();
    let mut adjacency: BTreeMap<&JobId, Vec<&JobId>> = BTreeMap::new();
    for job in schedule.iter() {
        in_degree.entry(job.id()).or_insert(0);
        adjacency.entry(job.id()).or_default();
    }
    for job in schedule.iter() {
        for dep in job.dependencies() {
            if bounds.contains_key(dep) {
                adjacency
                    .get_mut(dep)
                    .expect("dependency is a known job")
                    .push(job.id());
                *in_degree.get_mut(job.id()).expect("job is present") += 1;
            }
        }
    }

    // Kahn's algorithm; BTreeMap iteration keeps the dequeue order
    // deterministic, though the outcome does not depend on it.
    let mut queue: VecDeque<&JobId> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(id, _)| *id)
        .collect();
    let mut visited = 0usize;
    while let Some(current) = queue.pop_front() {
        visited += 1;
        for &child in &adjacency[current] {
            let degree = in_degree.get_mut(child).expect("job is present");
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(child);
            }
        }
    }

    if visited != in_degree.len() {
        result.has_cyclic_dependencies = true;
        result.has_violations = true;
        return result;
    }

    for job in schedule.iter() {
        let (job_start, _) = bounds[job.id()];
        let mut violated = BTreeSet::new();
        for dep in job.dependencies() {
            if let Some(&(_, dep_end)) = bounds.get(dep) {
                if dep_end > job_start {
                    violated.insert(dep.clone());
                }
            }
        }
        if !violated.is_empty() {
            result
                .violations
                .push(DependencyViolation::new(job.id().clone(), violated));
            result.has_violations = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use elastisched_core::primitives::Interval;
    use elastisched_core::time::{TimeDelta, TimeInterval};
    use elastisched_model::{job::Job, policy::Policy};

    fn tr(a: i64, b: i64) -> TimeInterval<i64> {
        Interval::new(TimePoint::new(a), TimePoint::new(b)).expect("valid interval")
    }

    fn job(id: &str, scheduled: (i64, i64), deps: &[&str]) -> Job<i64> {
        Job::new(
            id,
            TimeDelta::new(scheduled.1 - scheduled.0),
            tr(0, 100),
            tr(scheduled.0, scheduled.1),
            Policy::default(),
            deps.iter().map(|d| JobId::from(*d)).collect(),
            BTreeSet::new(),
        )
    }

    #[test]
    fn empty_schedule_has_no_violations() {
        let result = check_dependency_violations::<i64>(&Schedule::new());
        assert!(!result.has_violations());
        assert!(!result.has_cyclic_dependencies());
        assert!(result.violations().is_empty());
    }

    #[test]
    fn dependency_ending_after_dependant_start_is_violated() {
        let schedule = Schedule::from_jobs(vec![
            job("A", (50, 60), &[]),
            job("B", (10, 20), &["A"]),
        ]);
        let result = check_dependency_violations(&schedule);
        assert!(result.has_violations());
        assert!(!result.has_cyclic_dependencies());
        assert_eq!(result.violations().len(), 1);
        let violation = &result.violations()[0];
        assert_eq!(violation.job_id(), &JobId::from("B"));
        assert!(violation.violated_dependencies().contains(&JobId::from("A")));
    }

    #[test]
    fn touching_dependency_is_satisfied() {
        let schedule = Schedule::from_jobs(vec![
            job("A", (0, 10), &[]),
            job("B", (10, 20), &["A"]),
        ]);
        let result = check_dependency_violations(&schedule);
        assert!(!result.has_violations());
    }

    #[test]
    fn missing_dependency_is_ignored() {
        let schedule = Schedule::from_jobs(vec![job("A", (10, 20), &["MISSING"])]);
        let result = check_dependency_violations(&schedule);
        assert!(!result.has_violations());
        assert!(!result.has_cyclic_dependencies());
    }

    #[test]
    fn cycle_is_detected_and_stops_checking() {
        let schedule = Schedule::from_jobs(vec![
            job("A", (10, 20), &["B"]),
            job("B", (30, 40), &["A"]),
        ]);
        let result = check_dependency_violations(&schedule);
        assert!(result.has_cyclic_dependencies());
        assert!(result.has_violations());
        assert!(result.violations().is_empty());
    }

    #[test]
    fn split_segments_compare_by_extremes() {
        let mut dep = job("A", (0, 10), &[]);
        dep.set_segments(vec![tr(0, 10), tr(50, 60)]);
        let dependant = job("B", (20, 30), &["A"]);
        let schedule = Schedule::from_jobs(vec![dep, dependant]);
        let result = check_dependency_violations(&schedule);
        // A's latest segment ends at 60, after B starts at 20.
        assert!(result.has_violations());
    }

    #[test]
    fn chain_in_order_is_clean() {
        let schedule = Schedule::from_jobs(vec![
            job("A", (0, 10), &[]),
            job("B", (20, 30), &["A"]),
            job("C", (40, 50), &["A", "B"]),
        ]);
        let result = check_dependency_violations(&schedule);
        assert!(!result.has_violations());
        assert!(!result.has_cyclic_dependencies());
    }
}
