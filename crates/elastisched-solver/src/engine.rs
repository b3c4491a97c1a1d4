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

//! End-to-end scheduling entry points.
//!
//! The facade pins rigid jobs, seeds the two deterministic random streams
//! (placement and acceptance) from `ELASTISCHED_RNG_SEED`, and runs the
//! annealer with the cost evaluator and neighbor generator wired in. The
//! best schedule observed and the full cost history are returned.

use crate::anneal::SimulatedAnnealing;
use crate::constants::{
    ACCEPT_SEED_SALT, DEFAULT_FINAL_TEMP, DEFAULT_INITIAL_TEMP, DEFAULT_NUM_ITERS, rng_seed,
};
use crate::cost::CostEvaluator;
use crate::neighbor::neighbor_schedule;
use elastisched_core::SchedulerVariable;
use elastisched_core::time::TimeDelta;
use elastisched_model::{err::WindowTooShortError, job::Job, schedule::Schedule};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

/// Schedules `jobs` with the default annealing parameters.
pub fn schedule<T: SchedulerVariable>(
    jobs: Vec<Job<T>>,
    granularity: TimeDelta<T>,
) -> Result<Schedule<T>, WindowTooShortError<T>> {
    schedule_jobs(
        jobs,
        granularity,
        DEFAULT_INITIAL_TEMP,
        DEFAULT_FINAL_TEMP,
        DEFAULT_NUM_ITERS,
    )
    .map(|(best, _)| best)
}

/// Schedules `jobs` and returns the best schedule found together with the
/// cost of every evaluated state.
///
/// Rigid jobs are pinned to their windows before the search starts and are
/// never moved. When no flexible job exists there is nothing to search; the
/// pinned schedule is returned with its single cost entry.
#[instrument(level = "debug", skip(jobs), fields(jobs = jobs.len()))]
pub fn schedule_jobs<T: SchedulerVariable>(
    jobs: Vec<Job<T>>,
    granularity: TimeDelta<T>,
    initial_temp: f64,
    final_temp: f64,
    num_iters: u64,
) -> Result<(Schedule<T>, Vec<f64>), WindowTooShortError<T>> {
    if jobs.is_empty() {
        return Ok((Schedule::new(), Vec::new()));
    }

    let mut jobs = jobs;
    for job in &mut jobs {
        if job.is_rigid() {
            let window = job.schedulable_range();
            job.set_segments(vec![window]);
        }
    }
    let initial = Schedule::from_jobs(jobs);

    if initial.iter().all(|job| job.is_rigid()) {
        let cost = CostEvaluator::new(&initial, granularity).schedule_cost();
        debug!(cost, "all jobs rigid, skipping the search");
        return Ok((initial, vec![cost]));
    }

    let seed = rng_seed();
    debug!(seed, "seeding placement and acceptance streams");
    let mut neighbor_rng = ChaCha8Rng::seed_from_u64(seed);

    let mut optimizer = SimulatedAnnealing::new(
        move |state: &Schedule<T>| CostEvaluator::new(state, granularity).schedule_cost(),
        move |state: &Schedule<T>| neighbor_schedule(state, granularity, &mut neighbor_rng),
        initial_temp,
        final_temp,
        num_iters,
        ChaCha8Rng::seed_from_u64(seed ^ ACCEPT_SEED_SALT),
    );

    let best = optimizer.optimize(initial)?;
    let history = optimizer.cost_history().to_vec();
    let best_cost = CostEvaluator::new(&best, granularity).schedule_cost();
    info!(
        best_cost,
        evaluations = history.len(),
        "annealing finished"
    );
    Ok((best, history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_RNG_SEED, ILLEGAL_SCHEDULE_COST, RNG_SEED_ENV_VAR};
    use crate::deps::check_dependency_violations;
    use elastisched_core::primitives::Interval;
    use elastisched_core::time::{TimeInterval, TimePoint};
    use elastisched_model::{id::JobId, policy::Policy};
    use std::collections::BTreeSet;

    fn tr(a: i64, b: i64) -> TimeInterval<i64> {
        Interval::new(TimePoint::new(a), TimePoint::new(b)).expect("valid interval")
    }

    fn td(v: i64) -> TimeDelta<i64> {
        TimeDelta::new(v)
    }

    fn job(
        id: &str,
        duration: i64,
        window: (i64, i64),
        policy: Policy<i64>,
        deps: &[&str],
    ) -> Job<i64> {
        Job::new(
            id,
            td(duration),
            tr(window.0, window.1),
            tr(window.0, window.0 + duration),
            policy,
            deps.iter().map(|d| JobId::from(*d)).collect(),
            BTreeSet::new(),
        )
    }

    #[test]
    fn empty_input_yields_empty_schedule_and_history() {
        let (best, history) = schedule_jobs::<i64>(Vec::new(), td(900), 10.0, 1e-4, 100)
            .expect("empty input never fails");
        assert!(best.is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn rigid_only_input_is_pinned_without_search() {
        let jobs = vec![
            job("A", 10, (0, 10), Policy::default(), &[]),
            job("B", 10, (20, 30), Policy::default(), &[]),
        ];
        let (best, history) =
            schedule_jobs(jobs, td(1), 10.0, 1e-4, 100_000).expect("rigid jobs always fit");
        assert_eq!(best.jobs()[0].segments(), &[tr(0, 10)]);
        assert_eq!(best.jobs()[1].segments(), &[tr(20, 30)]);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], 0.0);
    }

    #[test]
    fn rigid_pinning_overrides_caller_segments() {
        let mut rigid = job("A", 10, (50, 60), Policy::default(), &[]);
        rigid.set_segments(vec![tr(0, 10)]);
        let (best, _) = schedule_jobs(vec![rigid], td(1), 10.0, 1e-4, 10).expect("fits");
        assert_eq!(best.jobs()[0].segments(), &[tr(50, 60)]);
    }

    #[test]
    fn pinned_conflict_stays_illegal() {
        // Two rigid jobs on the same window cannot be repaired by the search.
        let jobs = vec![
            job("A", 3600, (0, 3600), Policy::default(), &[]),
            job("B", 3600, (0, 3600), Policy::default(), &[]),
        ];
        let (best, history) = schedule_jobs(jobs, td(900), 10.0, 1e-4, 1000).expect("fits");
        assert_eq!(history.len(), 1);
        assert!(history[0] >= ILLEGAL_SCHEDULE_COST);
        let evaluator = CostEvaluator::new(&best, td(900));
        assert_eq!(evaluator.illegal_schedule_cost(), ILLEGAL_SCHEDULE_COST);
    }

    #[test]
    fn dependency_violation_between_rigid_jobs_is_reported_and_priced() {
        let jobs = vec![
            job("A", 10, (50, 60), Policy::default(), &[]),
            job("B", 10, (10, 20), Policy::default(), &["A"]),
        ];
        let (best, _) = schedule_jobs(jobs, td(1), 10.0, 1e-4, 10).expect("fits");
        let result = check_dependency_violations(&best);
        assert!(!result.has_cyclic_dependencies());
        assert_eq!(result.violations().len(), 1);
        assert_eq!(result.violations()[0].job_id(), &JobId::from("B"));
        assert!(
            result.violations()[0]
                .violated_dependencies()
                .contains(&JobId::from("A"))
        );
        assert!(CostEvaluator::new(&best, td(1)).schedule_cost() >= ILLEGAL_SCHEDULE_COST);
    }

    #[test]
    fn single_flexible_job_lands_on_grid() {
        let jobs = vec![job("J", 3600, (0, 28800), Policy::default(), &[])];
        let (best, history) = schedule_jobs(jobs, td(900), 10.0, 1e-4, 100_000).expect("fits");
        let placed = &best.jobs()[0];
        assert_eq!(placed.segments().len(), 1);
        let segment = placed.segments()[0];
        assert_eq!(segment.duration(), td(3600));
        assert_eq!(segment.start().value() % 900, 0);
        assert!(placed.schedulable_range().contains_interval(&segment));
        assert!(history.len() > 1);
    }

    #[test]
    fn two_non_overlappable_jobs_end_up_disjoint() {
        let jobs = vec![
            job("A", 3600, (0, 7200), Policy::default(), &[]),
            job("B", 3600, (0, 7200), Policy::default(), &[]),
        ];
        let (best, _) = schedule_jobs(jobs, td(900), 10.0, 1e-4, 100_000).expect("fits");
        let evaluator = CostEvaluator::new(&best, td(900));
        assert_eq!(evaluator.illegal_schedule_cost(), 0.0);
        let a = best.jobs()[0].segments()[0];
        let b = best.jobs()[1].segments()[0];
        assert!(!a.overlaps(&b));
        assert_eq!(a.duration(), td(3600));
        assert_eq!(b.duration(), td(3600));
    }

    #[test]
    fn splittable_job_keeps_its_invariants() {
        let policy = Policy::new(3, td(1800), true, false, false, false);
        let jobs = vec![job("J", 7200, (0, 28800), policy, &[])];
        let (best, _) = schedule_jobs(jobs, td(900), 10.0, 1e-4, 100_000).expect("fits");
        let placed = &best.jobs()[0];
        let segments = placed.segments();
        assert!(!segments.is_empty() && segments.len() <= 4);
        let total: i64 = segments.iter().map(|s| s.duration().value()).sum();
        assert_eq!(total, 7200);
        for segment in segments {
            assert!(placed.schedulable_range().contains_interval(segment));
            if segments.len() > 1 {
                assert!(segment.duration().value() >= 1800);
            }
        }
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn window_too_short_for_flexible_job_is_an_error() {
        let jobs = vec![job("cramped", 100, (0, 50), Policy::default(), &[])];
        let err = schedule_jobs(jobs, td(10), 10.0, 1e-4, 100).unwrap_err();
        assert_eq!(err.id(), &JobId::from("cramped"));
    }

    #[test]
    fn runs_are_reproducible_for_a_fixed_seed() {
        let make_jobs = || {
            vec![
                job("A", 3600, (0, 28800), Policy::default(), &[]),
                job(
                    "B",
                    7200,
                    (0, 28800),
                    Policy::new(3, td(1800), true, false, false, false),
                    &[],
                ),
            ]
        };

        // Seed override and reproducibility share one test so the process
        // environment is only touched from a single place.
        unsafe { std::env::set_var(RNG_SEED_ENV_VAR, "12345") };
        let first = schedule_jobs(make_jobs(), td(900), 10.0, 1e-4, 100_000).expect("fits");
        let second = schedule_jobs(make_jobs(), td(900), 10.0, 1e-4, 100_000).expect("fits");
        unsafe { std::env::remove_var(RNG_SEED_ENV_VAR) };
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);

        // With the variable gone the default seed applies and is just as
        // reproducible.
        assert_eq!(crate::constants::rng_seed(), DEFAULT_RNG_SEED);
        let third = schedule_jobs(make_jobs(), td(900), 10.0, 1e-4, 100_000).expect("fits");
        let fourth = schedule_jobs(make_jobs(), td(900), 10.0, 1e-4, 100_000).expect("fits");
        assert_eq!(third.0, fourth.0);
        assert_eq!(third.1, fourth.1);
    }

    #[test]
    fn default_entry_point_uses_default_parameters() {
        let jobs = vec![job("J", 3600, (0, 28800), Policy::default(), &[])];
        let best = schedule(jobs, td(900)).expect("fits");
        let segment = best.jobs()[0].segments()[0];
        assert_eq!(segment.duration(), td(3600));
        assert_eq!(segment.start().value() % 900, 0);
    }
}
