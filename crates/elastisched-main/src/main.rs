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

use elastisched_core::primitives::Interval;
use elastisched_core::time::{TimeDelta, TimeInterval, TimePoint};
use elastisched_model::prelude::*;
use elastisched_solver::cost::CostEvaluator;
use elastisched_solver::engine::schedule_jobs;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const GRANULARITY_S: i64 = 900;
const INSTANCE_SEED: u64 = 0xCA1E_4DA2;
const N_INSTANCES: usize = 6;
const MIN_JOBS: usize = 4;
const MAX_JOBS: usize = 40;
const NUM_ITERS: u64 = 100_000;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct InstanceInfo {
    idx: usize,
    seed: u64,
    job_count: usize,
    flexible_count: usize,
    splittable_count: usize,
    dependency_count: usize,
}

#[derive(Debug, Clone, Serialize)]
struct RunResult {
    instance: InstanceInfo,
    initial_cost: f64,
    best_cost: f64,
    evaluations: usize,
    elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
struct BenchmarkReport {
    description: String,
    granularity_s: i64,
    runs: Vec<RunResult>,
}

fn tr(a: i64, b: i64) -> TimeInterval<i64> {
    Interval::new(TimePoint::new(a), TimePoint::new(b)).expect("generated bounds are ordered")
}

fn interpolate(val0: usize, val1: usize, step: usize, steps: usize) -> usize {
    if steps <= 1 {
        return val1;
    }
    val0 + (val1 - val0) * step / (steps - 1)
}

/// Builds one synthetic day of jobs: windows are grid-aligned with
/// comfortable slack, every fourth job may split, every fifth depends on its
/// predecessor.
fn build_instance(idx: usize, job_count: usize) -> (Vec<Job<i64>>, InstanceInfo) {
    let seed = INSTANCE_SEED ^ idx as u64;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut jobs = Vec::with_capacity(job_count);
    let mut splittable_count = 0;
    let mut dependency_count = 0;

    for j in 0..job_count {
        let duration = rng.random_range(1..=8i64) * GRANULARITY_S;
        let window_start = rng.random_range(0..64i64) * GRANULARITY_S;
        let slack = rng.random_range(4..=24i64) * GRANULARITY_S;
        let window = tr(window_start, window_start + duration + slack);

        let policy = if j % 4 == 0 {
            splittable_count += 1;
            Policy::new(2, TimeDelta::new(GRANULARITY_S), true, false, false, true)
        } else {
            Policy::default()
        };

        let mut dependencies = BTreeSet::new();
        if j > 0 && j % 5 == 0 {
            dependencies.insert(JobId::new(format!("job-{}-{}", idx, j - 1)));
            dependency_count += 1;
        }

        jobs.push(Job::new(
            format!("job-{}-{}", idx, j),
            TimeDelta::new(duration),
            window,
            tr(window_start, window_start + duration),
            policy,
            dependencies,
            BTreeSet::new(),
        ));
    }

    let info = InstanceInfo {
        idx,
        seed,
        job_count,
        flexible_count: jobs.iter().filter(|job| !job.is_rigid()).count(),
        splittable_count,
        dependency_count,
    };
    (jobs, info)
}

fn main() {
    enable_tracing();

    let granularity = TimeDelta::new(GRANULARITY_S);
    let mut runs = Vec::with_capacity(N_INSTANCES);

    for idx in 0..N_INSTANCES {
        let job_count = interpolate(MIN_JOBS, MAX_JOBS, idx, N_INSTANCES);
        let (jobs, info) = build_instance(idx, job_count);

        let started = Instant::now();
        let (best, history) = match schedule_jobs(jobs, granularity, 10.0, 1e-4, NUM_ITERS) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("instance {} is unschedulable: {}", idx, err);
                continue;
            }
        };
        let elapsed_ms = started.elapsed().as_millis();

        runs.push(RunResult {
            instance: info,
            initial_cost: history.first().copied().unwrap_or_default(),
            best_cost: CostEvaluator::new(&best, granularity).schedule_cost(),
            evaluations: history.len(),
            elapsed_ms,
        });
    }

    let report = BenchmarkReport {
        description: "elastisched annealing ramp, small to mid-size synthetic days".to_owned(),
        granularity_s: GRANULARITY_S,
        runs,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("report serializes")
    );
}
