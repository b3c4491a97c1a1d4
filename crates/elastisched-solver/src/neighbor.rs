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

//! Neighbor generation for the annealing search.
//!
//! A neighbor differs from its source schedule in the segment list of
//! exactly one flexible job, chosen uniformly at random. The chosen job is
//! either merged back to one segment, re-split into several, or force-moved
//! to a fresh grid position, subject to its policy.
//!
//! The order of random draws (choose job, decide merge, decide split,
//! sample segment count, sample durations, shuffle, place one by one) is a
//! reproducibility contract: a seeded generator must replay identically.

use crate::constants::{MERGE_PROBABILITY, PLACEMENT_ATTEMPTS};
use crate::itree::IntervalTree;
use elastisched_core::SchedulerVariable;
use elastisched_core::time::{TimeDelta, TimeInterval};
use elastisched_model::{err::WindowTooShortError, job::Job, schedule::Schedule};
use rand::Rng;
use rand::seq::SliceRandom;

/// Produces a schedule differing from `schedule` in one flexible job's
/// segments. A schedule without flexible jobs is returned unchanged.
///
/// # Panics
///
/// Panics if `granularity` is not positive.
pub fn neighbor_schedule<T, R>(
    schedule: &Schedule<T>,
    granularity: TimeDelta<T>,
    rng: &mut R,
) -> Result<Schedule<T>, WindowTooShortError<T>>
where
    T: SchedulerVariable,
    R: Rng + ?Sized,
{
    assert!(
        granularity.is_positive(),
        "neighbor_schedule: granularity must be positive"
    );

    let mut next = schedule.clone();
    let flexible: Vec<usize> = next
        .jobs()
        .iter()
        .enumerate()
        .filter(|(_, job)| !job.is_rigid())
        .map(|(index, _)| index)
        .collect();
    if flexible.is_empty() {
        return Ok(next);
    }

    let chosen = flexible[rng.random_range(0..flexible.len())];
    let job = &next.jobs()[chosen];
    let duration = job.duration();
    let window = job.schedulable_range();
    let policy = *job.policy();

    let rounding = policy.round_to_granularity()
        && granularity.is_positive()
        && duration.is_multiple_of(granularity);
    let mut min_split = if policy.min_split_duration().is_positive() {
        policy.min_split_duration()
    } else {
        TimeDelta::new(T::one())
    };
    if rounding && granularity.value() > T::one() {
        min_split = min_split.align_up(granularity);
    }
    let max_segments = policy.max_splits() as u64 + 1;
    let by_duration = duration
        .ratio(min_split)
        .and_then(|count| count.to_u64())
        .unwrap_or(0);
    let possible_segments = max_segments.min(by_duration);
    let currently_split = job.segments().len() > 1;

    let forced_move = |rng: &mut R| -> Result<TimeInterval<T>, WindowTooShortError<T>> {
        random_segment_within(window, duration, granularity, rng).ok_or_else(|| {
            WindowTooShortError::new(
                schedule.jobs()[chosen].id().clone(),
                duration,
                window,
                granularity,
            )
        })
    };

    if currently_split && rng.random_bool(MERGE_PROBABILITY) {
        let merged = forced_move(rng)?;
        next.jobs_mut()[chosen].set_segments(vec![merged]);
        return Ok(next);
    }

    let can_split = policy.is_splittable() && policy.max_splits() > 0;
    if can_split && possible_segments >= 2 && rng.random_range(0..2u32) == 1 {
        let segment_count = rng.random_range(2..=possible_segments) as usize;
        let durations = split_durations(duration, segment_count, min_split, granularity, rounding, rng);
        if !durations.is_empty() {
            if let Some(segments) = place_segments(window, &durations, granularity, rng) {
                next.jobs_mut()[chosen].set_segments(segments);
                return Ok(next);
            }
        }
    }

    let moved = forced_move(rng)?;
    next.jobs_mut()[chosen].set_segments(vec![moved]);
    Ok(next)
}

/// Samples a uniformly random grid-aligned placement of `duration` inside
/// `window`, or `None` when the grid has no slot for it.
fn random_segment_within<T, R>(
    window: TimeInterval<T>,
    duration: TimeDelta<T>,
    granularity: TimeDelta<T>,
    rng: &mut R,
) -> Option<TimeInterval<T>>
where
    T: SchedulerVariable,
    R: Rng + ?Sized,
{
    let earliest = window.start().align_up(granularity);
    let latest = window.end().checked_sub(duration)?.align_down(granularity);
    if latest < earliest {
        return None;
    }
    let slots = (latest - earliest)
        .ratio(granularity)
        .expect("granularity is positive")
        .to_u64()
        .expect("slot count fits in u64")
        + 1;
    let slot = rng.random_range(0..slots);
    let offset = granularity * T::from(slot).expect("slot index fits in time scalar");
    (earliest + offset).span_of(duration)
}

/// Samples `segment_count` durations summing to `duration`, each at least
/// `min_split`. Returns an empty vector when the request is infeasible.
fn split_durations<T, R>(
    duration: TimeDelta<T>,
    segment_count: usize,
    min_split: TimeDelta<T>,
    granularity: TimeDelta<T>,
    rounding: bool,
    rng: &mut R,
) -> Vec<TimeDelta<T>>
where
    T: SchedulerVariable,
    R: Rng + ?Sized,
{
    if segment_count <= 1 {
        return vec![duration];
    }
    let count_scalar = T::from(segment_count).expect("segment count fits in time scalar");
    let floor_total = min_split * count_scalar;
    if floor_total > duration {
        return Vec::new();
    }
    let mut durations = vec![min_split; segment_count];
    let remaining = duration - floor_total;

    if rounding && granularity.value() > T::one() {
        // Work in whole granularity units so every cut stays on the grid.
        if !remaining.is_zero() && !remaining.is_multiple_of(granularity) {
            return Vec::new();
        }
        let increments = remaining
            .ratio(granularity)
            .and_then(|units| units.to_u64())
            .unwrap_or(0);
        for _ in 0..increments {
            let slot = rng.random_range(0..segment_count);
            durations[slot] += granularity;
        }
        return durations;
    }

    if remaining.is_positive() {
        let span = remaining
            .value()
            .to_u64()
            .expect("split remainder fits in u64");
        let mut cuts: Vec<u64> = Vec::with_capacity(segment_count + 1);
        cuts.push(0);
        cuts.push(span);
        for _ in 0..segment_count - 1 {
            cuts.push(rng.random_range(0..=span));
        }
        cuts.sort_unstable();
        for (index, duration_slot) in durations.iter_mut().enumerate() {
            let gap = cuts[index + 1] - cuts[index];
            *duration_slot += TimeDelta::new(T::from(gap).expect("split gap fits in time scalar"));
        }
    }
    durations
}

/// Places the sampled durations inside the window one by one, rejecting
/// candidates that collide with already placed segments of the same job.
/// Returns `None` when a segment exhausts its placement attempts.
fn place_segments<T, R>(
    window: TimeInterval<T>,
    durations: &[TimeDelta<T>],
    granularity: TimeDelta<T>,
    rng: &mut R,
) -> Option<Vec<TimeInterval<T>>>
where
    T: SchedulerVariable,
    R: Rng + ?Sized,
{
    let mut shuffled = durations.to_vec();
    shuffled.shuffle(rng);

    let mut placed = IntervalTree::new();
    let mut segments: Vec<TimeInterval<T>> = Vec::with_capacity(shuffled.len());
    for duration in shuffled {
        let mut found = false;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = random_segment_within(window, duration, granularity, rng)?;
            if placed.any_overlap(&candidate).is_none() {
                placed.insert(candidate, segments.len());
                segments.push(candidate);
                found = true;
                break;
            }
        }
        if !found {
            return None;
        }
    }
    segments.sort_by_key(|segment| segment.start());
    Some(segments)
}
