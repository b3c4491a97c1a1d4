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

//! Generic simulated annealing.
//!
//! The optimizer is parameterized over an arbitrary state type through two
//! closures: a cost function re-evaluated for every candidate, and a
//! fallible neighbor function (neighbor errors abort the run). The optimizer
//! owns the PRNG for its acceptance draws; the neighbor closure brings its
//! own stream.

use crate::constants::{COOLING_RATE, EPSILON};
use rand::Rng;
use tracing::debug;

/// Maps `(initial_temperature, iteration)` to the iteration's temperature.
pub type TemperatureSchedule = fn(f64, u64) -> f64;

/// The default geometric cooling schedule `T0 * 0.95^iter`.
pub fn geometric_cooling(initial_temp: f64, iteration: u64) -> f64 {
    initial_temp * COOLING_RATE.powf(iteration as f64)
}

pub struct SimulatedAnnealing<F, N, R> {
    cost_fn: F,
    neighbor_fn: N,
    initial_temp: f64,
    final_temp: f64,
    max_iters: u64,
    temperature: TemperatureSchedule,
    rng: R,
    cost_history: Vec<f64>,
}

impl<F, N, R: Rng> SimulatedAnnealing<F, N, R> {
    pub fn new(
        cost_fn: F,
        neighbor_fn: N,
        initial_temp: f64,
        final_temp: f64,
        max_iters: u64,
        rng: R,
    ) -> Self {
        Self {
            cost_fn,
            neighbor_fn,
            initial_temp,
            final_temp,
            max_iters,
            temperature: geometric_cooling,
            rng,
            cost_history: Vec::new(),
        }
    }

    /// Replaces the default cooling schedule.
    pub fn with_temperature_schedule(mut self, temperature: TemperatureSchedule) -> Self {
        self.temperature = temperature;
        self
    }

    /// Every cost observed so far: the initial state's cost followed by one
    /// entry per evaluated candidate.
    #[inline]
    pub fn cost_history(&self) -> &[f64] {
        &self.cost_history
    }

    /// Runs the search from `initial` and returns the best state observed.
    pub fn optimize<S, E>(&mut self, initial: S) -> Result<S, E>
    where
        S: Clone,
        F: FnMut(&S) -> f64,
        N: FnMut(&S) -> Result<S, E>,
    {
        let mut current = initial;
        let mut best = current.clone();
        let mut current_cost = (self.cost_fn)(&current);
        let mut best_cost = current_cost;

        self.cost_history.clear();
        self.cost_history.push(current_cost);

        for iteration in 0..self.max_iters {
            let temp = (self.temperature)(self.initial_temp, iteration);
            if temp < self.final_temp {
                break;
            }

            let candidate = (self.neighbor_fn)(&current)?;
            let candidate_cost = (self.cost_fn)(&candidate);
            self.cost_history.push(candidate_cost);

            let delta = candidate_cost - current_cost;
            // Downhill moves skip the acceptance draw entirely; the draw
            // sequence is part of the reproducibility contract.
            if delta < 0.0 || self.rng.random::<f64>() < (-delta / temp).exp() {
                current = candidate;
                current_cost = candidate_cost;
                if current_cost < best_cost - EPSILON {
                    best_cost = current_cost;
                    best = current.clone();
                    debug!(iteration, cost = best_cost, "accepted new best state");
                }
            }
        }

        Ok(best)
    }
}
