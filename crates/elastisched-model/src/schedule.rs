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

use crate::job::Job;
use num_traits::{PrimInt, Signed};
use std::fmt::Display;

/// An ordered collection of scheduled jobs.
///
/// The candidate states of the annealing search are full clones of a
/// schedule; cloning copies every job's segment list, so mutating a clone
/// never aliases the original.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule<T = i64>
where
    T: PrimInt + Signed,
{
    jobs: Vec<Job<T>>,
}

impl<T: PrimInt + Signed> Schedule<T> {
    #[inline]
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    #[inline]
    pub fn from_jobs(jobs: Vec<Job<T>>) -> Self {
        Self { jobs }
    }

    #[inline]
    pub fn add_job(&mut self, job: Job<T>) {
        self.jobs.push(job);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.jobs.clear();
    }

    #[inline]
    pub fn jobs(&self) -> &[Job<T>] {
        &self.jobs
    }

    #[inline]
    pub fn jobs_mut(&mut self) -> &mut [Job<T>] {
        &mut self.jobs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Job<T>> {
        self.jobs.iter()
    }
}

impl<T: PrimInt + Signed + Display> Display for Schedule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Schedule with {} job(s):", self.jobs.len())?;
        for job in &self.jobs {
            writeln!(f, "  - {}", job)?;
        }
        Ok(())
    }
}
