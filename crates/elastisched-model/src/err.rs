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

use crate::id::JobId;
use elastisched_core::time::{TimeDelta, TimeInterval};
use num_traits::{PrimInt, Signed};
use std::fmt::Display;

/// A job's duration cannot be placed on the granularity grid inside its
/// schedulable window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTooShortError<T: PrimInt + Signed> {
    id: JobId,
    duration: TimeDelta<T>,
    window: TimeInterval<T>,
    granularity: TimeDelta<T>,
}

impl<T: PrimInt + Signed> WindowTooShortError<T> {
    #[inline]
    pub fn new(
        id: JobId,
        duration: TimeDelta<T>,
        window: TimeInterval<T>,
        granularity: TimeDelta<T>,
    ) -> Self {
        Self {
            id,
            duration,
            window,
            granularity,
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
    pub fn window(&self) -> TimeInterval<T> {
        self.window
    }

    #[inline]
    pub fn granularity(&self) -> TimeDelta<T> {
        self.granularity
    }
}

impl<T: PrimInt + Signed + Display> Display for WindowTooShortError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Job {} with duration {} does not fit window {} at granularity {}",
            self.id, self.duration, self.window, self.granularity
        )
    }
}

impl<T: PrimInt + Signed + std::fmt::Debug + Display> std::error::Error for WindowTooShortError<T> {}
