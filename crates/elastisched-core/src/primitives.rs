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

//! # Core Primitives
//!
//! The half-open interval `[start, end)` underlying every time range in the
//! scheduler, together with the overlap algebra the cost evaluator and the
//! interval index rely on.
//!
//! A degenerate interval `[p, p)` represents a zero-length point. It never
//! overlaps another degenerate interval, but it does overlap any interval
//! `[a, b)` strictly containing the point, i.e. `a <= p < b`.

use num_traits::Zero;
use std::fmt;
use std::ops::Sub;

/// Error raised when interval bounds are reversed (`end < start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidIntervalError<T> {
    start: T,
    end: T,
}

impl<T: Copy> InvalidIntervalError<T> {
    #[inline]
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    #[inline]
    pub fn end(&self) -> T {
        self.end
    }
}

impl<T: fmt::Display> fmt::Display for InvalidIntervalError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid interval: end {} lies before start {}",
            self.end, self.start
        )
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for InvalidIntervalError<T> {}

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive, so `[start, end)` covers
/// all values `x` with `start <= x < end`. Endpoints of type `T` only need to
/// be copyable and ordered; the scheduler instantiates this with both raw
/// integers and [`TimePoint`](crate::time::TimePoint)s.
///
/// # Examples
///
/// ```
/// use elastisched_core::primitives::Interval;
///
/// let iv = Interval::new(1, 5).unwrap();
/// assert_eq!(iv.start(), 1);
/// assert_eq!(iv.end(), 5);
/// assert!(iv.contains_point(1));
/// assert!(!iv.contains_point(5));
/// assert_eq!(iv.length(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates a new half-open interval `[start, end)`.
    ///
    /// Reversed bounds are an error, not a normalization: the caller supplied
    /// a range that does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastisched_core::primitives::Interval;
    ///
    /// assert!(Interval::new(3, 5).is_ok());
    /// assert!(Interval::new(5, 5).is_ok()); // degenerate point
    /// assert!(Interval::new(5, 3).is_err());
    /// ```
    #[inline]
    pub fn new(start: T, end: T) -> Result<Self, InvalidIntervalError<T>>
    where
        T: PartialOrd + Copy,
    {
        if end < start {
            return Err(InvalidIntervalError::new(start, end));
        }
        Ok(Self {
            start_inclusive: start,
            end_exclusive: end,
        })
    }

    /// Creates the degenerate zero-length interval `[p, p)`.
    #[inline]
    pub fn point(p: T) -> Self
    where
        T: Copy,
    {
        Self {
            start_inclusive: p,
            end_exclusive: p,
        }
    }

    /// Returns the inclusive start of the interval.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// Returns the exclusive end of the interval.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_exclusive
    }

    /// Returns `true` if the interval has no extent (`start == end`).
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start_inclusive == self.end_exclusive
    }

    /// Checks whether a value lies within the interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastisched_core::primitives::Interval;
    ///
    /// let iv = Interval::new(1, 5).unwrap();
    /// assert!(iv.contains_point(1)); // start is inclusive
    /// assert!(!iv.contains_point(5)); // end is exclusive
    /// ```
    #[inline]
    pub fn contains_point(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start_inclusive && x < self.end_exclusive
    }

    /// Checks whether this interval fully contains another interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastisched_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5).unwrap();
    /// assert!(a.contains_interval(&Interval::new(2, 4).unwrap()));
    /// assert!(a.contains_interval(&a));
    /// assert!(!a.contains_interval(&Interval::new(0, 6).unwrap()));
    /// ```
    #[inline]
    pub fn contains_interval(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        other.start_inclusive >= self.start_inclusive && other.end_exclusive <= self.end_exclusive
    }

    /// Checks whether this interval overlaps another interval.
    ///
    /// Two non-degenerate intervals overlap iff neither lies entirely at or
    /// past the other's end; touching at an endpoint is not overlap. A
    /// degenerate interval `[p, p)` overlaps `[a, b)` iff `a <= p < b`, and
    /// two degenerate intervals never overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastisched_core::primitives::Interval;
    ///
    /// let a = Interval::new(0, 10).unwrap();
    /// assert!(a.overlaps(&Interval::new(5, 15).unwrap()));
    /// assert!(!a.overlaps(&Interval::new(10, 20).unwrap())); // touching
    /// assert!(a.overlaps(&Interval::point(0)));
    /// assert!(!a.overlaps(&Interval::point(10)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool
    where
        T: PartialOrd + Copy,
    {
        if self.is_empty() {
            return other.start_inclusive <= self.start_inclusive
                && self.start_inclusive < other.end_exclusive;
        }
        if other.is_empty() {
            return self.start_inclusive <= other.start_inclusive
                && other.start_inclusive < self.end_exclusive;
        }
        !(self.end_exclusive <= other.start_inclusive
            || other.end_exclusive <= self.start_inclusive)
    }

    /// Returns the length of the overlap between two intervals, or zero when
    /// they do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastisched_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5).unwrap();
    /// let b = Interval::new(3, 7).unwrap();
    /// assert_eq!(a.overlap_length(&b), 2);
    /// assert_eq!(a.overlap_length(&Interval::new(5, 7).unwrap()), 0);
    /// ```
    #[inline]
    pub fn overlap_length<D>(&self, other: &Self) -> D
    where
        T: PartialOrd + Copy + Sub<Output = D>,
        D: Zero,
    {
        if !self.overlaps(other) {
            return D::zero();
        }
        let start = if self.start_inclusive > other.start_inclusive {
            self.start_inclusive
        } else {
            other.start_inclusive
        };
        let end = if self.end_exclusive < other.end_exclusive {
            self.end_exclusive
        } else {
            other.end_exclusive
        };
        if end > start { end - start } else { D::zero() }
    }

    /// Measures the extent of the interval as `end - start`.
    ///
    /// The output type may differ from the endpoint type; subtracting two
    /// [`TimePoint`](crate::time::TimePoint)s yields a
    /// [`TimeDelta`](crate::time::TimeDelta).
    #[inline]
    pub fn measure<D>(&self) -> D
    where
        T: Copy + Sub<Output = D>,
    {
        self.end_exclusive - self.start_inclusive
    }

    /// Returns the length of the interval for endpoint types whose difference
    /// is the type itself.
    #[inline]
    pub fn length(&self) -> T
    where
        T: Copy + Sub<Output = T>,
    {
        self.end_exclusive - self.start_inclusive
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}
