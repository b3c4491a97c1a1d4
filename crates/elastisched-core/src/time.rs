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

//! # Time Types
//!
//! Strongly typed time for the scheduler: `TimePoint<T>` is an instant,
//! `TimeDelta<T>` a signed duration, and `TimeInterval<T>` the half-open
//! span between two instants. The newtypes keep instants and durations from
//! being mixed up at compile time; all arithmetic is checked and panics with
//! a descriptive message on overflow.
//!
//! The grid helpers (`align_up`, `align_down`) implement mathematical
//! floor/ceil alignment so that granularity snapping stays correct for
//! negative epochs.

use crate::primitives::Interval;
use num_traits::{PrimInt, Signed, Zero};
use std::{fmt::Display, iter::Sum, ops::{Add, AddAssign, Mul, Sub, SubAssign}};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimePoint<T: PrimInt>(T);

pub type TimeInterval<T> = Interval<TimePoint<T>>;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeDelta<T: PrimInt + Signed>(T);

impl<T: PrimInt> TimePoint<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        TimePoint(value)
    }

    #[inline]
    pub fn zero() -> Self {
        TimePoint(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    /// Snaps this instant up to the smallest grid multiple `>= self`.
    ///
    /// # Panics
    ///
    /// Panics if `granularity` is not positive.
    #[inline]
    pub fn align_up(self, granularity: TimeDelta<T>) -> Self
    where
        T: Signed,
    {
        let g = granularity.value();
        assert!(g > T::zero(), "align_up: granularity must be > 0");
        let q = self.0 / g;
        let r = self.0 % g;
        let q = if r > T::zero() { q + T::one() } else { q };
        TimePoint(q * g)
    }

    /// Snaps this instant down to the largest grid multiple `<= self`.
    ///
    /// # Panics
    ///
    /// Panics if `granularity` is not positive.
    #[inline]
    pub fn align_down(self, granularity: TimeDelta<T>) -> Self
    where
        T: Signed,
    {
        let g = granularity.value();
        assert!(g > T::zero(), "align_down: granularity must be > 0");
        let q = self.0 / g;
        let r = self.0 % g;
        let q = if r < T::zero() { q - T::one() } else { q };
        TimePoint(q * g)
    }
}

impl<T: PrimInt + Signed> TimePoint<T> {
    #[inline]
    pub fn checked_add(self, delta: TimeDelta<T>) -> Option<Self> {
        self.0.checked_add(&delta.0).map(TimePoint)
    }

    #[inline]
    pub fn checked_sub(self, delta: TimeDelta<T>) -> Option<Self> {
        self.0.checked_sub(&delta.0).map(TimePoint)
    }

    /// Returns the interval `[self, self + len)`, or `None` when `len` is
    /// negative or the end overflows.
    #[inline]
    pub fn span_of(self, len: TimeDelta<T>) -> Option<TimeInterval<T>> {
        if len.is_negative() {
            return None;
        }
        let end = self.checked_add(len)?;
        Interval::new(self, end).ok()
    }
}

impl<T: PrimInt> Default for TimePoint<T> {
    #[inline]
    fn default() -> Self {
        TimePoint(T::zero())
    }
}

impl<T: PrimInt + Display> Display for TimePoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimePoint({})", self.0)
    }
}

impl<T: PrimInt> From<T> for TimePoint<T> {
    #[inline]
    fn from(v: T) -> Self {
        TimePoint(v)
    }
}

impl<T: PrimInt + Signed> TimeDelta<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_positive()
    }

    /// Returns `true` when this duration is a whole number of `unit`s.
    /// A zero `unit` divides nothing.
    #[inline]
    pub fn is_multiple_of(self, unit: TimeDelta<T>) -> bool {
        !unit.0.is_zero() && (self.0 % unit.0).is_zero()
    }

    /// Integer ratio `self / divisor`, or `None` when `divisor` is zero.
    #[inline]
    pub fn ratio(self, divisor: TimeDelta<T>) -> Option<T> {
        if divisor.0.is_zero() {
            None
        } else {
            Some(self.0 / divisor.0)
        }
    }

    /// Rounds this duration up to the next multiple of `unit`.
    ///
    /// # Panics
    ///
    /// Panics if `unit` is not positive.
    #[inline]
    pub fn align_up(self, unit: TimeDelta<T>) -> Self {
        let u = unit.value();
        assert!(u > T::zero(), "align_up: unit must be > 0");
        let q = self.0 / u;
        let r = self.0 % u;
        let q = if r > T::zero() { q + T::one() } else { q };
        TimeDelta(q * u)
    }
}

impl<T: PrimInt + Signed> Default for TimeDelta<T> {
    #[inline]
    fn default() -> Self {
        TimeDelta::zero()
    }
}

impl<T: PrimInt + Signed + Display> Display for TimeDelta<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeDelta({})", self.0)
    }
}

impl<T: PrimInt + Signed> From<T> for TimeDelta<T> {
    #[inline]
    fn from(v: T) -> Self {
        TimeDelta(v)
    }
}

impl<T: PrimInt + Signed> Add<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn add(self, rhs: TimeDelta<T>) -> Self::Output {
        TimePoint(
            self.0
                .checked_add(&rhs.0)
                .expect("overflow in TimePoint + TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> Sub<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn sub(self, rhs: TimeDelta<T>) -> Self::Output {
        TimePoint(
            self.0
                .checked_sub(&rhs.0)
                .expect("underflow in TimePoint - TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> Sub<TimePoint<T>> for TimePoint<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn sub(self, rhs: TimePoint<T>) -> Self::Output {
        TimeDelta(
            self.0
                .checked_sub(&rhs.0)
                .expect("underflow in TimePoint - TimePoint"),
        )
    }
}

impl<T: PrimInt + Signed> Add for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        TimeDelta(
            self.0
                .checked_add(&rhs.0)
                .expect("overflow in TimeDelta + TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> AddAssign for TimeDelta<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_add(&rhs.0)
            .expect("overflow in TimeDelta += TimeDelta");
    }
}

impl<T: PrimInt + Signed> Sub for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        TimeDelta(
            self.0
                .checked_sub(&rhs.0)
                .expect("underflow in TimeDelta - TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> SubAssign for TimeDelta<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_sub(&rhs.0)
            .expect("underflow in TimeDelta -= TimeDelta");
    }
}

impl<T: PrimInt + Signed> Mul<T> for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        TimeDelta(
            self.0
                .checked_mul(&rhs)
                .expect("overflow in TimeDelta * scalar"),
        )
    }
}

impl<T: PrimInt + Signed> Zero for TimeDelta<T> {
    #[inline]
    fn zero() -> Self {
        TimeDelta(T::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<T: PrimInt + Signed> Sum for TimeDelta<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a, T: PrimInt + Signed> Sum<&'a TimeDelta<T>> for TimeDelta<T> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + *x)
    }
}

impl<T: PrimInt + Signed> Interval<TimePoint<T>> {
    /// Returns the duration spanned by this interval.
    #[inline]
    pub fn duration(&self) -> TimeDelta<T> {
        self.end() - self.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tp(v: i64) -> TimePoint<i64> {
        TimePoint::new(v)
    }

    fn td(v: i64) -> TimeDelta<i64> {
        TimeDelta::new(v)
    }

    #[test]
    fn timepoint_arithmetic_roundtrips() {
        assert_eq!(tp(10) + td(5), tp(15));
        assert_eq!(tp(10) - td(5), tp(5));
        assert_eq!(tp(20) - tp(5), td(15));
    }

    #[test]
    #[should_panic(expected = "overflow in TimePoint + TimeDelta")]
    fn timepoint_add_panics_on_overflow() {
        let _ = tp(i64::MAX) + td(1);
    }

    #[test]
    #[should_panic(expected = "underflow in TimeDelta - TimeDelta")]
    fn timedelta_sub_panics_on_underflow() {
        let _ = td(i64::MIN) - td(1);
    }

    #[test]
    fn align_up_snaps_to_next_multiple() {
        assert_eq!(tp(1).align_up(td(4)), tp(4));
        assert_eq!(tp(8).align_up(td(4)), tp(8));
        assert_eq!(tp(0).align_up(td(4)), tp(0));
        assert_eq!(tp(-5).align_up(td(4)), tp(-4));
        assert_eq!(tp(-8).align_up(td(4)), tp(-8));
    }

    #[test]
    fn align_down_snaps_to_previous_multiple() {
        assert_eq!(tp(7).align_down(td(4)), tp(4));
        assert_eq!(tp(8).align_down(td(4)), tp(8));
        assert_eq!(tp(-5).align_down(td(4)), tp(-8));
        assert_eq!(tp(-8).align_down(td(4)), tp(-8));
    }

    #[test]
    #[should_panic(expected = "granularity must be > 0")]
    fn align_up_rejects_zero_granularity() {
        let _ = tp(1).align_up(td(0));
    }

    #[test]
    fn span_of_builds_half_open_interval() {
        let iv = tp(10).span_of(td(5)).expect("span fits");
        assert_eq!(iv.start(), tp(10));
        assert_eq!(iv.end(), tp(15));
        assert_eq!(iv.duration(), td(5));
    }

    #[test]
    fn span_of_rejects_negative_length() {
        assert!(tp(10).span_of(td(-1)).is_none());
    }

    #[test]
    fn span_of_rejects_overflowing_end() {
        assert!(tp(i64::MAX).span_of(td(1)).is_none());
    }

    #[test]
    fn checked_ops_report_overflow() {
        assert_eq!(tp(10).checked_add(td(5)), Some(tp(15)));
        assert_eq!(tp(i64::MAX).checked_add(td(1)), None);
        assert_eq!(tp(i64::MIN).checked_sub(td(1)), None);
    }

    #[test]
    fn is_multiple_of_handles_zero_unit() {
        assert!(td(12).is_multiple_of(td(4)));
        assert!(!td(13).is_multiple_of(td(4)));
        assert!(!td(12).is_multiple_of(td(0)));
    }

    #[test]
    fn ratio_is_integer_division() {
        assert_eq!(td(7200).ratio(td(1800)), Some(4));
        assert_eq!(td(7).ratio(td(2)), Some(3));
        assert_eq!(td(7).ratio(td(0)), None);
    }

    #[test]
    fn delta_align_up_rounds_to_unit() {
        assert_eq!(td(1500).align_up(td(900)), td(1800));
        assert_eq!(td(1800).align_up(td(900)), td(1800));
        assert_eq!(td(1).align_up(td(900)), td(900));
    }

    #[test]
    fn delta_sum_accumulates() {
        let total: TimeDelta<i64> = [td(1), td(2), td(3)].into_iter().sum();
        assert_eq!(total, td(6));
        let by_ref: TimeDelta<i64> = [td(4), td(5)].iter().sum();
        assert_eq!(by_ref, td(9));
    }

    #[test]
    fn delta_scalar_multiplication() {
        assert_eq!(td(1800) * 4, td(7200));
    }

    #[test]
    fn display_formats() {
        assert_eq!(format!("{}", tp(42)), "TimePoint(42)");
        assert_eq!(format!("{}", td(-10)), "TimeDelta(-10)");
    }
}
