// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tick-counting clock: [`TimeStamp<T>`] and [`TimeInterval<T>`].
//!
//! A tick is 100 ns. [`TimeInterval<T>`] is a signed tick count forming an
//! abelian group under addition; [`TimeStamp<T>`] is a point on a linear
//! clock counted in ticks since the epoch instant
//! **0001-01-01T00:00:00 UTC** of the proleptic Gregorian calendar. The
//! epoch is proleptic in both directions: negative stamps reach arbitrarily
//! far before year 1. Stamps are not calendar-aware; field-level readings
//! come from a [`Calendar`](crate::Calendar).
//!
//! All arithmetic reaches the scalar through the [`Scalar`] capability.
//! The `checked_*` methods are the primary API and never panic; the
//! operator impls (`+`, `-`, unary `-`) are conveniences that panic on
//! overflow, like the standard library's time types.

use chrono::{DateTime as ChronoDateTime, Utc};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::civil::{TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND};
use crate::scalar::Scalar;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ticks between the crate epoch (0001-01-01T00:00:00 UTC) and the Unix
/// epoch (1970-01-01T00:00:00 UTC): 719 162 days.
pub(crate) const UNIX_EPOCH_TICKS: i128 = 719_162 * TICKS_PER_DAY as i128;

// ═══════════════════════════════════════════════════════════════════════════
// TimeInterval<T>
// ═══════════════════════════════════════════════════════════════════════════

/// A signed duration counted in 100 ns ticks.
///
/// Scaling by an integer is defined ([`checked_mul`](Self::checked_mul));
/// multiplying two intervals is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInterval<T: Scalar>(T);

impl<T: Scalar> TimeInterval<T> {
    /// Interval from a raw tick count.
    #[inline]
    pub fn from_ticks(ticks: T) -> Self {
        Self(ticks)
    }

    /// The zero (identity) interval.
    #[inline]
    pub fn zero() -> Self {
        Self(T::zero())
    }

    /// The underlying tick count.
    #[inline]
    pub fn ticks(self) -> T {
        self.0
    }

    /// Interval of `seconds` whole seconds, `None` if the tick count
    /// overflows `T`.
    pub fn from_seconds(seconds: i64) -> Option<Self> {
        Self::from_unit(seconds, TICKS_PER_SECOND)
    }

    /// Interval of `minutes` whole minutes.
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        Self::from_unit(minutes, TICKS_PER_MINUTE)
    }

    /// Interval of `hours` whole hours.
    pub fn from_hours(hours: i64) -> Option<Self> {
        Self::from_unit(hours, TICKS_PER_HOUR)
    }

    /// Interval of `days` civil days of 86 400 seconds.
    pub fn from_days(days: i64) -> Option<Self> {
        Self::from_unit(days, TICKS_PER_DAY)
    }

    fn from_unit(count: i64, ticks_per_unit: i64) -> Option<Self> {
        let wide = i128::from(count).checked_mul(i128::from(ticks_per_unit))?;
        T::narrow(wide).map(Self)
    }

    /// Checked addition of two intervals.
    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(&other.0).map(Self)
    }

    /// Checked subtraction of two intervals.
    #[inline]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(&other.0).map(Self)
    }

    /// Checked negation.
    #[inline]
    pub fn checked_neg(self) -> Option<Self> {
        self.0.checked_neg().map(Self)
    }

    /// Checked scaling by an integer factor.
    pub fn checked_mul(self, factor: i64) -> Option<Self> {
        let wide = self.0.widen().checked_mul(i128::from(factor))?;
        T::narrow(wide).map(Self)
    }
}

impl<T: Scalar> Add for TimeInterval<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.checked_add(rhs).expect("overflow adding TimeInterval")
    }
}

impl<T: Scalar> Sub for TimeInterval<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.checked_sub(rhs)
            .expect("overflow subtracting TimeInterval")
    }
}

impl<T: Scalar> Neg for TimeInterval<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.checked_neg().expect("overflow negating TimeInterval")
    }
}

impl<T: Scalar> AddAssign for TimeInterval<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for TimeInterval<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> From<T> for TimeInterval<T> {
    #[inline]
    fn from(ticks: T) -> Self {
        Self(ticks)
    }
}

impl<T: Scalar> fmt::Display for TimeInterval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeStamp<T>
// ═══════════════════════════════════════════════════════════════════════════

/// A point on the linear tick clock.
///
/// Total order is inherited from `T`. Intervals act on stamps:
/// `b.checked_add(a.since(b)?) == Some(a)` for all stamps `a`, `b` whose
/// difference is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeStamp<T: Scalar>(T);

impl<T: Scalar> TimeStamp<T> {
    /// Stamp from a raw tick count since the epoch.
    #[inline]
    pub fn from_ticks(ticks: T) -> Self {
        Self(ticks)
    }

    /// The epoch instant itself.
    #[inline]
    pub fn epoch() -> Self {
        Self(T::zero())
    }

    /// The underlying tick count.
    #[inline]
    pub fn ticks(self) -> T {
        self.0
    }

    /// Checked displacement by an interval.
    #[inline]
    pub fn checked_add(self, interval: TimeInterval<T>) -> Option<Self> {
        self.0.checked_add(&interval.ticks()).map(Self)
    }

    /// Checked displacement by the negation of an interval.
    #[inline]
    pub fn checked_sub(self, interval: TimeInterval<T>) -> Option<Self> {
        self.0.checked_sub(&interval.ticks()).map(Self)
    }

    /// The interval from `other` to `self`, the inverse of the group
    /// action: `other.checked_add(self.since(other)?) == Some(self)`.
    #[inline]
    pub fn since(self, other: Self) -> Option<TimeInterval<T>> {
        self.0.checked_sub(&other.0).map(TimeInterval::from_ticks)
    }

    /// Element-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Element-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }

    // ── chrono bridge ─────────────────────────────────────────────────

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// POSIX-style: leap seconds are ignored, exactly as Unix time ignores
    /// them, so this is a uniform-axis reading. Sub-second precision is
    /// exact (a tick is a whole number of nanoseconds). Returns `None` if
    /// the instant falls outside chrono's representable range.
    pub fn to_utc(self) -> Option<ChronoDateTime<Utc>> {
        let unix_ticks = self.0.widen() - UNIX_EPOCH_TICKS;
        let secs = unix_ticks.div_euclid(i128::from(TICKS_PER_SECOND));
        let nanos = unix_ticks.rem_euclid(i128::from(TICKS_PER_SECOND)) * 100;
        ChronoDateTime::<Utc>::from_timestamp(i64::try_from(secs).ok()?, nanos as u32)
    }

    /// Build a stamp from a `chrono::DateTime<Utc>`.
    ///
    /// POSIX-style, like [`to_utc`](Self::to_utc). Nanoseconds below the
    /// 100 ns tick resolution are truncated. Returns `None` if the tick
    /// count overflows `T`.
    pub fn from_utc(datetime: ChronoDateTime<Utc>) -> Option<Self> {
        let secs = i128::from(datetime.timestamp());
        let nanos = i128::from(datetime.timestamp_subsec_nanos());
        let unix_ticks = secs * i128::from(TICKS_PER_SECOND) + nanos / 100;
        T::narrow(unix_ticks + UNIX_EPOCH_TICKS).map(Self)
    }
}

impl<T: Scalar> Add<TimeInterval<T>> for TimeStamp<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: TimeInterval<T>) -> Self {
        self.checked_add(rhs)
            .expect("overflow adding TimeInterval to TimeStamp")
    }
}

impl<T: Scalar> Sub<TimeInterval<T>> for TimeStamp<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: TimeInterval<T>) -> Self {
        self.checked_sub(rhs)
            .expect("overflow subtracting TimeInterval from TimeStamp")
    }
}

impl<T: Scalar> Sub for TimeStamp<T> {
    type Output = TimeInterval<T>;
    #[inline]
    fn sub(self, rhs: Self) -> TimeInterval<T> {
        self.since(rhs).expect("overflow differencing TimeStamps")
    }
}

impl<T: Scalar> AddAssign<TimeInterval<T>> for TimeStamp<T> {
    #[inline]
    fn add_assign(&mut self, rhs: TimeInterval<T>) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign<TimeInterval<T>> for TimeStamp<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeInterval<T>) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> From<T> for TimeStamp<T> {
    #[inline]
    fn from(ticks: T) -> Self {
        Self(ticks)
    }
}

impl<T: Scalar> fmt::Display for TimeStamp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks since epoch", self.0)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<T: Scalar + Serialize> Serialize for TimeInterval<T> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Scalar + Deserialize<'de>> Deserialize<'de> for TimeInterval<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self)
    }
}

#[cfg(feature = "serde")]
impl<T: Scalar + Serialize> Serialize for TimeStamp<T> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Scalar + Deserialize<'de>> Deserialize<'de> for TimeStamp<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Clock capability
// ═══════════════════════════════════════════════════════════════════════════

/// Wall-clock capability.
///
/// This crate never reads the system clock itself; callers inject a `Clock`
/// where "now" is needed. Any closure returning a stamp is a clock.
pub trait Clock<T: Scalar> {
    /// The current instant.
    fn now(&self) -> TimeStamp<T>;
}

impl<T: Scalar, F> Clock<T> for F
where
    F: Fn() -> TimeStamp<T>,
{
    #[inline]
    fn now(&self) -> TimeStamp<T> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_action_law() {
        let a = TimeStamp::from_ticks(1_234_567_890i64);
        let b = TimeStamp::from_ticks(-987_654i64);
        let diff = a.since(b).unwrap();
        assert_eq!(b.checked_add(diff), Some(a));
        assert_eq!(b + diff, a);
    }

    #[test]
    fn zero_interval_is_identity() {
        let s = TimeStamp::from_ticks(42i64);
        assert_eq!(s + TimeInterval::zero(), s);
        assert_eq!(s.since(s), Some(TimeInterval::zero()));
    }

    #[test]
    fn interval_group_ops() {
        let i = TimeInterval::from_ticks(600i64);
        let j = TimeInterval::from_ticks(-200i64);
        assert_eq!((i + j).ticks(), 400);
        assert_eq!((i - j).ticks(), 800);
        assert_eq!((-i).ticks(), -600);
        assert_eq!(i.checked_mul(3), Some(TimeInterval::from_ticks(1800)));
    }

    #[test]
    fn unit_constructors() {
        assert_eq!(
            TimeInterval::<i64>::from_seconds(1).unwrap().ticks(),
            10_000_000
        );
        assert_eq!(
            TimeInterval::<i64>::from_minutes(-1).unwrap().ticks(),
            -600_000_000
        );
        assert_eq!(
            TimeInterval::<i64>::from_days(1).unwrap().ticks(),
            864_000_000_000
        );
        assert_eq!(TimeInterval::<i64>::from_days(i64::MAX), None);
    }

    #[test]
    fn checked_ops_surface_overflow() {
        let top = TimeStamp::from_ticks(i64::MAX);
        assert_eq!(top.checked_add(TimeInterval::from_ticks(1)), None);
        let bottom = TimeStamp::from_ticks(i64::MIN);
        assert_eq!(bottom.since(top), None);
    }

    #[test]
    fn min_max() {
        let earlier = TimeStamp::from_ticks(1i64);
        let later = TimeStamp::from_ticks(2i64);
        assert_eq!(earlier.min(later), earlier);
        assert_eq!(earlier.max(later), later);
    }

    #[test]
    fn unix_epoch_tick_anchor() {
        let unix_epoch = ChronoDateTime::from_timestamp(0, 0).unwrap();
        let stamp = TimeStamp::<i64>::from_utc(unix_epoch).unwrap();
        assert_eq!(stamp.ticks(), 621_355_968_000_000_000);
    }

    #[test]
    fn utc_roundtrip_preserves_ticks() {
        // 2000-01-01T12:00:00.0000001Z (one tick past the second)
        let dt = ChronoDateTime::from_timestamp(946_728_000, 100).unwrap();
        let stamp = TimeStamp::<i64>::from_utc(dt).unwrap();
        let back = stamp.to_utc().unwrap();
        assert_eq!(back, dt);
    }

    #[test]
    fn utc_bridge_is_proleptic_before_unix_epoch() {
        let before = ChronoDateTime::from_timestamp(-86_400, 0).unwrap(); // 1969-12-31
        let stamp = TimeStamp::<i64>::from_utc(before).unwrap();
        assert_eq!(stamp.ticks(), 621_355_968_000_000_000 - 864_000_000_000);
        assert_eq!(stamp.to_utc().unwrap(), before);
    }

    #[test]
    fn closure_is_a_clock() {
        let clock = || TimeStamp::from_ticks(7i64);
        assert_eq!(clock.now(), TimeStamp::from_ticks(7));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_stamp_is_transparent_scalar() {
        let stamp = TimeStamp::from_ticks(123i64);
        let json = serde_json::to_string(&stamp).unwrap();
        assert_eq!(json, "123");
        let back: TimeStamp<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stamp);
    }
}
