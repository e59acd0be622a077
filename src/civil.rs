// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil-calendar value types.
//!
//! # Core types
//!
//! - [`Month`] — calendar month enumeration (January = 1 … December = 12).
//! - [`DateTime<T>`] — structured civil representation of an instant.
//! - [`DateTimeInterval<T>`] — field-wise calendar interval.
//!
//! `DateTime` is a plain bag of fields on purpose: whether a combination of
//! fields denotes a real instant is a question only a
//! [`Calendar`](crate::Calendar) can answer (leap years, leap seconds, and
//! the representable range all depend on calendar configuration), and
//! interval arithmetic deliberately passes through out-of-range fields
//! (day 31 of a 30-day month) that `normalize` later resolves. The wide
//! field types (`i128` year, `i64` day/time fields) exist to hold those
//! intermediates without wrapping.
//!
//! Year numbering is the "no year 0" civil convention: year 1 is 1 CE and
//! year −1 is 1 BCE. The astronomical numbering (where 0 = 1 BCE) is used
//! internally by the conversion formulas.

use std::fmt;

use crate::scalar::Scalar;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ticks per second: one tick is 100 ns.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Ticks per minute.
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;

/// Ticks per hour.
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;

/// Ticks per civil day of 86 400 seconds.
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;

// ═══════════════════════════════════════════════════════════════════════════
// Month
// ═══════════════════════════════════════════════════════════════════════════

/// A month of the proleptic Gregorian calendar.
///
/// Numbered 1 (January) through 12 (December). Because the month is an
/// enumeration, an out-of-range month is unrepresentable: interval
/// arithmetic resolves month overflow (month 13, month 0) into a year carry
/// at the point where months are added, never in a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i8)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    /// The twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The month number, 1..=12.
    #[inline]
    pub const fn number(self) -> i64 {
        self as i8 as i64
    }

    /// Month from its 1-based number; `None` outside 1..=12.
    #[inline]
    pub fn from_number(n: i64) -> Option<Month> {
        if (1..=12).contains(&n) {
            Some(Month::ALL[(n - 1) as usize])
        } else {
            None
        }
    }

    /// Month from a 0-based index known to be in 0..=11.
    #[inline]
    pub(crate) fn from_index0(index: i64) -> Month {
        Month::ALL[index as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        };
        f.write_str(name)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Leap-year rule and month lengths
// ═══════════════════════════════════════════════════════════════════════════

/// Whether `year` (civil "no year 0" numbering; 0 is tolerated and read as
/// 1 BCE) is a Gregorian leap year: divisible by 4, and not by 100 unless
/// also by 400. Proleptic in both directions.
#[inline]
pub fn is_gregorian_leap_year(year: i128) -> bool {
    is_leap_astronomical(astronomical_year(year))
}

/// Leap-year rule on the astronomical axis (year 0 exists and is a leap
/// year: it is 1 BCE).
#[inline]
pub(crate) fn is_leap_astronomical(year: i128) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Days in `month` of `year` (civil numbering), 28..=31.
#[inline]
pub fn days_in_month(year: i128, month: Month) -> i64 {
    days_in_month_astro(astronomical_year(year), month)
}

pub(crate) fn days_in_month_astro(year: i128, month: Month) -> i64 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_astronomical(year) {
                29
            } else {
                28
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Year numbering and ordinal-day arithmetic
// ═══════════════════════════════════════════════════════════════════════════

/// Civil "no year 0" numbering → astronomical numbering.
///
/// Year −1 (1 BCE) becomes 0, −2 becomes −1, and so on. Year 0 is not a
/// civil year; it is tolerated here and read as 1 BCE so that `normalize`
/// can repair degenerate input.
#[inline]
pub(crate) fn astronomical_year(year: i128) -> i128 {
    if year < 0 {
        year + 1
    } else {
        year
    }
}

/// Astronomical numbering → civil "no year 0" numbering.
#[inline]
pub(crate) fn display_year(astronomical: i128) -> i128 {
    if astronomical <= 0 {
        astronomical - 1
    } else {
        astronomical
    }
}

/// Ordinal day number of an astronomical (year, month, day) triple: days
/// since 0001-01-01 of the proleptic Gregorian calendar, negative before it.
///
/// Era-based 400-year-cycle arithmetic; exact over the whole `i128` range
/// the crate can produce.
pub(crate) fn days_from_civil(year: i128, month: Month, day: i64) -> i128 {
    let m = month.number() as i128;
    let y = if m <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let mp = if m > 2 { m - 3 } else { m + 9 }; // March-based month [0, 11]
    let doy = (153 * mp + 2) / 5 + i128::from(day) - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146_097 + doe - 306
}

/// Inverse of [`days_from_civil`]: ordinal day number → astronomical
/// (year, month, day).
pub(crate) fn civil_from_days(days: i128) -> (i128, Month, i64) {
    let z = days + 306;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let mut year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let day = (doy - (153 * mp + 2) / 5 + 1) as i64; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    if m <= 2 {
        year += 1;
    }
    (year, Month::from_index0((m - 1) as i64), day)
}

// ═══════════════════════════════════════════════════════════════════════════
// DateTime<T>
// ═══════════════════════════════════════════════════════════════════════════

/// A structured civil reading of an instant: year, month, day, time of day,
/// and a sub-second tick count in `[0, 10_000_000)`.
///
/// Ordering is field-lexicographic, which coincides with chronological
/// order for datetimes of one calendar configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime<T: Scalar> {
    /// Civil year; never 0 in a valid datetime (year −1 is 1 BCE).
    pub year: i128,
    /// Calendar month.
    pub month: Month,
    /// Day of month, 1-based in a valid datetime.
    pub day: i64,
    /// Hour of day, 0..=23 in a valid datetime.
    pub hour: i64,
    /// Minute of hour, 0..=59 in a valid datetime.
    pub minute: i64,
    /// Second of minute; 0..=59, with 60 only inside an inserted leap
    /// second and at most 58 in a minute shortened by a deletion.
    pub second: i64,
    /// Sub-second ticks, `[0, 10_000_000)` in a valid datetime.
    pub tick: T,
}

impl<T: Scalar> DateTime<T> {
    /// Assembles a datetime from raw fields. No validation is performed;
    /// ask a [`Calendar`](crate::Calendar) whether the result is `valid`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i128,
        month: Month,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        tick: T,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            tick,
        }
    }
}

impl<T: Scalar> fmt::Display for DateTime<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::text::render(&crate::text::DecimalTicks, self))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// DateTimeInterval<T>
// ═══════════════════════════════════════════════════════════════════════════

/// A calendar interval: signed per-field displacements.
///
/// Unlike [`TimeInterval`](crate::TimeInterval) this is not a flat tick
/// count (adding one month has no fixed tick length), so it only has
/// meaning through a [`Calendar`](crate::Calendar) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTimeInterval<T: Scalar> {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub ticks: T,
}

impl<T: Scalar> DateTimeInterval<T> {
    /// Builds an interval from per-field displacements.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        ticks: T,
    ) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            ticks,
        }
    }

    /// The identity interval.
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0, 0, 0, T::zero())
    }
}
