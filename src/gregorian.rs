// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The proleptic Gregorian + UTC conversion engine.
//!
//! [`GregorianUtc<T>`] implements [`Calendar`] for the civil calendar most
//! callers mean by "a date": proleptic Gregorian dates, a fixed timezone
//! offset applied to UTC, and leap seconds taken from an externally
//! supplied table.
//!
//! # Conversion pipeline
//!
//! `to_datetime` peels the stamp apart in three steps: the leap-second
//! table translates the elapsed-tick axis onto the uniform 86 400 s/day
//! axis (an inserted second is held aside and re-labelled `:60`), the
//! configured offset shifts UTC to local, and era arithmetic over the
//! 400/100/4/1-year leap cycle inverts the day count into year/month/day.
//! `from_datetime` is the exact inverse pipeline, validating first and
//! reporting range overflow as `None` through the scalar's narrowing
//! capability.
//!
//! # Leap-second windows under an offset
//!
//! The table records UTC minutes. The local minute that accepts `:60` (or
//! loses `:59`) is derived by shifting the recorded minute by the
//! configured offset, so a calendar at +02:00 sees the 2016 insertion as
//! `2017-01-01T01:59:60` local.
//!
//! # Normalization policy
//!
//! `normalize` commits to *truncation*: after cascading sub-day overflow
//! (ticks through hours) into a whole-day carry, a day beyond the end of
//! its month is pulled back to the month's last day, and only then is the
//! day carry applied by real date arithmetic. So `31 May + 1 month`
//! normalizes to `30 June` (not `1 July`), while `31 Jan 23:00 + 2 h`
//! rolls over to `1 Feb 01:00`. Rollover would be an equally defensible
//! policy; this engine picks truncation and keeps it.

use crate::calendar::Calendar;
use crate::civil::{
    self, DateTime, DateTimeInterval, Month, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE,
    TICKS_PER_SECOND,
};
use crate::error::Error;
use crate::instant::{TimeInterval, TimeStamp};
use crate::leap::LeapSecondTable;
use crate::scalar::Scalar;
use crate::text::{self, TickFormat};

const TPS: i128 = TICKS_PER_SECOND as i128;
const TPM: i128 = TICKS_PER_MINUTE as i128;
const TPH: i128 = TICKS_PER_HOUR as i128;
const TPD: i128 = TICKS_PER_DAY as i128;

/// Years beyond this bound cannot denote a representable instant for any
/// supported scalar (`i128` ticks top out near year 5.4 × 10²³), but are
/// still far below where the era arithmetic itself would overflow. Used to
/// cut off `from_datetime` before composing, and to bound `normalize`'s
/// repair.
const YEAR_GUARD: i128 = 1_000_000_000_000_000_000_000_000_000_000;

/// Proleptic Gregorian + UTC calendar with leap seconds.
///
/// Configuration is fixed at construction: a timezone offset (added to UTC
/// to obtain local civil time) and an ascending [`LeapSecondTable`].
/// Instances are immutable and safe for unsynchronized concurrent use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GregorianUtc<T: Scalar> {
    offset: TimeInterval<T>,
    table: LeapSecondTable,
}

impl<T: Scalar> GregorianUtc<T> {
    /// Calendar with an explicit offset interval.
    ///
    /// Leap-second minute labelling assumes the offset is a whole number of
    /// minutes, which is what timezone capabilities supply (use
    /// [`with_offset_minutes`](Self::with_offset_minutes)); a sub-minute
    /// offset shifts the civil reading correctly but leaves inserted
    /// seconds labelled inside the wrong minute.
    pub fn new(offset: TimeInterval<T>, table: LeapSecondTable) -> Self {
        Self { offset, table }
    }

    /// Calendar reading UTC directly (zero offset).
    pub fn utc(table: LeapSecondTable) -> Self {
        Self::new(TimeInterval::zero(), table)
    }

    /// Calendar from an integer-minutes offset, the form timezone
    /// capabilities supply; `None` if the offset overflows `T`.
    pub fn with_offset_minutes(minutes: i32, table: LeapSecondTable) -> Option<Self> {
        TimeInterval::from_minutes(i64::from(minutes)).map(|offset| Self::new(offset, table))
    }

    /// The configured offset.
    pub fn offset(&self) -> TimeInterval<T> {
        self.offset
    }

    /// The leap-second table this calendar consults.
    pub fn leap_seconds(&self) -> &LeapSecondTable {
        &self.table
    }

    fn offset_wide(&self) -> i128 {
        self.offset.ticks().widen()
    }

    /// Uniform local ticks of the start of a civil minute, `None` when the
    /// fields cannot denote any instant.
    fn minute_start_local(&self, datetime: &DateTime<T>) -> Option<i128> {
        if datetime.year == 0 {
            return None;
        }
        let astro = civil::astronomical_year(datetime.year);
        if !(-YEAR_GUARD..=YEAR_GUARD).contains(&astro) {
            return None;
        }
        if !(1..=civil::days_in_month_astro(astro, datetime.month)).contains(&datetime.day) {
            return None;
        }
        if !(0..=23).contains(&datetime.hour) || !(0..=59).contains(&datetime.minute) {
            return None;
        }
        let days = civil::days_from_civil(astro, datetime.month, datetime.day);
        days.checked_mul(TPD)?
            .checked_add(i128::from(datetime.hour) * TPH)?
            .checked_add(i128::from(datetime.minute) * TPM)
    }
}

impl<T: Scalar> Calendar<T> for GregorianUtc<T> {
    fn to_datetime(&self, stamp: TimeStamp<T>) -> DateTime<T> {
        let raw = stamp.ticks().widen();
        let (leap_offset, in_leap) = self.table.offset_at_stamp(raw);
        // Saturation here only matters within a few leap seconds of the
        // very ends of i128, outside any representable civil year.
        let uniform_utc = raw.saturating_sub(leap_offset);
        let local = uniform_utc.saturating_add(self.offset_wide());
        // An inserted second decomposes as the preceding :59 second and is
        // re-labelled :60 below.
        let base = if in_leap { local - TPS } else { local };

        let days = base.div_euclid(TPD);
        let time_of_day = base.rem_euclid(TPD);
        let (astro, month, day) = civil::civil_from_days(days);

        let hour = (time_of_day / TPH) as i64;
        let minute = (time_of_day % TPH / TPM) as i64;
        let mut second = (time_of_day % TPM / TPS) as i64;
        let tick = time_of_day % TPS;
        if in_leap {
            second += 1;
        }

        DateTime {
            year: civil::display_year(astro),
            month,
            day,
            hour,
            minute,
            second,
            tick: T::narrow(tick).expect("sub-second ticks fit every Scalar"),
        }
    }

    fn from_datetime(&self, datetime: DateTime<T>) -> Option<TimeStamp<T>> {
        let minute_start_local = self.minute_start_local(&datetime)?;
        let tick = datetime.tick.widen();
        if !(0..TPS).contains(&tick) {
            return None;
        }
        let minute_start_utc = minute_start_local.checked_sub(self.offset_wide())?;

        let uniform_utc = match datetime.second {
            60 => {
                // Only real inside the minute a positive record names.
                let cum_before = self.table.insertion_at_minute(minute_start_utc)?;
                let composed = minute_start_utc.checked_add(59 * TPS + tick)?;
                let uniform = composed.checked_add(TPS)?;
                return T::narrow(uniform.checked_add(cum_before)?).map(TimeStamp::from_ticks);
            }
            59 if self.table.deletion_at_minute(minute_start_utc) => return None,
            second if !(0..=59).contains(&second) => return None,
            second => minute_start_utc.checked_add(i128::from(second) * TPS + tick)?,
        };
        let stamp = uniform_utc.checked_add(self.table.offset_at_uniform(uniform_utc))?;
        T::narrow(stamp).map(TimeStamp::from_ticks)
    }

    fn plus(&self, interval: DateTimeInterval<T>, datetime: DateTime<T>) -> DateTime<T> {
        // Months carry into years here; the Month enum cannot hold a 13.
        let month0 = i128::from(datetime.month.number() - 1) + i128::from(interval.months);
        let astro = civil::astronomical_year(datetime.year)
            .saturating_add(i128::from(interval.years))
            .saturating_add(month0.div_euclid(12));
        let month = Month::from_index0(month0.rem_euclid(12) as i64);

        let tick = saturating_narrow(datetime.tick.widen().saturating_add(interval.ticks.widen()));

        DateTime {
            year: civil::display_year(astro),
            month,
            day: datetime.day.saturating_add(interval.days),
            hour: datetime.hour.saturating_add(interval.hours),
            minute: datetime.minute.saturating_add(interval.minutes),
            second: datetime.second.saturating_add(interval.seconds),
            tick,
        }
    }

    fn diff(&self, a: DateTime<T>, b: DateTime<T>) -> DateTimeInterval<T> {
        let years =
            civil::astronomical_year(a.year).saturating_sub(civil::astronomical_year(b.year));
        let ticks = a.tick.widen().saturating_sub(b.tick.widen());
        DateTimeInterval {
            years: clamp_i64(years),
            months: a.month.number() - b.month.number(),
            days: a.day.saturating_sub(b.day),
            hours: a.hour.saturating_sub(b.hour),
            minutes: a.minute.saturating_sub(b.minute),
            seconds: a.second.saturating_sub(b.second),
            ticks: saturating_narrow(ticks),
        }
    }

    fn normalize(&self, datetime: DateTime<T>) -> DateTime<T> {
        // Valid input comes back untouched, which both guarantees
        // idempotence and preserves a legitimate :60.
        if self.valid(datetime) {
            return datetime;
        }

        let astro = civil::astronomical_year(datetime.year).clamp(-YEAR_GUARD, YEAR_GUARD);

        // Sub-day cascade: ticks through hours, collecting a day carry.
        let tick_wide = datetime.tick.widen();
        let mut second = i128::from(datetime.second) + tick_wide.div_euclid(TPS);
        let tick = tick_wide.rem_euclid(TPS);
        let mut minute = i128::from(datetime.minute) + second.div_euclid(60);
        second = second.rem_euclid(60);
        let mut hour = i128::from(datetime.hour) + minute.div_euclid(60);
        minute = minute.rem_euclid(60);
        let day_carry = hour.div_euclid(24);
        hour = hour.rem_euclid(24);

        // Truncate the day into its month, then roll the carry through the
        // ordinal-day form so time overflow crosses month and year seams.
        let last = civil::days_in_month_astro(astro, datetime.month);
        let day = datetime.day.clamp(1, last);
        let days = civil::days_from_civil(astro, datetime.month, day) + day_carry;
        let (astro, month, day) = civil::civil_from_days(days);

        DateTime {
            year: civil::display_year(astro),
            month,
            day,
            hour: hour as i64,
            minute: minute as i64,
            second: second as i64,
            tick: T::narrow(tick).expect("sub-second ticks fit every Scalar"),
        }
    }

    fn to_text(&self, ticks: &dyn TickFormat<T>, datetime: DateTime<T>) -> String {
        text::render(ticks, &datetime)
    }

    fn from_text(&self, ticks: &dyn TickFormat<T>, input: &str) -> Result<DateTime<T>, Error> {
        let datetime = text::parse(ticks, input)?;
        if self.valid(datetime) {
            Ok(datetime)
        } else {
            Err(Error::InvalidDateTime {
                input: input.to_string(),
            })
        }
    }
}

fn clamp_i64(wide: i128) -> i64 {
    wide.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

fn saturating_narrow<T: Scalar>(wide: i128) -> T {
    T::narrow(wide).unwrap_or_else(|| {
        if wide > 0 {
            T::max_value()
        } else {
            T::min_value()
        }
    })
}
