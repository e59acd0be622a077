// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil Time Module
//!
//! This crate provides a tick-counting linear clock and a pluggable mapping
//! between that clock and civil-calendar field representations.
//!
//! # Core types
//!
//! - [`TimeStamp<T>`] — a point on the linear clock, in 100 ns ticks since
//!   0001-01-01T00:00:00 UTC (proleptic Gregorian).
//! - [`TimeInterval<T>`] — a signed tick count; the group acting on stamps.
//! - [`DateTime<T>`] — structured civil fields (year/month/day/time/ticks).
//! - [`DateTimeInterval<T>`] — per-field calendar displacement.
//! - [`Calendar`] — the contract any calendar system satisfies.
//! - [`GregorianUtc<T>`] — proleptic Gregorian + UTC with leap seconds.
//! - [`LeapSecondTable`] / [`LeapSecondRecord`] — announced leap seconds.
//! - [`Scalar`] — arithmetic capability of the tick scalar (`i64`, `i128`).
//! - [`TickFormat`] / [`DecimalTicks`] — sub-second codec capability.
//! - [`Clock`] — wall-clock capability, implemented by callers.
//!
//! # Conversions
//!
//! | Operation | Direction |
//! |-----------|-----------|
//! | [`Calendar::to_datetime`] | stamp → civil fields (total, injective) |
//! | [`Calendar::from_datetime`] | civil fields → stamp (`None` if invalid/overflow) |
//! | [`Calendar::plus`] / [`Calendar::diff`] | field-wise calendar arithmetic |
//! | [`Calendar::normalize`] | out-of-range fields → valid datetime (truncation policy) |
//! | [`Calendar::to_text`] / [`Calendar::from_text`] | ISO-8601-style codec |
//!
//! # Leap seconds
//!
//! A [`GregorianUtc`] calendar is constructed from a timezone offset and an
//! ascending [`LeapSecondTable`]; both are fixed for the life of the
//! instance, so a constructed calendar is safe for unsynchronized
//! concurrent use. Refreshing leap-second knowledge means constructing a
//! new calendar. With an empty table the stamp axis and the civil axis
//! coincide with POSIX time shifted to the year-1 epoch.
//!
//! # Quick example
//!
//! ```
//! use civitime::{Calendar, DateTime, DecimalTicks, GregorianUtc, LeapSecondTable, Month, TimeStamp};
//!
//! let calendar = GregorianUtc::<i64>::utc(LeapSecondTable::empty());
//! let datetime = calendar.to_datetime(TimeStamp::from_ticks(621_355_968_000_000_000));
//! assert_eq!(datetime, DateTime::new(1970, Month::January, 1, 0, 0, 0, 0));
//! assert_eq!(
//!     calendar.to_text(&DecimalTicks, datetime),
//!     "1970-01-01T00:00:00.0000000Z"
//! );
//! ```

mod calendar;
mod civil;
mod error;
mod gregorian;
mod instant;
mod leap;
mod scalar;
mod text;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::Calendar;
pub use civil::{
    days_in_month, is_gregorian_leap_year, DateTime, DateTimeInterval, Month, TICKS_PER_DAY,
    TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
pub use error::Error;
pub use gregorian::GregorianUtc;
pub use instant::{Clock, TimeInterval, TimeStamp};
pub use leap::{LeapSecondRecord, LeapSecondTable, LeapSign};
pub use scalar::Scalar;
pub use text::{DecimalTicks, TickFormat};
