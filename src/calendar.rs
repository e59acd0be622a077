// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The abstract calendar contract.
//!
//! A calendar system is anything that maps the linear tick clock onto
//! structured civil fields and back. Implementations are ordinary values
//! (strategy objects) passed around explicitly; the crate ships the
//! proleptic Gregorian + UTC engine [`GregorianUtc`](crate::GregorianUtc),
//! and new calendar systems are added as new implementations of this same
//! trait.
//!
//! The trait is object safe, so `&dyn Calendar<i64>` works where runtime
//! selection of a calendar system is wanted.

use crate::civil::{DateTime, DateTimeInterval};
use crate::error::Error;
use crate::instant::TimeStamp;
use crate::scalar::Scalar;
use crate::text::TickFormat;

/// A bijective mapping between [`TimeStamp`]s and civil [`DateTime`]s,
/// plus calendar interval arithmetic and a text codec.
///
/// # Contract
///
/// For a correctly constructed calendar, [`to_datetime`](Self::to_datetime)
/// is total and injective over the whole stamp range, and its image is
/// exactly the set of `valid` datetimes in that range: proleptic, with no
/// gaps and no duplicates. Consequently `valid(d)` implies
/// `from_datetime(d) == Some(s)` with `to_datetime(s) == d`.
///
/// The abstract contract does not itself require the mapping to be a
/// bijection (a calendar that relabels the same civil day twice could
/// implement this trait), but every operation on the reference
/// implementation relies on it, and non-bijective calendars are outside
/// the scope of this crate.
pub trait Calendar<T: Scalar> {
    /// The civil reading of `stamp`. Total: every stamp has exactly one
    /// reading.
    fn to_datetime(&self, stamp: TimeStamp<T>) -> DateTime<T>;

    /// The stamp a civil reading denotes; `None` if the datetime is not
    /// valid or the instant overflows the representable stamp range.
    /// Never panics.
    fn from_datetime(&self, datetime: DateTime<T>) -> Option<TimeStamp<T>>;

    /// Applies a calendar interval field by field: years to the year,
    /// months to the month with a carry into the year, and so on.
    ///
    /// The result is **not** required to be valid: day 31 plus one month
    /// lands on day 31 of a 30-day month. Feed it through
    /// [`normalize`](Self::normalize) to obtain a valid datetime.
    fn plus(&self, interval: DateTimeInterval<T>, datetime: DateTime<T>) -> DateTime<T>;

    /// Field-wise difference `a − b` as a calendar interval (not a flat
    /// tick difference).
    fn diff(&self, a: DateTime<T>, b: DateTime<T>) -> DateTimeInterval<T>;

    /// Canonicalizes an out-of-range datetime into a valid one under the
    /// implementation's documented policy. Idempotent on valid input.
    fn normalize(&self, datetime: DateTime<T>) -> DateTime<T>;

    /// Whether `datetime` is in the image of [`to_datetime`](Self::to_datetime).
    fn valid(&self, datetime: DateTime<T>) -> bool {
        self.from_datetime(datetime).is_some()
    }

    /// Renders `datetime` as ISO-8601-shaped text, with the sub-second
    /// field rendered by the supplied [`TickFormat`].
    fn to_text(&self, ticks: &dyn TickFormat<T>, datetime: DateTime<T>) -> String;

    /// Parses ISO-8601-shaped text. Malformed syntax yields
    /// [`Error::Syntax`]; well-formed text whose fields this calendar
    /// rejects yields [`Error::InvalidDateTime`], mirroring
    /// [`from_datetime`](Self::from_datetime).
    fn from_text(&self, ticks: &dyn TickFormat<T>, text: &str) -> Result<DateTime<T>, Error>;
}
