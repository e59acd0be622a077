// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap-second table.
//!
//! A [`LeapSecondRecord`] names the UTC civil minute a leap second was
//! applied to and whether it was an insertion (the minute gained a second
//! labelled `:60`) or a deletion (the minute lost its `:59` second). The
//! [`LeapSecondTable`] is the ascending sequence of such records, supplied
//! at calendar construction and immutable thereafter; refreshed leap-second
//! knowledge means constructing a new calendar.
//!
//! Internally each record is resolved to two tick positions:
//!
//! - the *uniform* boundary: the tick count of the end of the affected
//!   minute under the fiction that every day has 86 400 seconds (the axis
//!   civil field decomposition runs on), and
//! - the *stamp* boundary: the same instant on the real elapsed-tick axis,
//!   i.e. the uniform boundary plus every leap second accumulated so far.
//!
//! Conversions binary-search these boundaries; an inserted second is the
//! one-second stamp window just before its boundary, reported separately so
//! the engine can label it `:60` instead of advancing the day.

use crate::civil::{
    self, days_in_month, Month, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const TPS: i128 = TICKS_PER_SECOND as i128;
const TPM: i128 = TICKS_PER_MINUTE as i128;
const TPH: i128 = TICKS_PER_HOUR as i128;
const TPD: i128 = TICKS_PER_DAY as i128;

/// Direction of a leap-second correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LeapSign {
    /// The affected minute carries an extra second labelled `:60`.
    Inserted,
    /// The affected minute ends after second `:58`; `:59` never happens.
    Deleted,
}

/// One announced leap-second event.
///
/// The civil fields name the affected UTC minute; the second value is
/// implied by the sign (60 for an insertion, the omitted 59 for a
/// deletion). Year numbering is the civil "no year 0" convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeapSecondRecord {
    pub year: i128,
    pub month: Month,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub sign: LeapSign,
}

impl LeapSecondRecord {
    /// A positive leap second: `year-month-day hour:minute:60Z` exists.
    pub fn inserted(year: i128, month: Month, day: i64, hour: i64, minute: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            sign: LeapSign::Inserted,
        }
    }

    /// A negative leap second: `year-month-day hour:minute:59Z` is skipped.
    pub fn deleted(year: i128, month: Month, day: i64, hour: i64, minute: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            sign: LeapSign::Deleted,
        }
    }

    /// Years a leap-second record may name. Wide enough for any table that
    /// could ever exist, narrow enough that the tick arithmetic below
    /// cannot overflow.
    const YEAR_RANGE: std::ops::RangeInclusive<i128> = -1_000_000_000..=1_000_000_000;

    /// Uniform UTC tick count of the start of the affected minute.
    fn minute_start_uniform(&self) -> Option<i128> {
        if self.year == 0
            || !Self::YEAR_RANGE.contains(&self.year)
            || !(1..=days_in_month(self.year, self.month)).contains(&self.day)
            || !(0..=23).contains(&self.hour)
            || !(0..=59).contains(&self.minute)
        {
            return None;
        }
        let days = civil::days_from_civil(
            civil::astronomical_year(self.year),
            self.month,
            self.day,
        );
        Some(days * TPD + i128::from(self.hour) * TPH + i128::from(self.minute) * TPM)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    /// Uniform UTC ticks at the end boundary of the affected minute.
    boundary_uniform: i128,
    /// The same boundary on the elapsed-tick (stamp) axis.
    boundary_stamp: i128,
    /// Cumulative leap contribution, in ticks, at and after the boundary.
    cum_after: i128,
    sign: LeapSign,
}

/// Immutable, ascending table of leap-second events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeapSecondTable {
    records: Vec<LeapSecondRecord>,
    entries: Vec<Entry>,
}

impl LeapSecondTable {
    /// A table with no leap seconds: the uniform and stamp axes coincide.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from records, which must be in strictly ascending
    /// order of their affected minute.
    pub fn new(records: Vec<LeapSecondRecord>) -> Result<Self, Error> {
        let mut entries: Vec<Entry> = Vec::with_capacity(records.len());
        let mut cum: i128 = 0;
        for (index, record) in records.iter().enumerate() {
            let minute_start = record
                .minute_start_uniform()
                .ok_or(Error::InvalidLeapRecord { index })?;
            let boundary_uniform = minute_start + TPM;
            if let Some(prev) = entries.last() {
                if prev.boundary_uniform >= boundary_uniform {
                    return Err(Error::UnsortedLeapTable { index });
                }
            }
            cum += match record.sign {
                LeapSign::Inserted => TPS,
                LeapSign::Deleted => -TPS,
            };
            entries.push(Entry {
                boundary_uniform,
                boundary_stamp: boundary_uniform + cum,
                cum_after: cum,
                sign: record.sign,
            });
        }
        Ok(Self { records, entries })
    }

    /// The records this table was built from, ascending.
    pub fn records(&self) -> &[LeapSecondRecord] {
        &self.records
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table records no events.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cumulative leap contribution at a point on the stamp axis, plus
    /// whether the point lies inside an inserted leap second.
    ///
    /// Inside an inserted second the contribution *before* the record is
    /// returned, so subtracting it yields a uniform position in the
    /// following minute that the caller rewinds by one second and labels
    /// `:60`.
    pub(crate) fn offset_at_stamp(&self, stamp: i128) -> (i128, bool) {
        let idx = self.entries.partition_point(|e| e.boundary_stamp <= stamp);
        let base = if idx == 0 {
            0
        } else {
            self.entries[idx - 1].cum_after
        };
        if let Some(next) = self.entries.get(idx) {
            if next.sign == LeapSign::Inserted && stamp >= next.boundary_stamp - TPS {
                return (base, true);
            }
        }
        (base, false)
    }

    /// Cumulative leap contribution for a position on the uniform axis.
    pub(crate) fn offset_at_uniform(&self, uniform: i128) -> i128 {
        let idx = self
            .entries
            .partition_point(|e| e.boundary_uniform <= uniform);
        if idx == 0 {
            0
        } else {
            self.entries[idx - 1].cum_after
        }
    }

    /// If an insertion's affected minute starts at this uniform UTC tick
    /// count, the cumulative contribution in force *before* that record.
    pub(crate) fn insertion_at_minute(&self, minute_start_uniform: i128) -> Option<i128> {
        let boundary = minute_start_uniform + TPM;
        let idx = self
            .entries
            .binary_search_by(|e| e.boundary_uniform.cmp(&boundary))
            .ok()?;
        match self.entries[idx].sign {
            LeapSign::Inserted => Some(self.entries[idx].cum_after - TPS),
            LeapSign::Deleted => None,
        }
    }

    /// Whether a deletion shortened the minute starting at this uniform
    /// UTC tick count.
    pub(crate) fn deletion_at_minute(&self, minute_start_uniform: i128) -> bool {
        let boundary = minute_start_uniform + TPM;
        matches!(
            self.entries
                .binary_search_by(|e| e.boundary_uniform.cmp(&boundary)),
            Ok(idx) if self.entries[idx].sign == LeapSign::Deleted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minute_start(year: i128, month: Month, day: i64, hour: i64, minute: i64) -> i128 {
        LeapSecondRecord::inserted(year, month, day, hour, minute)
            .minute_start_uniform()
            .unwrap()
    }

    #[test]
    fn empty_table_has_no_offset() {
        let table = LeapSecondTable::empty();
        assert_eq!(table.offset_at_stamp(0), (0, false));
        assert_eq!(table.offset_at_stamp(i128::from(i64::MAX)), (0, false));
        assert_eq!(table.offset_at_uniform(12345), 0);
    }

    #[test]
    fn single_insertion_windows() {
        let table = LeapSecondTable::new(vec![LeapSecondRecord::inserted(
            2016,
            Month::December,
            31,
            23,
            59,
        )])
        .unwrap();
        let boundary_uniform = minute_start(2016, Month::December, 31, 23, 59) + TPM;
        let boundary_stamp = boundary_uniform + TPS;

        // Normal time just before the inserted second.
        assert_eq!(
            table.offset_at_stamp(boundary_stamp - TPS - 1),
            (0, false)
        );
        // Inside the inserted second: offset before the record, flagged.
        assert_eq!(table.offset_at_stamp(boundary_stamp - TPS), (0, true));
        assert_eq!(table.offset_at_stamp(boundary_stamp - 1), (0, true));
        // At and after the boundary the full contribution applies.
        assert_eq!(table.offset_at_stamp(boundary_stamp), (TPS, false));
        assert_eq!(table.offset_at_uniform(boundary_uniform), TPS);
        assert_eq!(table.offset_at_uniform(boundary_uniform - 1), 0);
    }

    #[test]
    fn cumulative_offsets_accumulate() {
        let table = LeapSecondTable::new(vec![
            LeapSecondRecord::inserted(2015, Month::June, 30, 23, 59),
            LeapSecondRecord::inserted(2016, Month::December, 31, 23, 59),
        ])
        .unwrap();
        let second_boundary = minute_start(2016, Month::December, 31, 23, 59) + TPM;
        assert_eq!(table.offset_at_uniform(second_boundary), 2 * TPS);
        assert_eq!(table.offset_at_stamp(second_boundary + 2 * TPS), (2 * TPS, false));
    }

    #[test]
    fn deletion_subtracts() {
        let table = LeapSecondTable::new(vec![LeapSecondRecord::deleted(
            2035,
            Month::June,
            30,
            23,
            59,
        )])
        .unwrap();
        let boundary_uniform = minute_start(2035, Month::June, 30, 23, 59) + TPM;
        assert_eq!(table.offset_at_uniform(boundary_uniform), -TPS);
        // No inserted-second window around a deletion.
        assert_eq!(
            table.offset_at_stamp(boundary_uniform - TPS),
            (0, false)
        );
        assert!(table.deletion_at_minute(boundary_uniform - TPM));
        assert_eq!(table.insertion_at_minute(boundary_uniform - TPM), None);
    }

    #[test]
    fn insertion_minute_lookup() {
        let table = LeapSecondTable::new(vec![
            LeapSecondRecord::inserted(2015, Month::June, 30, 23, 59),
            LeapSecondRecord::inserted(2016, Month::December, 31, 23, 59),
        ])
        .unwrap();
        let first = minute_start(2015, Month::June, 30, 23, 59);
        let second = minute_start(2016, Month::December, 31, 23, 59);
        assert_eq!(table.insertion_at_minute(first), Some(0));
        assert_eq!(table.insertion_at_minute(second), Some(TPS));
        assert_eq!(table.insertion_at_minute(first + TPM), None);
        assert!(!table.deletion_at_minute(first));
    }

    #[test]
    fn unsorted_records_rejected() {
        let err = LeapSecondTable::new(vec![
            LeapSecondRecord::inserted(2016, Month::December, 31, 23, 59),
            LeapSecondRecord::inserted(2015, Month::June, 30, 23, 59),
        ])
        .unwrap_err();
        assert_eq!(err, Error::UnsortedLeapTable { index: 1 });
    }

    #[test]
    fn duplicate_minute_rejected() {
        let record = LeapSecondRecord::inserted(2015, Month::June, 30, 23, 59);
        let err = LeapSecondTable::new(vec![record, record]).unwrap_err();
        assert_eq!(err, Error::UnsortedLeapTable { index: 1 });
    }

    #[test]
    fn out_of_range_record_rejected() {
        let err = LeapSecondTable::new(vec![LeapSecondRecord::inserted(
            2015,
            Month::June,
            31, // June has 30 days
            23,
            59,
        )])
        .unwrap_err();
        assert_eq!(err, Error::InvalidLeapRecord { index: 0 });

        let err = LeapSecondTable::new(vec![LeapSecondRecord::inserted(
            0,
            Month::June,
            30,
            23,
            59,
        )])
        .unwrap_err();
        assert_eq!(err, Error::InvalidLeapRecord { index: 0 });
    }
}
