// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! ISO-8601-style text codec.
//!
//! The one wire format this crate defines:
//!
//! ```text
//! [-]YYYY-MM-DDTHH:MM:SS.fffffffZ
//! ```
//!
//! Zero-padded fields, the year sign-extended and padded to at least four
//! digits, a literal `Z` suffix. The sub-second field is delegated to a
//! caller-supplied [`TickFormat`] capability so exotic scalars can choose
//! their own rendering; [`DecimalTicks`] is the stock fixed-point
//! implementation.
//!
//! Rendering writes the civil fields verbatim; it never re-converts. For
//! a calendar configured with a non-zero offset the text is therefore the
//! local civil reading; the `Z` is a fixed part of the grammar, not a
//! recomputed zone designator. This is the committed display choice of the
//! crate, and the parser is its exact inverse.

use crate::civil::{DateTime, Month, TICKS_PER_SECOND};
use crate::error::Error;
use crate::scalar::Scalar;

/// Sub-second formatting/parsing capability for the tick field.
pub trait TickFormat<T: Scalar> {
    /// Renders a tick count in `[0, 10_000_000)`.
    fn format(&self, tick: T) -> String;

    /// Parses what [`format`](Self::format) produced (and reasonable
    /// variations of it); `None` when the digits do not denote a tick
    /// count in `[0, 10_000_000)`.
    fn parse(&self, text: &str) -> Option<T>;
}

/// Fixed-point decimal tick rendering: always seven digits out, one to
/// seven digits in (shorter fractions scale up, so `.5` is half a second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalTicks;

impl<T: Scalar> TickFormat<T> for DecimalTicks {
    fn format(&self, tick: T) -> String {
        format!("{:07}", tick.widen())
    }

    fn parse(&self, text: &str) -> Option<T> {
        if text.is_empty() || text.len() > 7 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits: i128 = text.parse().ok()?;
        let scale = 10_i128.pow(7 - text.len() as u32);
        let ticks = digits * scale;
        debug_assert!((0..i128::from(TICKS_PER_SECOND)).contains(&ticks));
        T::narrow(ticks)
    }
}

/// Renders a datetime's fields verbatim in the codec grammar.
pub(crate) fn render<T: Scalar>(ticks: &dyn TickFormat<T>, datetime: &DateTime<T>) -> String {
    let year = if datetime.year < 0 {
        format!("-{:04}", -datetime.year)
    } else {
        format!("{:04}", datetime.year)
    };
    format!(
        "{year}-{:02}-{:02}T{:02}:{:02}:{:02}.{}Z",
        datetime.month.number(),
        datetime.day,
        datetime.hour,
        datetime.minute,
        datetime.second,
        ticks.format(datetime.tick),
    )
}

/// Parses the codec grammar into raw fields. Syntax only: whether the
/// fields denote a real instant is the calendar's question.
pub(crate) fn parse<T: Scalar>(
    ticks: &dyn TickFormat<T>,
    input: &str,
) -> Result<DateTime<T>, Error> {
    let mut cursor = Cursor {
        input,
        bytes: input.as_bytes(),
        pos: 0,
    };

    let negative = cursor.eat(b'-');
    let year_digits = cursor.digits();
    if year_digits.len() < 4 {
        return Err(cursor.syntax("year must have at least four digits"));
    }
    let year: i128 = year_digits
        .parse()
        .map_err(|_| cursor.syntax("year out of range"))?;
    let year = if negative { -year } else { year };

    cursor.expect(b'-', "expected '-' after year")?;
    let month = cursor.two_digits("expected two-digit month")?;
    cursor.expect(b'-', "expected '-' after month")?;
    let day = cursor.two_digits("expected two-digit day")?;
    cursor.expect(b'T', "expected 'T' between date and time")?;
    let hour = cursor.two_digits("expected two-digit hour")?;
    cursor.expect(b':', "expected ':' after hour")?;
    let minute = cursor.two_digits("expected two-digit minute")?;
    cursor.expect(b':', "expected ':' after minute")?;
    let second = cursor.two_digits("expected two-digit second")?;
    cursor.expect(b'.', "expected '.' before sub-second ticks")?;
    let fraction = cursor.digits();
    if fraction.is_empty() {
        return Err(cursor.syntax("expected sub-second digits"));
    }
    cursor.expect(b'Z', "expected 'Z' suffix")?;
    if cursor.pos != cursor.bytes.len() {
        return Err(cursor.syntax("trailing input after 'Z'"));
    }

    let tick = ticks
        .parse(fraction)
        .ok_or_else(|| cursor.syntax("sub-second ticks out of range"))?;
    // Month 0 or 13 is syntactically well-formed text naming no datetime,
    // the same failure class as day 32 or a spurious second 60.
    let month = Month::from_number(month).ok_or_else(|| Error::InvalidDateTime {
        input: input.to_string(),
    })?;

    Ok(DateTime::new(year, month, day, hour, minute, second, tick))
}

struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn syntax(&self, reason: &'static str) -> Error {
        Error::Syntax {
            input: self.input.to_string(),
            reason,
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, reason: &'static str) -> Result<(), Error> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.syntax(reason))
        }
    }

    /// The maximal run of ASCII digits at the cursor.
    fn digits(&mut self) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_digit())
        {
            self.pos += 1;
        }
        &input[start..self.pos]
    }

    fn two_digits(&mut self, reason: &'static str) -> Result<i64, Error> {
        let a = self.bytes.get(self.pos).copied();
        let b = self.bytes.get(self.pos + 1).copied();
        match (a, b) {
            (Some(a), Some(b)) if a.is_ascii_digit() && b.is_ascii_digit() => {
                self.pos += 2;
                Ok(i64::from(a - b'0') * 10 + i64::from(b - b'0'))
            }
            _ => Err(self.syntax(reason)),
        }
    }
}
