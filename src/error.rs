// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for fallible operations.
//!
//! Invalid datetimes and range overflows on the value path are reported as
//! `None` / `valid() == false`, not as errors; this enum covers the cases
//! that carry diagnostic payload: leap-second table construction and the
//! text codec.

/// Error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The leap-second table is not in strictly ascending order.
    #[error("leap second table not in ascending order at index {index}")]
    UnsortedLeapTable {
        /// Index of the first record that is not later than its predecessor.
        index: usize,
    },

    /// A leap-second record carries out-of-range civil fields.
    #[error("leap second record at index {index} has out-of-range fields")]
    InvalidLeapRecord {
        /// Index of the offending record.
        index: usize,
    },

    /// Text does not match the ISO-8601 grammar.
    #[error("malformed datetime text {input:?}: {reason}")]
    Syntax {
        /// The offending input.
        input: String,
        /// What the parser expected.
        reason: &'static str,
    },

    /// Well-formed text that decodes to an invalid or unrepresentable datetime.
    #[error("datetime text {input:?} decodes to an invalid or out-of-range datetime")]
    InvalidDateTime {
        /// The offending input.
        input: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_offending_input() {
        let err = Error::Syntax {
            input: "2023-01-01".to_string(),
            reason: "expected 'T' after date",
        };
        let msg = err.to_string();
        assert!(msg.contains("2023-01-01"));
        assert!(msg.contains("expected 'T'"));
    }

    #[test]
    fn display_unsorted_table() {
        let err = Error::UnsortedLeapTable { index: 3 };
        assert_eq!(
            err.to_string(),
            "leap second table not in ascending order at index 3"
        );
    }

    #[test]
    fn error_is_std_error_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<Error>();
    }
}
