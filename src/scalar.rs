// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scalar arithmetic capability for tick counts.
//!
//! [`Scalar`] is the contract every tick-counting numeric type must satisfy.
//! Arithmetic is never assumed as a built-in operator set: the calendar
//! engine only reaches the scalar through this trait's checked operations
//! and through the `widen`/`narrow` pair, which is the overflow-checking
//! range capability: internal calendrical arithmetic runs in `i128` and is
//! narrowed back into `T` at the edge, reporting overflow as `None`.
//!
//! Implementations are provided for [`i64`] and [`i128`]. A conforming type
//! must at least represent the half-open range `[0, 10_000_000)` so that a
//! sub-second tick field always fits.

use std::fmt;

use num_traits::{CheckedAdd, CheckedMul, CheckedNeg, CheckedSub, PrimInt, Signed};

/// Arithmetic capability for the tick scalar `T`.
///
/// The supertraits supply zero, negation, comparison, and overflow-checked
/// addition/subtraction/multiplication; `widen` and `narrow` supply the
/// overflow-checked conversion used at the boundary of the `i128` internal
/// arithmetic. All operations are reentrant and side-effect-free, so any
/// `Scalar` is safe for unsynchronized concurrent use.
pub trait Scalar:
    PrimInt
    + Signed
    + CheckedAdd
    + CheckedSub
    + CheckedMul
    + CheckedNeg
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
{
    /// Widen to `i128` without loss.
    fn widen(self) -> i128;

    /// Narrow from `i128`, reporting values outside `T`'s range as `None`.
    fn narrow(wide: i128) -> Option<Self>;
}

impl Scalar for i64 {
    #[inline]
    fn widen(self) -> i128 {
        i128::from(self)
    }

    #[inline]
    fn narrow(wide: i128) -> Option<Self> {
        i64::try_from(wide).ok()
    }
}

impl Scalar for i128 {
    #[inline]
    fn widen(self) -> i128 {
        self
    }

    #[inline]
    fn narrow(wide: i128) -> Option<Self> {
        Some(wide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i64_widen_narrow_roundtrip() {
        for v in [0i64, 1, -1, i64::MAX, i64::MIN] {
            assert_eq!(i64::narrow(v.widen()), Some(v));
        }
    }

    #[test]
    fn i64_narrow_rejects_out_of_range() {
        assert_eq!(i64::narrow(i128::from(i64::MAX) + 1), None);
        assert_eq!(i64::narrow(i128::from(i64::MIN) - 1), None);
    }

    #[test]
    fn i128_narrow_is_total() {
        assert_eq!(i128::narrow(i128::MAX), Some(i128::MAX));
        assert_eq!(i128::narrow(i128::MIN), Some(i128::MIN));
    }

    #[test]
    fn checked_ops_report_overflow() {
        fn add<T: Scalar>(a: T, b: T) -> Option<T> {
            a.checked_add(&b)
        }
        fn neg<T: Scalar>(a: T) -> Option<T> {
            a.checked_neg()
        }
        assert_eq!(add(i64::MAX, 1), None);
        assert_eq!(add(1i64, 2), Some(3));
        assert_eq!(neg(i64::MIN), None);
        assert_eq!(neg(1i64), Some(-1));
    }
}
