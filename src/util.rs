/// Elementary functions evaluated in decimal arithmetic.
///
/// `ln`, `log10`, `exp` and fractional powers are computed by series at a
/// caller-chosen number of significant digits, so their results are as
/// accurate as the basic operations.
pub mod decimal;
/// Numeric conversion helpers.
///
/// This module provides safe functions for inspecting `BigDecimal` values and
/// moving them into `BigInt` and `i64` without silent data loss. Conversions
/// that can lose information return an `Option` instead of truncating, and
/// none of them expands a large exponent into a full-length integer unless
/// asked to.
pub mod num;
