use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

/// Number of decimal digits in the magnitude of `n`; zero has one digit.
#[must_use]
pub fn digit_count(n: &BigInt) -> u64 {
    u64::try_from(n.magnitude().to_string().len()).unwrap_or(u64::MAX)
}

/// The decimal exponent of the leading digit of `value`, so `123.4` gives `2`
/// and `0.05` gives `-2`. Zero gives `0`.
///
/// Only the stored mantissa is inspected, which keeps this cheap for values
/// like `1e100000000`.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use dailycalc::util::num::adjusted_exponent;
///
/// assert_eq!(adjusted_exponent(&BigDecimal::from_str("123.4").unwrap()), 2);
/// assert_eq!(adjusted_exponent(&BigDecimal::from_str("0.05").unwrap()), -2);
/// assert_eq!(adjusted_exponent(&BigDecimal::from_str("1e100000000").unwrap()), 100_000_000);
/// ```
#[must_use]
pub fn adjusted_exponent(value: &BigDecimal) -> i64 {
    let (mantissa, scale) = value.as_bigint_and_exponent();
    if mantissa.is_zero() {
        return 0;
    }
    let digits = i64::try_from(digit_count(&mantissa)).unwrap_or(i64::MAX);
    digits.saturating_sub(1).saturating_sub(scale)
}

/// Returns `true` if `value` has no fractional part.
///
/// The check counts trailing zeros of the mantissa instead of rescaling, so
/// it stays cheap for extreme exponents.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use dailycalc::util::num::is_integral;
///
/// assert!(is_integral(&BigDecimal::from_str("12.000").unwrap()));
/// assert!(is_integral(&BigDecimal::from_str("1e3").unwrap()));
/// assert!(!is_integral(&BigDecimal::from_str("1.5").unwrap()));
/// assert!(!is_integral(&BigDecimal::from_str("1e-100000000").unwrap()));
/// ```
#[must_use]
pub fn is_integral(value: &BigDecimal) -> bool {
    let (mantissa, scale) = value.as_bigint_and_exponent();
    if scale <= 0 || mantissa.is_zero() {
        return true;
    }

    let digits = mantissa.magnitude().to_string();
    let trailing = digits.bytes().rev().take_while(|&b| b == b'0').count();
    i64::try_from(trailing).is_ok_and(|trailing| scale <= trailing)
}

/// Converts an integral `BigDecimal` to a `BigInt`.
///
/// ## Returns
/// - `Some(BigInt)`: The integer value.
/// - `None`: If `value` has a fractional part.
#[must_use]
pub fn decimal_to_bigint_checked(value: &BigDecimal) -> Option<BigInt> {
    if !is_integral(value) {
        return None;
    }
    let (digits, _) = value.with_scale(0).into_bigint_and_exponent();
    Some(digits)
}

/// Converts an integral `BigDecimal` to `i64`.
///
/// ## Returns
/// - `Some(i64)`: The integer value.
/// - `None`: If `value` has a fractional part or does not fit.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use dailycalc::util::num::decimal_to_i64_checked;
///
/// assert_eq!(decimal_to_i64_checked(&BigDecimal::from_str("-3.0").unwrap()), Some(-3));
/// assert_eq!(decimal_to_i64_checked(&BigDecimal::from_str("2.5").unwrap()), None);
/// assert_eq!(decimal_to_i64_checked(&BigDecimal::from_str("1e40").unwrap()), None);
/// ```
#[must_use]
pub fn decimal_to_i64_checked(value: &BigDecimal) -> Option<i64> {
    if adjusted_exponent(value) > 18 {
        return None;
    }
    decimal_to_bigint_checked(value)?.to_i64()
}
