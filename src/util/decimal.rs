use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::util::num::adjusted_exponent;

/// Extra digits carried by every series on top of the requested precision.
const GUARD_DIGITS: u64 = 10;
/// Beyond this magnitude `exp` leaves the range of representable results.
const EXP_LIMIT: i64 = 23_100;

/// Natural logarithm of `x` to at least `precision` significant digits.
///
/// `x` is split into `m * 10^k` with `m` close to one, `m` is pulled further
/// towards one by square roots, and the rest is an `atanh` series.
///
/// ## Returns
/// - `Some(BigDecimal)`: The logarithm.
/// - `None`: If `x` is not positive.
///
/// ## Example
/// ```
/// use bigdecimal::BigDecimal;
/// use dailycalc::util::decimal::ln;
///
/// let ln2 = ln(&BigDecimal::from(2), 30).unwrap();
/// assert!(ln2.to_string().starts_with("0.69314718055994530941723212145"));
/// assert!(ln(&BigDecimal::from(0), 30).is_none());
/// ```
#[must_use]
pub fn ln(x: &BigDecimal, precision: u64) -> Option<BigDecimal> {
    if !x.is_positive() {
        return None;
    }

    let working = precision.saturating_add(GUARD_DIGITS);
    let (mantissa, exponent) = split(x);

    let mut result = ln_reduced(&mantissa, working);
    if exponent != 0 {
        result += ln_reduced(&BigDecimal::from(10), working) * BigDecimal::from(exponent);
    }

    Some(result.with_prec(working))
}

/// Base-10 logarithm of `x`. Exact powers of ten give an exact integer.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use dailycalc::util::decimal::log10;
///
/// assert_eq!(log10(&BigDecimal::from(1000), 30), Some(BigDecimal::from(3)));
/// assert_eq!(log10(&BigDecimal::from_str("0.01").unwrap(), 30), Some(BigDecimal::from(-2)));
/// ```
#[must_use]
pub fn log10(x: &BigDecimal, precision: u64) -> Option<BigDecimal> {
    if !x.is_positive() {
        return None;
    }
    if let Some(exponent) = power_of_ten(x) {
        return Some(BigDecimal::from(exponent));
    }

    let working = precision.saturating_add(GUARD_DIGITS);
    let ratio = ln(x, working)? / ln(&BigDecimal::from(10), working)?;
    Some(ratio.with_prec(working))
}

/// The exponential function `e^x` to at least `precision` significant digits.
///
/// ## Returns
/// - `Some(BigDecimal)`: The result, zero if it underflows.
/// - `None`: If the result overflows.
///
/// ## Example
/// ```
/// use bigdecimal::BigDecimal;
/// use dailycalc::util::decimal::exp;
///
/// let e = exp(&BigDecimal::from(1), 30).unwrap();
/// assert!(e.to_string().starts_with("2.71828182845904523536028747135"));
/// assert!(exp(&BigDecimal::from(100_000), 30).is_none());
/// ```
#[must_use]
pub fn exp(x: &BigDecimal, precision: u64) -> Option<BigDecimal> {
    if x.is_zero() {
        return Some(BigDecimal::one());
    }
    if adjusted_exponent(x) > 5 || x.abs() > BigDecimal::from(EXP_LIMIT) {
        return if x.is_positive() { None } else { Some(BigDecimal::zero()) };
    }

    // exp(x) = exp(x / 2^k) ^ (2^k)
    let small = BigDecimal::new(BigInt::one(), 2);
    let two = BigDecimal::from(2);
    let mut reduced = x.clone();
    let mut squarings = 0u64;
    while reduced.abs() >= small {
        reduced = reduced / &two;
        squarings += 1;
    }

    let working = precision.saturating_add(GUARD_DIGITS).saturating_add(squarings);
    let cutoff = -digits(working);

    let mut sum = BigDecimal::one();
    let mut term = BigDecimal::one();
    let mut n = 0u64;
    loop {
        n += 1;
        term = (&term * &reduced / BigDecimal::from(n)).with_prec(working);
        if term.is_zero() || adjusted_exponent(&term) < cutoff {
            break;
        }
        sum = &sum + &term;
    }

    for _ in 0..squarings {
        sum = (&sum * &sum).with_prec(working);
    }

    Some(sum.with_prec(working))
}

/// Computes `base ^ exponent` as `exp(exponent * ln(base))` for a positive
/// base.
///
/// ## Returns
/// - `Some(BigDecimal)`: The power, zero if it underflows.
/// - `None`: If `base` is not positive or the result overflows.
#[must_use]
pub fn powf(base: &BigDecimal, exponent: &BigDecimal, precision: u64) -> Option<BigDecimal> {
    let working = precision.saturating_add(GUARD_DIGITS);
    let logarithm = ln(base, working)?;
    let product = (exponent * logarithm).with_prec(working.saturating_add(GUARD_DIGITS));
    exp(&product, working)
}

/// Returns `k` if `x` is exactly `10^k`.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use dailycalc::util::decimal::power_of_ten;
///
/// assert_eq!(power_of_ten(&BigDecimal::from_str("100.00").unwrap()), Some(2));
/// assert_eq!(power_of_ten(&BigDecimal::from_str("0.001").unwrap()), Some(-3));
/// assert_eq!(power_of_ten(&BigDecimal::from(20)), None);
/// ```
#[must_use]
pub fn power_of_ten(x: &BigDecimal) -> Option<i64> {
    let (mantissa, _) = x.as_bigint_and_exponent();
    let digits = mantissa.to_string();
    (digits.trim_end_matches('0') == "1").then(|| adjusted_exponent(x))
}

/// Splits positive `x` into `m * 10^k` with `m` in `[0.3, 3)`.
fn split(x: &BigDecimal) -> (BigDecimal, i64) {
    let (mantissa, scale) = x.as_bigint_and_exponent();
    let exponent = adjusted_exponent(x);
    let leading = BigDecimal::new(mantissa.clone(), scale.saturating_add(exponent));

    if leading >= BigDecimal::from(3) {
        let scale = scale.saturating_add(exponent).saturating_add(1);
        return (BigDecimal::new(mantissa, scale), exponent.saturating_add(1));
    }
    (leading, exponent)
}

/// `ln(m)` for positive `m` of moderate size.
fn ln_reduced(m: &BigDecimal, working: u64) -> BigDecimal {
    let upper = BigDecimal::new(BigInt::from(11), 1);
    let lower = BigDecimal::new(BigInt::from(9), 1);
    let precise = working.saturating_add(GUARD_DIGITS);

    // ln(m) = 2^h * ln(m^(1/2^h))
    let mut m = m.clone();
    let mut halvings = 0u32;
    while (m > upper || m < lower)
          && let Some(root) = m.sqrt()
    {
        m = root.with_prec(precise);
        halvings += 1;
    }

    let one = BigDecimal::one();
    let z = ((&m - &one) / (&m + &one)).with_prec(precise);
    atanh(&z, precise) * BigDecimal::from(2u64 << halvings)
}

/// `atanh(z) = z + z^3/3 + z^5/5 + ...`, for small `|z|`.
fn atanh(z: &BigDecimal, working: u64) -> BigDecimal {
    if z.is_zero() {
        return BigDecimal::zero();
    }

    let cutoff = adjusted_exponent(z).saturating_sub(digits(working));
    let square = (z * z).with_prec(working);
    let mut power = z.clone();
    let mut sum = z.clone();
    let mut n = 1u64;

    loop {
        power = (&power * &square).with_prec(working);
        n += 2;
        let term = (&power / BigDecimal::from(n)).with_prec(working);
        if term.is_zero() || adjusted_exponent(&term) < cutoff {
            return sum;
        }
        sum = &sum + &term;
    }
}

fn digits(precision: u64) -> i64 {
    i64::try_from(precision).unwrap_or(i64::MAX)
}
