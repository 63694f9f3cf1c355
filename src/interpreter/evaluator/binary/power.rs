use bigdecimal::BigDecimal;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            binary::scalar::divide,
            core::{EvalResult, Outcome, Precision},
        },
        value::{
            context::{DecimalContext, MAX_EXPONENT},
            word::Span,
        },
    },
    util::{
        decimal::powf,
        num::{adjusted_exponent, decimal_to_i64_checked},
    },
};

/// Integer exponents up to this magnitude are computed exactly.
pub const MAX_INTEGER_EXPONENT: u64 = 1_000_000_000;
/// Extra digits carried by intermediate squares.
const GUARD_DIGITS: u64 = 10;
/// Largest numerator and denominator of a fractional exponent for which an
/// exact result is looked for.
const MAX_EXACT_ROOT: u64 = 100;

/// Evaluates an exponentiation operation.
///
/// Integer exponents use repeated squaring on decimals, so `1.1 ^ 2` is
/// exactly `1.21`. Negative integer exponents take the reciprocal. Any other
/// exponent goes through `exp(exponent * ln(base))` at the working precision.
/// Such a result counts as inexact unless a short rounding of it is an exact
/// root, as in `25 ^ 0.5`.
///
/// # Errors
/// - `DivisionByZero` for `0` raised to a negative power.
/// - `Domain` for a negative base with a fractional exponent, or a result
///   too large to represent.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use dailycalc::interpreter::{
///     evaluator::binary::power::eval_pow,
///     value::{context::DecimalContext, word::Span},
/// };
///
/// let context = DecimalContext::default();
/// let base = BigDecimal::from_str("1.1").unwrap();
///
/// let result = eval_pow(&base, &BigDecimal::from(2), Span::default(), &context).unwrap();
/// assert_eq!(result.value, BigDecimal::from_str("1.21").unwrap());
///
/// let root = eval_pow(&BigDecimal::from(25),
///                     &BigDecimal::from_str("0.5").unwrap(),
///                     Span::default(),
///                     &context).unwrap();
/// assert_eq!(root.value, BigDecimal::from(5));
/// ```
pub fn eval_pow(base: &BigDecimal,
                exponent: &BigDecimal,
                span: Span,
                context: &DecimalContext)
                -> EvalResult<Outcome> {
    if let Some(n) = decimal_to_i64_checked(exponent)
       && n.unsigned_abs() <= MAX_INTEGER_EXPONENT
    {
        return integer_pow(base, n, span, context);
    }

    fractional_pow(base, exponent, span, context)
}

fn integer_pow(base: &BigDecimal,
               exponent: i64,
               span: Span,
               context: &DecimalContext)
               -> EvalResult<Outcome> {
    if exponent < 0 && base.is_zero() {
        return Err(EvalError::DivisionByZero { span });
    }

    let working = context.with_precision(context.precision.saturating_add(GUARD_DIGITS));
    let mut result = BigDecimal::one();
    let mut square = base.clone();
    let mut remaining = exponent.unsigned_abs();
    let mut inexact = false;

    while remaining > 0 {
        if remaining & 1 == 1 {
            let (value, lost) = working.round(&result * &square);
            result = value;
            inexact |= lost;
        }
        remaining >>= 1;
        if remaining > 0 {
            let (value, lost) = working.round(&square * &square);
            square = value;
            inexact |= lost;
        }
    }

    if exponent < 0 {
        // the reciprocal of an out-of-range power is known without dividing
        let magnitude = adjusted_exponent(&result);
        if magnitude > MAX_EXPONENT {
            return Ok(Outcome::approximate(BigDecimal::zero(), true));
        }
        if magnitude < -MAX_EXPONENT {
            return Err(EvalError::Domain { details: "result is out of range".to_string(),
                                           span });
        }

        let reciprocal = divide(&BigDecimal::one(), &result, span)?;
        let inexact = inexact || reciprocal.precision == Precision::Inexact;
        return Ok(Outcome::approximate(reciprocal.value, inexact));
    }

    Ok(Outcome::approximate(result, inexact))
}

fn fractional_pow(base: &BigDecimal,
                  exponent: &BigDecimal,
                  span: Span,
                  context: &DecimalContext)
                  -> EvalResult<Outcome> {
    if base.is_negative() {
        return Err(EvalError::Domain { details: format!("cannot raise negative {base} to \
                                                         fractional power {exponent}"),
                                       span });
    }
    if base.is_zero() {
        if exponent.is_positive() {
            return Ok(Outcome::exact(BigDecimal::zero()));
        }
        return Err(EvalError::DivisionByZero { span });
    }

    let Some(value) = powf(base, exponent, context.precision) else {
        return Err(EvalError::Domain { details: format!("{base} ^ {exponent} is out of range"),
                                       span });
    };

    if let Some(root) = exact_root(base, exponent, &value, context.precision) {
        return Ok(Outcome::exact(root));
    }
    Ok(Outcome::approximate(value, true))
}

/// Recovers an exact `base ^ (p / q)` from its approximation.
///
/// The approximation is rounded to `precision` digits and accepted if its
/// `q`-th power equals `base ^ p` exactly.
fn exact_root(base: &BigDecimal,
              exponent: &BigDecimal,
              approximation: &BigDecimal,
              precision: u64)
              -> Option<BigDecimal> {
    let (numerator, scale) = exponent.as_bigint_and_exponent();
    let numerator = numerator.to_i64()?;
    let denominator = 10i64.checked_pow(u32::try_from(scale).ok()?)?;

    let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs());
    let p = numerator / i64::try_from(divisor).ok()?;
    let q = denominator / i64::try_from(divisor).ok()?;
    if p.unsigned_abs() > MAX_EXACT_ROOT || q.unsigned_abs() > MAX_EXACT_ROOT {
        return None;
    }

    let candidate = approximation.with_prec(precision).normalized();
    let lhs = exact_pow(&candidate, q.unsigned_abs());
    let rhs = exact_pow(base, p.unsigned_abs());

    let matches = if p < 0 { (&lhs * &rhs).is_one() } else { lhs == rhs };
    matches.then_some(candidate)
}

/// `x ^ n` without rounding.
fn exact_pow(x: &BigDecimal, mut n: u64) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut square = x.clone();
    while n > 0 {
        if n & 1 == 1 {
            result = &result * &square;
        }
        n >>= 1;
        if n > 0 {
            square = &square * &square;
        }
    }
    result
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let rest = a % b;
        a = b;
        b = rest;
    }
    a
}
