use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{One, Signed, Zero};

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Outcome},
            function::core::check_arity,
            operator::Builtin,
        },
        value::{context::DecimalContext, word::Span},
    },
    util::decimal,
};

/// Returns the absolute value of the single argument.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use dailycalc::interpreter::{evaluator::function::builtin::abs, value::word::Span};
///
/// let x = BigDecimal::from_str("-1.1").unwrap();
/// assert_eq!(abs(&[x], Span::default()).unwrap().value.to_string(), "1.1");
/// ```
pub fn abs(args: &[BigDecimal], span: Span) -> EvalResult<Outcome> {
    let [x] = check_arity::<1>(Builtin::Abs, args, span)?;
    Ok(Outcome::exact(x.abs()))
}

/// Computes the square root of the single argument.
///
/// The root is computed in decimal arithmetic and counts as exact if a
/// short enough rounding of it squares back to the argument, so `sqrt(1.44)`
/// is exactly `1.2`.
///
/// # Errors
/// Returns `EvalError::Domain` for negative arguments.
pub fn sqrt(args: &[BigDecimal], span: Span) -> EvalResult<Outcome> {
    let [x] = check_arity::<1>(Builtin::Sqrt, args, span)?;

    let Some(root) = x.sqrt() else {
        return Err(undefined(Builtin::Sqrt, x, span));
    };

    // an exact root has at most half the decimal places of its square
    let (_, scale) = x.as_bigint_and_exponent();
    let candidate = root.with_scale_round((scale.max(0) + 1) / 2, RoundingMode::HalfEven);
    if &candidate * &candidate == *x {
        return Ok(Outcome::exact(candidate));
    }

    Ok(Outcome::approximate(root, true))
}

/// Generates a builtin evaluated by a decimal series.
///
/// The generated functions accept exactly one argument. Arguments outside
/// `$domain` raise a domain error, as do results too large to represent. The
/// result counts as exact only for arguments accepted by `$exact`.
macro_rules! series_builtin {
    ($(#[$meta:meta])* $fname:ident, $builtin:expr, $series:path, $domain:expr, $exact:expr) => {
        $(#[$meta])*
        pub fn $fname(args: &[BigDecimal],
                      span: Span,
                      context: &DecimalContext)
                      -> EvalResult<Outcome> {
            let [x] = check_arity::<1>($builtin, args, span)?;

            let domain: fn(&BigDecimal) -> bool = $domain;
            if !domain(x) {
                return Err(undefined($builtin, x, span));
            }

            let Some(value) = $series(x, context.precision) else {
                return Err(EvalError::Domain { details: format!("{}({x}) is out of range",
                                                                $builtin.name()),
                                               span });
            };

            let exact: fn(&BigDecimal) -> bool = $exact;
            Ok(Outcome::approximate(value, !exact(x)))
        }
    };
}

series_builtin!(
    /// Natural logarithm. Defined for positive arguments.
    ln, Builtin::Ln, decimal::ln, |x| x.is_positive(), |x| x.is_one()
);
series_builtin!(
    /// Base-10 logarithm. Defined for positive arguments, exact for powers
    /// of ten.
    ///
    /// # Example
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use dailycalc::interpreter::{
    ///     evaluator::function::builtin::log,
    ///     value::{context::DecimalContext, word::Span},
    /// };
    ///
    /// let context = DecimalContext::default();
    /// assert_eq!(log(&[BigDecimal::from(100)], Span::default(), &context).unwrap().value,
    ///            BigDecimal::from(2));
    /// assert!(log(&[BigDecimal::from(0)], Span::default(), &context).is_err());
    /// ```
    log, Builtin::Log, decimal::log10, |x| x.is_positive(),
    |x| decimal::power_of_ten(x).is_some()
);
series_builtin!(
    /// The exponential function `e^x`.
    exp, Builtin::Exp, decimal::exp, |_| true, |x| x.is_zero()
);

fn undefined(builtin: Builtin, x: &BigDecimal, span: Span) -> EvalError {
    EvalError::Domain { details: format!("{builtin} is undefined for {x}"),
                        span }
}
