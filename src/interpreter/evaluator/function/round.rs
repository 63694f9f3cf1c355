use bigdecimal::BigDecimal;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Outcome},
            function::core::check_arity,
            operator::{Builtin, ParamType},
        },
        value::{context::DecimalContext, word::Span},
    },
    util::num::decimal_to_i64_checked,
};

/// Rounds a value to a number of decimal places.
///
/// Uses the rounding mode of `context`. A negative place count rounds to
/// tens, hundreds and so on. Place counts far past either end of the value
/// are clamped, so `round(1, 1000000000)` stays cheap. The result is
/// settled: it is shown as is even if earlier steps were inexact.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use dailycalc::interpreter::{
///     evaluator::{core::Precision, function::round::round},
///     value::{context::DecimalContext, word::Span},
/// };
///
/// let context = DecimalContext::default();
/// let args = [BigDecimal::from_str("1.15").unwrap(), BigDecimal::from(1)];
///
/// let result = round(&args, Span::default(), &context).unwrap();
/// assert_eq!(result.value.to_string(), "1.2");
/// assert_eq!(result.precision, Precision::Settled);
/// ```
pub fn round(args: &[BigDecimal], span: Span, context: &DecimalContext) -> EvalResult<Outcome> {
    let [value, places] = check_arity::<2>(Builtin::Round, args, span)?;

    let not_integer = || EvalError::ArgumentType { expected: ParamType::Integer.to_string(),
                                                   found:    places.to_string(),
                                                   span, };
    let places = decimal_to_i64_checked(places).ok_or_else(not_integer)?;

    Ok(Outcome::exact(context.quantize(value, places)).settled())
}
