use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Outcome},
            function::core::check_arity,
            operator::{Builtin, ParamType},
        },
        value::word::Span,
    },
    util::num::decimal_to_bigint_checked,
};

/// Shows an integer in hexadecimal, e.g. `hex(255)` is shown as `0xff`.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use dailycalc::interpreter::{evaluator::function::radix::hex, value::word::Span};
///
/// let result = hex(&[BigDecimal::from(255)], Span::default()).unwrap();
/// assert_eq!(result.display.as_deref(), Some("0xff"));
/// assert_eq!(result.value, BigDecimal::from(255));
/// ```
pub fn hex(args: &[BigDecimal], span: Span) -> EvalResult<Outcome> {
    radix(Builtin::Hex, args, span, |n| format!("{n:#x}"))
}

/// Shows an integer in octal, e.g. `oct(8)` is shown as `0o10`.
pub fn oct(args: &[BigDecimal], span: Span) -> EvalResult<Outcome> {
    radix(Builtin::Oct, args, span, |n| format!("{n:#o}"))
}

fn radix(builtin: Builtin,
         args: &[BigDecimal],
         span: Span,
         render: fn(&BigInt) -> String)
         -> EvalResult<Outcome> {
    let [value] = check_arity::<1>(builtin, args, span)?;

    let not_integer = || EvalError::ArgumentType { expected: ParamType::Integer.to_string(),
                                                   found:    value.to_string(),
                                                   span, };
    let integer = decimal_to_bigint_checked(value).ok_or_else(not_integer)?;

    Ok(Outcome::exact(value.clone()).with_display(render(&integer)))
}
