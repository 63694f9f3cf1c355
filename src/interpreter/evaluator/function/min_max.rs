use bigdecimal::BigDecimal;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Outcome},
            operator::Builtin,
        },
        value::word::Span,
    },
};

/// Adds up all arguments.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use dailycalc::interpreter::{evaluator::function::min_max::sum, value::word::Span};
///
/// let values = [BigDecimal::from(1), BigDecimal::from(2), BigDecimal::from(3)];
/// assert_eq!(sum(&values, Span::default()).unwrap().value, BigDecimal::from(6));
/// ```
pub fn sum(args: &[BigDecimal], span: Span) -> EvalResult<Outcome> {
    if args.is_empty() {
        return Err(empty(Builtin::Sum, span));
    }
    Ok(Outcome::exact(args.iter().sum()))
}

/// Returns the largest argument.
pub fn max(args: &[BigDecimal], span: Span) -> EvalResult<Outcome> {
    args.iter()
        .max()
        .map(|value| Outcome::exact(value.clone()))
        .ok_or_else(|| empty(Builtin::Max, span))
}

/// Returns the smallest argument.
pub fn min(args: &[BigDecimal], span: Span) -> EvalResult<Outcome> {
    args.iter()
        .min()
        .map(|value| Outcome::exact(value.clone()))
        .ok_or_else(|| empty(Builtin::Min, span))
}

fn empty(builtin: Builtin, span: Span) -> EvalError {
    EvalError::ArgumentCount { name: builtin.name().to_string(),
                               expected: builtin.signature().to_string(),
                               found: 0,
                               span }
}
