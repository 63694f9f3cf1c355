use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Outcome},
            operator::BinaryOp,
        },
        value::word::Span,
    },
};

/// Evaluates `+`, `-`, `*` or `/`.
///
/// Addition, subtraction and multiplication are exact. A quotient is exact
/// if multiplying it back restores the dividend; otherwise it is flagged
/// inexact so the final result is shown with fixed decimal places.
///
/// # Errors
/// Returns `EvalError::DivisionByZero` spanning the divisor.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use dailycalc::interpreter::{
///     evaluator::{
///         binary::scalar::eval_scalar_op,
///         core::Precision,
///         operator::BinaryOp,
///     },
///     value::word::Span,
/// };
///
/// let third = eval_scalar_op(BinaryOp::Div,
///                            &BigDecimal::from(1),
///                            &BigDecimal::from(3),
///                            Span::default()).unwrap();
/// assert_eq!(third.precision, Precision::Inexact);
///
/// let quarter = eval_scalar_op(BinaryOp::Div,
///                              &BigDecimal::from(1),
///                              &BigDecimal::from(4),
///                              Span::default()).unwrap();
/// assert_eq!(quarter.precision, Precision::Exact);
/// ```
pub fn eval_scalar_op(op: BinaryOp,
                      left: &BigDecimal,
                      right: &BigDecimal,
                      right_span: Span)
                      -> EvalResult<Outcome> {
    match op {
        BinaryOp::Add => Ok(Outcome::exact(left + right)),
        BinaryOp::Sub => Ok(Outcome::exact(left - right)),
        BinaryOp::Mul => Ok(Outcome::exact(left * right)),
        BinaryOp::Div => divide(left, right, right_span),
        BinaryOp::Pow => Err(EvalError::UnknownOperator { symbol: op.symbol().to_string(),
                                                          span:   right_span, }),
    }
}

/// Divides with the library's default precision and reports whether the
/// quotient is exact.
///
/// # Errors
/// Returns `EvalError::DivisionByZero` if `divisor` is zero.
pub fn divide(dividend: &BigDecimal, divisor: &BigDecimal, span: Span) -> EvalResult<Outcome> {
    if divisor.is_zero() {
        return Err(EvalError::DivisionByZero { span });
    }

    let quotient = dividend / divisor;
    let inexact = &quotient * divisor != *dividend;

    Ok(Outcome::approximate(quotient, inexact))
}
