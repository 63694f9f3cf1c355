use bigdecimal::BigDecimal;

use crate::interpreter::{
    evaluator::{
        binary::{power::eval_pow, scalar::eval_scalar_op},
        core::{EvalResult, Outcome},
        operator::BinaryOp,
    },
    value::{context::DecimalContext, word::Span},
};

/// Evaluates a binary operation between two values.
///
/// `+ - * /` are routed to [`eval_scalar_op`], `^` to [`eval_pow`]. The
/// result is not yet rounded to the context precision; the chain does that
/// when it settles the outcome.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `right_span`: Where the right operand came from, for error reporting.
/// - `context`: Numeric configuration.
///
/// # Returns
/// An `EvalResult<Outcome>` containing the computed value.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use dailycalc::interpreter::{
///     evaluator::{binary::core::eval_binary, operator::BinaryOp},
///     value::{context::DecimalContext, word::Span},
/// };
///
/// let context = DecimalContext::default();
/// let left = BigDecimal::from_str("1.5").unwrap();
/// let right = BigDecimal::from(4);
///
/// let result = eval_binary(BinaryOp::Mul, &left, &right, Span::default(), &context).unwrap();
/// assert_eq!(result.value, BigDecimal::from(6));
/// ```
pub fn eval_binary(op: BinaryOp,
                   left: &BigDecimal,
                   right: &BigDecimal,
                   right_span: Span,
                   context: &DecimalContext)
                   -> EvalResult<Outcome> {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            eval_scalar_op(op, left, right, right_span)
        },
        BinaryOp::Pow => eval_pow(left, right, right_span, context),
    }
}
