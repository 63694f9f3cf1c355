use bigdecimal::BigDecimal;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Outcome},
            function::{builtin, min_max, radix, round},
            operator::{Builtin, ParamType, Signature},
        },
        value::{context::DecimalContext, core::Number, word::Span},
    },
    util::num::is_integral,
};

/// Evaluates a builtin call.
///
/// The arguments are checked against the builtin's signature first: the
/// count must match and `Integer` parameters reject values with a fractional
/// part. The call is then dispatched to the implementation.
///
/// # Parameters
/// - `builtin`: The function to call.
/// - `arguments`: Evaluated arguments, placeholders already removed.
/// - `span`: The whole call in the input.
/// - `context`: Numeric configuration.
///
/// # Returns
/// The function result or an error if validation or evaluation fails.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use dailycalc::interpreter::{
///     evaluator::{function::core::eval_function, operator::Builtin},
///     value::{context::DecimalContext, core::Number, word::Span},
/// };
///
/// let context = DecimalContext::default();
/// let arguments = [Number::from(BigDecimal::from(3)), Number::from(BigDecimal::from(9))];
///
/// let result = eval_function(Builtin::Max, &arguments, Span::default(), &context).unwrap();
/// assert_eq!(result.value, BigDecimal::from(9));
///
/// assert!(eval_function(Builtin::Abs, &arguments, Span::default(), &context).is_err());
/// ```
pub fn eval_function(builtin: Builtin,
                     arguments: &[Number],
                     span: Span,
                     context: &DecimalContext)
                     -> EvalResult<Outcome> {
    let values = check_signature(builtin, arguments, span)?;

    match builtin {
        Builtin::Sum => min_max::sum(&values, span),
        Builtin::Max => min_max::max(&values, span),
        Builtin::Min => min_max::min(&values, span),
        Builtin::Abs => builtin::abs(&values, span),
        Builtin::Sqrt => builtin::sqrt(&values, span),
        Builtin::Ln => builtin::ln(&values, span, context),
        Builtin::Log => builtin::log(&values, span, context),
        Builtin::Exp => builtin::exp(&values, span, context),
        Builtin::Round => round::round(&values, span, context),
        Builtin::Hex => radix::hex(&values, span),
        Builtin::Oct => radix::oct(&values, span),
    }
}

/// Validates the arguments of a call and extracts their values.
///
/// A missing argument is reported at the end of the last one, surplus
/// arguments are reported as a whole, a mistyped argument by its own span.
fn check_signature(builtin: Builtin,
                   arguments: &[Number],
                   span: Span)
                   -> EvalResult<Vec<BigDecimal>> {
    let signature = builtin.signature();

    if !signature.accepts(arguments.len()) {
        let end = arguments.last()
                           .and_then(Number::span)
                           .map_or(span.end, |s| s.end);

        let span = match signature {
            Signature::Fixed(params) if arguments.len() > params.len() => {
                let start = arguments[params.len()].span().map_or(end, |s| s.start);
                Span::new(start, end)
            },
            _ => Span::point(end),
        };

        return Err(EvalError::ArgumentCount { name: builtin.name().to_string(),
                                              expected: signature.to_string(),
                                              found: arguments.len(),
                                              span });
    }

    arguments.iter()
             .enumerate()
             .map(|(position, number)| {
                 let argument_span = number.span().unwrap_or(span);
                 let Some(value) = number.value() else {
                     return Err(EvalError::MissingOperand { symbol: builtin.name().to_string(),
                                                            span:   argument_span, });
                 };

                 if signature.param(position) == ParamType::Integer && !is_integral(value) {
                     return Err(EvalError::ArgumentType { expected: ParamType::Integer.to_string(),
                                                          found:    value.to_string(),
                                                          span:     argument_span, });
                 }

                 Ok(value.clone())
             })
             .collect()
}

/// Ensures that exactly `N` arguments were supplied.
///
/// # Errors
/// Returns `EvalError::ArgumentCount` otherwise.
pub fn check_arity<const N: usize>(builtin: Builtin,
                                   args: &[BigDecimal],
                                   span: Span)
                                   -> EvalResult<&[BigDecimal; N]> {
    args.try_into()
        .map_err(|_| EvalError::ArgumentCount { name: builtin.name().to_string(),
                                                expected: N.to_string(),
                                                found: args.len(),
                                                span })
}
