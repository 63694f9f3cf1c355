//! # dailycalc
//!
//! dailycalc is an everyday calculator written in Rust.
//! It parses arithmetic expressions with a backtracking combinator parser,
//! evaluates them on arbitrary precision decimals, and points at the exact
//! spot of the input when something is wrong.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use bigdecimal::BigDecimal;

use crate::{
    error::{Error, ParseError},
    interpreter::{
        diagnostic::DiagnosticLog,
        evaluator::core::Chain,
        value::{context::DecimalContext, core::Number, word::Word},
    },
    register::Register,
};

/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or
/// evaluating an expression. Every error carries the span of input it refers
/// to, so it can be shown underneath the input.
///
/// # Responsibilities
/// - Defines error enums for both phases and a combined `Error`.
/// - Attaches spans and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of calculation.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and diagnostics.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating expressions.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Stored values that expressions can refer to as `@a`, `@@` or `@a_d`.
///
/// Declares the read capability the evaluator needs and an in-memory register
/// that fills its slots cyclically.
pub mod register;
/// General numeric utilities.
///
/// # Responsibilities
/// - Safely convert between `BigDecimal`, `BigInt` and `i64` without silent
///   data loss.
/// - Evaluate logarithms, exponentials and fractional powers in decimal
///   arithmetic.
pub mod util;

/// Evaluates expressions and keeps the diagnostics of the last call.
///
/// ## Example
/// ```
/// use dailycalc::Calculator;
///
/// let mut calculator = Calculator::default();
///
/// let result = calculator.evaluate("2 + ( 2 * sum(1, max(2, 3), 4, 5) ) - 1", None).unwrap();
/// assert_eq!(result.to_string(), "27");
///
/// assert!(calculator.evaluate("2/0", None).is_err());
/// assert_eq!(calculator.render_error("2/0"),
///            "  Input: 2/0\n         --^----\n  Error: cannot divide by zero");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    context: DecimalContext,
    log:     DiagnosticLog,
}

impl Calculator {
    /// Creates a calculator with the given numeric configuration.
    #[must_use]
    pub fn new(context: DecimalContext) -> Self {
        Self { context,
               log: DiagnosticLog::new() }
    }

    /// The numeric configuration.
    #[must_use]
    pub const fn context(&self) -> &DecimalContext {
        &self.context
    }

    /// The diagnostics of the last call.
    #[must_use]
    pub const fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    /// Parses and evaluates `input`.
    ///
    /// Register references are resolved through `register`; without one they
    /// are an error. On failure the log holds a diagnostic pointing at the
    /// offending input, see [`render_error`](Self::render_error).
    ///
    /// # Errors
    /// Returns `Error::Parse` for malformed input and `Error::Eval` if the
    /// expression cannot be evaluated.
    #[tracing::instrument(level = "debug", skip(self, register))]
    pub fn evaluate(&mut self,
                    input: &str,
                    register: Option<&dyn Register>)
                    -> Result<Number, Error> {
        self.log.clear();

        let result = self.run(input, register);

        if let Err(e) = &result {
            tracing::debug!(error = %e, span = %e.span(), "calculation failed");
            if !matches!(e,
                         Error::Parse(ParseError::InvalidExpression { .. }
                                      | ParseError::UnconsumedInput { .. }))
            {
                self.log.add(e.to_string(), e.span(), true);
            }
        }

        result
    }

    /// Renders the diagnostic of the last call underneath `input`.
    #[must_use]
    pub fn render_error(&self, input: &str) -> String {
        self.log.message(input)
    }

    fn run(&mut self, input: &str, register: Option<&dyn Register>) -> Result<Number, Error> {
        let words = interpreter::parser::core::parse(input, &mut self.log)?;
        self.log.clear();

        let chain = Chain::new(words, register, &self.context)?;
        Ok(chain.evaluate()?)
    }
}

/// Evaluates `input` with the default configuration and no register.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use dailycalc::calculate;
///
/// assert_eq!(calculate("round(1.15, 1)").unwrap().to_string(), "1.2");
/// assert_eq!(calculate("sqrt(2)").unwrap().to_string(), "1.4142135624");
/// assert!(calculate("abs(1, 1)").is_err());
/// ```
pub fn calculate(input: &str) -> Result<BigDecimal, Error> {
    let mut calculator = Calculator::default();
    let number = calculator.evaluate(input, None)?;

    number.into_value().ok_or_else(|| {
                           ParseError::InvalidExpression { message: "expecting number".to_string(),
                                                           span:    Default::default(), }.into()
                       })
}

/// Parses `input` into its token stream, see
/// [`interpreter::parser::core::parse`].
///
/// # Errors
/// Returns a `ParseError` for malformed input.
pub fn parse(input: &str, log: &mut DiagnosticLog) -> Result<Vec<Word>, ParseError> {
    interpreter::parser::core::parse(input, log)
}

/// Renders the tokens of `input` separated by single spaces, see
/// [`interpreter::parser::core::format`].
///
/// # Errors
/// Returns a `ParseError` for malformed input.
pub fn format(input: &str) -> Result<String, ParseError> {
    interpreter::parser::core::format(input)
}
