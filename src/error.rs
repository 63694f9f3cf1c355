use thiserror::Error;

use crate::interpreter::value::word::Span;

/// Parsing errors.
///
/// Raised while turning raw input into a token stream, and when a token
/// stream turns out to have unbalanced parentheses. Every variant carries the
/// span of input the user should look at.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while building or reducing an
/// evaluation chain: unknown names, signature mismatches, division by zero,
/// register failures and numeric domain errors.
pub mod eval_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;

/// Any error produced by a calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The input parsed but could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// The input range the error refers to.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Parse(e) => e.span(),
            Self::Eval(e) => e.span(),
        }
    }
}
