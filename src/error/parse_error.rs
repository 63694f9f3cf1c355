use thiserror::Error;

use crate::interpreter::value::word::Span;

/// Represents all errors that can occur while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing at the start of the input forms an expression.
    #[error("{message}")]
    InvalidExpression {
        /// The diagnostic recorded furthest into the input.
        message: String,
        /// Where the diagnostic points.
        span:    Span,
    },
    /// An expression was recognized but input is left over.
    #[error("{message}")]
    UnconsumedInput {
        /// The unparsed suffix, without surrounding whitespace.
        leftover: String,
        /// The diagnostic recorded furthest into the input.
        message:  String,
        /// Where the diagnostic points.
        span:     Span,
    },
    /// Opening and closing parentheses do not pair up.
    #[error("unbalanced parentheses")]
    UnbalancedGrouping {
        /// The parenthesis that broke the balance, or the end of input.
        span: Span,
    },
}

impl ParseError {
    /// The input range the error refers to.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::InvalidExpression { span, .. }
            | Self::UnconsumedInput { span, .. }
            | Self::UnbalancedGrouping { span } => *span,
        }
    }
}
