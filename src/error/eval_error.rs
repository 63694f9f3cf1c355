use thiserror::Error;

use crate::{interpreter::value::word::Span, register::RegisterError};

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Called a function that is not a builtin.
    #[error("unknown function '{name}'")]
    UnknownFunction {
        /// The name as written.
        name: String,
        /// The function name in the input.
        span: Span,
    },
    /// Met an operator symbol without an implementation.
    #[error("unknown operator '{symbol}'")]
    UnknownOperator {
        /// The symbol as written.
        symbol: String,
        /// The operator in the input.
        span:   Span,
    },
    /// A builtin received the wrong number of arguments.
    #[error("{name}: expecting {expected} parameters got {found}")]
    ArgumentCount {
        /// The builtin name.
        name:     String,
        /// The accepted count, e.g. `2` or `at least 1`.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The surplus arguments, or the point where one is missing.
        span:     Span,
    },
    /// An argument has a value the parameter does not accept.
    #[error("this param must be {expected}, got {found}")]
    ArgumentType {
        /// The expected parameter type.
        expected: String,
        /// The value that was supplied.
        found:    String,
        /// The offending argument.
        span:     Span,
    },
    /// Attempted division by zero.
    #[error("cannot divide by zero")]
    DivisionByZero {
        /// The divisor.
        span: Span,
    },
    /// A register was referenced but no register is available.
    #[error("unknown register: {key}")]
    UnknownRegister {
        /// The register reference as written.
        key:  String,
        /// The reference in the input.
        span: Span,
    },
    /// The register could not serve a read.
    #[error("{source}")]
    Register {
        /// The failure reported by the register.
        source: RegisterError,
        /// The reference in the input.
        span:   Span,
    },
    /// A number word could not be read as a decimal.
    #[error("malformed number '{text}'")]
    MalformedLiteral {
        /// The literal as written.
        text: String,
        /// The literal in the input.
        span: Span,
    },
    /// The operation is undefined for its arguments.
    #[error("{details}")]
    Domain {
        /// What went wrong, e.g. `ln is undefined for -1`.
        details: String,
        /// The offending expression.
        span:    Span,
    },
    /// An operator lacks a value on one of its sides.
    #[error("missing operand for '{symbol}'")]
    MissingOperand {
        /// The operator symbol.
        symbol: String,
        /// The operator in the input.
        span:   Span,
    },
}

impl EvalError {
    /// The input range the error refers to.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnknownFunction { span, .. }
            | Self::UnknownOperator { span, .. }
            | Self::ArgumentCount { span, .. }
            | Self::ArgumentType { span, .. }
            | Self::DivisionByZero { span }
            | Self::UnknownRegister { span, .. }
            | Self::Register { span, .. }
            | Self::MalformedLiteral { span, .. }
            | Self::Domain { span, .. }
            | Self::MissingOperand { span, .. } => *span,
        }
    }
}
