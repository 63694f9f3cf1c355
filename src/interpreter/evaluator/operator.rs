use std::fmt;

use crate::interpreter::value::word::{Span, Word};

/// Base weight of `+` and `-`.
pub const WEIGHT_ADDITIVE: i64 = 10;
/// Base weight of `*` and `/`.
pub const WEIGHT_MULTIPLICATIVE: i64 = 20;
/// Base weight of `^`.
pub const WEIGHT_POWER: i64 = 30;
/// Base weight of `,`.
pub const WEIGHT_COMMA: i64 = 0;
/// Base weight of every builtin call.
pub const WEIGHT_FUNCTION: i64 = 100;
/// How far a `(` lifts the weight of everything inside it.
pub const WEIGHT_GROUP: i64 = 100;

/// The arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`, left-associative.
    Pow,
}

impl BinaryOp {
    /// Looks up an operator by its symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "^" => Some(Self::Pow),
            _ => None,
        }
    }

    /// The symbol as written in the input.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }

    /// The precedence before grouping is applied.
    #[must_use]
    pub const fn weight(self) -> i64 {
        match self {
            Self::Add | Self::Sub => WEIGHT_ADDITIVE,
            Self::Mul | Self::Div => WEIGHT_MULTIPLICATIVE,
            Self::Pow => WEIGHT_POWER,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The two halves of a parenthesized group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// `(`, passes its right operand through.
    Open,
    /// `)`, passes its left operand through.
    Close,
}

/// What a builtin accepts for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Any decimal.
    Numeric,
    /// A decimal without fractional part.
    Integer,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "Numeric"),
            Self::Integer => write!(f, "Integer"),
        }
    }
}

/// The parameter list of a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signature {
    /// One or more numeric arguments.
    Variadic,
    /// Exactly these parameters, in order.
    Fixed(&'static [ParamType]),
}

impl Signature {
    /// Tests whether `count` arguments satisfy this signature.
    #[must_use]
    pub const fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Variadic => count >= 1,
            Self::Fixed(params) => count == params.len(),
        }
    }

    /// The type expected at `position`.
    #[must_use]
    pub fn param(&self, position: usize) -> ParamType {
        match self {
            Self::Variadic => ParamType::Numeric,
            Self::Fixed(params) => params.get(position).copied().unwrap_or(ParamType::Numeric),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variadic => write!(f, "at least 1"),
            Self::Fixed(params) => write!(f, "{}", params.len()),
        }
    }
}

/// The builtin functions.
///
/// ## Example
/// ```
/// use dailycalc::interpreter::evaluator::operator::{Builtin, Signature};
///
/// assert_eq!(Builtin::from_name("round"), Some(Builtin::Round));
/// assert_eq!(Builtin::from_name("ss"), None);
/// assert_eq!(Builtin::Sum.signature(), Signature::Variadic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `sum(x, ...)`
    Sum,
    /// `max(x, ...)`
    Max,
    /// `min(x, ...)`
    Min,
    /// `abs(x)`
    Abs,
    /// `round(x, places)`
    Round,
    /// `hex(n)`
    Hex,
    /// `oct(n)`
    Oct,
    /// `sqrt(x)`
    Sqrt,
    /// `ln(x)`
    Ln,
    /// `log(x)`, base 10.
    Log,
    /// `exp(x)`
    Exp,
}

impl Builtin {
    /// Every builtin, in the order they are listed to users.
    pub const ALL: [Self; 11] = [Self::Sum,
                                 Self::Max,
                                 Self::Min,
                                 Self::Abs,
                                 Self::Round,
                                 Self::Hex,
                                 Self::Oct,
                                 Self::Sqrt,
                                 Self::Ln,
                                 Self::Log,
                                 Self::Exp];

    /// The name used to call the builtin.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Max => "max",
            Self::Min => "min",
            Self::Abs => "abs",
            Self::Round => "round",
            Self::Hex => "hex",
            Self::Oct => "oct",
            Self::Sqrt => "sqrt",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Exp => "exp",
        }
    }

    /// Looks up a builtin by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    /// The parameters the builtin accepts.
    #[must_use]
    pub const fn signature(self) -> Signature {
        use ParamType::{Integer, Numeric};

        match self {
            Self::Sum | Self::Max | Self::Min => Signature::Variadic,
            Self::Abs | Self::Sqrt | Self::Ln | Self::Log | Self::Exp => Signature::Fixed(&[Numeric]),
            Self::Round => Signature::Fixed(&[Numeric, Integer]),
            Self::Hex | Self::Oct => Signature::Fixed(&[Integer]),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What an operator does when it is reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Arithmetic on the neighbouring operands.
    Binary(BinaryOp),
    /// A parenthesis.
    Group(Group),
    /// An argument separator.
    Comma,
    /// A builtin call.
    Function(Builtin),
}

/// An operator of the evaluation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// Reduction priority; the highest weight is reduced first.
    pub weight: i64,
    /// What the operator does.
    pub kind:   OperatorKind,
    /// The words the operator was built from. Empty for synthesized commas.
    pub words:  Vec<Word>,
}

impl Operator {
    /// Creates an operator with an explicit weight.
    #[must_use]
    pub const fn new(kind: OperatorKind, weight: i64, words: Vec<Word>) -> Self {
        Self { weight, kind, words }
    }

    /// The symbol or name shown in messages.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self.kind {
            OperatorKind::Binary(op) => op.symbol(),
            OperatorKind::Group(Group::Open) => "(",
            OperatorKind::Group(Group::Close) => ")",
            OperatorKind::Comma => ",",
            OperatorKind::Function(builtin) => builtin.name(),
        }
    }

    /// The input range covered by the operator words.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        let first = self.words.first()?;
        let last = self.words.last()?;
        Some(Span::new(first.offset, last.end()))
    }
}
