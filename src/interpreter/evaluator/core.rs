use bigdecimal::BigDecimal;
use tracing::{debug, trace};

use crate::{
    error::{Error, EvalError, ParseError},
    interpreter::{
        evaluator::{
            binary::core::eval_binary,
            function::core::eval_function,
            operator::{
                BinaryOp, Builtin, Group, Operator, OperatorKind, WEIGHT_COMMA, WEIGHT_FUNCTION,
                WEIGHT_GROUP,
            },
        },
        value::{
            context::DecimalContext,
            core::Number,
            word::{Span, Word, WordKind},
        },
    },
    register::{Register, RegisterError},
};

pub type EvalResult<T> = Result<T, EvalError>;

/// How a computed value relates to the exact mathematical result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// The value is exact.
    Exact,
    /// The value was rounded or approximated.
    Inexact,
    /// The value was rounded on request, which clears earlier inexactness.
    Settled,
}

/// The result of one operation, before it is settled into the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The computed value.
    pub value:     BigDecimal,
    /// A rendering that replaces the decimal form, e.g. `0xff`.
    pub display:   Option<String>,
    /// Whether the value is exact.
    pub precision: Precision,
}

impl Outcome {
    /// An exact value.
    #[must_use]
    pub const fn exact(value: BigDecimal) -> Self {
        Self { value,
               display: None,
               precision: Precision::Exact }
    }

    /// A value that is exact only if `inexact` is `false`.
    #[must_use]
    pub const fn approximate(value: BigDecimal, inexact: bool) -> Self {
        Self { value,
               display: None,
               precision: if inexact { Precision::Inexact } else { Precision::Exact } }
    }

    /// Attaches a display override.
    #[must_use]
    pub fn with_display(mut self, display: String) -> Self {
        self.display = Some(display);
        self
    }

    /// Marks the value as settled.
    #[must_use]
    pub const fn settled(mut self) -> Self {
        self.precision = Precision::Settled;
        self
    }
}

/// The evaluation chain: operators interleaved with operands.
///
/// `operators[i]` sits between `operands[i]` and `operands[i + 1]`, so there
/// is always exactly one more operand than operators. Evaluation repeatedly
/// reduces the operator with the highest weight until a single operand is
/// left. Parentheses and calls do not nest structurally; they lift the
/// weight of everything between them instead.
///
/// ## Example
/// ```
/// use dailycalc::interpreter::{
///     diagnostic::DiagnosticLog,
///     evaluator::core::Chain,
///     parser::core::parse,
///     value::context::DecimalContext,
/// };
///
/// let context = DecimalContext::default();
/// let words = parse("2 * (3 + 4)", &mut DiagnosticLog::new()).unwrap();
///
/// let chain = Chain::new(words, None, &context).unwrap();
/// assert_eq!(chain.weights(), [20, 100, 110, 100]);
/// assert_eq!(chain.evaluate().unwrap().to_string(), "14");
/// ```
#[derive(Debug, Clone)]
pub struct Chain<'c> {
    operators: Vec<Operator>,
    operands:  Vec<Number>,
    context:   &'c DecimalContext,
    inexact:   bool,
}

impl<'c> Chain<'c> {
    /// Builds a chain from a parsed token stream.
    ///
    /// Number words are read as decimals, register words are resolved through
    /// `register`, and every operator gets its weight from the running group
    /// depth.
    ///
    /// # Errors
    /// - `ParseError::UnbalancedGrouping` if the parentheses do not pair up.
    /// - `ParseError::InvalidExpression` if operands and operators do not
    ///   alternate.
    /// - `EvalError` for unknown names, malformed or out-of-range literals and
    ///   failed register reads.
    pub fn new(words: Vec<Word>,
               register: Option<&dyn Register>,
               context: &'c DecimalContext)
               -> Result<Self, Error> {
        let mut chain = Self { operators: Vec::new(),
                               operands: Vec::new(),
                               context,
                               inexact: false };
        let mut base = 0i64;
        let mut end = 0usize;

        for word in words {
            end = word.end();
            chain.check_alternation(&word)?;

            match word.kind {
                WordKind::LeftParen => {
                    chain.push_operator(OperatorKind::Group(Group::Open),
                                        WEIGHT_GROUP + base,
                                        word);
                    chain.operands.push(Number::placeholder());
                    base += WEIGHT_GROUP;
                },
                WordKind::RightParen => {
                    let span = word.span();
                    chain.push_operator(OperatorKind::Group(Group::Close), base, word);
                    chain.operands.push(Number::placeholder());
                    base -= WEIGHT_GROUP;
                    if base < 0 {
                        return Err(ParseError::UnbalancedGrouping { span }.into());
                    }
                },
                WordKind::FunctionName => {
                    let Some(builtin) = Builtin::from_name(&word.value) else {
                        return Err(EvalError::UnknownFunction { name: word.text.clone(),
                                                                span: word.span(), }.into());
                    };
                    chain.push_operator(OperatorKind::Function(builtin),
                                        WEIGHT_FUNCTION + base,
                                        word);
                    chain.operands.push(Number::placeholder());
                },
                WordKind::Operator => {
                    let Some(op) = BinaryOp::from_symbol(&word.value) else {
                        return Err(EvalError::UnknownOperator { symbol: word.text.clone(),
                                                                span:   word.span(), }.into());
                    };
                    chain.push_operator(OperatorKind::Binary(op), op.weight() + base, word);
                },
                WordKind::Comma => {
                    chain.push_operator(OperatorKind::Comma, WEIGHT_COMMA + base, word);
                },
                WordKind::Number => {
                    let value = read_literal(&word)?;
                    let Some(value) = context.confine(value) else {
                        return Err(out_of_range("number", word.span()).into());
                    };
                    chain.operands.push(Number::new(context.snap(value), vec![word]));
                },
                WordKind::Register => {
                    let number = read_register(&word, register)?;
                    chain.operands.push(number);
                },
                WordKind::RegisterRange => {
                    let numbers = read_register_range(&word, register)?;
                    let count = numbers.len();
                    for (i, number) in numbers.into_iter().enumerate() {
                        chain.operands.push(number);
                        if i + 1 < count {
                            chain.operators
                                 .push(Operator::new(OperatorKind::Comma, base, Vec::new()));
                        }
                    }
                },
                WordKind::Placeholder | WordKind::TrailingComma => {},
            }
        }

        if base != 0 {
            return Err(ParseError::UnbalancedGrouping { span: Span::point(end) }.into());
        }
        if chain.operands.len() != chain.operators.len() + 1 {
            return Err(ParseError::InvalidExpression { message: "expecting number".to_string(),
                                                       span:    Span::point(end), }.into());
        }

        debug!(operators = chain.operators.len(), "chain built");
        Ok(chain)
    }

    /// Number of operators left to reduce.
    #[must_use]
    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }

    /// Number of operands, always one more than [`operator_count`](Self::operator_count).
    #[must_use]
    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }

    /// The weights of the remaining operators, in order.
    #[must_use]
    pub fn weights(&self) -> Vec<i64> {
        self.operators.iter().map(|op| op.weight).collect()
    }

    /// The operators left to reduce.
    #[must_use]
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Returns `true` if an earlier step lost precision.
    #[must_use]
    pub const fn is_inexact(&self) -> bool {
        self.inexact
    }

    /// The index of the operator to reduce next: the highest weight, the
    /// leftmost on ties. `None` once the chain is exhausted.
    #[must_use]
    pub fn next_reduction(&self) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;

        for (index, op) in self.operators.iter().enumerate() {
            if best.is_none_or(|(_, weight)| op.weight > weight) {
                best = Some((index, op.weight));
            }
        }

        best.map(|(index, _)| index)
    }

    /// Reduces the operator chosen by [`next_reduction`](Self::next_reduction).
    ///
    /// Returns `false` without changing anything once the chain is exhausted.
    ///
    /// # Errors
    /// Returns the error raised by the operation, e.g. division by zero.
    pub fn step(&mut self) -> EvalResult<bool> {
        let Some(index) = self.next_reduction() else {
            return Ok(false);
        };
        self.reduce(index)?;
        Ok(true)
    }

    /// Reduces the operator at `index`, which must be in range.
    ///
    /// The operator and its right operand are removed and the left operand is
    /// replaced by the result. A call additionally absorbs its parentheses,
    /// commas and arguments.
    fn reduce(&mut self, index: usize) -> EvalResult<()> {
        let operator = self.operators.remove(index);
        let right = self.operands.remove(index + 1);
        trace!(index, weight = operator.weight, symbol = operator.symbol(), "reduce");

        match operator.kind {
            OperatorKind::Comma => {},
            OperatorKind::Group(group) => {
                let left = std::mem::replace(&mut self.operands[index], Number::placeholder());
                self.operands[index] = pass_through(group, left, operator, right);
            },
            OperatorKind::Function(builtin) => {
                let mut arguments = Vec::new();
                let mut words = operator.words.clone();
                words.extend_from_slice(right.words());
                arguments.push(right);

                while let Some(next) = self.operators.get(index)
                      && matches!(next.kind, OperatorKind::Comma | OperatorKind::Group(_))
                      && next.weight == operator.weight
                {
                    let next = self.operators.remove(index);
                    let operand = self.operands.remove(index + 1);
                    words.extend(next.words);
                    words.extend_from_slice(operand.words());
                    arguments.push(operand);
                }

                let arguments: Vec<Number> =
                    arguments.into_iter().filter(|n| !n.is_placeholder()).collect();

                let span = words_span(&words);
                let outcome = eval_function(builtin, &arguments, span, self.context)?;
                self.operands[index] = self.settle(outcome, words)?;
            },
            OperatorKind::Binary(op) => {
                let left = std::mem::replace(&mut self.operands[index], Number::placeholder());
                let missing = || EvalError::MissingOperand { symbol: op.symbol().to_string(),
                                                             span:   operator.span()
                                                                             .unwrap_or_default(), };

                let (Some(lhs), Some(rhs)) = (left.value(), right.value()) else {
                    return Err(missing());
                };
                let divisor = right.span().unwrap_or_default();
                let outcome = eval_binary(op, lhs, rhs, divisor, self.context)?;

                let mut words = left.into_words();
                words.extend(operator.words);
                words.extend(right.into_words());
                self.operands[index] = self.settle(outcome, words)?;
            },
        }

        Ok(())
    }

    /// Reduces the chain to a single operand and finalizes it for display.
    ///
    /// # Errors
    /// Returns the first error raised by a reduction.
    pub fn evaluate(mut self) -> EvalResult<Number> {
        while self.step()? {}
        self.into_result()
    }

    /// Takes the final operand of an exhausted chain.
    ///
    /// Inexact results are shown with the context's display places, exact
    /// ones are normalized.
    ///
    /// # Errors
    /// Returns `EvalError::MissingOperand` if operators remain or the last
    /// operand holds no value.
    pub fn into_result(mut self) -> EvalResult<Number> {
        let missing = |operators: &[Operator]| {
            let op = operators.first();
            EvalError::MissingOperand { symbol: op.map_or("", Operator::symbol).to_string(),
                                        span:   op.and_then(Operator::span)
                                                  .unwrap_or_default(), }
        };

        if !self.operators.is_empty() || self.operands.len() != 1 {
            return Err(missing(&self.operators));
        }
        let Some(number) = self.operands.pop() else {
            return Err(missing(&self.operators));
        };
        let Some(value) = number.value() else {
            return Err(missing(&self.operators));
        };

        let value = self.context.finalize(value, self.inexact);
        debug!(%value, inexact = self.inexact, "evaluated");

        let display = number.display().map(str::to_string);
        Ok(Number::new(value, number.into_words()).with_display(display))
    }

    fn push_operator(&mut self, kind: OperatorKind, weight: i64, word: Word) {
        self.operators.push(Operator::new(kind, weight, vec![word]));
    }

    /// Rejects token streams where operands and operators do not alternate.
    fn check_alternation(&self, word: &Word) -> Result<(), Error> {
        let expects_operand = self.operands.len() == self.operators.len();
        let is_operand = matches!(word.kind,
                                  WordKind::Number | WordKind::Register | WordKind::RegisterRange);
        let is_prefix = matches!(word.kind, WordKind::LeftParen | WordKind::FunctionName);

        let misplaced = if expects_operand {
            !(is_operand || is_prefix)
        } else {
            is_operand || is_prefix
        };

        if misplaced && !word.is_virtual() {
            let message = if expects_operand { "expecting number" } else { "expecting operator" };
            return Err(ParseError::InvalidExpression { message: message.to_string(),
                                                       span:    word.span(), }.into());
        }

        Ok(())
    }

    /// Rounds an outcome to the working precision and records inexactness.
    fn settle(&mut self, outcome: Outcome, words: Vec<Word>) -> EvalResult<Number> {
        match outcome.precision {
            Precision::Exact => {},
            Precision::Inexact => self.inexact = true,
            Precision::Settled => self.inexact = false,
        }

        let Some((value, lost)) = self.context.settle(outcome.value) else {
            return Err(out_of_range("result", words_span(&words)));
        };
        if lost {
            self.inexact = true;
        }

        Ok(Number::new(value, words).with_display(outcome.display))
    }
}

fn words_span(words: &[Word]) -> Span {
    words.first()
         .zip(words.last())
         .map_or_else(Span::default, |(first, last)| Span::new(first.offset, last.end()))
}

fn out_of_range(what: &str, span: Span) -> EvalError {
    EvalError::Domain { details: format!("{what} is out of range"),
                        span }
}

/// Reduces a parenthesis: `(` yields its right operand, `)` its left one.
fn pass_through(group: Group, left: Number, operator: Operator, right: Number) -> Number {
    let (kept, other) = match group {
        Group::Open => (right, left),
        Group::Close => (left, right),
    };

    let display = kept.display().map(str::to_string);
    let value = kept.value().cloned();

    let mut words = Vec::new();
    let (first, second) = match group {
        Group::Open => (other.into_words(), kept.into_words()),
        Group::Close => (kept.into_words(), other.into_words()),
    };
    words.extend(first);
    words.extend(operator.words);
    words.extend(second);

    match value {
        Some(value) => Number::new(value, words).with_display(display),
        None => Number::placeholder(),
    }
}

fn read_literal(word: &Word) -> Result<BigDecimal, EvalError> {
    word.value
        .parse::<BigDecimal>()
        .map_err(|_| EvalError::MalformedLiteral { text: word.text.clone(),
                                                   span: word.span(), })
}

fn read_register(word: &Word, register: Option<&dyn Register>) -> Result<Number, EvalError> {
    let Some(register) = register else {
        return Err(EvalError::UnknownRegister { key:  word.text.clone(),
                                                span: word.span(), });
    };

    let key = word.value.strip_prefix('@').unwrap_or(&word.value);
    let number = register.read(key)
                         .map_err(|source| EvalError::Register { source,
                                                                 span: word.span() })?;

    register_value(number, word)
}

fn read_register_range(word: &Word,
                       register: Option<&dyn Register>)
                       -> Result<Vec<Number>, EvalError> {
    let Some(register) = register else {
        return Err(EvalError::UnknownRegister { key:  word.text.clone(),
                                                span: word.span(), });
    };

    let range = word.value.strip_prefix('@').unwrap_or(&word.value);
    let Some((from, to)) = range.split_once('_') else {
        return Err(EvalError::MalformedLiteral { text: word.text.clone(),
                                                 span: word.span(), });
    };

    register.read_range(from, to)
            .map_err(|source| EvalError::Register { source,
                                                    span: word.span() })?
            .into_iter()
            .map(|number| register_value(number, word))
            .collect()
}

/// Rebinds a stored value to the register word that referenced it.
fn register_value(number: Number, word: &Word) -> Result<Number, EvalError> {
    match number.into_value() {
        Some(value) => Ok(Number::new(value, vec![word.clone()])),
        None => Err(EvalError::Register { source: RegisterError::NotFound { key: word.value.clone() },
                                          span:   word.span(), }),
    }
}
