/// The diagnostic module records why parsing or evaluation failed.
///
/// Recognizers report what they expected at each input position while the
/// parser backtracks. The log keeps the single most useful message per
/// position and renders the furthest one under the input.
///
/// # Responsibilities
/// - Keeps one diagnostic per position with forced/continuation precedence.
/// - Renders the input, a marker line and the message.
pub mod diagnostic;
/// The evaluator module computes the value of a token stream.
///
/// The evaluator builds a weighted chain of operators and operands from the
/// parsed words and repeatedly reduces the operator with the highest weight.
///
/// # Responsibilities
/// - Assigns weights from operator precedence and parenthesis depth.
/// - Evaluates arithmetic and builtin calls on arbitrary precision decimals.
/// - Reports evaluation errors such as division by zero with their span.
pub mod evaluator;
/// The lexer module classifies a single lexeme at the parser cursor.
///
/// Numeric literals in decimal, hexadecimal and octal form, register
/// references, identifiers and punctuation are recognized by longest match.
pub mod lexer;
/// The parser module turns raw input into a validated token stream.
///
/// The parser composes primitive recognizers with backtracking combinators
/// and produces the flat list of words the evaluator consumes.
///
/// # Responsibilities
/// - Validates the grammar of expressions and calls.
/// - Records precise diagnostics for malformed input.
/// - Rejects input that is not consumed completely.
pub mod parser;
/// The value module defines the data the interpreter works on.
///
/// Words carry the text and position of each token, numbers carry decimal
/// values and their source words, and the decimal context carries numeric
/// configuration.
pub mod value;
