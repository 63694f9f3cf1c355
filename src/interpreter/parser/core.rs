use tracing::debug;

use crate::{
    error::ParseError,
    interpreter::{
        diagnostic::DiagnosticLog,
        parser::{
            combinator::{alternative, optional_sequence, repetition, sequence},
            primitive::{comma, fn_name, left_paren, number, operator, right_paren, trailing_comma},
            state::ParserState,
        },
        value::word::{Span, Word},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses `source` into a flat token stream.
///
/// The grammar is driven from [`expr`]; virtual words are stripped from the
/// result. Parsing fails if nothing could be recognized or if input is left
/// over. The failure carries the diagnostic recorded furthest into the input,
/// which stays in `log` for rendering.
///
/// # Errors
/// - `InvalidExpression` if no token could be recognized.
/// - `UnconsumedInput` if the grammar stopped before the end of the input.
///
/// # Example
/// ```
/// use dailycalc::interpreter::{diagnostic::DiagnosticLog, parser::core::parse};
///
/// let mut log = DiagnosticLog::new();
/// let words = parse("sum(1, 2,) * 3", &mut log).unwrap();
/// let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
/// assert_eq!(texts, ["sum", "(", "1", ",", "2", ")", "*", "3"]);
/// ```
#[tracing::instrument(level = "debug", skip(log))]
pub fn parse(source: &str, log: &mut DiagnosticLog) -> ParseResult<Vec<Word>> {
    let mut state = ParserState::new(source, log);

    let matched = expr(&mut state);
    state.skip_whitespace();
    let cursor = state.cursor();
    let leftover = state.rest().trim_end().to_string();

    let words: Vec<Word> = state.into_words()
                                .into_iter()
                                .filter(|word| !word.is_virtual())
                                .collect();

    if !matched || words.is_empty() {
        let (message, span) = failure(log, cursor);
        return Err(ParseError::InvalidExpression { message, span });
    }

    if !leftover.is_empty() {
        let (message, span) = failure(log, cursor);
        return Err(ParseError::UnconsumedInput { leftover,
                                                 message,
                                                 span });
    }

    debug!(tokens = words.len(), "parsed");
    Ok(words)
}

/// Parses `source` and renders its tokens separated by single spaces.
///
/// # Errors
/// Same as [`parse`].
///
/// # Example
/// ```
/// use dailycalc::interpreter::parser::core::format;
///
/// assert_eq!(format(" 2+( 3*max(1,2 ,) )").unwrap(), "2 + ( 3 * max ( 1 , 2 ) )");
/// ```
pub fn format(source: &str) -> ParseResult<String> {
    let mut log = DiagnosticLog::new();
    let words = parse(source, &mut log)?;

    Ok(words.iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
}

/// Picks the diagnostic that explains a failed parse.
fn failure(log: &mut DiagnosticLog, cursor: usize) -> (String, Span) {
    if let Some(latest) = log.latest() {
        return (latest.message.clone(), latest.span);
    }

    let span = Span::point(cursor);
    log.add("invalid expression", span, true);
    ("invalid expression".to_string(), span)
}

/// Parses an expression.
///
/// Grammar: `expr := (e_2 | e_1 | e_fn) (operator expr)*`
pub fn expr(state: &mut ParserState<'_>) -> bool {
    optional_sequence(state, &[operand, operator_chain])
}

/// Grammar: `operand := e_2 | e_1 | e_fn`
fn operand(state: &mut ParserState<'_>) -> bool {
    alternative(state, &[e_2, e_1, e_fn])
}

/// Grammar: `(operator expr)*`
fn operator_chain(state: &mut ParserState<'_>) -> bool {
    repetition(state, operator_then_expr, false)
}

fn operator_then_expr(state: &mut ParserState<'_>) -> bool {
    sequence(state, &[operator, expr])
}

/// Parses a run of numbers joined by operators.
///
/// Grammar: `e_2 := number (operator number)*`
pub fn e_2(state: &mut ParserState<'_>) -> bool {
    optional_sequence(state, &[number, number_chain])
}

fn number_chain(state: &mut ParserState<'_>) -> bool {
    repetition(state, operator_then_number, false)
}

fn operator_then_number(state: &mut ParserState<'_>) -> bool {
    sequence(state, &[operator, number])
}

/// Parses a parenthesized expression.
///
/// Grammar: `e_1 := '(' expr ')'`
pub fn e_1(state: &mut ParserState<'_>) -> bool {
    sequence(state, &[left_paren, expr, right_paren])
}

/// Parses a builtin call with at least one argument.
///
/// Grammar: `e_fn := fn_name '(' expr (',' expr)* [','] ')'`
pub fn e_fn(state: &mut ParserState<'_>) -> bool {
    sequence(state, &[fn_name, left_paren, arguments, right_paren])
}

fn arguments(state: &mut ParserState<'_>) -> bool {
    optional_sequence(state, &[expr, argument_chain, trailing_comma])
}

fn argument_chain(state: &mut ParserState<'_>) -> bool {
    repetition(state, comma_then_expr, false)
}

fn comma_then_expr(state: &mut ParserState<'_>) -> bool {
    sequence(state, &[comma, expr])
}
