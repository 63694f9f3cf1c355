use tracing::trace;

use crate::interpreter::{
    diagnostic::Expected,
    evaluator::operator::Builtin,
    lexer::{Lexeme, at_word_boundary},
    parser::state::ParserState,
    value::word::{Span, Word, WordKind},
};

/// Symbols accepted by the [`operator`] recognizer.
pub const OPERATORS: &[char] = &['+', '-', '*', '/', '^'];

/// Recognizes a numeric literal or a register reference.
///
/// Accepts decimal (`-2.5e-3`), hexadecimal (`0x1f`) and octal (`0o17`)
/// literals as well as `@a`, `@@` and `@a_d`. The literal must not run into a
/// letter, digit or `_`, so `12abc` and `0x1g` are rejected as a whole.
pub fn number(state: &mut ParserState<'_>) -> bool {
    state.skip_whitespace();
    let at = state.cursor();
    let rest = state.rest();

    let matched = Lexeme::first(rest).filter(|(lexeme, len)| {
                                         lexeme.is_operand()
                                         && at_word_boundary(rest.get(*len..).unwrap_or_default())
                                     });

    let word = match matched {
        Some((Lexeme::Decimal(value) | Lexeme::Hex(value) | Lexeme::Octal(value), len)) => {
            Word::with_value(&rest[..len], value, WordKind::Number, at)
        },
        Some((Lexeme::Register(value), len)) => {
            Word::with_value(&rest[..len], value, WordKind::Register, at)
        },
        Some((Lexeme::RegisterRange(value), len)) => {
            Word::with_value(&rest[..len], value, WordKind::RegisterRange, at)
        },
        _ => {
            state.expect(Expected::Number, false);
            return false;
        },
    };

    trace!(text = %word.text, at, "number");
    state.advance(word.text.len());
    state.push(word);
    true
}

/// Recognizes one of the binary operator symbols in [`OPERATORS`].
pub fn operator(state: &mut ParserState<'_>) -> bool {
    state.skip_whitespace();
    let at = state.cursor();
    let rest = state.rest();

    match rest.chars().next() {
        Some(c) if OPERATORS.contains(&c) => {
            state.advance(c.len_utf8());
            state.push(Word::new(&rest[..c.len_utf8()], WordKind::Operator, at));
            true
        },
        _ => {
            state.expect(Expected::Operator, false);
            false
        },
    }
}

/// Recognizes `(`.
pub fn left_paren(state: &mut ParserState<'_>) -> bool {
    notation(state, '(', WordKind::LeftParen, Expected::LeftParen, false)
}

/// Recognizes `)`.
///
/// A missing `)` is the most useful thing to report at its position, so the
/// diagnostic is forced.
pub fn right_paren(state: &mut ParserState<'_>) -> bool {
    notation(state, ')', WordKind::RightParen, Expected::RightParen, true)
}

/// Recognizes `,` between call arguments.
pub fn comma(state: &mut ParserState<'_>) -> bool {
    notation(state, ',', WordKind::Comma, Expected::Comma, false)
}

/// Recognizes the optional `,` before the `)` of a call.
///
/// The word is virtual and dropped from the final stream.
pub fn trailing_comma(state: &mut ParserState<'_>) -> bool {
    notation(state, ',', WordKind::TrailingComma, Expected::Comma, false)
}

/// Recognizes the name of a builtin function.
///
/// Any other identifier is a non-match so that the enclosing alternative can
/// fall through. An unknown identifier directly followed by `(` is clearly
/// meant as a call, and that is reported with a forced diagnostic.
pub fn fn_name(state: &mut ParserState<'_>) -> bool {
    state.skip_whitespace();
    let at = state.cursor();
    let rest = state.rest();

    let Some((Lexeme::Identifier(name), len)) = Lexeme::first(rest) else {
        state.expect(Expected::Function, false);
        return false;
    };

    if Builtin::from_name(&name).is_some() {
        trace!(%name, at, "function");
        state.advance(len);
        state.push(Word::new(&name, WordKind::FunctionName, at));
        return true;
    }

    let after = rest.get(len..).unwrap_or_default();
    if after.trim_start().starts_with('(') {
        state.report(format!("unknown function '{name}'"), Span::new(at, at + len), true);
    } else {
        state.expect(Expected::Function, false);
    }

    false
}

/// Matches a single punctuation character.
fn notation(state: &mut ParserState<'_>,
            symbol: char,
            kind: WordKind,
            expected: Expected,
            forced: bool)
            -> bool {
    state.skip_whitespace();
    let at = state.cursor();
    let rest = state.rest();

    if rest.starts_with(symbol) {
        state.advance(symbol.len_utf8());
        state.push(Word::new(&rest[..symbol.len_utf8()], kind, at));
        true
    } else {
        state.expect(expected, forced);
        false
    }
}
