/// Combinators that compose grammar rules.
///
/// Sequence, alternative, optional sequence and repetition, each restoring
/// the parser state when a composed rule fails.
pub mod combinator;

/// The grammar and the parse entry point.
///
/// Drives the rules from `expr`, strips virtual words and checks that the
/// whole input was consumed.
pub mod core;

/// Primitive recognizers.
///
/// Numbers, registers, operators, punctuation and function names, each
/// recording what it expected when it does not match.
pub mod primitive;

/// The scanning state.
///
/// Holds the cursor, the matched words and the diagnostic log of one parse.
pub mod state;
