/// Numeric configuration threaded through an evaluation.
///
/// Defines `DecimalContext`: working precision, rounding mode, display
/// places and zero snapping. Nothing in the engine reads numeric settings
/// from global state.
pub mod context;
/// Evaluation operands.
///
/// Defines `Number`, a decimal value (or placeholder slot) together with the
/// source words it was computed from and an optional display override.
pub mod core;
/// Lexical units.
///
/// Defines `Word`, `WordKind` and `Span`, the positioned tokens produced by
/// the parser and consumed by the evaluator.
pub mod word;
