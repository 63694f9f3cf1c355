/// Elementary builtins: `abs`, `sqrt`, `ln`, `log` and `exp`.
pub mod builtin;
/// Signature validation and dispatch of builtin calls.
pub mod core;
/// The variadic builtins `sum`, `max` and `min`.
pub mod min_max;
/// `hex` and `oct`, which keep the value and change how it is shown.
pub mod radix;
/// The `round` builtin.
pub mod round;
