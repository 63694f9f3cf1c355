/// Dispatch of the arithmetic operators.
pub mod core;
/// Exponentiation.
///
/// Integer exponents are computed exactly by repeated squaring, fractional
/// exponents through decimal series at the working precision.
pub mod power;
/// Addition, subtraction, multiplication and division.
pub mod scalar;
