/// Binary operator evaluation logic.
///
/// Handles the arithmetic operators `+ - * / ^` on decimal operands.
pub mod binary;

/// Core evaluation logic.
///
/// Contains the weighted evaluation chain, the reduction loop and the
/// tracking of inexact results.
pub mod core;

/// Function evaluation.
///
/// Handles builtin calls: argument checking against signatures and
/// computation of the result.
pub mod function;

/// Operator and builtin definitions.
///
/// Declares the operator kinds, their weights, and the builtin functions with
/// their signatures.
pub mod operator;
