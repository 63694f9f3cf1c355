//! Property-based tests for the parser and the evaluation chain.
//!
//! Expressions are generated from the grammar, so every generated input is
//! expected to parse.

use bigdecimal::BigDecimal;
use dailycalc::{
    Calculator, calculate, format,
    interpreter::{
        diagnostic::DiagnosticLog, evaluator::core::Chain, parser::core::parse,
        value::context::DecimalContext,
    },
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Non-negative integer or two-place decimal literals.
fn arb_number() -> impl Strategy<Value = String> {
    prop_oneof![(0u32..1000).prop_map(|n| n.to_string()),
                (0u32..100, 0u32..100).prop_map(|(i, f)| format!("{i}.{f:02}")),]
}

fn arb_binop() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")]
}

fn arb_builtin() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("sum"), Just("max"), Just("min")]
}

/// Nested expressions with operators, groups and variadic calls.
fn arb_expr() -> impl Strategy<Value = String> {
    arb_number().prop_recursive(4, 32, 4, |inner| {
                    prop_oneof![(inner.clone(), arb_binop(), inner.clone()).prop_map(|(l, op, r)| {
                                                                                format!("{l} {op} {r}")
                                                                            }),
                                inner.clone().prop_map(|e| format!("( {e} )")),
                                (arb_builtin(), prop::collection::vec(inner, 1..4)).prop_map(
                                    |(name, args)| format!("{name}({})", args.join(", "))
                                ),]
                })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Parsing never panics, whatever the input.
    #[test]
    fn parser_no_panic(input in ".{0,40}") {
        let mut log = DiagnosticLog::new();
        if parse(&input, &mut log).is_err() {
            let _rendered = log.message(&input);
        }
    }

    /// Generated expressions parse and format to a fixed point.
    #[test]
    fn format_is_idempotent(src in arb_expr()) {
        let once = format(&src);
        prop_assert!(once.is_ok(), "{src:?} failed to parse: {once:?}");
        let once = once.unwrap();

        prop_assert_eq!(format(&once).unwrap(), once.clone());

        let words = parse(&src, &mut DiagnosticLog::new()).unwrap();
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        prop_assert_eq!(texts, once.split(' ').collect::<Vec<_>>());
    }

    /// Whitespace between tokens does not change the token stream.
    #[test]
    fn whitespace_is_insignificant(src in arb_expr()) {
        let compact = src.replace(' ', "");
        prop_assert_eq!(format(&compact).unwrap(), format(&src).unwrap());
    }

    /// Every reduction removes operators and keeps one more operand than
    /// operators.
    #[test]
    fn reduction_keeps_the_chain_aligned(src in arb_expr()) {
        let context = DecimalContext::default();
        let words = parse(&src, &mut DiagnosticLog::new()).unwrap();
        let mut chain = Chain::new(words, None, &context).unwrap();

        prop_assert_eq!(chain.operand_count(), chain.operator_count() + 1);
        while chain.next_reduction().is_some() {
            let before = chain.operator_count();
            if chain.step().is_err() {
                break;
            }
            prop_assert!(chain.operator_count() < before);
            prop_assert_eq!(chain.operand_count(), chain.operator_count() + 1);
        }
    }

    /// `sum` agrees with a chain of additions.
    #[test]
    fn sum_is_repeated_addition(args in prop::collection::vec(arb_number(), 1..8)) {
        let sum = calculate(&format!("sum({})", args.join(", "))).unwrap();
        let added = calculate(&args.join(" + ")).unwrap();
        prop_assert_eq!(sum, added);
    }

    /// `max` and `min` pick the extreme arguments.
    #[test]
    fn max_and_min_pick_extremes(args in prop::collection::vec(arb_number(), 1..8)) {
        let values: Vec<BigDecimal> = args.iter().map(|a| a.parse().unwrap()).collect();
        let joined = args.join(", ");

        let max = calculate(&format!("max({joined})")).unwrap();
        let min = calculate(&format!("min({joined})")).unwrap();
        prop_assert_eq!(&max, values.iter().max().unwrap());
        prop_assert_eq!(&min, values.iter().min().unwrap());
    }

    /// Anything at or below the snap threshold reads as zero.
    #[test]
    fn tiny_values_snap_to_zero(exponent in 29u32..200) {
        let mut calculator = Calculator::default();
        let result = calculator.evaluate(&format!("1e-{exponent}"), None).unwrap();
        prop_assert_eq!(result.to_string(), "0");

        let again = calculator.evaluate(&format!("1e-{exponent} + 0"), None).unwrap();
        prop_assert_eq!(again.to_string(), "0");
    }
}
