use bigdecimal::BigDecimal;
use dailycalc::{
    Calculator, calculate,
    error::{Error, EvalError, ParseError},
    interpreter::{
        evaluator::operator::{Builtin, Signature},
        value::{context::DecimalContext, word::Span},
    },
    register::{QueueRegister, RegisterError},
};
use pretty_assertions::assert_eq;

fn assert_value(src: &str, expected: &str) {
    match Calculator::default().evaluate(src, None) {
        Ok(number) => assert_eq!(number.to_string(), expected, "input: {src:?}"),
        Err(e) => panic!("Expression {src:?} failed: {e}"),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = calculate(src) {
        panic!("Expression {src:?} failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if let Ok(value) = calculate(src) {
        panic!("Expression {src:?} evaluated to {value} but was expected to fail")
    }
}

fn eval_error(src: &str) -> EvalError {
    match Calculator::default().evaluate(src, None) {
        Err(Error::Eval(e)) => e,
        other => panic!("Expression {src:?} was expected to fail evaluation, got {other:?}"),
    }
}

#[test]
fn basic_arithmetic() {
    assert_value("1 + 2", "3");
    assert_value("7 * 9", "63");
    assert_value("8 - 5", "3");
    assert_value("10 / 4", "2.5");
    assert_value("2 ^ 10", "1024");
    assert_value("1.1 * 1.1", "1.21");
}

#[test]
fn precedence_and_grouping() {
    assert_value("112.01-2.5 +(-2.56 * (31 +1.1) ) * 2.2 + 23.3 * 3.1 + ( 1.1 + 22 * 8 )",
                 "178.0528");
    assert_value("2 + ( 2 * sum(1, max(2, 3), 4, 5) ) - 1", "27");
    assert_value(" 2 + ( 2 * sum (1, max(2, (3)), sum(1,1+1+1), min((5), 6, 7, 8 ))) - 1",
                 "27");
    assert_value("2*5^2/5", "10");
    assert_value("1+5^2+1", "27");
    assert_value("2*25^(1/2)/2", "5");
    assert_value("10 - 4 - 3", "3");
    assert_value("2 ^ 3 ^ 2", "64");
    assert_value("((((7))))", "7");
}

#[test]
fn literal_forms() {
    assert_value("+1E+2 + 1", "101");
    assert_value("2.5e-3 * 1000", "2.5");
    assert_value("0x1f + 0o17", "46");
    assert_value("-3 * -3", "9");
    assert_value("1 - -1", "2");
    assert_value("10 * 10", "100");
}

#[test]
fn builtin_functions() {
    assert_value("sum(1,)", "1");
    assert_value("abs(-1.1)", "1.1");
    assert_value("round(1.15, 1)", "1.2");
    assert_value("round(2.5, 0)", "3");
    assert_value("max (2.3, 2,)", "2.3");
    assert_value("min (2.3,2.1)", "2.1");
    assert_value("sqrt(1.44)", "1.2");
    assert_value("sqrt(2)", "1.4142135624");
    assert_value("log(100)", "2");
    assert_value("ln(1)", "0");
    assert_value("exp(0)", "1");
    assert_value("round(exp(ln(50)),0)", "50");
}

#[test]
fn every_builtin_is_callable_by_name() {
    for builtin in Builtin::ALL {
        assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));

        let arguments = match builtin.signature() {
            Signature::Variadic => "4, 9".to_string(),
            Signature::Fixed(params) => vec!["4"; params.len()].join(", "),
        };
        assert_success(&format!("{builtin}({arguments})"));
    }
}

#[test]
fn transcendental_results_keep_working_precision() {
    assert_value("2 ^ 0.5", "1.4142135624");
    assert_value("2 ^ 0.5 * 10 ^ 10", "14142135623.7309504880");
    assert_value("exp(1) * 10 ^ 10", "27182818284.5904523536");
    assert_value("ln(2) * 10 ^ 10", "6931471805.5994530942");
    assert_value("log(2) * 10 ^ 10", "3010299956.6398119521");
    assert_value("exp(-1) * 10 ^ 10", "3678794411.7144232160");
}

#[test]
fn exact_powers_and_logarithms() {
    assert_value("1.44 ^ 0.5", "1.2");
    assert_value("4 ^ -0.5", "0.5");
    assert_value("log(0.001)", "-3");
    assert_value("log(1e20)", "20");
    assert_value("0 ^ 0.5", "0");
}

#[test]
fn extreme_magnitudes_are_rejected() {
    for src in ["1e100000000",
                "10 ^ 1000000000",
                "2 ^ 1000000000",
                "0.1 ^ -1000000000",
                "1e10000 * 10",
                "10 ^ 20000.5",
                "exp(100000)"]
    {
        assert!(matches!(eval_error(src), EvalError::Domain { .. }), "input: {src:?}");
    }

    assert_eq!(eval_error("1e100000000"),
               EvalError::Domain { details: "number is out of range".to_string(),
                                   span:    Span::new(0, 11), });
    assert_success("1e10000");
}

#[test]
fn extreme_small_values_underflow_to_zero() {
    assert_value("1e-100000000", "0");
    assert_value("1 + 1e-100000000", "1");
    assert_eq!(calculate("0.5 ^ 1000000000").unwrap(), BigDecimal::from(0));
    assert_eq!(calculate("10 ^ -1000000000").unwrap(), BigDecimal::from(0));
    assert_eq!(calculate("exp(-100000)").unwrap(), BigDecimal::from(0));

    let mut context = DecimalContext::default();
    context.snap_to_zero = false;
    let mut calculator = Calculator::new(context);
    assert_eq!(calculator.evaluate("1e-100000000", None).unwrap().to_string(), "0");
}

#[test]
fn round_accepts_far_away_places() {
    assert_value("round(1, 1000000000)", "1");
    assert_value("round(2.5, 1000000000)", "2.5");
    assert_value("round(123.456, -2)", "100");
    assert_value("round(123.456, -1000000000)", "0");
    assert_value("round(-123.456, -1000000000)", "0");
}

#[test]
fn radix_display() {
    assert_value("hex(255)", "0xff");
    assert_value("oct(8)", "0o10");
    assert_value("(hex(16))", "0x10");
    assert_value("hex(255) + 1", "256");
}

#[test]
fn inexact_results_show_fixed_places() {
    assert_value("1 / 3", "0.3333333333");
    assert_value("2 / 3", "0.6666666667");
    assert_value("1 / 3 * 3", "1.0000000000");
    assert_value("round(1 / 3, 2)", "0.33");
    assert_value("round(1 / 3, 2) + 1", "1.33");
}

#[test]
fn configurable_context() {
    let mut context = DecimalContext::default();
    context.display_places = 4;
    let mut calculator = Calculator::new(context);
    assert_eq!(calculator.evaluate("1 / 3", None).unwrap().to_string(), "0.3333");

    let mut context = DecimalContext::default();
    context.rounding = bigdecimal::RoundingMode::Down;
    let mut calculator = Calculator::new(context);
    assert_eq!(calculator.evaluate("round(1.19, 1)", None).unwrap().to_string(), "1.1");
}

#[test]
fn tiny_results_snap_to_zero() {
    assert_value("1e-30", "0");
    assert_value("1e-15 * 1e-15", "0");
    assert_value("0.1 + 0.2 - 0.3", "0");

    let mut context = DecimalContext::default();
    context.snap_to_zero = false;
    let mut calculator = Calculator::new(context);
    let result = calculator.evaluate("1e-15 * 1e-15", None).unwrap();
    assert!(result.value().is_some_and(|v| *v != BigDecimal::from(0)));
}

#[test]
fn invalid_syntax_fails() {
    assert_failure(" a ");
    assert_failure(" - 123 ");
    assert_failure("(() 12 * 123 )");
    assert_failure("(( 12 + 3 * 123 )");
    assert_failure("( 12 - 3 * 123 ) + (5 * 6))");
    assert_failure("12  3 * * 123");
    assert_failure(".123");
    assert_failure("12abc");
    assert_failure("sum()");
    assert_failure("");
    assert_failure("   ");
}

#[test]
fn unknown_function_is_reported_by_name() {
    let mut calculator = Calculator::default();
    let err = calculator.evaluate("ss(1,2)", None).unwrap_err();

    assert_eq!(err,
               Error::Parse(ParseError::InvalidExpression { message: "unknown function 'ss'".to_string(),
                                                            span:    Span::new(0, 2), }));
    assert_eq!(calculator.render_error("ss(1,2)"),
               "  Input: ss(1,2)\n         ^^---------\n  Error: unknown function 'ss'");
}

#[test]
fn division_by_zero_points_at_divisor() {
    assert_eq!(eval_error("2/0"), EvalError::DivisionByZero { span: Span::new(2, 3) });
    assert_eq!(eval_error("1 / (2 - 2)"), EvalError::DivisionByZero { span: Span::new(4, 11) });
    assert_eq!(eval_error("0 ^ -1"), EvalError::DivisionByZero { span: Span::new(4, 6) });
}

#[test]
fn argument_count_is_checked() {
    assert_eq!(eval_error("abs(1,1)"),
               EvalError::ArgumentCount { name:     "abs".to_string(),
                                          expected: "1".to_string(),
                                          found:    2,
                                          span:     Span::new(6, 7), });
    assert_eq!(eval_error("round(1.5)"),
               EvalError::ArgumentCount { name:     "round".to_string(),
                                          expected: "2".to_string(),
                                          found:    1,
                                          span:     Span::point(9), });
}

#[test]
fn argument_type_is_checked() {
    assert_eq!(eval_error("round(11,1.1)"),
               EvalError::ArgumentType { expected: "Integer".to_string(),
                                         found:    "1.1".to_string(),
                                         span:     Span::new(9, 12), });
    assert!(matches!(eval_error("hex(1.5)"), EvalError::ArgumentType { .. }));
}

#[test]
fn domain_errors() {
    assert!(matches!(eval_error("sqrt(-4)"), EvalError::Domain { .. }));
    assert!(matches!(eval_error("ln(0)"), EvalError::Domain { .. }));
    assert!(matches!(eval_error("log(-1)"), EvalError::Domain { .. }));
    assert!(matches!(eval_error("(-8) ^ 0.5"), EvalError::Domain { .. }));
}

#[test]
fn evaluation_errors_are_rendered() {
    let mut calculator = Calculator::default();
    assert!(calculator.evaluate("2/0", None).is_err());
    assert_eq!(calculator.render_error("2/0"),
               "  Input: 2/0\n         --^----\n  Error: cannot divide by zero");

    assert!(calculator.evaluate("abs(1,1)", None).is_err());
    assert_eq!(calculator.render_error("abs(1,1)"),
               "  Input: abs(1,1)\n         ------^-----\n  Error: abs: expecting 1 parameters got 2");
}

#[test]
fn a_new_call_clears_old_diagnostics() {
    let mut calculator = Calculator::default();
    assert!(calculator.evaluate("2/0", None).is_err());
    assert!(!calculator.log().is_empty());

    assert!(calculator.evaluate("2/1", None).is_ok());
    assert!(calculator.log().is_empty());
}

#[test]
fn result_remembers_its_source() {
    let mut calculator = Calculator::default();
    let result = calculator.evaluate(" 2 * ( 3 + 4 ) ", None).unwrap();

    assert_eq!(result.source_text(), "2*(3+4)");
    assert_eq!(result.span(), Some(Span::new(1, 14)));
}

#[test]
fn registers() {
    let mut calculator = Calculator::default();
    let mut register = QueueRegister::new();

    for src in ["1", "2", "3"] {
        let number = calculator.evaluate(src, Some(&register)).unwrap();
        register.write(number);
    }

    let mut eval = |src: &str| calculator.evaluate(src, Some(&register)).map(|n| n.to_string());

    assert_eq!(eval("@a + @b").unwrap(), "3");
    assert_eq!(eval("@@ * 2").unwrap(), "6");
    assert_eq!(eval("sum(@a_c)").unwrap(), "6");
    assert_eq!(eval("max(@a_c, 10)").unwrap(), "10");
    assert_eq!(eval("sum(@a_z)").unwrap(), "6");
}

#[test]
fn register_failures() {
    let mut calculator = Calculator::default();
    let mut register = QueueRegister::new();
    register.write(calculator.evaluate("5", None).unwrap());

    assert_eq!(calculator.evaluate("@a", None).unwrap_err(),
               Error::Eval(EvalError::UnknownRegister { key:  "@a".to_string(),
                                                        span: Span::new(0, 2), }));
    assert_eq!(calculator.evaluate("1 + @z", Some(&register)).unwrap_err(),
               Error::Eval(EvalError::Register { source: RegisterError::NotFound { key: "z".to_string() },
                                                 span:   Span::new(4, 6), }));
    assert!(matches!(calculator.evaluate("sum(@d_f)", Some(&register)),
                     Err(Error::Eval(EvalError::Register { source: RegisterError::EmptyRange { .. },
                                                           .. }))));
    assert!(matches!(calculator.evaluate("sum(@c_a)", Some(&register)),
                     Err(Error::Eval(EvalError::Register { source: RegisterError::InvalidRange { .. },
                                                           .. }))));
}

#[test]
fn calculate_returns_plain_decimals() {
    assert_success("1 + 1");
    assert_eq!(calculate("hex(255)").unwrap(), BigDecimal::from(255));
    assert_failure("2/0");
    assert_failure("abs(1,1)");
    assert_failure("round(11,1.1)");
    assert_failure("0 ^ -1");
    assert_failure("0 ^ -0.5");
    assert_failure("(-8) ^ 0.5");
    assert_failure("(-8) ^ (1 / 3)");
    assert_eq!(calculate("25 ^ 0.5").unwrap(), BigDecimal::from(5));
}
