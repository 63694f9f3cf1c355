use dailycalc::{
    error::ParseError,
    interpreter::{
        diagnostic::{Continuation, DiagnosticLog, Expected},
        parser::{
            combinator::{alternative, optional_sequence, repetition, sequence},
            core::{format, parse},
            primitive::{left_paren, number, operator},
            state::ParserState,
        },
        value::word::{Span, WordKind},
    },
};
use pretty_assertions::assert_eq;

fn texts(src: &str) -> Vec<String> {
    let mut log = DiagnosticLog::new();
    match parse(src, &mut log) {
        Ok(words) => words.into_iter().map(|w| w.text).collect(),
        Err(e) => panic!("Parsing {src:?} failed: {e}"),
    }
}

fn parse_error(src: &str) -> (ParseError, String) {
    let mut log = DiagnosticLog::new();
    match parse(src, &mut log) {
        Ok(words) => panic!("Parsing {src:?} was expected to fail, got {words:?}"),
        Err(e) => (e, log.message(src)),
    }
}

fn op_num(state: &mut ParserState<'_>) -> bool {
    sequence(state, &[operator, number])
}

#[test]
fn sequence_restores_on_failure() {
    let mut log = DiagnosticLog::new();
    let mut state = ParserState::new("1 +", &mut log);

    assert!(!sequence(&mut state, &[number, operator, number]));
    assert_eq!(state.cursor(), 0);
    assert!(state.words().is_empty());
}

#[test]
fn optional_sequence_keeps_the_matched_prefix() {
    let mut log = DiagnosticLog::new();
    let mut state = ParserState::new("1 + x", &mut log);

    assert!(optional_sequence(&mut state, &[number, operator, number]));
    assert_eq!(state.cursor(), 3);

    let words: Vec<&str> = state.words().iter().map(|w| w.text.as_str()).collect();
    assert_eq!(words, ["1", "+"]);
}

#[test]
fn optional_sequence_needs_the_first_rule() {
    let mut log = DiagnosticLog::new();
    let mut state = ParserState::new("+ 1", &mut log);

    assert!(!optional_sequence(&mut state, &[number, operator]));
    assert!(state.words().is_empty());
}

#[test]
fn alternative_takes_the_first_match() {
    let mut log = DiagnosticLog::new();
    let mut state = ParserState::new("7", &mut log);

    assert!(alternative(&mut state, &[left_paren, number]));
    assert_eq!(state.words().len(), 1);
    assert_eq!(state.words()[0].kind, WordKind::Number);
}

#[test]
fn repetition_matches_greedily() {
    let mut log = DiagnosticLog::new();
    let mut state = ParserState::new("+ 1 - 2 * 3", &mut log);

    assert!(repetition(&mut state, op_num, true));
    assert_eq!(state.cursor(), 11);

    let words: Vec<&str> = state.words().iter().map(|w| w.text.as_str()).collect();
    assert_eq!(words, ["+", "1", "-", "2", "*", "3"]);
}

#[test]
fn empty_repetition_leaves_a_placeholder() {
    let mut log = DiagnosticLog::new();
    let mut state = ParserState::new("x", &mut log);

    assert!(repetition(&mut state, op_num, false));
    assert_eq!(state.words().len(), 1);
    assert_eq!(state.words()[0].kind, WordKind::Placeholder);
    assert_eq!(state.cursor(), 0);

    let mut log = DiagnosticLog::new();
    let mut state = ParserState::new("x", &mut log);
    assert!(!repetition(&mut state, op_num, true));
    assert!(state.words().is_empty());
}

#[test]
fn words_are_classified() {
    let mut log = DiagnosticLog::new();
    let words = parse("sum(@a_c, 0x1f) ^ -2", &mut log).unwrap();

    let kinds: Vec<WordKind> = words.iter().map(|w| w.kind).collect();
    assert_eq!(kinds,
               [WordKind::FunctionName,
                WordKind::LeftParen,
                WordKind::RegisterRange,
                WordKind::Comma,
                WordKind::Number,
                WordKind::RightParen,
                WordKind::Operator,
                WordKind::Number]);

    assert_eq!(words[4].text, "0x1f");
    assert_eq!(words[4].value, "31");
    assert_eq!(words[4].span(), Span::new(10, 14));
    assert_eq!(words[7].value, "-2");
}

#[test]
fn literals_are_normalized() {
    let mut log = DiagnosticLog::new();
    let words = parse("+1E+2 + 0O17", &mut log).unwrap();

    assert_eq!(words[0].text, "+1E+2");
    assert_eq!(words[0].value, "1e+2");
    assert_eq!(words[2].value, "15");
}

#[test]
fn trailing_comma_is_dropped() {
    assert_eq!(texts("sum(1,)"), ["sum", "(", "1", ")"]);
    assert_eq!(texts("max (2.3, 2,)"), ["max", "(", "2.3", ",", "2", ")"]);
}

#[test]
fn signed_literals_follow_operators() {
    assert_eq!(texts("1 - -1"), ["1", "-", "-1"]);
    assert_eq!(texts("1-1"), ["1", "-", "1"]);
    assert_eq!(texts("-3 * -3"), ["-3", "*", "-3"]);
}

#[test]
fn dangling_operator_points_past_the_end() {
    let (err, rendered) = parse_error("1 +");

    assert_eq!(err,
               ParseError::UnconsumedInput { leftover: "+".to_string(),
                                             message:  "expecting number".to_string(),
                                             span:     Span::point(3), });
    assert_eq!(rendered, "  Input: 1 +\n         ---^---\n  Error: expecting number");
}

#[test]
fn missing_right_paren_is_reported() {
    let (err, _) = parse_error("(1 + 2");

    assert_eq!(err,
               ParseError::InvalidExpression { message: "expecting ')'".to_string(),
                                               span:    Span::point(6), });
}

#[test]
fn diagnostics_fit_the_preceding_token() {
    let (err, _) = parse_error("1 2");
    assert_eq!(err.to_string(), "expecting operator");
    assert_eq!(err.span(), Span::point(2));

    let (err, _) = parse_error("2 * )");
    assert_eq!(err.to_string(), "expecting number");
    assert_eq!(err.span(), Span::point(4));
}

#[test]
fn unknown_function_spans_its_name() {
    let (err, rendered) = parse_error("ss(1,2)");

    assert_eq!(err,
               ParseError::InvalidExpression { message: "unknown function 'ss'".to_string(),
                                               span:    Span::new(0, 2), });
    assert_eq!(rendered, "  Input: ss(1,2)\n         ^^---------\n  Error: unknown function 'ss'");
}

#[test]
fn blank_input_is_invalid() {
    let (err, _) = parse_error("   ");
    assert!(matches!(err, ParseError::InvalidExpression { .. }));

    let (err, _) = parse_error("");
    assert!(matches!(err, ParseError::InvalidExpression { .. }));
}

#[test]
fn rejected_literals() {
    for src in ["12abc", ".123", "0x1g", "1..2", "sum()", "@A"] {
        let mut log = DiagnosticLog::new();
        assert!(parse(src, &mut log).is_err(), "{src:?} was expected to fail");
    }
}

#[test]
fn format_normalizes_spacing() {
    assert_eq!(format("1+2").unwrap(), "1 + 2");
    assert_eq!(format("  ( 1 )  ").unwrap(), "( 1 )");
    assert_eq!(format("sum(1, 2,)*3").unwrap(), "sum ( 1 , 2 ) * 3");
    assert_eq!(format("@a+@@").unwrap(), "@a + @@");
    assert!(format("1 +").is_err());
}

#[test]
fn log_keeps_the_best_entry_per_position() {
    let mut log = DiagnosticLog::new();

    log.expect(Expected::Number, 4, Continuation::Operator, false);
    log.expect(Expected::Operator, 4, Continuation::Operator, false);
    assert_eq!(log.get(4).unwrap().message, "expecting operator");

    log.expect(Expected::Number, 4, Continuation::Operator, false);
    assert_eq!(log.get(4).unwrap().message, "expecting operator");

    log.add("something else", Span::point(4), false);
    assert_eq!(log.get(4).unwrap().message, "expecting operator");

    log.expect(Expected::RightParen, 4, Continuation::Operand, true);
    assert_eq!(log.get(4).unwrap().message, "expecting ')'");

    log.expect(Expected::Comma, 4, Continuation::Operator, false);
    assert_eq!(log.get(4).unwrap().message, "expecting ')'");
}

#[test]
fn log_reports_the_furthest_position() {
    let mut log = DiagnosticLog::new();
    assert!(log.latest().is_none());

    log.add("late", Span::point(7), false);
    log.add("early", Span::new(1, 3), false);
    assert_eq!(log.len(), 2);
    assert_eq!(log.latest().unwrap().message, "late");

    log.clear();
    assert!(log.is_empty());
    assert_eq!(log.message("x"), "  Input: x\n  Error: no diagnostic recorded");
}

#[test]
fn marker_past_the_input_sits_after_it() {
    let mut log = DiagnosticLog::new();
    log.add("past the end", Span::point(50), false);

    assert_eq!(log.message("12"), "  Input: 12\n         --^---\n  Error: past the end");
}
