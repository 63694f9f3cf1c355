use bigdecimal::BigDecimal;
use dailycalc::{
    error::{Error, EvalError, ParseError},
    interpreter::{
        diagnostic::DiagnosticLog,
        evaluator::{core::Chain, operator::OperatorKind},
        parser::core::parse,
        value::{
            context::DecimalContext,
            core::Number,
            word::{Span, Word, WordKind},
        },
    },
    register::QueueRegister,
};
use pretty_assertions::assert_eq;

fn chain<'c>(src: &str, context: &'c DecimalContext) -> Chain<'c> {
    let words = match parse(src, &mut DiagnosticLog::new()) {
        Ok(words) => words,
        Err(e) => panic!("Parsing {src:?} failed: {e}"),
    };
    match Chain::new(words, None, context) {
        Ok(chain) => chain,
        Err(e) => panic!("Building a chain for {src:?} failed: {e}"),
    }
}

fn number_word(text: &str, offset: usize) -> Word {
    Word::new(text, WordKind::Number, offset)
}

#[test]
fn weights_follow_precedence_and_depth() {
    let context = DecimalContext::default();

    assert_eq!(chain("1 + 2 * 3 ^ 4", &context).weights(), [10, 20, 30]);
    assert_eq!(chain("(1 + 2) * 3", &context).weights(), [100, 110, 100, 20]);
    assert_eq!(chain("((1))", &context).weights(), [100, 200, 200, 100]);
    assert_eq!(chain("max(1, 2 * 3)", &context).weights(), [100, 100, 100, 120, 100]);
}

#[test]
fn calls_inside_groups_are_lifted() {
    let context = DecimalContext::default();
    let chain = chain("2 * (1 + sum(3, 4))", &context);

    assert_eq!(chain.weights(), [20, 100, 110, 200, 200, 200, 200, 100]);
    assert!(matches!(chain.operators()[3].kind, OperatorKind::Function(_)));
}

#[test]
fn next_reduction_prefers_the_leftmost_tie() {
    let context = DecimalContext::default();

    assert_eq!(chain("1 - 2 + 3", &context).next_reduction(), Some(0));
    assert_eq!(chain("1 + 2 * 3", &context).next_reduction(), Some(1));
    assert_eq!(chain("1 * 2 + 3 * 4", &context).next_reduction(), Some(0));
    assert_eq!(chain("7", &context).next_reduction(), None);
}

#[test]
fn every_reduction_keeps_the_chain_aligned() {
    let context = DecimalContext::default();
    let mut chain = chain("2 + ( 2 * sum (1, max(2, (3)), sum(1,1+1+1), min((5), 6, 7, 8 ))) - 1",
                          &context);

    assert_eq!(chain.operand_count(), chain.operator_count() + 1);
    loop {
        let before = chain.operator_count();
        if !chain.step().unwrap() {
            assert_eq!(before, 0);
            break;
        }

        assert!(chain.operator_count() < before);
        assert_eq!(chain.operand_count(), chain.operator_count() + 1);
    }

    assert_eq!(chain.into_result().unwrap().to_string(), "27");
}

#[test]
fn inexact_steps_are_tracked() {
    let context = DecimalContext::default();

    let mut exact = chain("1 / 4", &context);
    assert!(exact.step().unwrap());
    assert!(!exact.is_inexact());

    let mut inexact = chain("1 / 3", &context);
    assert!(inexact.step().unwrap());
    assert!(inexact.is_inexact());

    let settled = chain("round(1 / 3, 2)", &context);
    assert_eq!(settled.evaluate().unwrap().to_string(), "0.33");
}

#[test]
fn an_exhausted_chain_does_not_step() {
    let context = DecimalContext::default();
    let mut chain = chain("1 + 2", &context);

    assert!(chain.step().unwrap());
    assert!(!chain.step().unwrap());
    assert!(!chain.step().unwrap());
    assert_eq!(chain.operator_count(), 0);
    assert_eq!(chain.operand_count(), 1);
    assert_eq!(chain.into_result().unwrap().to_string(), "3");
}

#[test]
fn a_failed_step_reports_the_operation() {
    let context = DecimalContext::default();
    let mut chain = chain("1 + 2 / 0", &context);

    assert_eq!(chain.step().unwrap_err(), EvalError::DivisionByZero { span: Span::new(8, 9) });
}

#[test]
fn unbalanced_words_are_rejected() {
    let context = DecimalContext::default();

    let open = vec![Word::new("(", WordKind::LeftParen, 0), number_word("1", 1)];
    assert_eq!(Chain::new(open, None, &context).unwrap_err(),
               Error::Parse(ParseError::UnbalancedGrouping { span: Span::point(2) }));

    let close = vec![number_word("1", 0), Word::new(")", WordKind::RightParen, 1)];
    assert_eq!(Chain::new(close, None, &context).unwrap_err(),
               Error::Parse(ParseError::UnbalancedGrouping { span: Span::new(1, 2) }));
}

#[test]
fn misplaced_words_are_rejected() {
    let context = DecimalContext::default();

    let words = vec![number_word("1", 0), number_word("2", 2)];
    assert_eq!(Chain::new(words, None, &context).unwrap_err(),
               Error::Parse(ParseError::InvalidExpression { message: "expecting operator".to_string(),
                                                            span:    Span::new(2, 3), }));

    let words = vec![number_word("1", 0), Word::new("+", WordKind::Operator, 1)];
    assert!(matches!(Chain::new(words, None, &context),
                     Err(Error::Parse(ParseError::InvalidExpression { .. }))));
}

#[test]
fn register_ranges_expand_in_place() {
    let context = DecimalContext::default();
    let mut register = QueueRegister::new();
    for value in [1, 2, 3] {
        register.write(Number::from(BigDecimal::from(value)));
    }

    let words = parse("sum(@a_c) * 2", &mut DiagnosticLog::new()).unwrap();
    let chain = Chain::new(words, Some(&register), &context).unwrap();

    assert_eq!(chain.weights(), [100, 100, 100, 100, 100, 20]);
    assert_eq!(chain.operand_count(), 7);
    assert_eq!(chain.evaluate().unwrap().to_string(), "12");
}

#[test]
fn results_keep_their_words() {
    let context = DecimalContext::default();
    let result = chain("hex(255)", &context).evaluate().unwrap();

    assert_eq!(result.to_string(), "0xff");
    assert_eq!(result.value(), Some(&BigDecimal::from(255)));
    assert_eq!(result.span(), Some(Span::new(0, 8)));
}
