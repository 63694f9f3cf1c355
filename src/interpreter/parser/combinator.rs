use tracing::trace;

use crate::interpreter::parser::state::ParserState;

/// A grammar rule.
///
/// A rule either matches, pushing its words onto the state and advancing the
/// cursor, or fails and returns `false`. Failing rules may leave the cursor
/// past skipped whitespace but never leave words behind; combinators restore
/// snapshots to keep that discipline for composed rules.
pub type Rule = fn(&mut ParserState<'_>) -> bool;

/// Matches every rule in order, or nothing at all.
///
/// Grammar: `rule_1 rule_2 ... rule_n`
///
/// On the first failing rule the state is restored to where the sequence
/// started, so a partial match never leaks out.
pub fn sequence(state: &mut ParserState<'_>, rules: &[Rule]) -> bool {
    let snapshot = state.snapshot();

    for rule in rules {
        if !rule(state) {
            state.restore(snapshot);
            return false;
        }
    }

    true
}

/// Matches the first rule that succeeds.
///
/// Grammar: `rule_1 | rule_2 | ... | rule_n`
///
/// Each failed attempt is rolled back before the next one is tried.
pub fn alternative(state: &mut ParserState<'_>, rules: &[Rule]) -> bool {
    let snapshot = state.snapshot();

    for rule in rules {
        if rule(state) {
            return true;
        }
        state.restore(snapshot);
    }

    false
}

/// Matches a prefix of the rules.
///
/// Grammar: `rule_1 [ rule_2 [ ... [ rule_n ] ] ]`
///
/// Stops at the first failing rule and keeps everything matched before it.
/// Succeeds if at least the first rule matched.
pub fn optional_sequence(state: &mut ParserState<'_>, rules: &[Rule]) -> bool {
    let mut matched = false;

    for rule in rules {
        let snapshot = state.snapshot();
        if !rule(state) {
            state.restore(snapshot);
            break;
        }
        matched = true;
    }

    matched
}

/// Matches `rule` as often as possible.
///
/// Grammar: `rule*`, or `rule+` when `at_least_once` is set.
///
/// Every successful match is committed. With zero matches a `rule*` still
/// succeeds and leaves a placeholder word, so enclosing sequences see a
/// match; placeholders are stripped from the final token stream.
pub fn repetition(state: &mut ParserState<'_>, rule: Rule, at_least_once: bool) -> bool {
    let mut count = 0usize;

    loop {
        let snapshot = state.snapshot();
        let before = state.cursor();
        if !rule(state) {
            state.restore(snapshot);
            break;
        }
        count += 1;
        // a match that consumed nothing would repeat forever
        if state.cursor() == before {
            break;
        }
    }

    trace!(count, at = state.cursor(), "repetition");

    if count == 0 {
        if at_least_once {
            return false;
        }
        state.push_placeholder();
    }

    true
}
