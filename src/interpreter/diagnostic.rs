use std::{collections::BTreeMap, fmt};

use crate::interpreter::value::word::Span;

/// What kind of token the grammar is ready for after the last real token.
///
/// After a number or `)` the input must continue with an operator-class token
/// (operator, `)` or `,`); at the start and after an operator, `(` or `,` it
/// must continue with an operand-class token (number, `(` or a function).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continuation {
    /// A value is expected next.
    Operand,
    /// Something that follows a value is expected next.
    Operator,
}

/// The token a recognizer was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    /// A literal or register reference.
    Number,
    /// One of `+ - * / ^`.
    Operator,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// A builtin function name.
    Function,
}

impl Expected {
    /// The continuation class this expectation belongs to.
    #[must_use]
    pub const fn continuation(self) -> Continuation {
        match self {
            Self::Number | Self::LeftParen | Self::Function => Continuation::Operand,
            Self::Operator | Self::RightParen | Self::Comma => Continuation::Operator,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::Operator => write!(f, "operator"),
            Self::LeftParen => write!(f, "'('"),
            Self::RightParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
            Self::Function => write!(f, "function name"),
        }
    }
}

/// One recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human readable text, e.g. `expecting number`.
    pub message: String,
    /// The offending input range. Empty spans mark a single position.
    pub span:    Span,
    class:       Option<Continuation>,
    forced:      bool,
}

/// Collects the best diagnostic for each input position.
///
/// Backtracking tries many grammar alternatives at the same offset, and each
/// failing recognizer reports what it expected there. The log keeps one entry
/// per offset:
///
/// - a plain [`add`](Self::add) never overwrites an existing entry unless it
///   is forced;
/// - an [`expect`](Self::expect) replaces an unforced entry only when it fits
///   what the preceding token calls for and the existing entry does not;
/// - forced writes always win.
///
/// The entry with the greatest offset marks how far parsing got and is the
/// one reported.
///
/// ## Example
/// ```
/// use dailycalc::interpreter::{
///     diagnostic::{Continuation, DiagnosticLog, Expected},
///     value::word::Span,
/// };
///
/// let mut log = DiagnosticLog::new();
/// log.expect(Expected::Operator, 2, Continuation::Operand, false);
/// log.expect(Expected::Number, 2, Continuation::Operand, false);
/// assert_eq!(log.latest().unwrap().message, "expecting number");
///
/// log.add("unknown function 'foo'", Span::new(2, 5), true);
/// assert_eq!(log.latest().unwrap().message, "unknown function 'foo'");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: BTreeMap<usize, Diagnostic>,
}

impl DiagnosticLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` at `span.start`.
    ///
    /// An unforced message is dropped if the position already has an entry.
    pub fn add(&mut self, message: impl Into<String>, span: Span, forced: bool) {
        if !forced && self.entries.contains_key(&span.start) {
            return;
        }

        self.entries.insert(span.start,
                            Diagnostic { message: message.into(),
                                         span,
                                         class: None,
                                         forced });
    }

    /// Records that `expected` was not found at `at`.
    ///
    /// `trailing` is the continuation class called for by the last real token
    /// before `at`.
    pub fn expect(&mut self, expected: Expected, at: usize, trailing: Continuation, forced: bool) {
        let class = expected.continuation();

        let replace = match self.entries.get(&at) {
            None => true,
            Some(_) if forced => true,
            Some(existing) if existing.forced => false,
            Some(existing) => existing.class != Some(trailing) && class == trailing,
        };

        if replace {
            self.entries.insert(at,
                                Diagnostic { message: format!("expecting {expected}"),
                                             span: Span::point(at),
                                             class: Some(class),
                                             forced });
        }
    }

    /// The entry at the greatest offset.
    #[must_use]
    pub fn latest(&self) -> Option<&Diagnostic> {
        self.entries.last_key_value().map(|(_, d)| d)
    }

    /// The entry recorded at `at`, if any.
    #[must_use]
    pub fn get(&self, at: usize) -> Option<&Diagnostic> {
        self.entries.get(&at)
    }

    /// Number of positions with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Renders the latest entry as a three line report.
    ///
    /// ```text
    ///   Input: 2/0
    ///          --^----
    ///   Error: cannot divide by zero
    /// ```
    #[must_use]
    pub fn message(&self, input: &str) -> String {
        let Some(latest) = self.latest() else {
            return format!("  Input: {input}\n  Error: no diagnostic recorded");
        };

        let width = input.chars().count() + 4;
        let mut marker = vec!['-'; width];

        let start = column(input, latest.span.start).min(width - 1);
        let end = column(input, latest.span.end).min(width);
        if end > start {
            marker[start..end].fill('^');
        } else {
            marker[start] = '^';
        }

        let marker: String = marker.into_iter().collect();
        format!("  Input: {input}\n         {marker}\n  Error: {}", latest.message)
    }
}

/// Converts a byte offset into a character column.
fn column(input: &str, offset: usize) -> usize {
    input.char_indices().take_while(|(i, _)| *i < offset).count()
}
