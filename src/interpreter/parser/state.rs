use crate::interpreter::{
    diagnostic::{Continuation, DiagnosticLog, Expected},
    value::word::{Span, Word, WordKind},
};

/// Mutable scanning state threaded through every recognizer.
///
/// The state owns the cursor and the words matched so far and borrows the
/// caller's diagnostic log. Nothing about a parse lives outside this value, so
/// independent parses never interfere.
pub struct ParserState<'a> {
    source: &'a str,
    cursor: usize,
    words:  Vec<Word>,
    log:    &'a mut DiagnosticLog,
}

/// A restorable position: the cursor and the number of matched words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    cursor: usize,
    words:  usize,
}

impl<'a> ParserState<'a> {
    /// Creates a state positioned at the start of `source`.
    pub fn new(source: &'a str, log: &'a mut DiagnosticLog) -> Self {
        Self { source,
               cursor: 0,
               words: Vec::new(),
               log }
    }

    /// The current byte offset.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The unconsumed input.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        self.source.get(self.cursor..).unwrap_or_default()
    }

    /// The words matched so far, virtual words included.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Consumes the state and returns the matched words.
    #[must_use]
    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    /// Captures the current position.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { cursor: self.cursor,
                   words:  self.words.len(), }
    }

    /// Rolls back to a previously captured position.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.cursor = snapshot.cursor;
        self.words.truncate(snapshot.words);
    }

    /// Advances the cursor over whitespace.
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.cursor += rest.len() - trimmed.len();
    }

    /// Moves the cursor forward by `len` bytes.
    pub fn advance(&mut self, len: usize) {
        self.cursor = (self.cursor + len).min(self.source.len());
    }

    /// Appends a matched word.
    pub fn push(&mut self, word: Word) {
        self.words.push(word);
    }

    /// Appends a placeholder word at the cursor.
    pub fn push_placeholder(&mut self) {
        self.words.push(Word::placeholder(self.cursor));
    }

    /// What the last real word calls for next.
    #[must_use]
    pub fn trailing(&self) -> Continuation {
        match self.words.iter().rev().find(|w| !w.is_virtual()) {
            Some(word) if matches!(word.kind,
                                   WordKind::Number
                                   | WordKind::Register
                                   | WordKind::RegisterRange
                                   | WordKind::RightParen) =>
            {
                Continuation::Operator
            },
            _ => Continuation::Operand,
        }
    }

    /// Records that `expected` was not found at the cursor.
    pub fn expect(&mut self, expected: Expected, forced: bool) {
        let trailing = self.trailing();
        self.log.expect(expected, self.cursor, trailing, forced);
    }

    /// Records a free-form diagnostic.
    pub fn report(&mut self, message: impl Into<String>, span: Span, forced: bool) {
        self.log.add(message, span, forced);
    }
}
