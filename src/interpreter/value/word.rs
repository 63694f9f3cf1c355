use std::fmt;

/// A half-open byte range `[start, end)` in the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end:   usize,
}

impl Span {
    /// Creates a span covering `[start, end)`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates an empty span sitting at `at`.
    #[must_use]
    pub const fn point(at: usize) -> Self {
        Self { start: at,
               end:   at, }
    }

    /// Returns `true` if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The lexical class of a [`Word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordKind {
    /// Decimal, hexadecimal or octal literal.
    Number,
    /// One of `+ - * / ^`.
    Operator,
    /// Name of a builtin function.
    FunctionName,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `@a` or `@@`.
    Register,
    /// `@a_d`.
    RegisterRange,
    /// Synthesized by a repetition that matched nothing.
    Placeholder,
    /// The optional `,` before a closing parenthesis of a call.
    TrailingComma,
}

impl WordKind {
    /// Virtual kinds only exist while parsing and never reach the evaluator.
    #[must_use]
    pub const fn is_virtual(self) -> bool {
        matches!(self, Self::Placeholder | Self::TrailingComma)
    }
}

impl fmt::Display for WordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::Operator => "operator",
            Self::FunctionName => "function",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Comma => "','",
            Self::Register => "register",
            Self::RegisterRange => "register range",
            Self::Placeholder => "placeholder",
            Self::TrailingComma => "trailing comma",
        };
        write!(f, "{name}")
    }
}

/// A classified, positioned lexical unit of the input.
///
/// `text` is exactly what appeared in the input, `value` is its normalized
/// form: hexadecimal and octal literals carry their decimal digits, decimal
/// literals are lowercased and lose a leading `+`, registers are lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// The raw text as it appeared in the input.
    pub text:   String,
    /// The normalized value.
    pub value:  String,
    /// The lexical class.
    pub kind:   WordKind,
    /// Byte offset of `text` in the input.
    pub offset: usize,
}

impl Word {
    /// Creates a word whose value is its raw text.
    #[must_use]
    pub fn new(text: &str, kind: WordKind, offset: usize) -> Self {
        Self { text: text.to_string(),
               value: text.to_string(),
               kind,
               offset }
    }

    /// Creates a word with a separately normalized value.
    #[must_use]
    pub fn with_value(text: &str, value: String, kind: WordKind, offset: usize) -> Self {
        Self { text: text.to_string(),
               value,
               kind,
               offset }
    }

    /// A placeholder word standing in for an empty repetition.
    #[must_use]
    pub fn placeholder(offset: usize) -> Self {
        Self { text: String::new(),
               value: String::new(),
               kind: WordKind::Placeholder,
               offset }
    }

    /// Offset one past the last byte of the word.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// The input range covered by the word.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.offset, self.end())
    }

    /// See [`WordKind::is_virtual`].
    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        self.kind.is_virtual()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
