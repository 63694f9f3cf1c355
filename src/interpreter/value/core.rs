use std::fmt;

use bigdecimal::BigDecimal;

use crate::interpreter::value::word::{Span, Word};

/// An operand of the evaluation chain.
///
/// A number either holds a decimal value or is a placeholder that keeps the
/// operand list aligned with the operator list (for example the slot in front
/// of a `(`). Placeholders never take part in arithmetic.
///
/// Every number remembers the words it was computed from, so a result can be
/// traced back to the part of the input that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    value:   Option<BigDecimal>,
    words:   Vec<Word>,
    display: Option<String>,
}

impl Number {
    /// Creates a number from a value and the words that produced it.
    #[must_use]
    pub const fn new(value: BigDecimal, words: Vec<Word>) -> Self {
        Self { value: Some(value),
               words,
               display: None }
    }

    /// Creates a placeholder number.
    #[must_use]
    pub const fn placeholder() -> Self {
        Self { value:   None,
               words:   Vec::new(),
               display: None, }
    }

    /// Attaches a rendering that replaces the decimal form on display.
    #[must_use]
    pub fn with_display(mut self, display: Option<String>) -> Self {
        self.display = display;
        self
    }

    /// Returns `true` if this number only holds a slot.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.value.is_none()
    }

    /// The decimal value, `None` for a placeholder.
    #[must_use]
    pub const fn value(&self) -> Option<&BigDecimal> {
        self.value.as_ref()
    }

    /// Consumes the number and returns its value.
    #[must_use]
    pub fn into_value(self) -> Option<BigDecimal> {
        self.value
    }

    /// The words this number was computed from, in input order.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Consumes the number and returns its words.
    #[must_use]
    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    /// The display override, if any (e.g. `0xff` for `hex(255)`).
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// The input range covered by the source words.
    ///
    /// Returns `None` for numbers without words (placeholders and values
    /// synthesized outside the input).
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        let first = self.words.first()?;
        let last = self.words.last()?;
        Some(Span::new(first.offset, last.end()))
    }

    /// The source text of this number, words joined without separators.
    ///
    /// ## Example
    /// ```
    /// use dailycalc::Calculator;
    ///
    /// let mut calculator = Calculator::default();
    /// let result = calculator.evaluate("1 + (2 * 3)", None).unwrap();
    /// assert_eq!(result.source_text(), "1+(2*3)");
    /// ```
    #[must_use]
    pub fn source_text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.display, &self.value) {
            (Some(display), _) if !display.trim().is_empty() => write!(f, "{display}"),
            (_, Some(value)) => write!(f, "{value}"),
            (_, None) => write!(f, "_"),
        }
    }
}

impl From<BigDecimal> for Number {
    fn from(value: BigDecimal) -> Self {
        Self::new(value, Vec::new())
    }
}
