use logos::Logos;
use num_bigint::BigInt;

/// A single lexeme recognized at the parser cursor.
///
/// The parser never tokenizes the whole input up front. Each primitive
/// recognizer runs this lexer once on the remaining input and keeps the first
/// lexeme only if it is of the kind the grammar asks for. Longest match makes
/// `0x1f` a hexadecimal literal rather than `0` followed by garbage, and
/// `-2` a signed literal where a number is expected.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum Lexeme {
    /// Decimal literals such as `42`, `-2.5`, `+1E+2` or `2.5e-3`.
    #[regex(r"[-+]?[0-9]+(\.[0-9]+)?([eE][-+]?[0-9]+)?", normalize_decimal)]
    Decimal(String),
    /// Hexadecimal integer literals such as `0x1F`, carried as decimal digits.
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| radix_digits(lex.slice(), 16))]
    Hex(String),
    /// Octal integer literals such as `0o17`, carried as decimal digits.
    #[regex(r"0[oO][0-7]+", |lex| radix_digits(lex.slice(), 8))]
    Octal(String),
    /// `@a` or `@@`.
    #[regex(r"@[a-z@]", |lex| lex.slice().to_string())]
    Register(String),
    /// `@a_d`.
    #[regex(r"@[a-z]_[a-z]", |lex| lex.slice().to_string())]
    RegisterRange(String),
    /// Function names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

impl Lexeme {
    /// Lexes the first lexeme of `source`.
    ///
    /// Returns the lexeme and its length in bytes, or `None` if `source` is
    /// empty or does not start with a valid lexeme.
    ///
    /// ## Example
    /// ```
    /// use dailycalc::interpreter::lexer::Lexeme;
    ///
    /// assert_eq!(Lexeme::first("0x1f + 1"), Some((Lexeme::Hex("31".to_string()), 4)));
    /// assert_eq!(Lexeme::first("-2 * 3"), Some((Lexeme::Decimal("-2".to_string()), 2)));
    /// assert_eq!(Lexeme::first("#"), None);
    /// ```
    #[must_use]
    pub fn first(source: &str) -> Option<(Self, usize)> {
        let mut lexer = Self::lexer(source);
        match lexer.next() {
            Some(Ok(lexeme)) if lexer.span().start == 0 => Some((lexeme, lexer.span().end)),
            _ => None,
        }
    }

    /// Returns `true` for lexemes the `number` recognizer accepts.
    #[must_use]
    pub const fn is_operand(&self) -> bool {
        matches!(self,
                 Self::Decimal(_)
                 | Self::Hex(_)
                 | Self::Octal(_)
                 | Self::Register(_)
                 | Self::RegisterRange(_))
    }
}

/// Returns `true` if the lexeme ending right before `rest` ends on a word
/// boundary, i.e. it is not immediately followed by a letter, digit or `_`.
#[must_use]
pub fn at_word_boundary(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
}

/// Normalizes a decimal literal: lowercase, no leading `+`.
fn normalize_decimal(lex: &logos::Lexer<Lexeme>) -> String {
    let slice = lex.slice();
    slice.strip_prefix('+').unwrap_or(slice).to_lowercase()
}

/// Converts a `0x` / `0o` prefixed literal into its decimal digits.
///
/// # Returns
/// - `Some(String)`: The decimal digits of the value.
/// - `None`: If the digits are not valid in `radix`, which rejects the token.
fn radix_digits(slice: &str, radix: u32) -> Option<String> {
    let digits = slice.get(2..)?;
    BigInt::parse_bytes(digits.as_bytes(), radix).map(|value| value.to_string())
}
