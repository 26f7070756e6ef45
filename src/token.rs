//! Tokenizer
//!
//! Splits text into a lossless sequence of tokens. Every token is a borrowed
//! slice of the input and belongs to exactly one class:
//!
//! | Kind         | Shape                                              |
//! |--------------|----------------------------------------------------|
//! | `Word`       | maximal run of letters (`L*`), numbers (`N*`) and connectors (`Pc`) |
//! | `Whitespace` | maximal run of whitespace                          |
//! | `Symbol`     | exactly one other character                        |
//!
//! Word characters are decided by Unicode general category. Combining marks
//! (`M*`) are not word characters, so every vowel sign or accent stands alone
//! as a symbol, whether it is spacing (`Mc`) or not (`Mn`).
//!
//! Concatenating the tokens in order always reproduces the input.

use std::fmt;

use unicode_general_category::{get_general_category, GeneralCategory};

// =============================================================================
// TokenKind
// =============================================================================

/// Character class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Letters, numbers and connector punctuation, by general category.
    Word,
    /// Any whitespace, including newlines.
    Whitespace,
    /// A single character that is neither word nor whitespace.
    Symbol,
}

impl TokenKind {
    /// Classify a single character.
    #[inline]
    pub fn of(c: char) -> Self {
        if is_word_char(c) {
            Self::Word
        } else if c.is_whitespace() {
            Self::Whitespace
        } else {
            Self::Symbol
        }
    }

    /// Whether consecutive characters of this kind merge into one token.
    #[inline]
    fn is_run(self) -> bool {
        !matches!(self, Self::Symbol)
    }
}

/// Word characters: general categories `L*`, `N*` and `Pc`.
#[inline]
fn is_word_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '_';
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
            | GeneralCategory::ConnectorPunctuation
    )
}

// =============================================================================
// Token
// =============================================================================

/// A slice of the original text with its character class.
///
/// Equality compares the text only; two tokens with equal text always have
/// the same kind.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
}

impl<'a> Token<'a> {
    /// Create a token, classifying it by its first character.
    ///
    /// Intended for tests and hand-built sequences; `tokenize` is the normal
    /// way to obtain tokens.
    pub fn new(text: &'a str) -> Self {
        let kind = text.chars().next().map_or(TokenKind::Symbol, TokenKind::of);
        Self { kind, text }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    pub fn is_symbol(&self) -> bool {
        self.kind == TokenKind::Symbol
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl std::hash::Hash for Token<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Ordered tokens of one document side.
pub type TokenSequence<'a> = Vec<Token<'a>>;

// =============================================================================
// Tokenize
// =============================================================================

/// Split `text` into tokens.
///
/// Greedy left-to-right scan: a word or whitespace run is consumed to its end,
/// any other character becomes a one-character symbol token.
pub fn tokenize(text: &str) -> TokenSequence<'_> {
    let mut tokens = Vec::with_capacity(text.len() / 3 + 1);
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let kind = TokenKind::of(c);
        let mut end = start + c.len_utf8();

        if kind.is_run() {
            while let Some(&(idx, next)) = chars.peek() {
                if TokenKind::of(next) != kind {
                    break;
                }
                end = idx + next.len_utf8();
                chars.next();
            }
        }

        tokens.push(Token { kind, text: &text[start..end] });
    }

    tokens
}

/// Tokenize both sides of a comparison.
///
/// With the `parallel` feature the two sides are tokenized concurrently.
/// The result is identical either way.
#[cfg(feature = "parallel")]
pub fn tokenize_pair<'a, 'b>(a: &'a str, b: &'b str) -> (TokenSequence<'a>, TokenSequence<'b>) {
    rayon::join(|| tokenize(a), || tokenize(b))
}

/// Tokenize both sides of a comparison.
#[cfg(not(feature = "parallel"))]
pub fn tokenize_pair<'a, 'b>(a: &'a str, b: &'b str) -> (TokenSequence<'a>, TokenSequence<'b>) {
    (tokenize(a), tokenize(b))
}

/// Concatenate token texts back into a string.
pub fn concat<'t, 'a: 't, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'t Token<'a>>,
{
    tokens.into_iter().map(|t| t.text).collect()
}

// =============================================================================
// Tests
// =============================================================================
