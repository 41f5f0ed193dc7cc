//! Tokens - the output of the lexer and the input of the parser.
//!
//! A token is a kind plus the literal it was scanned from. Strings carry the
//! text between the quotes (no escape decoding), numbers carry the matched
//! span verbatim, keywords carry their fixed spelling and punctuation carries
//! nothing.

use std::fmt;

use crate::span::Span;

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    CurlyOpen,
    CurlyClose,
    SquareOpen,
    SquareClose,
    Colon,
    Comma,
    String,
    Number,
    True,
    False,
    Null,
    /// Sentinel for an empty input buffer.
    EmptyString,
}

impl TokenKind {
    /// Stable name used in token dumps and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::CurlyOpen => "CurlyOpen",
            Self::CurlyClose => "CurlyClose",
            Self::SquareOpen => "SquareOpen",
            Self::SquareClose => "SquareClose",
            Self::Colon => "Colon",
            Self::Comma => "Comma",
            Self::String => "String",
            Self::Number => "Number",
            Self::True => "True",
            Self::False => "False",
            Self::Null => "Null",
            Self::EmptyString => "EmptyString",
        }
    }

    /// Punctuation kinds for a single structural character.
    pub fn punctuation(c: char) -> Option<Self> {
        match c {
            '{' => Some(Self::CurlyOpen),
            '}' => Some(Self::CurlyClose),
            '[' => Some(Self::SquareOpen),
            ']' => Some(Self::SquareClose),
            ':' => Some(Self::Colon),
            ',' => Some(Self::Comma),
            _ => None,
        }
    }

    /// True for the `true`/`false`/`null` keyword kinds.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        matches!(self, Self::True | Self::False | Self::Null)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token.
///
/// The lifetime `'a` refers to the source text - literals are zero-copy
/// slices into the original input (or static keyword spellings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub literal: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, literal: &'a str, span: Span) -> Self {
        Self { kind, literal, span }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number | TokenKind::True | TokenKind::False | TokenKind::Null => {
                write!(f, "token({}, {})", self.kind, self.literal)
            }
            _ => write!(f, "token({}, '{}')", self.kind, self.literal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_dump_format() {
        let brace = Token::new(TokenKind::CurlyOpen, "{", Span::new(0, 1));
        let string = Token::new(TokenKind::String, "name", Span::new(1, 7));
        let number = Token::new(TokenKind::Number, "-1.5e3", Span::new(8, 14));
        let null = Token::new(TokenKind::Null, "null", Span::new(15, 19));
        let empty = Token::new(TokenKind::EmptyString, "", Span::default());

        assert_eq!(brace.to_string(), "token(CurlyOpen, '{')");
        assert_eq!(string.to_string(), "token(String, 'name')");
        assert_eq!(number.to_string(), "token(Number, -1.5e3)");
        assert_eq!(null.to_string(), "token(Null, null)");
        assert_eq!(empty.to_string(), "token(EmptyString, '')");
    }

    #[test]
    fn test_punctuation_lookup() {
        assert_eq!(TokenKind::punctuation('{'), Some(TokenKind::CurlyOpen));
        assert_eq!(TokenKind::punctuation(','), Some(TokenKind::Comma));
        assert_eq!(TokenKind::punctuation('"'), None);
    }

    #[test]
    fn test_reserved_words() {
        assert!(TokenKind::True.is_reserved_word());
        assert!(TokenKind::Null.is_reserved_word());
        assert!(!TokenKind::String.is_reserved_word());
    }
}
