//! Finite-state tokenizer.
//!
//! The lexer sits in `Start` between tokens and branches into a sub-scan on
//! the first character of each lexeme. Every sub-scan either emits exactly
//! one token and returns to `Start`, or moves to the terminal `Error` state.
//! There is no backtracking and no recovery: once scanning halts, the rest of
//! the input is dropped and the tokens emitted so far are the result.
//!
//! ```text
//!            ws / punct
//!            ┌────┐
//!            ▼    │
//!  ──────▶ Start ─┴──"──▶ String ──"──▶ Start
//!            │  ├──0-9 . + -──▶ Number ──▶ Start
//!            │  └──t f n──▶ Keyword ──match──▶ Start
//!            │                   └──mismatch──▶ Error
//!            └──other──▶ Error
//! ```
//!
//! Number scanning is deliberately permissive (`+1`, `007`, `.5`, `1.` all
//! lex); the semantic rules decide what is well formed.

use memchr::memchr2;
use phf::phf_map;
use thiserror::Error;
use tracing::{debug, trace};

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Reserved words, keyed by their lead byte.
static KEYWORDS: phf::Map<u8, (&'static str, TokenKind)> = phf_map! {
    b't' => ("true", TokenKind::True),
    b'f' => ("false", TokenKind::False),
    b'n' => ("null", TokenKind::Null),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    String,
    Number,
    /// Keyword scan, holding the lead byte.
    Keyword(u8),
    /// Input exhausted in `Start`.
    Done,
    /// Terminal. Nothing leaves this state.
    Error,
}

/// Why scanning stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HaltReason {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("malformed keyword")]
    BadKeyword,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
}

/// Where and why the lexer entered its error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt {
    /// Byte offset of the lexeme that could not be scanned.
    pub offset: usize,
    pub reason: HaltReason,
}

/// Result of a full scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanned<'a> {
    pub tokens: Vec<Token<'a>>,
    /// `None` when the whole input was consumed.
    pub halt: Option<Halt>,
}

/// Tokenize `input`, discarding the halt report.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).scan().tokens
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    state: State,
    tokens: Vec<Token<'a>>,
    halt: Option<Halt>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            state: State::Start,
            tokens: Vec::new(),
            halt: None,
        }
    }

    /// Run the state machine to completion.
    pub fn scan(mut self) -> Scanned<'a> {
        if self.input.is_empty() {
            self.tokens.push(Token::new(TokenKind::EmptyString, "", Span::default()));
            return self.finish();
        }

        loop {
            self.state = match self.state {
                State::Start => self.start(),
                State::String => self.string(),
                State::Number => self.number(),
                State::Keyword(lead) => self.keyword(lead),
                State::Done | State::Error => break,
            };
        }

        self.finish()
    }

    fn finish(self) -> Scanned<'a> {
        trace!(
            target: "jsoncheck::lexer",
            tokens = self.tokens.len(),
            halted = self.halt.is_some(),
            "scan complete"
        );
        Scanned {
            tokens: self.tokens,
            halt: self.halt,
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize, literal: &'a str) {
        self.tokens.push(Token::new(kind, literal, Span::new(start, end)));
    }

    fn fail(&mut self, reason: HaltReason) -> State {
        debug!(target: "jsoncheck::lexer", offset = self.pos, %reason, "scan halted");
        self.halt = Some(Halt {
            offset: self.pos,
            reason,
        });
        State::Error
    }

    fn start(&mut self) -> State {
        let Some(c) = self.peek() else {
            return State::Done;
        };

        if c.is_whitespace() {
            self.pos += c.len_utf8();
            return State::Start;
        }

        if let Some(kind) = TokenKind::punctuation(c) {
            let at = self.pos;
            self.emit(kind, at, at + 1, &self.input[at..at + 1]);
            self.pos += 1;
            return State::Start;
        }

        match c {
            '"' => State::String,
            '0'..='9' | '.' | '+' | '-' => State::Number,
            't' | 'f' | 'n' => State::Keyword(c as u8),
            other => self.fail(HaltReason::UnexpectedChar(other)),
        }
    }

    /// Scan to the closing quote. A backslash escapes the following byte.
    fn string(&mut self) -> State {
        let open = self.pos;
        let bytes = self.input.as_bytes();
        let mut at = open + 1;

        loop {
            let Some(rest) = bytes.get(at..) else {
                return self.fail(HaltReason::UnterminatedString);
            };
            match memchr2(b'"', b'\\', rest) {
                Some(i) if rest[i] == b'"' => {
                    let close = at + i;
                    self.emit(TokenKind::String, open, close + 1, &self.input[open + 1..close]);
                    self.pos = close + 1;
                    return State::Start;
                }
                Some(i) => at += i + 2,
                None => return self.fail(HaltReason::UnterminatedString),
            }
        }
    }

    /// `[+-]? .? (digit | one more '.')* ([eE] [+-]? digit*)?`
    fn number(&mut self) -> State {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        let mut at = start;

        if matches!(bytes.get(at), Some(b'+' | b'-')) {
            at += 1;
        }

        let mut seen_dot = false;
        if bytes.get(at) == Some(&b'.') {
            seen_dot = true;
            at += 1;
        }

        while let Some(&b) = bytes.get(at) {
            match b {
                b'0'..=b'9' => at += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    at += 1;
                }
                _ => break,
            }
        }

        if matches!(bytes.get(at), Some(b'e' | b'E')) {
            at += 1;
            if matches!(bytes.get(at), Some(b'+' | b'-')) {
                at += 1;
            }
            while matches!(bytes.get(at), Some(b'0'..=b'9')) {
                at += 1;
            }
        }

        self.emit(TokenKind::Number, start, at, &self.input[start..at]);
        self.pos = at;
        State::Start
    }

    fn keyword(&mut self, lead: u8) -> State {
        let Some(&(spelling, kind)) = KEYWORDS.get(&lead) else {
            return self.fail(HaltReason::UnexpectedChar(lead as char));
        };
        if !self.input[self.pos..].starts_with(spelling) {
            return self.fail(HaltReason::BadKeyword);
        }
        let start = self.pos;
        let end = start + spelling.len();
        self.emit(kind, start, end, &self.input[start..end]);
        self.pos = end;
        State::Start
    }
}
