//! Recursive-descent parser and tree builder.
//!
//! ```text
//! Document := Dict | List
//! Dict     := '{' (Pair (',' Pair)*)? '}'
//! Pair     := (String | true | false | null) ':' Value
//! List     := '[' (Value (',' Value)*)? ']'
//! Value    := String | Number | Null | Boolean | List | Dict
//! ```
//!
//! The whole token list is produced before parsing starts. Each routine
//! builds its part of the tree and calls the [`Validator`] inline. A
//! required token that is absent is recorded as an error and left
//! unconsumed; the enclosing loop decides whether to carry on.
//!
//! Success is decided by the error list alone: a structurally complete tree
//! is still withheld when any error was recorded.

use tracing::debug;

use crate::cursor::TokenCursor;
use crate::error::{ErrorKind, Fault, ParseErrors, SemanticError};
use crate::lexer::Lexer;
use crate::options::ParseOptions;
use crate::token::{Token, TokenKind};
use crate::tree::{Node, Pair};
use crate::validate::{KeyOrigin, Validator};

/// Parse `input` with default options.
pub fn parse(input: &str) -> Result<Node, ParseErrors> {
    Parser::new(input).parse()
}

/// Parse `input` with the given options.
pub fn parse_with(input: &str, options: ParseOptions) -> Result<Node, ParseErrors> {
    Parser::with_options(input, options).parse()
}

/// Everything a finished parse knows.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    /// Present only when `errors` is empty.
    pub tree: Option<Node>,
    pub errors: Vec<SemanticError>,
    /// Tokens the parser never consumed.
    pub unconsumed: Vec<Token<'a>>,
}

/// What followed an element inside a dict or list.
///
/// A missing comma ends the element loop on the spot: whatever follows is
/// abandoned rather than parsed, and is then reported by the closing-bracket
/// check and the trailing-token check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    Comma,
    Missing,
}

pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    validator: Validator,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        let scanned = Lexer::new(input).scan();
        Self::from_tokens(scanned.tokens, options)
    }

    pub fn from_tokens(tokens: Vec<Token<'a>>, options: ParseOptions) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            validator: Validator::new(),
            options,
            depth: 0,
        }
    }

    /// Parse the document, returning the tree or the ordered error list.
    pub fn parse(self) -> Result<Node, ParseErrors> {
        let report = self.run();
        match (report.tree, ParseErrors::new(report.errors)) {
            (_, Some(errors)) => Err(errors),
            (Some(tree), None) => Ok(tree),
            (None, None) => Err(ParseErrors::single(SemanticError::new(
                ErrorKind::Internal,
                "No document structure was produced",
            ))),
        }
    }

    /// Parse the document and keep the diagnostics.
    pub fn run(mut self) -> Report<'a> {
        debug!(
            target: "jsoncheck::parser",
            tokens = self.cursor.remaining().len(),
            max_depth = self.options.max_depth,
            "parse start"
        );

        let tree = match self.document() {
            Ok(tree) => tree,
            Err(fault) => {
                self.validator.record(ErrorKind::Internal, fault.to_string());
                None
            }
        };

        let unconsumed = self.cursor.remaining().to_vec();
        let errors = self.validator.into_errors();
        debug!(
            target: "jsoncheck::parser",
            errors = errors.len(),
            unconsumed = unconsumed.len(),
            "parse finished"
        );

        Report {
            tree: if errors.is_empty() { tree } else { None },
            errors,
            unconsumed,
        }
    }

    fn document(&mut self) -> Result<Option<Node>, Fault> {
        let tree = match self.cursor.current().map(|t| t.kind) {
            Some(TokenKind::CurlyOpen) => self.object()?,
            Some(TokenKind::SquareOpen) => self.array()?,
            _ => {
                self.unexpected("CurlyOpen or SquareOpen");
                return Ok(None);
            }
        };

        if !self.cursor.is_exhausted() {
            self.validator.record(
                ErrorKind::TrailingTokens,
                "Parsing Error: Unexpected tokens at the end.",
            );
        }
        Ok(Some(tree))
    }

    // ---- Consumption ----

    /// Consume a token of the given kind, or record an error and stay put.
    fn eat(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        let token = self.cursor.advance_if(kind);
        if token.is_none() {
            self.unexpected(kind.name());
        }
        token
    }

    fn unexpected(&mut self, expected: &str) {
        let found = self
            .cursor
            .current()
            .map_or_else(|| "end of input".to_owned(), Token::to_string);
        self.validator.record(
            ErrorKind::UnexpectedToken,
            format!("Unexpected token: {}, expected {}", found, expected),
        );
    }

    fn separator(&mut self) -> Separator {
        match self.cursor.advance_if(TokenKind::Comma) {
            Some(_) => Separator::Comma,
            None => Separator::Missing,
        }
    }

    fn at_close(&self, close: TokenKind) -> bool {
        self.cursor.current().map_or(true, |t| t.is(close))
    }

    // ---- Nesting ----

    fn descend(&mut self) -> Result<(), Fault> {
        if self.depth >= self.options.max_depth {
            return Err(Fault::DepthLimit {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    // ---- Grammar ----

    fn object(&mut self) -> Result<Node, Fault> {
        self.descend()?;
        self.eat(TokenKind::CurlyOpen);
        self.validator.enter_object();

        let mut pairs = Vec::new();
        while !self.at_close(TokenKind::CurlyClose) {
            if let Some(pair) = self.pair()? {
                pairs.push(pair);
            }
            if self.separator() == Separator::Missing {
                break;
            }
        }

        self.validator.leave_object();
        self.eat(TokenKind::CurlyClose);
        self.ascend();
        Ok(Node::Object(pairs))
    }

    fn pair(&mut self) -> Result<Option<Pair>, Fault> {
        let Some(key) = self.cursor.current().copied() else {
            self.unexpected("dictionary key");
            return Ok(None);
        };

        let origin = match key.kind {
            TokenKind::String => {
                self.validator.check_string(key.literal);
                KeyOrigin::Quoted
            }
            kind if kind.is_reserved_word() => KeyOrigin::Reserved,
            _ => {
                self.unexpected("dictionary key");
                return Ok(None);
            }
        };
        self.cursor.advance();
        self.validator.check_key(key.literal, origin);

        self.eat(TokenKind::Colon);
        match self.value()? {
            Some(value) => Ok(Some(Pair::new(key.literal, value))),
            None => {
                self.unexpected("value");
                Ok(None)
            }
        }
    }

    fn array(&mut self) -> Result<Node, Fault> {
        self.descend()?;
        self.eat(TokenKind::SquareOpen);

        let mut items = Vec::new();
        while !self.at_close(TokenKind::SquareClose) {
            match self.value()? {
                Some(item) => items.push(item),
                None => self.unexpected("value"),
            }
            if self.separator() == Separator::Missing {
                break;
            }
        }

        self.validator.check_list(&items);
        self.eat(TokenKind::SquareClose);
        self.ascend();
        Ok(Node::Array(items))
    }

    /// Parse one value, or return `None` without consuming anything.
    fn value(&mut self) -> Result<Option<Node>, Fault> {
        let Some(token) = self.cursor.current().copied() else {
            return Ok(None);
        };

        let node = match token.kind {
            TokenKind::String => {
                self.cursor.advance();
                self.validator.check_string(token.literal);
                Node::StringLit(token.literal.to_owned())
            }
            TokenKind::Number => {
                self.cursor.advance();
                self.validator.check_number(token.literal);
                Node::NumberLit(token.literal.to_owned())
            }
            TokenKind::Null => {
                self.cursor.advance();
                Node::NullLit
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                Node::BoolLit(token.kind == TokenKind::True)
            }
            TokenKind::SquareOpen => self.array()?,
            TokenKind::CurlyOpen => self.object()?,
            _ => return Ok(None),
        };
        Ok(Some(node))
    }
}
