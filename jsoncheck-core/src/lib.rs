//! jsoncheck core
//!
//! Reads a text document that claims to be JSON and produces either a parse
//! tree or an ordered list of errors. Performs no I/O.
//!
//! # Architecture
//!
//! - **lexer.rs** - Finite-state tokenizer (no backtracking, no recovery)
//! - **cursor.rs** - One-token-lookahead reader over the token list
//! - **parser.rs** - Recursive-descent driver that builds the tree
//! - **validate.rs** - Semantic rules, invoked inline by the parser
//! - **tree.rs** - Tagged parse tree and its text dump
//! - **token.rs** / **span.rs** - Tokens and source positions
//!
//! # Example
//!
//! ```
//! use jsoncheck_core::{parse, ErrorKind};
//!
//! assert!(parse(r#"{"a": 1, "b": 2}"#).is_ok());
//!
//! let errors = parse(r#"{"a": 1, "a": 2}"#).unwrap_err();
//! assert_eq!(errors.kinds(), vec![ErrorKind::DuplicateKey]);
//! ```

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod span;
pub mod token;
pub mod tree;
pub mod validate;

pub use cursor::TokenCursor;
pub use error::{ErrorKind, Fault, ParseErrors, SemanticError};
pub use lexer::{tokenize, Halt, HaltReason, Lexer, Scanned};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::{parse, parse_with, Parser, Report};
pub use span::{Location, Span};
pub use token::{Token, TokenKind};
pub use tree::{Node, Pair, Repr};
pub use validate::{KeyOrigin, Validator};
