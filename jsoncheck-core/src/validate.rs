//! Semantic rules applied while the parser builds the tree.
//!
//! The parser calls into the [`Validator`] at fixed points: once per number,
//! once per string value, once per object key and once per finished list.
//! Findings accumulate in order; none of them stop the parse.
//!
//! Duplicate keys are tracked with one key set per open object. Entering a
//! nested object pushes a fresh set and leaving it pops, so a key is only
//! ever compared with its direct siblings.

use std::collections::{BTreeSet, HashSet};

use phf::phf_set;
use tracing::debug;

use crate::error::{ErrorKind, SemanticError};
use crate::tree::{Node, Repr};

static RESERVED_WORDS: phf::Set<&'static str> = phf_set! {
    "true",
    "false",
    "null",
};

/// How a key was spelled in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    /// A quoted string.
    Quoted,
    /// A bare `true`/`false`/`null` token.
    Reserved,
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<SemanticError>,
    scopes: Vec<HashSet<String>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding.
    pub fn record(&mut self, kind: ErrorKind, message: impl Into<String>) {
        let error = SemanticError::new(kind, message);
        debug!(target: "jsoncheck::parser", kind = %kind, message = %error.message, "semantic error");
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<SemanticError> {
        self.errors
    }

    /// Open a key scope for a new object.
    pub fn enter_object(&mut self) {
        self.scopes.push(HashSet::new());
    }

    /// Close the innermost key scope.
    pub fn leave_object(&mut self) {
        self.scopes.pop();
    }

    /// Number of open key scopes.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Types 1 and 3.
    pub fn check_number(&mut self, literal: &str) {
        if literal.contains('.') {
            let mut parts = literal.split('.');
            let well_formed = matches!(
                (parts.next(), parts.next(), parts.next()),
                (Some(int), Some(frac), None) if !int.is_empty() && !frac.is_empty()
            );
            if !well_formed {
                self.record(
                    ErrorKind::MalformedDecimal,
                    format!("Type 1: Invalid Decimal Number: {}", literal),
                );
            }
        }

        let bytes = literal.as_bytes();
        if bytes.first() == Some(&b'0') && bytes.get(1).is_some_and(u8::is_ascii_digit) {
            self.record(
                ErrorKind::NumberFormat,
                format!("Type 3: Invalid Number with leading zeros: {}", literal),
            );
        }
        if literal.starts_with('+') {
            self.record(
                ErrorKind::NumberFormat,
                format!("Type 3: Invalid Number with leading '+': {}", literal),
            );
        }
    }

    /// Type 7. Only quoted strings reach this check; bare keywords lex as
    /// their own token kinds.
    pub fn check_string(&mut self, literal: &str) {
        if RESERVED_WORDS.contains(literal) {
            self.record(
                ErrorKind::ReservedString,
                format!("Type 7: Reserved word used as string: {}", literal),
            );
        }
    }

    /// Types 2, 4 and 5, first match wins. The trimmed key joins the
    /// current scope whether or not it was flagged.
    pub fn check_key(&mut self, key: &str, origin: KeyOrigin) {
        let key = key.trim();
        let seen = self
            .scopes
            .last()
            .is_some_and(|scope| scope.contains(key));

        if key.is_empty() {
            self.record(ErrorKind::EmptyKey, "Type 2: Empty key in dictionary");
        } else if origin == KeyOrigin::Reserved && RESERVED_WORDS.contains(key) {
            self.record(
                ErrorKind::ReservedKey,
                format!("Type 4: Reserved word used as dictionary key: {}", key),
            );
        } else if seen {
            self.record(
                ErrorKind::DuplicateKey,
                format!("Type 5: Duplicate dictionary key: {}", key),
            );
        }

        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(key.to_owned());
        }
    }

    /// Type 6, over a list's direct elements.
    pub fn check_list(&mut self, items: &[Node]) {
        let reprs: BTreeSet<Repr> = items.iter().map(Node::repr).collect();
        if reprs.len() > 1 {
            self.record(ErrorKind::MixedListTypes, "Type 6: Inconsistent types in list");
        }
    }
}
