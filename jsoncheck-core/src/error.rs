//! Diagnostics produced while parsing.
//!
//! Two tiers live here. [`SemanticError`] is the accumulating, non-fatal
//! finding that ends up in the caller's error list. [`Fault`] is an internal
//! failure that aborts the descent; the driver turns it into an
//! [`ErrorKind::Internal`] entry.

use std::fmt;

use thiserror::Error;

/// Category of a semantic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Type 1: a decimal point without digits on both sides.
    MalformedDecimal,
    /// Type 2: a key that is empty after trimming.
    EmptyKey,
    /// Type 3: leading zero or leading `+`.
    NumberFormat,
    /// Type 4: `true`/`false`/`null` used as a key.
    ReservedKey,
    /// Type 5: key already seen in the same object.
    DuplicateKey,
    /// Type 6: list elements with different representations.
    MixedListTypes,
    /// Type 7: a quoted string spelling a reserved word.
    ReservedString,
    /// A required token was absent.
    UnexpectedToken,
    /// Tokens left over after the top-level structure.
    TrailingTokens,
    /// An internal fault aborted parsing.
    Internal,
}

impl ErrorKind {
    /// Rule number for the seven semantic categories.
    pub fn category(self) -> Option<u8> {
        match self {
            Self::MalformedDecimal => Some(1),
            Self::EmptyKey => Some(2),
            Self::NumberFormat => Some(3),
            Self::ReservedKey => Some(4),
            Self::DuplicateKey => Some(5),
            Self::MixedListTypes => Some(6),
            Self::ReservedString => Some(7),
            Self::UnexpectedToken | Self::TrailingTokens | Self::Internal => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MalformedDecimal => "malformed-decimal",
            Self::EmptyKey => "empty-key",
            Self::NumberFormat => "number-format",
            Self::ReservedKey => "reserved-key",
            Self::DuplicateKey => "duplicate-key",
            Self::MixedListTypes => "mixed-list-types",
            Self::ReservedString => "reserved-string",
            Self::UnexpectedToken => "unexpected-token",
            Self::TrailingTokens => "trailing-tokens",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded finding. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SemanticError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SemanticError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The non-empty, ordered error list returned when a parse fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(Vec<SemanticError>);

impl ParseErrors {
    /// Wrap an error list. Returns `None` for an empty list.
    pub fn new(errors: Vec<SemanticError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn single(error: SemanticError) -> Self {
        Self(vec![error])
    }

    pub fn as_slice(&self) -> &[SemanticError] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SemanticError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Kinds in detection order.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.0.iter().map(|e| e.kind).collect()
    }

    /// Number of errors of a given kind.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.0.iter().filter(|e| e.kind == kind).count()
    }

    pub fn into_vec(self) -> Vec<SemanticError> {
        self.0
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

impl<'e> IntoIterator for &'e ParseErrors {
    type Item = &'e SemanticError;
    type IntoIter = std::slice::Iter<'e, SemanticError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Internal failure that stops the descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("Nesting depth limit of {limit} exceeded")]
    DepthLimit { limit: usize },
}
