//! Parse tree for JSON documents.
//!
//! Each node owns its children by value, in source order. Scalar literals
//! keep the exact text they were scanned from: numbers are not normalized
//! and strings are not unescaped.
//!
//! # Example
//!
//! ```
//! use jsoncheck_core::parse;
//!
//! let tree = parse(r#"{"name": "jsoncheck", "tags": [1, 2]}"#).unwrap();
//! assert_eq!(tree.get("name").and_then(|n| n.as_str()), Some("jsoncheck"));
//! assert_eq!(tree.get("tags").and_then(|n| n.as_array()).map(|a| a.len()), Some(2));
//! ```

use std::fmt;

// ============================================================================
// Core Types
// ============================================================================

/// A node in the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `{ ... }` - members in source order, duplicates included.
    Object(Vec<Pair>),
    /// `[ ... ]`
    Array(Vec<Node>),
    /// Text between the quotes, verbatim.
    StringLit(String),
    /// Number lexeme, verbatim.
    NumberLit(String),
    BoolLit(bool),
    NullLit,
}

/// An object member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: Node,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: Node) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// How a node's literal value is represented.
///
/// Used to compare list elements: two elements are of the same type when
/// their representations match, regardless of what the text looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Repr {
    Text,
    Number,
    Boolean,
    Null,
    /// Objects and arrays carry no literal.
    Compound,
}

// ============================================================================
// Accessors
// ============================================================================

impl Node {
    /// Label used in the tree dump.
    pub fn label(&self) -> &'static str {
        match self {
            Node::Object(_) => "object",
            Node::Array(_) => "list",
            Node::StringLit(_) => "STRING",
            Node::NumberLit(_) => "NUMBER",
            Node::BoolLit(_) => "BOOLEAN",
            Node::NullLit => "NULL",
        }
    }

    /// The literal text of a scalar, `None` for objects and arrays.
    pub fn literal(&self) -> Option<&str> {
        match self {
            Node::StringLit(s) | Node::NumberLit(s) => Some(s),
            Node::BoolLit(true) => Some("true"),
            Node::BoolLit(false) => Some("false"),
            Node::NullLit => Some("null"),
            Node::Object(_) | Node::Array(_) => None,
        }
    }

    pub fn repr(&self) -> Repr {
        match self {
            Node::StringLit(_) => Repr::Text,
            Node::NumberLit(_) => Repr::Number,
            Node::BoolLit(_) => Repr::Boolean,
            Node::NullLit => Repr::Null,
            Node::Object(_) | Node::Array(_) => Repr::Compound,
        }
    }

    pub fn as_object(&self) -> Option<&[Pair]> {
        match self {
            Node::Object(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::StringLit(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::BoolLit(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::NullLit)
    }

    /// First member with the given key, if this is an object.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object()?
            .iter()
            .find(|pair| pair.key == key)
            .map(|pair| &pair.value)
    }

    /// Element at `index`, if this is an array.
    pub fn index(&self, index: usize) -> Option<&Node> {
        self.as_array()?.get(index)
    }

    /// Keys of an object in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.as_object()
            .unwrap_or(&[])
            .iter()
            .map(|pair| pair.key.as_str())
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Node::Object(pairs) => pairs.iter().map(|p| p.value.node_count()).sum(),
            Node::Array(items) => items.iter().map(Node::node_count).sum(),
            _ => 0,
        }
    }

    /// Deepest object/array nesting in this subtree. Scalars are depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Object(pairs) => 1 + pairs.iter().map(|p| p.value.depth()).max().unwrap_or(0),
            Node::Array(items) => 1 + items.iter().map(Node::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

// ============================================================================
// Tree dump
// ============================================================================

/// Indented text dump, one tab per level.
///
/// Objects and arrays are framed by their bracket lines; each member is a
/// `key` line followed by a `value` line.
///
/// ```text
/// object
///     {
///     key
///         STRING: a
///     value
///         NUMBER: 1
///     }
/// ```
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_level(f, 0)
    }
}

impl Node {
    fn write_level(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        write_line(f, level, self.label(), self.literal())?;
        match self {
            Node::Object(pairs) => {
                write_line(f, level + 1, "{", None)?;
                for pair in pairs {
                    write_line(f, level + 1, "key", None)?;
                    write_line(f, level + 2, "STRING", Some(&pair.key))?;
                    write_line(f, level + 1, "value", None)?;
                    pair.value.write_level(f, level + 2)?;
                }
                write_line(f, level + 1, "}", None)
            }
            Node::Array(items) => {
                write_line(f, level + 1, "[", None)?;
                for item in items {
                    item.write_level(f, level + 1)?;
                }
                write_line(f, level + 1, "]", None)
            }
            _ => Ok(()),
        }
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, level: usize, label: &str, value: Option<&str>) -> fmt::Result {
    for _ in 0..level {
        f.write_str("\t")?;
    }
    f.write_str(label)?;
    if let Some(value) = value {
        write!(f, ": {}", value)?;
    }
    f.write_str("\n")
}

// ============================================================================
// Tests
// ============================================================================
