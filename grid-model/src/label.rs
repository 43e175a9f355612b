//! FILENAME: grid-model/src/label.rs
//! PURPOSE: Row and column labels as supplied by the table source.
//! CONTEXT: A label is one component of a (possibly multi-level) index.
//! A `Labels` sequence is the declared order of one axis; nothing in the
//! compositor ever reorders it.

use std::fmt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single label value. Comparable and hashable so it can key lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Text(s) => write!(f, "{}", s),
            Label::Integer(i) => write!(f, "{}", i),
            Label::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Integer(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Integer(value as i64)
    }
}

impl From<bool> for Label {
    fn from(value: bool) -> Self {
        Label::Boolean(value)
    }
}

/// Ancestor values plus the node's own value, outermost level first.
pub type LabelKey = SmallVec<[Label; 4]>;

/// Renders a composite key as `(a, 1)` for messages and logs.
pub fn key_to_string(key: &[Label]) -> String {
    let parts: Vec<String> = key.iter().map(|l| l.to_string()).collect();
    format!("({})", parts.join(", "))
}

/// Which side of a table a label sequence describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Rows,
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => write!(f, "Row"),
            Axis::Columns => write!(f, "Column"),
        }
    }
}

/// An ordered label sequence for one axis.
/// Every entry is a tuple with one component per level; a flat sequence is
/// simply the one-level case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    levels: usize,
    tuples: Vec<LabelKey>,
}

impl Labels {
    /// A single-level sequence.
    pub fn flat<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        Labels {
            levels: 1,
            tuples: labels
                .into_iter()
                .map(|l| {
                    let mut key = LabelKey::new();
                    key.push(l.into());
                    key
                })
                .collect(),
        }
    }

    /// A multi-level sequence. The level count is taken from the first tuple;
    /// tuples of a different arity are rejected when the tree is built.
    pub fn hierarchical<I, T, L>(tuples: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let tuples: Vec<LabelKey> = tuples
            .into_iter()
            .map(|t| t.into_iter().map(Into::into).collect())
            .collect();
        let levels = tuples.first().map(|t| t.len()).unwrap_or(1).max(1);
        Labels { levels, tuples }
    }

    /// An empty sequence that still declares `levels` index levels.
    pub fn empty(levels: usize) -> Self {
        Labels {
            levels: levels.max(1),
            tuples: Vec::new(),
        }
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn tuples(&self) -> &[LabelKey] {
        &self.tuples
    }
}
