//! FILENAME: grid-model/src/error.rs

use crate::coord::Span;
use crate::label::Axis;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("{axis} labels are not contiguous at the first level: {label} reappears at position {position}")]
    NonContiguousIndex {
        axis: Axis,
        label: String,
        position: usize,
    },

    #[error("{axis} labels are not unique: {key} appears more than once")]
    DuplicateLabel { axis: Axis, key: String },

    #[error("{axis} label tuples have mixed arity: expected {expected}, found {found} at position {position}")]
    RaggedLabels {
        axis: Axis,
        expected: usize,
        found: usize,
        position: usize,
    },

    #[error("Cell grid is {rows}x{cols} but the labels describe {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Only one of the per-cell and per-column style lookups may be set")]
    ConflictingStyleSources,

    #[error("Internal layout invariant violated: two entries resolved to {span}")]
    InvariantViolation { span: Span },

    #[error("Cell ({row}, {col}) falls outside the addressable grid")]
    CoordinateOverflow { row: i64, col: i64 },

    #[error("Unknown orientation '{0}' (expected vertical or horizontal)")]
    UnknownOrientation(String),

    #[error("Invalid options: {0}")]
    Config(#[from] serde_json::Error),
}
