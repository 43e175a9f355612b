//! FILENAME: layout-engine/src/view.rs
//! Resolved layout of one table.
//!
//! A `ResolvedTable` keeps its model and, parallel to it, the absolute span
//! of the corner label, every header node, every index node and every data
//! cell. A data cell holding a nested table carries that table's own
//! resolved layout so later stages can recurse into it.

use std::sync::Arc;
use grid_model::{CellCoord, NodeData, Span, TableModel};

// ============================================================================
// DATA CELLS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedCell {
    Leaf(Span),
    /// `span` is the whole outer cell; `table` starts at its top-left corner.
    Nested { span: Span, table: Box<ResolvedTable> },
}

impl ResolvedCell {
    pub fn span(&self) -> Span {
        match self {
            ResolvedCell::Leaf(span) => *span,
            ResolvedCell::Nested { span, .. } => *span,
        }
    }

    pub fn as_nested(&self) -> Option<&ResolvedTable> {
        match self {
            ResolvedCell::Nested { table, .. } => Some(table),
            ResolvedCell::Leaf(_) => None,
        }
    }
}

// ============================================================================
// RESOLVED TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTable {
    pub(crate) model: Arc<TableModel>,
    pub(crate) origin: CellCoord,
    pub(crate) nesting_level: u32,
    pub(crate) corner: Option<Span>,
    pub(crate) header: Option<NodeData<Span>>,
    pub(crate) index: Option<NodeData<Span>>,
    pub(crate) cells: Vec<Vec<ResolvedCell>>,
    pub(crate) height: u32,
    pub(crate) width: u32,
}

impl ResolvedTable {
    pub fn model(&self) -> &TableModel {
        &self.model
    }

    /// Top-left corner of the table, labels included.
    pub fn origin(&self) -> CellCoord {
        self.origin
    }

    /// 0 for a top-level table, +1 per table-in-cell embedding.
    pub fn nesting_level(&self) -> u32 {
        self.nesting_level
    }

    /// Span of the label above the row index, present only when both the
    /// header and the index are shown.
    pub fn corner(&self) -> Option<Span> {
        self.corner
    }

    /// Spans of the column header nodes, indexed like the column tree.
    /// `None` when column labels are hidden.
    pub fn header(&self) -> Option<&NodeData<Span>> {
        self.header.as_ref()
    }

    /// Spans of the row index nodes, indexed like the row tree.
    pub fn index(&self) -> Option<&NodeData<Span>> {
        self.index.as_ref()
    }

    pub fn cells(&self) -> &[Vec<ResolvedCell>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&ResolvedCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// First data cell, just below the header and right of the index.
    pub fn data_origin(&self) -> CellCoord {
        (
            self.origin.0.saturating_add(self.model.header_depth()),
            self.origin.1.saturating_add(self.model.index_depth()),
        )
    }
}
