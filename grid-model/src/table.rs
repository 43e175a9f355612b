//! FILENAME: grid-model/src/table.rs
//! PURPOSE: The resolved input to the layout engine.
//! CONTEXT: A `TableModel` pairs a column label tree and a row label tree with
//! a row-major grid of cells. A cell is either a scalar with its style or a
//! whole nested table. Header and index nodes carry their own display value
//! and style in arrays parallel to the trees.
//!
//! Models are immutable once built. Nested tables are held behind `Arc` so a
//! resolved layout can point back at its model without copying cell data.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::error::LayoutError;
use crate::label::{Axis, Labels};
use crate::style::Style;
use crate::tree::{LabelNode, LabelTree, NodeData};
use crate::value::Value;

/// A value together with the style it is rendered with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledValue {
    pub value: Value,
    pub style: Style,
}

impl StyledValue {
    pub fn new(value: impl Into<Value>, style: Style) -> Self {
        StyledValue {
            value: value.into(),
            style,
        }
    }
}

/// One data cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Leaf { value: Value, style: Style },
    Nested(Arc<TableModel>),
}

impl Cell {
    pub fn leaf(value: impl Into<Value>, style: Style) -> Self {
        Cell::Leaf {
            value: value.into(),
            style,
        }
    }

    pub fn nested(table: TableModel) -> Self {
        Cell::Nested(Arc::new(table))
    }

    pub fn as_nested(&self) -> Option<&TableModel> {
        match self {
            Cell::Nested(inner) => Some(inner),
            Cell::Leaf { .. } => None,
        }
    }
}

/// Per-table display options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TableOptions {
    /// Do not render the row index (and skip its uniqueness check).
    pub hide_row_labels: bool,
    /// Do not render the column header (and skip its uniqueness check).
    pub hide_column_labels: bool,
}

impl TableOptions {
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    column_tree: LabelTree,
    row_tree: LabelTree,
    header: NodeData<StyledValue>,
    index: NodeData<StyledValue>,
    cells: Vec<Vec<Cell>>,
    corner: StyledValue,
    options: TableOptions,
}

impl TableModel {
    /// Builds both label trees and checks the grid against them.
    /// Header and index nodes display their own label with an empty style.
    pub fn new(columns: &Labels, rows: &Labels, cells: Vec<Vec<Cell>>) -> Result<Self, LayoutError> {
        let column_tree = LabelTree::build(Axis::Columns, columns)?;
        let row_tree = LabelTree::build(Axis::Rows, rows)?;
        TableModel::from_trees(column_tree, row_tree, cells)
    }

    pub fn from_trees(
        column_tree: LabelTree,
        row_tree: LabelTree,
        cells: Vec<Vec<Cell>>,
    ) -> Result<Self, LayoutError> {
        let expected_rows = row_tree.leaf_count();
        let expected_cols = column_tree.leaf_count();

        let bad_row = cells.iter().find(|row| row.len() != expected_cols);
        if cells.len() != expected_rows || bad_row.is_some() {
            return Err(LayoutError::ShapeMismatch {
                expected_rows,
                expected_cols,
                rows: cells.len(),
                cols: bad_row.or(cells.first()).map(|r| r.len()).unwrap_or(0),
            });
        }

        let header = column_tree.map_level_order(|_, node| default_label(node));
        let index = row_tree.map_level_order(|_, node| default_label(node));

        Ok(TableModel {
            column_tree,
            row_tree,
            header,
            index,
            cells,
            corner: StyledValue::default(),
            options: TableOptions::default(),
        })
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the label shown above the row index.
    pub fn with_corner(mut self, corner: StyledValue) -> Self {
        self.corner = corner;
        self
    }

    pub fn with_header_labels(mut self, f: impl FnMut(&LabelNode) -> StyledValue) -> Self {
        self.header = decorate(&self.column_tree, f);
        self
    }

    pub fn with_index_labels(mut self, f: impl FnMut(&LabelNode) -> StyledValue) -> Self {
        self.index = decorate(&self.row_tree, f);
        self
    }

    pub fn column_tree(&self) -> &LabelTree {
        &self.column_tree
    }

    pub fn row_tree(&self) -> &LabelTree {
        &self.row_tree
    }

    /// Display value and style of every column header node.
    pub fn header(&self) -> &NodeData<StyledValue> {
        &self.header
    }

    /// Display value and style of every row index node.
    pub fn index(&self) -> &NodeData<StyledValue> {
        &self.index
    }

    pub fn corner(&self) -> &StyledValue {
        &self.corner
    }

    pub fn options(&self) -> TableOptions {
        self.options
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn col_count(&self) -> usize {
        self.column_tree.leaf_count()
    }

    /// Rows occupied by the column header (0 when hidden).
    pub fn header_depth(&self) -> u32 {
        if self.options.hide_column_labels {
            0
        } else {
            self.column_tree.levels() as u32
        }
    }

    /// Columns occupied by the row index (0 when hidden).
    pub fn index_depth(&self) -> u32 {
        if self.options.hide_row_labels {
            0
        } else {
            self.row_tree.levels() as u32
        }
    }

    /// Checks that every visible axis of this table and of every table
    /// nested in it has unique labels.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut pending: Vec<&TableModel> = vec![self];
        while let Some(table) = pending.pop() {
            if !table.options.hide_column_labels {
                table.column_tree.check_unique_leaves()?;
            }
            if !table.options.hide_row_labels {
                table.row_tree.check_unique_leaves()?;
            }
            pending.extend(table.cells.iter().flatten().filter_map(Cell::as_nested));
        }
        Ok(())
    }
}

fn default_label(node: &LabelNode) -> StyledValue {
    StyledValue::new(Value::from(&node.value), Style::new())
}

fn decorate(tree: &LabelTree, mut f: impl FnMut(&LabelNode) -> StyledValue) -> NodeData<StyledValue> {
    tree.map_level_order(|_, node| f(node))
}
