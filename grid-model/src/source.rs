//! FILENAME: grid-model/src/source.rs
//! PURPOSE: Builds a `TableModel` from labels plus lookup callbacks.
//! CONTEXT: Callers describe a table as a pair of label sequences and a set of
//! functions: one producing each data cell's content (a value or a whole
//! nested table), optional functions producing styles, and optional functions
//! producing the text and style of header, index and corner cells.
//!
//! Styles come either from a per-cell function or a per-column function,
//! never both.

use std::sync::Arc;
use crate::error::LayoutError;
use crate::label::{Axis, LabelKey, Labels};
use crate::style::Style;
use crate::table::{Cell, StyledValue, TableModel, TableOptions};
use crate::tree::{LabelNode, LabelTree};
use crate::value::Value;

/// What a data lookup returns for one (row, column) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Value(Value),
    Table(TableModel),
}

impl From<Value> for CellContent {
    fn from(value: Value) -> Self {
        CellContent::Value(value)
    }
}

impl From<TableModel> for CellContent {
    fn from(table: TableModel) -> Self {
        CellContent::Table(table)
    }
}

impl From<f64> for CellContent {
    fn from(value: f64) -> Self {
        CellContent::Value(value.into())
    }
}

impl From<i64> for CellContent {
    fn from(value: i64) -> Self {
        CellContent::Value(value.into())
    }
}

impl From<&str> for CellContent {
    fn from(value: &str) -> Self {
        CellContent::Value(value.into())
    }
}

impl From<String> for CellContent {
    fn from(value: String) -> Self {
        CellContent::Value(value.into())
    }
}

impl From<bool> for CellContent {
    fn from(value: bool) -> Self {
        CellContent::Value(value.into())
    }
}

type DataValueFn<'a> = Box<dyn Fn(&LabelKey, &LabelKey) -> CellContent + 'a>;
type DataStyleFn<'a> = Box<dyn Fn(&LabelKey, &LabelKey) -> Style + 'a>;
type ColumnStyleFn<'a> = Box<dyn Fn(&LabelKey) -> Style + 'a>;
type NodeValueFn<'a> = Box<dyn Fn(&LabelNode) -> Value + 'a>;
type NodeStyleFn<'a> = Box<dyn Fn(&LabelNode) -> Style + 'a>;

pub struct TableSource<'a> {
    rows: Labels,
    columns: Labels,
    data_value: DataValueFn<'a>,
    data_style: Option<DataStyleFn<'a>>,
    column_style: Option<ColumnStyleFn<'a>>,
    header_value: Option<NodeValueFn<'a>>,
    header_style: Option<NodeStyleFn<'a>>,
    index_value: Option<NodeValueFn<'a>>,
    index_style: Option<NodeStyleFn<'a>>,
    corner: StyledValue,
    options: TableOptions,
}

impl<'a> TableSource<'a> {
    /// `data_value` is called with the full row key and full column key of
    /// every data cell, in row-major order.
    pub fn new<F, C>(rows: Labels, columns: Labels, data_value: F) -> Self
    where
        F: Fn(&LabelKey, &LabelKey) -> C + 'a,
        C: Into<CellContent>,
    {
        TableSource {
            rows,
            columns,
            data_value: Box::new(move |r: &LabelKey, c: &LabelKey| data_value(r, c).into()),
            data_style: None,
            column_style: None,
            header_value: None,
            header_style: None,
            index_value: None,
            index_style: None,
            corner: StyledValue::default(),
            options: TableOptions::default(),
        }
    }

    pub fn with_data_style(mut self, f: impl Fn(&LabelKey, &LabelKey) -> Style + 'a) -> Self {
        self.data_style = Some(Box::new(f));
        self
    }

    /// One style for every cell of a column. Evaluated once per column.
    pub fn with_column_style(mut self, f: impl Fn(&LabelKey) -> Style + 'a) -> Self {
        self.column_style = Some(Box::new(f));
        self
    }

    pub fn with_header_value(mut self, f: impl Fn(&LabelNode) -> Value + 'a) -> Self {
        self.header_value = Some(Box::new(f));
        self
    }

    pub fn with_header_style(mut self, f: impl Fn(&LabelNode) -> Style + 'a) -> Self {
        self.header_style = Some(Box::new(f));
        self
    }

    pub fn with_index_value(mut self, f: impl Fn(&LabelNode) -> Value + 'a) -> Self {
        self.index_value = Some(Box::new(f));
        self
    }

    pub fn with_index_style(mut self, f: impl Fn(&LabelNode) -> Style + 'a) -> Self {
        self.index_style = Some(Box::new(f));
        self
    }

    pub fn with_corner(mut self, value: impl Into<Value>, style: Style) -> Self {
        self.corner = StyledValue::new(value, style);
        self
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<TableModel, LayoutError> {
        if self.data_style.is_some() && self.column_style.is_some() {
            return Err(LayoutError::ConflictingStyleSources);
        }

        let column_tree = LabelTree::build(Axis::Columns, &self.columns)?;
        let row_tree = LabelTree::build(Axis::Rows, &self.rows)?;

        let column_keys: Vec<&LabelKey> = column_tree
            .leaves()
            .into_iter()
            .map(|id| &column_tree.node(id).key)
            .collect();
        let column_styles: Option<Vec<Style>> = self
            .column_style
            .as_ref()
            .map(|f| column_keys.iter().map(|key| f(key)).collect());

        let mut cells = Vec::with_capacity(row_tree.leaf_count());
        for row_id in row_tree.leaves() {
            let row_key = &row_tree.node(row_id).key;
            let mut row = Vec::with_capacity(column_keys.len());
            for (col, column_key) in column_keys.iter().enumerate() {
                let cell = match (self.data_value)(row_key, column_key) {
                    CellContent::Table(inner) => Cell::Nested(Arc::new(inner)),
                    CellContent::Value(value) => {
                        let style = match (&self.data_style, &column_styles) {
                            (Some(f), _) => f(row_key, column_key),
                            (None, Some(styles)) => styles[col].clone(),
                            (None, None) => Style::new(),
                        };
                        Cell::Leaf { value, style }
                    }
                };
                row.push(cell);
            }
            cells.push(row);
        }

        let header_value = self.header_value;
        let header_style = self.header_style;
        let index_value = self.index_value;
        let index_style = self.index_style;

        Ok(TableModel::from_trees(column_tree, row_tree, cells)?
            .with_header_labels(|node| label_cell(node, header_value.as_deref(), header_style.as_deref()))
            .with_index_labels(|node| label_cell(node, index_value.as_deref(), index_style.as_deref()))
            .with_corner(self.corner)
            .with_options(self.options))
    }
}

fn label_cell(
    node: &LabelNode,
    value: Option<&(dyn Fn(&LabelNode) -> Value + '_)>,
    style: Option<&(dyn Fn(&LabelNode) -> Style + '_)>,
) -> StyledValue {
    StyledValue {
        value: value.map_or_else(|| Value::from(&node.value), |f| f(node)),
        style: style.map_or_else(Style::new, |f| f(node)),
    }
}
