//! FILENAME: layout-engine/src/shift.rs
//! PURPOSE: Rigid translation of a resolved table.
//! CONTEXT: Shifting never mutates its input. The result shares the
//! immutable model but owns fresh spans, so one resolved table can be placed
//! at several offsets independently.

use grid_model::{LayoutError, NodeData, Span};
use crate::view::{ResolvedCell, ResolvedTable};

type SpanMap<'a> = &'a dyn Fn(Span) -> Result<Span, LayoutError>;

impl ResolvedTable {
    /// Returns a copy moved `d_row` rows down and `d_col` columns right,
    /// nested tables included. Fails with `CoordinateOverflow` if any span
    /// would leave the `u32` grid.
    pub fn shifted(&self, d_row: u32, d_col: u32) -> Result<ResolvedTable, LayoutError> {
        self.translate(&|span: Span| span.shifted(d_row, d_col))
    }

    /// Returns a copy whose top-left corner is `(row, col)`.
    pub fn relocated(&self, row: u32, col: u32) -> Result<ResolvedTable, LayoutError> {
        let from = self.origin;
        self.translate(&|span: Span| span.rebased(from, (row, col)))
    }

    fn translate(&self, f: SpanMap<'_>) -> Result<ResolvedTable, LayoutError> {
        let origin = f(Span::cell(self.origin.0, self.origin.1))?.start();
        let nodes = |spans: &Option<NodeData<Span>>| {
            spans.as_ref().map(|spans| spans.try_map(|s| f(*s))).transpose()
        };
        let cells = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| -> Result<ResolvedCell, LayoutError> {
                        Ok(match cell {
                            ResolvedCell::Leaf(span) => ResolvedCell::Leaf(f(*span)?),
                            ResolvedCell::Nested { span, table } => ResolvedCell::Nested {
                                span: f(*span)?,
                                table: Box::new(table.translate(f)?),
                            },
                        })
                    })
                    .collect::<Result<Vec<_>, LayoutError>>()
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        Ok(ResolvedTable {
            model: self.model.clone(),
            origin,
            nesting_level: self.nesting_level,
            corner: self.corner.map(f).transpose()?,
            header: nodes(&self.header)?,
            index: nodes(&self.index)?,
            cells,
            height: self.height,
            width: self.width,
        })
    }
}

/// Every span a resolved table owns, in corner/header/index/data order.
/// Nested tables contribute their own spans after their outer cell.
pub fn all_spans(table: &ResolvedTable) -> Vec<Span> {
    let mut spans: Vec<Span> = table.corner.into_iter().collect();
    let mut push_nodes = |nodes: &Option<NodeData<Span>>| {
        if let Some(nodes) = nodes {
            spans.extend(nodes.iter().map(|(_, s)| *s));
        }
    };
    push_nodes(&table.header);
    push_nodes(&table.index);
    for cell in table.cells.iter().flatten() {
        spans.push(cell.span());
        if let Some(inner) = cell.as_nested() {
            spans.extend(all_spans(inner));
        }
    }
    spans
}
